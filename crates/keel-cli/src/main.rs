//! Keel CLI - Personal finance tracker
//!
//! Usage:
//!   keel init                       Initialize database
//!   keel onboard --username alice   Create a profile
//!   keel import alice sheet.csv     Import finance records
//!   keel insights alice             Score the financial position
//!   keel serve --port 3000          Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Onboard {
            username,
            name,
            currency,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_onboard(&db, &username, name.as_deref(), currency.as_deref())
        }
        Commands::Profiles { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(ProfilesAction::List) => commands::cmd_profiles_list(&db),
                Some(ProfilesAction::SetCurrency { user, currency }) => {
                    commands::cmd_profiles_set_currency(&db, &user, &currency)
                }
                Some(ProfilesAction::Delete { user, yes }) => {
                    commands::cmd_profiles_delete(&db, &user, yes)
                }
            }
        }
        Commands::Add {
            user,
            category,
            label,
            amount,
            currency,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_add(&db, &user, &category, &label, amount, currency.as_deref())
        }
        Commands::Records {
            user,
            category,
            limit,
            action,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                Some(RecordsAction::Edit { id, label, amount }) => {
                    commands::cmd_records_edit(&db, id, label.as_deref(), amount)
                }
                Some(RecordsAction::Delete { id }) => commands::cmd_records_delete(&db, id),
                None => {
                    let user = user.ok_or_else(|| {
                        anyhow::anyhow!("Specify a profile: keel records <user>")
                    })?;
                    commands::cmd_records_list(&db, &user, category.as_deref(), limit)
                }
            }
        }
        Commands::Import { user, file } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_import(&db, &user, &file)
        }
        Commands::Insights {
            user,
            category,
            json,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_insights(&db, &user, category.as_deref(), json)
        }
        Commands::Summary {
            user,
            currency,
            json,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_summary(&db, &user, currency.as_deref(), json)
        }
        Commands::Status => commands::cmd_status(&cli.db, cli.no_encrypt),
        Commands::Reset { yes } => commands::cmd_reset(&cli.db, yes, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            no_auth,
            static_dir,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                cli.no_encrypt,
                static_dir.as_deref(),
            )
            .await
        }
    }
}
