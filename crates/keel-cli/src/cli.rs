//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Keel - Track financial positions and score their health
#[derive(Parser)]
#[command(name = "keel")]
#[command(about = "Self-hosted personal finance tracker and advisor", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "keel.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set KEEL_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Onboard a new profile
    Onboard {
        /// Username (unique)
        #[arg(short, long)]
        username: String,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Preferred reporting currency: USD, EUR, HUF (default: USD)
        #[arg(short, long)]
        currency: Option<String>,
    },

    /// Manage profiles (list, set-currency, delete)
    Profiles {
        #[command(subcommand)]
        action: Option<ProfilesAction>,
    },

    /// Add a single finance record
    Add {
        /// Profile id or username
        user: String,

        /// Category: inflow, outflow, asset, liability
        category: String,

        /// Record label (e.g., "Salary", "Rent")
        label: String,

        /// Amount (positive magnitude)
        amount: f64,

        /// Currency (defaults to the profile's currency)
        #[arg(long)]
        currency: Option<String>,
    },

    /// List and manage finance records
    Records {
        /// Profile id or username (lists that profile's records)
        user: Option<String>,

        /// Filter by category: inflow, outflow, asset, liability
        #[arg(long)]
        category: Option<String>,

        /// Number of records to show
        #[arg(long, default_value = "50")]
        limit: usize,

        #[command(subcommand)]
        action: Option<RecordsAction>,
    },

    /// Import finance records from CSV
    Import {
        /// Profile id or username
        user: String,

        /// CSV file to import (category,label,amount[,currency])
        file: PathBuf,
    },

    /// Run the insight scorers and print reports
    Insights {
        /// Profile id or username
        user: String,

        /// Score a single category: inflow, outflow, asset, liability
        #[arg(long)]
        category: Option<String>,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show position totals and derived ratios
    Summary {
        /// Profile id or username
        user: String,

        /// Report in a different currency than the profile's
        #[arg(long)]
        currency: Option<String>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show database status (encryption, size, counts)
    Status,

    /// Clear all finance records and the audit log (profiles are kept)
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires a Bearer API key (KEEL_API_KEYS).
        #[arg(long)]
        no_auth: bool,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ProfilesAction {
    /// List all profiles
    List,

    /// Set the preferred reporting currency
    SetCurrency {
        /// Profile id or username
        user: String,
        /// New currency: USD, EUR, HUF
        currency: String,
    },

    /// Delete a profile and all of its records
    Delete {
        /// Profile id or username
        user: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum RecordsAction {
    /// Edit a record's label and/or amount
    Edit {
        /// Record ID
        id: i64,

        /// New label
        #[arg(long)]
        label: Option<String>,

        /// New amount
        #[arg(long)]
        amount: Option<f64>,
    },

    /// Delete a record
    Delete {
        /// Record ID
        id: i64,
    },
}
