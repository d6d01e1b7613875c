//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init, status, reset) and shared utilities (open_db)
//! - `import` - CSV import command
//! - `insights` - Insight scoring command
//! - `profiles` - Profile management commands (onboard, list, set-currency, delete)
//! - `records` - Finance record commands (add, list, edit, delete)
//! - `serve` - Web server command
//! - `summary` - Totals and ratios command

pub mod core;
pub mod import;
pub mod insights;
pub mod profiles;
pub mod records;
pub mod serve;
pub mod summary;

// Re-export command functions for main.rs
pub use core::*;
pub use import::*;
pub use insights::*;
pub use profiles::*;
pub use records::*;
pub use serve::*;
pub use summary::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
