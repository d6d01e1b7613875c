//! HTTP request handlers organized by domain
//!
//! Each submodule contains handlers for a specific API area.

pub mod audit;
pub mod import;
pub mod insights;
pub mod profiles;
pub mod records;
pub mod summary;

// Re-export all handlers for use in router
pub use audit::*;
pub use import::*;
pub use insights::*;
pub use profiles::*;
pub use records::*;
pub use summary::*;
