//! Keel Core Library
//!
//! Shared functionality for the Keel personal finance tracker:
//! - Database access and migrations
//! - Profile and finance record storage
//! - CSV import with duplicate detection
//! - Currency conversion for cross-currency aggregation
//! - Pluggable insight analyzers for the four position categories
//! - Financial ratio and summary computation

pub mod currency;
pub mod db;
pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod ratios;
pub mod stats;

pub use currency::convert;
pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use import::{import_records, ImportSummary};
pub use insights::{
    AnalysisContext, Insight, InsightCategory, InsightEngine, InsightReport, Severity,
};
pub use models::{
    Category, Currency, FinanceRecord, NewFinanceRecord, NewProfile, Profile, RecordSource,
};
pub use ratios::{calculate_ratios, FinancialRatios, PositionTotals};
pub use stats::{build_summary, category_total, collate_total, AggregateTotal, FinancialSummary};
