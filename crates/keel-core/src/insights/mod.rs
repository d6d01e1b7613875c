//! Insight engine - per-category financial scoring
//!
//! Each analyzer looks at one slice of a profile's records and produces a
//! scored advisory: a severity, a 0-100 warning level, and a short message
//! a dashboard can show as-is.
//!
//! ## Built-in analyzers
//!
//! - **Income Streams** - liquidity and concentration of inflows
//! - **Outflow Structure** - how spending spreads across labels
//! - **Asset Diversification** - how spread out the asset base is
//! - **Liability Concentration** - single-obligation repayment risk
//!
//! ## Usage
//!
//! ```rust,ignore
//! use keel_core::insights::{AnalysisContext, InsightEngine};
//!
//! let engine = InsightEngine::new();
//! let ctx = AnalysisContext::new(&db, profile.id, profile.currency);
//! let reports = engine.analyze_all(&ctx)?;
//! ```

pub mod asset;
pub mod engine;
pub mod income_stream;
pub mod liability;
pub mod outflow;
pub mod types;

pub use asset::AssetInsight;
pub use engine::{AnalysisContext, Insight, InsightEngine};
pub use income_stream::IncomeStreamInsight;
pub use liability::LiabilityInsight;
pub use outflow::OutflowInsight;
pub use types::{InsightCategory, InsightReport, Severity};
