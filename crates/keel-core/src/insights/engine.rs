//! Insight engine - orchestrates the per-category analyzers

use crate::db::Database;
use crate::error::{Error, Result};
use crate::models::Currency;

use super::types::{InsightCategory, InsightReport};
use super::{AssetInsight, IncomeStreamInsight, LiabilityInsight, OutflowInsight};

/// Context provided to insight analyzers
pub struct AnalysisContext<'a> {
    /// Database for querying finance records
    pub db: &'a Database,
    /// Profile whose records are analyzed
    pub profile_id: i64,
    /// Currency that mixed-currency totals are normalized into
    pub currency: Currency,
}

impl<'a> AnalysisContext<'a> {
    /// Create a new analysis context
    pub fn new(db: &'a Database, profile_id: i64, currency: Currency) -> Self {
        Self {
            db,
            profile_id,
            currency,
        }
    }
}

/// Trait for insight analyzers
///
/// Analyzers fetch what they need through the context and hand the numbers
/// to a pure scoring function, so the scoring math stays testable without
/// a database.
pub trait Insight: Send + Sync {
    /// Which category this analyzer reports on
    fn category(&self) -> InsightCategory;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze one profile and produce a report
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<InsightReport>;
}

/// The main insight engine that orchestrates analysis
pub struct InsightEngine {
    insights: Vec<Box<dyn Insight>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Create a new insight engine with the built-in analyzers
    pub fn new() -> Self {
        let mut engine = Self { insights: vec![] };

        // Register built-in insights
        engine.register(Box::new(IncomeStreamInsight::new()));
        engine.register(Box::new(OutflowInsight::new()));
        engine.register(Box::new(AssetInsight::new()));
        engine.register(Box::new(LiabilityInsight::new()));

        engine
    }

    /// Register an insight analyzer
    pub fn register(&mut self, insight: Box<dyn Insight>) {
        self.insights.push(insight);
    }

    /// Run all analyzers and collect the reports that could be computed
    ///
    /// An analyzer that fails (most commonly `InsufficientData` on a sparse
    /// profile) is skipped with a warning; the others still report.
    pub fn analyze_all(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<InsightReport>> {
        let mut reports = vec![];

        for insight in &self.insights {
            match insight.analyze(ctx) {
                Ok(report) => {
                    tracing::debug!(
                        insight = insight.category().as_str(),
                        warning_level = report.warning_level,
                        "Insight analysis complete"
                    );
                    reports.push(report);
                }
                Err(e) => {
                    tracing::warn!(
                        insight = insight.category().as_str(),
                        error = %e,
                        "Insight analysis failed"
                    );
                }
            }
        }

        // Sort by severity (highest first), then by warning level
        reports.sort_by(|a, b| {
            b.severity
                .level()
                .cmp(&a.severity.level())
                .then_with(|| b.warning_level.cmp(&a.warning_level))
        });

        Ok(reports)
    }

    /// Run the analyzer for a single category
    ///
    /// Unlike [`analyze_all`](Self::analyze_all), failures surface to the
    /// caller so an insufficient-data state can be reported distinctly.
    pub fn analyze_category(
        &self,
        ctx: &AnalysisContext<'_>,
        category: InsightCategory,
    ) -> Result<InsightReport> {
        let insight = self
            .insights
            .iter()
            .find(|i| i.category() == category)
            .ok_or_else(|| Error::NotFound(format!("no analyzer for category: {}", category)))?;

        insight.analyze(ctx)
    }

    /// Categories with a registered analyzer
    pub fn categories(&self) -> Vec<InsightCategory> {
        self.insights.iter().map(|i| i.category()).collect()
    }
}
