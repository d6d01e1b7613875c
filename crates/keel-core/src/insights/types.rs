//! Core types for the insight engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Category;

/// What a report is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Inflow,
    Outflow,
    Asset,
    Liability,
    /// Cross-category notices not tied to one record category
    General,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::Inflow => "inflow",
            InsightCategory::Outflow => "outflow",
            InsightCategory::Asset => "asset",
            InsightCategory::Liability => "liability",
            InsightCategory::General => "general",
        }
    }
}

impl From<Category> for InsightCategory {
    fn from(category: Category) -> Self {
        match category {
            Category::Inflow => InsightCategory::Inflow,
            Category::Outflow => InsightCategory::Outflow,
            Category::Asset => InsightCategory::Asset,
            Category::Liability => InsightCategory::Liability,
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("general") {
            return Ok(InsightCategory::General);
        }
        s.parse::<Category>()
            .map(InsightCategory::from)
            .map_err(|_| format!("Unknown insight category: {}", s))
    }
}

/// Severity of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Healthy or informational - no action needed
    Neutral,
    /// Worth attention but not urgent
    Warning,
    /// Should be addressed
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Neutral => "neutral",
            Severity::Warning => "warning",
            Severity::Severe => "severe",
        }
    }

    /// Numeric level for sorting and API payloads (higher = more urgent)
    pub fn level(&self) -> u8 {
        match self {
            Severity::Neutral => 0,
            Severity::Warning => 1,
            Severity::Severe => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neutral" => Ok(Severity::Neutral),
            "warning" => Ok(Severity::Warning),
            "severe" => Ok(Severity::Severe),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A scored advisory produced by an insight analyzer
///
/// Reports are computed on demand and never persisted; a fresh request
/// always reflects the current record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightReport {
    /// Which part of the finances this report covers
    pub category: InsightCategory,
    /// How urgent the advisory is
    pub severity: Severity,
    /// Urgency score from 0 (calm) to 100 (act now)
    ///
    /// Scored independently of `severity`; a neutral report can still
    /// carry a mid-range level when the data is thin.
    pub warning_level: u8,
    /// Human-readable advisory text
    pub message: String,
}
