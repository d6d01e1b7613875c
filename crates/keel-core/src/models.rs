//! Domain models for Keel

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The four kinds of financial position a record can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Inflow,
    Outflow,
    Asset,
    Liability,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inflow => "inflow",
            Self::Outflow => "outflow",
            Self::Asset => "asset",
            Self::Liability => "liability",
        }
    }

    /// All categories, in reporting order
    pub fn all() -> [Category; 4] {
        [Self::Inflow, Self::Outflow, Self::Asset, Self::Liability]
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inflow" | "inflows" | "income" => Ok(Self::Inflow),
            "outflow" | "outflows" | "expense" => Ok(Self::Outflow),
            "asset" | "assets" => Ok(Self::Asset),
            "liability" | "liabilities" => Ok(Self::Liability),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supported currencies
///
/// `Unknown` is the lossy fallback for codes this version does not map.
/// Conversion passes such amounts through unchanged (see [`crate::currency`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Huf,
    Unknown,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Huf => "HUF",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Display symbol for dashboards and CLI tables
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Huf => "Ft",
            Self::Unknown => "",
        }
    }

    /// Currencies a user can actually pick
    pub fn all() -> [Currency; 3] {
        [Self::Usd, Self::Eur, Self::Huf]
    }

    /// Lossy mapping for stored codes. Unrecognized text becomes `Unknown`
    /// rather than failing the whole row fetch.
    pub fn from_db_code(s: &str) -> Currency {
        s.parse().unwrap_or(Self::Unknown)
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "HUF" => Ok(Self::Huf),
            _ => Err(format!("Unknown currency: {}", s)),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record source - how it was created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// Manually entered (form or CLI)
    #[default]
    Manual,
    /// Imported from CSV
    Import,
}

impl RecordSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Import => "import",
        }
    }
}

impl std::str::FromStr for RecordSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "import" => Ok(Self::Import),
            _ => Err(format!("Unknown record source: {}", s)),
        }
    }
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single financial position record
///
/// Amounts are magnitudes in `currency`; the category carries the meaning,
/// so an outflow of 50 is stored as 50, not -50.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceRecord {
    pub id: i64,
    pub profile_id: i64,
    pub category: Category,
    pub label: String,
    pub amount: f64,
    pub currency: Currency,
    pub source: RecordSource,
    /// Dedup hash for imported rows (None for manual entries)
    pub import_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A finance record ready for insertion
#[derive(Debug, Clone)]
pub struct NewFinanceRecord {
    pub category: Category,
    pub label: String,
    pub amount: f64,
    pub currency: Currency,
    pub source: RecordSource,
    pub import_hash: Option<String>,
}

/// A tracked user profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    /// Preferred reporting currency for totals, insights, and ratios
    pub currency: Currency,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A profile ready for insertion
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub username: String,
    pub display_name: Option<String>,
    pub currency: Currency,
}
