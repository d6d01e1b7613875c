//! Currency normalization
//!
//! Fixed conversion table over the supported currencies. Rates are part of
//! the application contract, not fetched from a live source, and they are
//! not mutually consistent (USD->EUR->USD != 1). Totals that mix currencies
//! are estimates for scoring, not accounting output.

use tracing::warn;

use crate::models::Currency;

/// Conversion rate for a currency pair, if one is mapped
fn rate(from: Currency, to: Currency) -> Option<f64> {
    use Currency::*;

    match (from, to) {
        (Usd, Eur) => Some(0.91),
        (Usd, Huf) => Some(357.0),
        (Eur, Usd) => Some(1.1),
        (Eur, Huf) => Some(392.0),
        (Huf, Usd) => Some(0.0028),
        (Huf, Eur) => Some(0.00255),
        _ => None,
    }
}

/// Convert an amount between currencies
///
/// Identity pairs return the amount untouched. Unmapped pairs (anything
/// involving [`Currency::Unknown`]) also return the amount untouched and
/// log a warning; a missing rate degrades the estimate rather than failing
/// the whole aggregation.
pub fn convert(amount: f64, from: Currency, to: Currency) -> f64 {
    if from == to {
        return amount;
    }

    match rate(from, to) {
        Some(r) => amount * r,
        None => {
            warn!(
                "No conversion rate from {} to {}, returning original amount",
                from, to
            );
            amount
        }
    }
}
