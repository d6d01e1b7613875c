//! Derived financial ratios
//!
//! Pure arithmetic over position totals that are already in one common
//! currency. Every division is guarded; a zero denominator yields 0.0 for
//! that ratio rather than NaN or infinity.

use serde::Serialize;

/// Per-category totals in a common currency
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionTotals {
    pub inflow: f64,
    pub outflow: f64,
    pub assets: f64,
    pub liabilities: f64,
}

/// The derived ratio set
///
/// Ratios are percentages and may be negative (spending above income,
/// liabilities above assets). Only `health_score` is clamped to [0, 100].
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FinancialRatios {
    pub savings_ratio: f64,
    pub debt_to_asset: f64,
    pub liquidity_ratio: f64,
    pub net_worth: f64,
    pub health_score: f64,
}

/// Compute the ratio set for one set of totals
pub fn calculate_ratios(totals: &PositionTotals) -> FinancialRatios {
    let savings_ratio = if totals.inflow != 0.0 {
        (totals.inflow - totals.outflow) / totals.inflow * 100.0
    } else {
        0.0
    };

    let debt_to_asset = if totals.assets != 0.0 {
        totals.liabilities / totals.assets * 100.0
    } else {
        0.0
    };

    let liquidity_ratio = if totals.inflow != 0.0 {
        (totals.assets - totals.liabilities) / totals.inflow * 100.0
    } else {
        0.0
    };

    let net_worth = totals.assets - totals.liabilities;

    // Weighted blend of the three ratios, clamped to a 0-100 score
    let health_score = (savings_ratio * 0.4
        + (100.0 - debt_to_asset) * 0.3
        + liquidity_ratio * 0.3)
        .clamp(0.0, 100.0);

    FinancialRatios {
        savings_ratio,
        debt_to_asset,
        liquidity_ratio,
        net_worth,
        health_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_zero_inflow_guards() {
        let ratios = calculate_ratios(&PositionTotals {
            inflow: 0.0,
            outflow: 500.0,
            assets: 1000.0,
            liabilities: 200.0,
        });

        assert_eq!(ratios.savings_ratio, 0.0);
        assert_eq!(ratios.liquidity_ratio, 0.0);
        assert!(approx_eq(ratios.debt_to_asset, 20.0));
        assert!(ratios.savings_ratio.is_finite());
    }

    #[test]
    fn test_zero_assets_guard() {
        let ratios = calculate_ratios(&PositionTotals {
            inflow: 100.0,
            outflow: 0.0,
            assets: 0.0,
            liabilities: 5000.0,
        });

        assert_eq!(ratios.debt_to_asset, 0.0);
        assert!(approx_eq(ratios.net_worth, -5000.0));
    }

    #[test]
    fn test_typical_position() {
        let ratios = calculate_ratios(&PositionTotals {
            inflow: 4000.0,
            outflow: 3000.0,
            assets: 20000.0,
            liabilities: 5000.0,
        });

        assert!(approx_eq(ratios.savings_ratio, 25.0));
        assert!(approx_eq(ratios.debt_to_asset, 25.0));
        assert!(approx_eq(ratios.liquidity_ratio, 375.0));
        assert!(approx_eq(ratios.net_worth, 15000.0));
        // 25*0.4 + 75*0.3 + 375*0.3 = 145 before clamping
        assert_eq!(ratios.health_score, 100.0);
    }

    #[test]
    fn test_ratios_can_go_negative() {
        let ratios = calculate_ratios(&PositionTotals {
            inflow: 1000.0,
            outflow: 1500.0,
            assets: 100.0,
            liabilities: 9000.0,
        });

        assert!(ratios.savings_ratio < 0.0);
        assert!(ratios.liquidity_ratio < 0.0);
        assert!(approx_eq(ratios.net_worth, -8900.0));
    }

    #[test]
    fn test_health_score_clamped_for_extremes() {
        let bad = calculate_ratios(&PositionTotals {
            inflow: 1.0,
            outflow: 1_000_000.0,
            assets: 1.0,
            liabilities: 1_000_000.0,
        });
        let good = calculate_ratios(&PositionTotals {
            inflow: 1000.0,
            outflow: 0.0,
            assets: 1_000_000.0,
            liabilities: 0.0,
        });

        assert_eq!(bad.health_score, 0.0);
        assert_eq!(good.health_score, 100.0);
    }

    #[test]
    fn test_all_zero_position() {
        let ratios = calculate_ratios(&PositionTotals::default());

        assert_eq!(ratios.savings_ratio, 0.0);
        assert_eq!(ratios.debt_to_asset, 0.0);
        assert_eq!(ratios.liquidity_ratio, 0.0);
        assert_eq!(ratios.net_worth, 0.0);
        // 0*0.4 + (100-0)*0.3 + 0*0.3 = 30
        assert!(approx_eq(ratios.health_score, 30.0));
    }
}
