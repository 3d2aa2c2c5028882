//! Asset allocation by risk tolerance

use serde::{Deserialize, Serialize};

use super::require_non_negative;
use crate::models::RiskTolerance;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSlice {
    pub asset_class: String,
    pub percent: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetAllocation {
    pub risk_tolerance: RiskTolerance,
    /// Only asset classes with a non-zero share.
    pub slices: Vec<AllocationSlice>,
}

impl AssetAllocation {
    pub fn percent_of(&self, asset_class: &str) -> f64 {
        self.slices
            .iter()
            .find(|s| s.asset_class == asset_class)
            .map(|s| s.percent)
            .unwrap_or(0.0)
    }
}

/// Equity / debt / gold / REITs / cash percentages.
fn model_portfolio(risk: RiskTolerance) -> [(&'static str, f64); 5] {
    match risk {
        RiskTolerance::Low => [("Equity", 30.0), ("Debt", 50.0), ("Gold", 10.0), ("REITs", 5.0), ("Cash", 5.0)],
        RiskTolerance::Medium => [("Equity", 60.0), ("Debt", 25.0), ("Gold", 10.0), ("REITs", 5.0), ("Cash", 0.0)],
        RiskTolerance::High => [("Equity", 80.0), ("Debt", 10.0), ("Gold", 5.0), ("REITs", 5.0), ("Cash", 0.0)],
    }
}

/// Splits `investable_amount` across asset classes for the given risk
/// appetite. Amounts are rounded to whole currency units.
pub fn recommend_allocation(risk: RiskTolerance, investable_amount: f64) -> Result<AssetAllocation> {
    let investable_amount = require_non_negative("investable amount", investable_amount)?;

    let slices = model_portfolio(risk)
        .into_iter()
        .filter(|(_, percent)| *percent > 0.0)
        .map(|(asset_class, percent)| AllocationSlice {
            asset_class: asset_class.to_string(),
            percent,
            amount: (investable_amount * percent / 100.0).round(),
        })
        .collect();

    Ok(AssetAllocation {
        risk_tolerance: risk,
        slices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolios_sum_to_hundred() {
        for risk in [RiskTolerance::Low, RiskTolerance::Medium, RiskTolerance::High] {
            let allocation = recommend_allocation(risk, 10_000.0).unwrap();
            let total: f64 = allocation.slices.iter().map(|s| s.percent).sum();
            assert_eq!(total, 100.0);
        }
    }

    #[test]
    fn test_medium_drops_cash() {
        let allocation = recommend_allocation(RiskTolerance::Medium, 20_000.0).unwrap();
        assert_eq!(allocation.slices.len(), 4);
        assert_eq!(allocation.percent_of("Equity"), 60.0);
        assert_eq!(allocation.percent_of("Cash"), 0.0);
        assert_eq!(allocation.slices[0].amount, 12_000.0);
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(recommend_allocation(RiskTolerance::High, -5.0).is_err());
    }
}
