//! Financial calculators
//!
//! Every function here is pure and deterministic. Inputs are validated up
//! front so a bad value surfaces as `PlannerError::InvalidInput` instead of a
//! NaN or infinity leaking into the results.

pub mod allocation;
pub mod budget;
pub mod debt;
pub mod goals;
pub mod loan;
pub mod projection;
pub mod sip;
pub mod tax;

pub use allocation::{recommend_allocation, AssetAllocation};
pub use budget::{compare_budget, compute_budget_split, default_budget, BudgetVariance, AFTER_TAX_RATIO};
pub use debt::{rank_debts_by_strategy, simulate_payoff, summarize_debts, DebtPayoff, DebtSummary, PayoffPlan};
pub use goals::{assess_goal, GoalAssessment};
pub use loan::{compute_emi, EmiBreakdown};
pub use projection::{compare_scenarios, project_wealth, ProjectionPoint, ScenarioOutcome};
pub use sip::{compute_sip_future_value, SipProjection};
pub use tax::{compare_regimes, compute_tax, tax_saving_opportunities, RegimeComparison, TaxBreakdown, TaxSavingOpportunity};

use crate::error::PlannerError;
use crate::Result;

pub(crate) fn require_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlannerError::invalid(format!("{} must be a finite number, got {}", name, value)))
    }
}

pub(crate) fn require_non_negative(name: &str, value: f64) -> Result<f64> {
    let value = require_finite(name, value)?;
    if value < 0.0 {
        return Err(PlannerError::invalid(format!("{} must not be negative, got {}", name, value)));
    }
    Ok(value)
}

pub(crate) fn require_positive(name: &str, value: f64) -> Result<f64> {
    let value = require_finite(name, value)?;
    if value <= 0.0 {
        return Err(PlannerError::invalid(format!("{} must be greater than zero, got {}", name, value)));
    }
    Ok(value)
}

pub(crate) fn require_years(name: &str, years: u32) -> Result<u32> {
    if years == 0 {
        return Err(PlannerError::invalid(format!("{} must be at least one year", name)));
    }
    Ok(years)
}

/// Rejects a computed figure that overflowed.
pub(crate) fn finite_result(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PlannerError::invalid(format!("{} is out of range for these inputs", name)))
    }
}

/// Converts an annual percentage rate into a monthly fraction.
pub(crate) fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validators() {
        assert!(require_non_negative("income", 0.0).is_ok());
        assert!(require_non_negative("income", -1.0).is_err());
        assert!(require_non_negative("income", f64::NAN).is_err());
        assert!(require_positive("income", 0.0).is_err());
        assert!(require_finite("rate", f64::INFINITY).is_err());
        assert!(require_years("tenure", 0).is_err());
        assert_eq!(require_years("tenure", 5).unwrap(), 5);
        assert!(finite_result("emi", f64::INFINITY).is_err());
        assert!(finite_result("emi", f64::NAN).is_err());
        assert_eq!(finite_result("emi", 12.5).unwrap(), 12.5);
    }
}
