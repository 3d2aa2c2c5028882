//! 50/30/20 budget split

use serde::{Deserialize, Serialize};

use super::require_non_negative;
use crate::models::{Budget, Profile};
use crate::Result;

pub const ESSENTIALS_SHARE: f64 = 0.5;
pub const WANTS_SHARE: f64 = 0.3;
pub const SAVINGS_SHARE: f64 = 0.2;

/// Share of gross income assumed to survive tax when no better figure exists.
pub const AFTER_TAX_RATIO: f64 = 0.7;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BudgetVariance {
    pub category: String,
    pub recommended: f64,
    pub current: f64,
    /// Positive when spending is under the recommendation.
    pub difference: f64,
}

/// Splits `after_tax_income` 50/30/20 into essentials, wants and savings,
/// each rounded to whole currency units.
pub fn compute_budget_split(after_tax_income: f64) -> Result<Budget> {
    let income = require_non_negative("after-tax income", after_tax_income)?;

    Ok(Budget {
        essentials: (income * ESSENTIALS_SHARE).round(),
        wants: (income * WANTS_SHARE).round(),
        savings: (income * SAVINGS_SHARE).round(),
    })
}

/// Budget derived from gross monthly income.
pub fn default_budget(monthly_income: f64) -> Result<Budget> {
    let income = require_non_negative("monthly income", monthly_income)?;
    compute_budget_split(income * AFTER_TAX_RATIO)
}

/// Recommended versus actual spending per category.
pub fn compare_budget(budget: &Budget, profile: &Profile) -> Vec<BudgetVariance> {
    let current_wants = (profile.expenses - budget.essentials).max(0.0);
    let current_savings = profile.monthly_surplus();

    vec![
        BudgetVariance {
            category: "Essentials".to_string(),
            recommended: budget.essentials,
            current: profile.expenses,
            difference: budget.essentials - profile.expenses,
        },
        BudgetVariance {
            category: "Wants".to_string(),
            recommended: budget.wants,
            current: current_wants,
            difference: budget.wants - current_wants,
        },
        BudgetVariance {
            category: "Savings".to_string(),
            recommended: budget.savings,
            current: current_savings,
            difference: budget.savings - current_savings,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_split_after_tax() {
        let budget = compute_budget_split(50_000.0 * 0.7).unwrap();
        assert_eq!(budget.essentials, 17_500.0);
        assert_eq!(budget.wants, 10_500.0);
        assert_eq!(budget.savings, 7_000.0);
        assert_eq!(default_budget(50_000.0).unwrap(), budget);
    }

    #[test]
    fn test_negative_income_rejected() {
        assert!(compute_budget_split(-1.0).is_err());
        assert!(default_budget(f64::NAN).is_err());
    }

    #[test]
    fn test_compare_budget() {
        let profile = Profile {
            income: 50_000.0,
            expenses: 30_000.0,
            ..Profile::default()
        };
        let budget = default_budget(profile.income).unwrap();
        let variances = compare_budget(&budget, &profile);

        assert_eq!(variances[0].current, 30_000.0);
        assert_eq!(variances[0].difference, -12_500.0);
        assert_eq!(variances[1].current, 12_500.0);
        assert_eq!(variances[2].current, 20_000.0);
        assert_eq!(variances[2].difference, -13_000.0);
    }

    proptest! {
        #[test]
        fn split_sums_to_input(x in 0.0f64..100_000_000.0) {
            let budget = compute_budget_split(x).unwrap();
            prop_assert!((budget.total() - x).abs() <= 2.0);
        }
    }
}
