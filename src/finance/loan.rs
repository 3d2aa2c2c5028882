//! Amortizing loan (EMI) calculator

use serde::{Deserialize, Serialize};

use super::{finite_result, monthly_rate, require_non_negative, require_years};
use crate::Result;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmiBreakdown {
    pub emi: f64,
    pub total_amount: f64,
    pub total_interest: f64,
}

/// Equated monthly installment for a loan of `principal` at
/// `annual_rate_percent` over `tenure_years`.
///
/// Computed as `P·r / (1 − (1+r)^−n)`, which stays finite for very large
/// rates and tends to `P / n` as the rate approaches zero. A rate too small
/// to register takes that limit directly.
pub fn compute_emi(principal: f64, annual_rate_percent: f64, tenure_years: u32) -> Result<EmiBreakdown> {
    let principal = require_non_negative("principal", principal)?;
    let annual_rate_percent = require_non_negative("annual rate", annual_rate_percent)?;
    let months = f64::from(require_years("tenure", tenure_years)?) * 12.0;

    let r = monthly_rate(annual_rate_percent);
    // 1 - (1+r)^-n
    let discount = -(-months * r.ln_1p()).exp_m1();
    let emi = if r == 0.0 || discount == 0.0 {
        principal / months
    } else {
        finite_result("emi", principal * r / discount)?
    };

    let total_amount = finite_result("total amount", emi * months)?;
    let total_interest = (total_amount - principal).max(0.0);

    Ok(EmiBreakdown {
        emi,
        total_amount,
        total_interest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use proptest::prelude::*;

    #[test]
    fn test_home_loan_emi() {
        let result = compute_emi(1_000_000.0, 8.5, 20).unwrap();
        assert!((result.emi.round() - 8678.0).abs() <= 1.0, "emi was {}", result.emi);
        assert!(result.total_interest > 1_000_000.0);
    }

    #[test]
    fn test_zero_rate_splits_principal_evenly() {
        let result = compute_emi(120_000.0, 0.0, 1).unwrap();
        assert_eq!(result.emi, 10_000.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(compute_emi(-1.0, 8.0, 5).is_err());
        assert!(compute_emi(100_000.0, -2.0, 5).is_err());
        assert!(compute_emi(100_000.0, 8.0, 0).is_err());
        assert!(compute_emi(f64::NAN, 8.0, 5).is_err());
    }

    #[test]
    fn test_tiny_rate_approaches_even_split() {
        let result = compute_emi(120_000.0, 1e-15, 1).unwrap();
        assert!((result.emi - 10_000.0).abs() < 1e-6, "emi was {}", result.emi);
        assert!(result.total_amount.is_finite());
    }

    #[test]
    fn test_huge_rate_is_interest_only() {
        // (1+r)^-n vanishes, leaving P·r
        let result = compute_emi(120_000.0, 1e6, 30).unwrap();
        let interest_only = 120_000.0 * monthly_rate(1e6);
        assert!((result.emi - interest_only).abs() / interest_only < 1e-9);
        assert!(result.total_interest.is_finite());
    }

    #[test]
    fn test_overflow_rejected() {
        let result = compute_emi(1e300, 1e12, 30);
        assert!(matches!(result, Err(PlannerError::InvalidInput(_))));
    }

    proptest! {
        #[test]
        fn emi_is_non_negative_and_interest_consistent(
            principal in 0.0f64..50_000_000.0,
            rate in 0.0f64..36.0,
            tenure in 1u32..40,
        ) {
            let result = compute_emi(principal, rate, tenure).unwrap();
            prop_assert!(result.emi >= 0.0);
            prop_assert!(result.total_interest >= 0.0);
            let expected = (result.total_amount - principal).max(0.0);
            prop_assert!((result.total_interest - expected).abs() < 1e-6);
        }

        #[test]
        fn zero_rate_emi_is_exact(principal in 0.0f64..50_000_000.0, tenure in 1u32..40) {
            let result = compute_emi(principal, 0.0, tenure).unwrap();
            prop_assert_eq!(result.emi, principal / (f64::from(tenure) * 12.0));
        }

        #[test]
        fn near_zero_rate_tends_to_even_split(
            principal in 0.0f64..50_000_000.0,
            rate in 0.0f64..1e-6,
            tenure in 1u32..40,
        ) {
            let result = compute_emi(principal, rate, tenure).unwrap();
            let even = principal / (f64::from(tenure) * 12.0);
            prop_assert!(result.emi.is_finite());
            prop_assert!((result.emi - even).abs() <= even * 1e-6 + 1e-9);
        }

        #[test]
        fn large_rate_is_finite_or_rejected(
            principal in 0.0f64..1e12,
            rate in 1e3f64..1e15,
            tenure in 1u32..40,
        ) {
            match compute_emi(principal, rate, tenure) {
                Ok(result) => {
                    prop_assert!(result.emi.is_finite());
                    prop_assert!(result.total_amount.is_finite());
                    prop_assert!(result.total_interest >= 0.0);
                }
                Err(error) => prop_assert!(matches!(error, PlannerError::InvalidInput(_))),
            }
        }
    }
}
