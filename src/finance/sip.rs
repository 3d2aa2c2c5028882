//! Systematic investment plan (SIP) projection

use serde::{Deserialize, Serialize};

use super::{finite_result, monthly_rate, require_finite, require_non_negative, require_years};
use crate::error::PlannerError;
use crate::Result;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SipProjection {
    pub future_value: f64,
    pub total_investment: f64,
    pub total_returns: f64,
}

/// Future value of a monthly contribution paid at the start of each month
/// (annuity-due).
///
/// Returns so small that `(1+r)^n − 1` does not register take the formula's
/// limit `PMT·n`. A monthly loss of 100% or more is rejected.
pub fn compute_sip_future_value(
    monthly_investment: f64,
    annual_return_percent: f64,
    years: u32,
) -> Result<SipProjection> {
    let monthly_investment = require_non_negative("monthly investment", monthly_investment)?;
    let annual_return_percent = require_finite("annual return", annual_return_percent)?;
    let months = f64::from(require_years("investment period", years)?) * 12.0;

    let r = monthly_rate(annual_return_percent);
    if r <= -1.0 {
        return Err(PlannerError::invalid(format!(
            "annual return must be above -1200%, got {}",
            annual_return_percent
        )));
    }

    // ((1+r)^n - 1) / r, without cancellation near zero
    let growth = (months * r.ln_1p()).exp_m1();
    let accumulation = if r == 0.0 || growth == 0.0 {
        months
    } else {
        growth / r
    };

    let future_value = finite_result("future value", monthly_investment * accumulation * (1.0 + r))?;
    let total_investment = monthly_investment * months;

    Ok(SipProjection {
        future_value,
        total_investment,
        total_returns: future_value - total_investment,
    })
}
