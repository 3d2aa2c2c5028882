//! Long-horizon wealth projections

use serde::{Deserialize, Serialize};

use super::{require_finite, require_non_negative, require_years};
use crate::Result;

pub const CONSERVATIVE_RETURN: f64 = 8.0;
pub const OPTIMISTIC_RETURN: f64 = 15.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub year: u32,
    pub value: f64,
    pub cumulative_contribution: f64,
    pub cumulative_returns: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioOutcome {
    pub name: String,
    pub monthly_savings: f64,
    pub annual_return_percent: f64,
    pub value_10y: f64,
    pub value_20y: f64,
    pub value_30y: f64,
}

/// Year-by-year value of saving `monthly_savings` at a real return of
/// `annual_return_percent - inflation_percent`, contributions credited at
/// each year end.
pub fn project_wealth(
    monthly_savings: f64,
    annual_return_percent: f64,
    inflation_percent: f64,
    years: u32,
) -> Result<Vec<ProjectionPoint>> {
    let monthly_savings = require_non_negative("monthly savings", monthly_savings)?;
    let annual_return_percent = require_finite("annual return", annual_return_percent)?;
    let inflation_percent = require_finite("inflation", inflation_percent)?;
    let years = require_years("projection horizon", years)?;

    let annual_contribution = monthly_savings * 12.0;
    let real_return = (annual_return_percent - inflation_percent) / 100.0;

    let mut value = 0.0;
    let mut points = Vec::with_capacity(years as usize);
    for year in 1..=years {
        value = value * (1.0 + real_return) + annual_contribution;
        let contributed = annual_contribution * f64::from(year);
        points.push(ProjectionPoint {
            year,
            value: value.round(),
            cumulative_contribution: contributed,
            cumulative_returns: (value - contributed).round(),
        });
    }

    Ok(points)
}

fn value_after(monthly_savings: f64, annual_return_percent: f64, inflation_percent: f64, years: u32) -> Result<f64> {
    let points = project_wealth(monthly_savings, annual_return_percent, inflation_percent, years)?;
    Ok(points.last().map(|p| p.value).unwrap_or(0.0))
}

/// Conservative, current and optimistic outcomes at 10, 20 and 30 years.
/// A scenario that overspends is treated as saving nothing.
pub fn compare_scenarios(
    income: f64,
    expenses: f64,
    annual_return_percent: f64,
    inflation_percent: f64,
) -> Result<Vec<ScenarioOutcome>> {
    let income = require_non_negative("income", income)?;
    let expenses = require_non_negative("expenses", expenses)?;
    let annual_return_percent = require_finite("annual return", annual_return_percent)?;

    let scenarios = [
        ("Conservative", income, expenses * 1.1, CONSERVATIVE_RETURN),
        ("Current", income, expenses, annual_return_percent),
        ("Optimistic", income * 1.2, expenses * 0.9, OPTIMISTIC_RETURN),
    ];

    scenarios
        .into_iter()
        .map(|(name, income, expenses, rate)| -> Result<ScenarioOutcome> {
            let monthly_savings = (income - expenses).max(0.0);
            Ok(ScenarioOutcome {
                name: name.to_string(),
                monthly_savings,
                annual_return_percent: rate,
                value_10y: value_after(monthly_savings, rate, inflation_percent, 10)?,
                value_20y: value_after(monthly_savings, rate, inflation_percent, 20)?,
                value_30y: value_after(monthly_savings, rate, inflation_percent, 30)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_compounds_real_return() {
        let points = project_wealth(10_000.0, 12.0, 6.0, 3).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].value, 120_000.0);
        assert_eq!(points[1].value, 247_200.0);
        assert_eq!(points[2].value, 382_032.0);
        assert_eq!(points[2].cumulative_contribution, 360_000.0);
        assert_eq!(points[2].cumulative_returns, 22_032.0);
        assert_eq!(points[2].year, 3);
    }

    #[test]
    fn test_projection_is_restartable() {
        let first = project_wealth(5_000.0, 10.0, 4.0, 30).unwrap();
        let second = project_wealth(5_000.0, 10.0, 4.0, 30).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 30);
    }

    #[test]
    fn test_projection_rejects_bad_input() {
        assert!(project_wealth(-1.0, 10.0, 4.0, 5).is_err());
        assert!(project_wealth(1_000.0, 10.0, 4.0, 0).is_err());
        assert!(project_wealth(1_000.0, f64::NAN, 4.0, 5).is_err());
    }

    #[test]
    fn test_scenarios() {
        let outcomes = compare_scenarios(100_000.0, 60_000.0, 12.0, 6.0).unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[0].name, "Conservative");
        assert!((outcomes[0].monthly_savings - 34_000.0).abs() < 1e-6);
        assert_eq!(outcomes[1].monthly_savings, 40_000.0);
        assert!((outcomes[2].monthly_savings - 66_000.0).abs() < 1e-6);
        assert_eq!(outcomes[0].annual_return_percent, CONSERVATIVE_RETURN);
        assert!(outcomes[2].value_30y > outcomes[1].value_30y);
        assert!(outcomes[1].value_20y > outcomes[1].value_10y);
    }

    #[test]
    fn test_overspending_scenario_floors_at_zero() {
        let outcomes = compare_scenarios(50_000.0, 60_000.0, 12.0, 6.0).unwrap();
        assert_eq!(outcomes[0].monthly_savings, 0.0);
        assert_eq!(outcomes[0].value_30y, 0.0);
    }
}
