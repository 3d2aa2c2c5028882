//! Debt payoff ordering and simulation

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{monthly_rate, require_non_negative, require_positive};
use crate::error::PlannerError;
use crate::models::{Debt, PayoffStrategy};
use crate::Result;

/// Simulations that run longer than this are treated as never amortizing.
pub const MAX_PAYOFF_MONTHS: u32 = 1200;

/// Balances below this are considered settled.
const SETTLED_BALANCE: f64 = 0.01;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebtPayoff {
    pub name: String,
    pub months: u32,
    pub interest_paid: f64,
    pub total_paid: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PayoffPlan {
    pub strategy: PayoffStrategy,
    /// In payoff priority order.
    pub schedule: Vec<DebtPayoff>,
    pub total_interest: f64,
    pub total_months: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DebtSummary {
    pub total_balance: f64,
    pub total_minimum_payment: f64,
    pub monthly_interest: f64,
    /// Balance-weighted annual rate; `None` when nothing is owed.
    pub weighted_interest_rate: Option<f64>,
    pub debt_to_income_percent: f64,
}

/// Orders a copy of `debts` by payoff priority. The sort is stable, so
/// ties keep their input order.
pub fn rank_debts_by_strategy(debts: &[Debt], strategy: PayoffStrategy) -> Vec<Debt> {
    let mut ranked = debts.to_vec();
    match strategy {
        PayoffStrategy::Avalanche => ranked.sort_by(|a, b| b.annual_rate.total_cmp(&a.annual_rate)),
        PayoffStrategy::Snowball => ranked.sort_by(|a, b| a.principal.total_cmp(&b.principal)),
    }
    ranked
}

fn validate_amounts(debt: &Debt) -> Result<()> {
    require_non_negative(&format!("{} balance", debt.name), debt.principal)?;
    require_non_negative(&format!("{} rate", debt.name), debt.annual_rate)?;
    require_non_negative(&format!("{} minimum payment", debt.name), debt.min_payment)?;
    Ok(())
}

fn validate_debt(debt: &Debt) -> Result<()> {
    validate_amounts(debt)?;

    if debt.principal > 0.0 && debt.min_payment <= debt.monthly_interest() {
        return Err(PlannerError::invalid(format!(
            "{}: minimum payment {} does not cover monthly interest {:.2}",
            debt.name,
            debt.min_payment,
            debt.monthly_interest()
        )));
    }
    Ok(())
}

struct OpenDebt {
    balance: f64,
    rate: f64,
    min_payment: f64,
    interest_paid: f64,
    total_paid: f64,
    cleared_in: Option<u32>,
}

impl OpenDebt {
    fn pay(&mut self, amount: f64) -> f64 {
        let paid = amount.min(self.balance);
        self.balance -= paid;
        self.total_paid += paid;
        paid
    }
}

/// Month-by-month payoff under `strategy`.
///
/// Every open debt accrues interest and receives its minimum. Whatever is
/// left of the monthly budget (minimums plus `extra_payment`) goes to the
/// highest-priority open debt, so minimums freed by cleared debts roll over.
pub fn simulate_payoff(debts: &[Debt], strategy: PayoffStrategy, extra_payment: f64) -> Result<PayoffPlan> {
    let extra_payment = require_non_negative("extra payment", extra_payment)?;
    for debt in debts {
        validate_debt(debt)?;
    }

    let ranked = rank_debts_by_strategy(debts, strategy);
    let monthly_budget: f64 = ranked.iter().map(|d| d.min_payment).sum::<f64>() + extra_payment;

    let mut open: Vec<OpenDebt> = ranked
        .iter()
        .map(|d| OpenDebt {
            balance: d.principal,
            rate: monthly_rate(d.annual_rate),
            min_payment: d.min_payment,
            interest_paid: 0.0,
            total_paid: 0.0,
            cleared_in: if d.principal <= SETTLED_BALANCE { Some(0) } else { None },
        })
        .collect();

    let mut month = 0u32;
    while open.iter().any(|d| d.cleared_in.is_none()) {
        month += 1;
        if month > MAX_PAYOFF_MONTHS {
            return Err(PlannerError::invalid(format!(
                "debts are not paid off within {} months",
                MAX_PAYOFF_MONTHS
            )));
        }

        let mut remaining = monthly_budget;

        for debt in open.iter_mut().filter(|d| d.cleared_in.is_none()) {
            let interest = debt.balance * debt.rate;
            debt.balance += interest;
            debt.interest_paid += interest;
            remaining -= debt.pay(debt.min_payment);
        }

        for debt in open.iter_mut().filter(|d| d.cleared_in.is_none()) {
            if remaining <= 0.0 {
                break;
            }
            remaining -= debt.pay(remaining);
        }

        for debt in open.iter_mut().filter(|d| d.cleared_in.is_none()) {
            if debt.balance <= SETTLED_BALANCE {
                debt.balance = 0.0;
                debt.cleared_in = Some(month);
            }
        }
    }

    let schedule: Vec<DebtPayoff> = ranked
        .iter()
        .zip(open.iter())
        .map(|(debt, state)| DebtPayoff {
            name: debt.name.clone(),
            months: state.cleared_in.unwrap_or(0),
            interest_paid: state.interest_paid.round(),
            total_paid: state.total_paid.round(),
        })
        .collect();

    let total_interest = open.iter().map(|d| d.interest_paid).sum::<f64>().round();
    let total_months = schedule.iter().map(|p| p.months).max().unwrap_or(0);

    debug!(
        strategy = %strategy,
        debts = schedule.len(),
        total_months,
        total_interest,
        "Payoff simulated"
    );

    Ok(PayoffPlan {
        strategy,
        schedule,
        total_interest,
        total_months,
    })
}

/// Aggregate figures across all debts.
pub fn summarize_debts(debts: &[Debt], monthly_income: f64) -> Result<DebtSummary> {
    let monthly_income = require_positive("monthly income", monthly_income)?;
    for debt in debts {
        validate_amounts(debt)?;
    }

    let total_balance: f64 = debts.iter().map(|d| d.principal).sum();
    let total_minimum_payment: f64 = debts.iter().map(|d| d.min_payment).sum();
    let monthly_interest: f64 = debts.iter().map(|d| d.monthly_interest()).sum();

    let weighted_interest_rate = if total_balance > 0.0 {
        let weighted: f64 = debts.iter().map(|d| d.principal * d.annual_rate).sum();
        Some(weighted / total_balance)
    } else {
        None
    };

    Ok(DebtSummary {
        total_balance,
        total_minimum_payment,
        monthly_interest,
        weighted_interest_rate,
        debt_to_income_percent: total_balance / (monthly_income * 12.0) * 100.0,
    })
}
