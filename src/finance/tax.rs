//! Indian income tax under the old and new regimes
//!
//! Bracket tables and deduction caps are fixed constants; this is an
//! estimate for planning, not a filing tool.

use serde::{Deserialize, Serialize};

use super::require_non_negative;
use crate::models::{deduction_codes, Deductions, TaxRegime};
use crate::Result;

pub const STANDARD_DEDUCTION: f64 = 50_000.0;
pub const SECTION_80C_LIMIT: f64 = 150_000.0;
pub const SECTION_80D_LIMIT: f64 = 25_000.0;
pub const SECTION_80D_SENIOR_LIMIT: f64 = 50_000.0;
pub const SENIOR_CITIZEN_AGE: u32 = 60;
pub const NPS_LIMIT: f64 = 50_000.0;
pub const CESS_RATE: f64 = 0.04;

/// Marginal rate assumed when estimating what an unused deduction would save.
const ASSUMED_MARGINAL_RATE: f64 = 0.30;

/// (lower bound, rate) pairs; each rate applies from its bound up to the next.
const OLD_REGIME_BRACKETS: &[(f64, f64)] = &[
    (250_000.0, 0.05),
    (500_000.0, 0.20),
    (1_000_000.0, 0.30),
];

const NEW_REGIME_BRACKETS: &[(f64, f64)] = &[
    (250_000.0, 0.05),
    (300_000.0, 0.10),
    (600_000.0, 0.15),
    (900_000.0, 0.20),
    (1_200_000.0, 0.25),
    (1_500_000.0, 0.30),
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub regime: TaxRegime,
    /// Tax including cess, whole currency units.
    pub tax: f64,
    pub deductions: f64,
    pub taxable_income: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegimeComparison {
    pub old: TaxBreakdown,
    pub new: TaxBreakdown,
    pub recommended: TaxRegime,
    pub savings: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaxSavingOpportunity {
    pub section: String,
    pub limit: f64,
    pub claimed: f64,
    pub headroom: f64,
    pub estimated_saving: f64,
}

fn section_80d_limit(age: u32) -> f64 {
    if age >= SENIOR_CITIZEN_AGE {
        SECTION_80D_SENIOR_LIMIT
    } else {
        SECTION_80D_LIMIT
    }
}

fn old_regime_deductions(age: u32, deductions: &Deductions) -> Result<f64> {
    let c80 = require_non_negative("80C deduction", deductions.get(deduction_codes::SECTION_80C))?;
    let d80 = require_non_negative("80D deduction", deductions.get(deduction_codes::SECTION_80D))?;
    let hra = require_non_negative("HRA deduction", deductions.get(deduction_codes::HRA))?;
    let nps = require_non_negative("NPS deduction", deductions.get(deduction_codes::NPS))?;

    Ok(STANDARD_DEDUCTION
        + c80.min(SECTION_80C_LIMIT)
        + d80.min(section_80d_limit(age))
        + hra
        + nps.min(NPS_LIMIT))
}

fn progressive_tax(taxable_income: f64, brackets: &[(f64, f64)]) -> f64 {
    brackets
        .iter()
        .enumerate()
        .map(|(i, &(lower, rate))| {
            let upper = brackets
                .get(i + 1)
                .map(|&(next, _)| next)
                .unwrap_or(f64::INFINITY);
            (taxable_income.min(upper) - lower).max(0.0) * rate
        })
        .sum()
}

/// Annual tax liability for `annual_income` under `regime`.
///
/// The old regime subtracts the standard deduction plus capped 80C, 80D
/// (age-dependent cap), uncapped HRA and capped NPS claims. The new regime
/// only allows the standard deduction.
pub fn compute_tax(
    annual_income: f64,
    regime: TaxRegime,
    age: u32,
    deductions: &Deductions,
) -> Result<TaxBreakdown> {
    let annual_income = require_non_negative("annual income", annual_income)?;

    let (total_deductions, brackets) = match regime {
        TaxRegime::Old => (old_regime_deductions(age, deductions)?, OLD_REGIME_BRACKETS),
        TaxRegime::New => (STANDARD_DEDUCTION, NEW_REGIME_BRACKETS),
    };

    let taxable_income = (annual_income - total_deductions).max(0.0);
    let base = progressive_tax(taxable_income, brackets);
    let tax = (base * (1.0 + CESS_RATE)).round();

    Ok(TaxBreakdown {
        regime,
        tax,
        deductions: total_deductions,
        taxable_income,
    })
}

/// Computes both regimes and picks the cheaper one; the new regime wins ties.
pub fn compare_regimes(annual_income: f64, age: u32, deductions: &Deductions) -> Result<RegimeComparison> {
    let old = compute_tax(annual_income, TaxRegime::Old, age, deductions)?;
    let new = compute_tax(annual_income, TaxRegime::New, age, deductions)?;

    let recommended = if old.tax < new.tax {
        TaxRegime::Old
    } else {
        TaxRegime::New
    };

    Ok(RegimeComparison {
        old,
        new,
        recommended,
        savings: (old.tax - new.tax).abs(),
    })
}

/// Unused headroom under the capped deduction sections.
pub fn tax_saving_opportunities(age: u32, deductions: &Deductions) -> Result<Vec<TaxSavingOpportunity>> {
    let sections = [
        ("80C", SECTION_80C_LIMIT, deduction_codes::SECTION_80C),
        ("80D", section_80d_limit(age), deduction_codes::SECTION_80D),
        ("80CCD(1B)", NPS_LIMIT, deduction_codes::NPS),
    ];

    let mut opportunities = Vec::with_capacity(sections.len());
    for (section, limit, code) in sections {
        let claimed = require_non_negative(code, deductions.get(code))?;
        let headroom = (limit - claimed).max(0.0);
        if headroom > 0.0 {
            opportunities.push(TaxSavingOpportunity {
                section: section.to_string(),
                limit,
                claimed,
                headroom,
                estimated_saving: (headroom * ASSUMED_MARGINAL_RATE).round(),
            });
        }
    }

    Ok(opportunities)
}
