//! Query classifier
//!
//! Maps free text onto one of a fixed set of response categories using
//! substring rules, checked in priority order.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseCategory {
    Savings,
    Investment,
    Insurance,
    Tax,
    General,
}

/// Static keyword lists — zero allocation
const SAVINGS_KEYWORDS: &[&str] = &["save", "saving"];
const INVESTMENT_KEYWORDS: &[&str] = &["invest", "investment", "sip"];
const INSURANCE_KEYWORDS: &[&str] = &["insurance", "cover"];
const TAX_KEYWORDS: &[&str] = &["tax", "deduction"];

/// First matching rule wins.
const RULES: &[(ResponseCategory, &[&str])] = &[
    (ResponseCategory::Savings, SAVINGS_KEYWORDS),
    (ResponseCategory::Investment, INVESTMENT_KEYWORDS),
    (ResponseCategory::Insurance, INSURANCE_KEYWORDS),
    (ResponseCategory::Tax, TAX_KEYWORDS),
];

pub struct QueryClassifier;

impl QueryClassifier {
    pub fn classify(query: &str) -> ResponseCategory {
        let query = query.to_lowercase();

        RULES
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| query.contains(*kw)))
            .map(|(category, _)| *category)
            .unwrap_or(ResponseCategory::General)
    }
}
