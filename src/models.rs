//! Core data models for the planner
//!
//! Field names serialize in camelCase so a snapshot keeps the same shape
//! the dashboard has always written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    Old,
    New,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DebtKind {
    CreditCard,
    PersonalLoan,
    CarLoan,
    HomeLoan,
    EducationLoan,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PayoffStrategy {
    /// Highest interest rate first.
    Avalanche,
    /// Smallest balance first.
    Snowball,
}

//
// ================= Deductions =================
//

/// Deduction codes recognised by the old tax regime.
pub mod deduction_codes {
    pub const SECTION_80C: &str = "80C";
    pub const SECTION_80D: &str = "80D";
    pub const HRA: &str = "HRA";
    pub const NPS: &str = "NPS";
}

/// Annual deduction amounts keyed by code. Unknown codes are carried along
/// but ignored by the tax calculator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Deductions(BTreeMap<String, f64>);

impl Deductions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, code: &str, amount: f64) -> Self {
        self.set(code, amount);
        self
    }

    pub fn set(&mut self, code: &str, amount: f64) {
        self.0.insert(code.to_string(), amount);
    }

    /// Amount claimed under `code`; missing codes count as zero.
    pub fn get(&self, code: &str) -> f64 {
        self.0.get(code).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

//
// ================= Goal =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    #[serde(rename = "amount")]
    pub target_amount: f64,
    /// Years until the goal is due.
    pub timeline: u32,
    pub priority: Priority,
    /// Percent complete, 0 to 100.
    pub progress: f64,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_amount: f64, timeline: u32, priority: Priority) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            target_amount,
            timeline,
            priority,
            progress: 0.0,
        }
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = clamp_progress(progress);
        self
    }
}

fn clamp_progress(progress: f64) -> f64 {
    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 100.0)
    }
}

//
// ================= Profile =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Monthly figures.
    pub income: f64,
    pub expenses: f64,
    pub debts: f64,
    pub savings: f64,
    pub risk_tolerance: RiskTolerance,
    pub age: u32,
    pub dependents: u32,
    pub tax_regime: TaxRegime,
    #[serde(default)]
    pub deductions: Deductions,
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Profile {
    pub fn annual_income(&self) -> f64 {
        self.income * 12.0
    }

    /// Income left after expenses; negative when overspending.
    pub fn monthly_surplus(&self) -> f64 {
        self.income - self.expenses
    }

    pub fn goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            income: 0.0,
            expenses: 0.0,
            debts: 0.0,
            savings: 0.0,
            risk_tolerance: RiskTolerance::Medium,
            age: 25,
            dependents: 0,
            tax_regime: TaxRegime::New,
            deductions: Deductions::new()
                .with(deduction_codes::SECTION_80C, 0.0)
                .with(deduction_codes::SECTION_80D, 0.0)
                .with(deduction_codes::HRA, 0.0)
                .with(deduction_codes::NPS, 0.0),
            goals: Vec::new(),
        }
    }
}

//
// ================= Budget =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Budget {
    pub essentials: f64,
    pub wants: f64,
    pub savings: f64,
}

impl Budget {
    pub fn total(&self) -> f64 {
        self.essentials + self.wants + self.savings
    }
}

//
// ================= Debt =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Debt {
    pub name: String,
    /// Outstanding balance.
    #[serde(rename = "amount")]
    pub principal: f64,
    /// Annual interest rate in percent.
    #[serde(rename = "rate")]
    pub annual_rate: f64,
    pub min_payment: f64,
    #[serde(rename = "type")]
    pub kind: DebtKind,
}

impl Debt {
    pub fn new(
        name: impl Into<String>,
        principal: f64,
        annual_rate: f64,
        min_payment: f64,
        kind: DebtKind,
    ) -> Self {
        Self {
            name: name.into(),
            principal,
            annual_rate,
            min_payment,
            kind,
        }
    }

    pub fn monthly_interest(&self) -> f64 {
        self.principal * self.annual_rate / 100.0 / 12.0
    }
}

//
// ================= Chat =================
//

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "message")]
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(Sender::Ai, text)
    }
}

//
// ================= Display =================
//

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskTolerance::Low => "low",
            RiskTolerance::Medium => "medium",
            RiskTolerance::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaxRegime::Old => "Old Regime",
            TaxRegime::New => "New Regime",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for PayoffStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PayoffStrategy::Avalanche => "Avalanche",
            PayoffStrategy::Snowball => "Snowball",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_ids_are_unique() {
        let a = Goal::new("House", 5_000_000.0, 10, Priority::High);
        let b = Goal::new("House", 5_000_000.0, 10, Priority::High);
        assert_ne!(a.id, b.id);
        assert_eq!(a.progress, 0.0);
    }

    #[test]
    fn test_progress_is_clamped() {
        let goal = Goal::new("Car", 800_000.0, 3, Priority::Medium).with_progress(140.0);
        assert_eq!(goal.progress, 100.0);
        let goal = goal.with_progress(-5.0);
        assert_eq!(goal.progress, 0.0);
    }

    #[test]
    fn test_missing_deduction_is_zero() {
        let deductions = Deductions::new().with(deduction_codes::SECTION_80C, 90_000.0);
        assert_eq!(deductions.get(deduction_codes::SECTION_80C), 90_000.0);
        assert_eq!(deductions.get(deduction_codes::NPS), 0.0);
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = Profile {
            income: 50_000.0,
            ..Profile::default()
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["riskTolerance"], "medium");
        assert_eq!(json["taxRegime"], "new");
        assert_eq!(json["deductions"]["80C"], 0.0);
    }

    #[test]
    fn test_chat_message_wire_shape() {
        let msg = ChatMessage::ai("hello");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["message"], "hello");
        assert_eq!(json["sender"], "ai");
    }
}
