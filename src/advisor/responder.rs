//! Canned response templates

use crate::advisor::classifier::{QueryClassifier, ResponseCategory};
use crate::finance::tax::SECTION_80C_LIMIT;
use crate::models::{deduction_codes, Profile, RiskTolerance};
use crate::util::format_inr;

/// Share of income the savings answer recommends putting away.
const SAVINGS_TARGET: f64 = 0.2;
/// Share of the monthly surplus suggested as a SIP.
const SIP_SHARE_OF_SURPLUS: f64 = 0.7;
/// Life cover as a multiple of annual income.
const LIFE_COVER_MULTIPLE: f64 = 10.0;

const GENERAL_REPLY: &str = "I'm here to help with your financial planning! Based on your profile, \
I can provide personalized advice on budgeting, investments, tax planning, and more. \
What specific area would you like to discuss?";

/// Builds the advisor's reply to `query` for the given profile snapshot.
pub fn respond(profile: Option<&Profile>, query: &str) -> String {
    let category = QueryClassifier::classify(query);

    match (category, profile) {
        (ResponseCategory::General, _) => GENERAL_REPLY.to_string(),
        (_, None) => format!(
            "Complete your financial profile first so I can give you personalized {} advice.",
            topic(category)
        ),
        (ResponseCategory::Savings, Some(p)) => savings_reply(p),
        (ResponseCategory::Investment, Some(p)) => investment_reply(p),
        (ResponseCategory::Insurance, Some(p)) => insurance_reply(p),
        (ResponseCategory::Tax, Some(p)) => tax_reply(p),
    }
}

fn topic(category: ResponseCategory) -> &'static str {
    match category {
        ResponseCategory::Savings => "savings",
        ResponseCategory::Investment => "investment",
        ResponseCategory::Insurance => "insurance",
        ResponseCategory::Tax => "tax planning",
        ResponseCategory::General => "financial",
    }
}

fn savings_reply(p: &Profile) -> String {
    format!(
        "Based on your monthly income of {}, I recommend following the 50/30/20 rule. \
You should aim to save at least 20% of your income, which would be {} per month. \
Given your current expenses of {}, you have a surplus of {} monthly that can be \
allocated to savings and investments.",
        format_inr(p.income),
        format_inr(p.income * SAVINGS_TARGET),
        format_inr(p.expenses),
        format_inr(p.monthly_surplus()),
    )
}

fn equity_range(risk: RiskTolerance) -> &'static str {
    match risk {
        RiskTolerance::High => "70-80%",
        RiskTolerance::Medium => "50-60%",
        RiskTolerance::Low => "30-40%",
    }
}

fn investment_reply(p: &Profile) -> String {
    let sip = (p.monthly_surplus() * SIP_SHARE_OF_SURPLUS).max(0.0);
    format!(
        "Given your {risk} risk tolerance and age of {age}, I suggest a diversified portfolio. \
For someone with {risk} risk appetite, consider allocating {range} to equity mutual funds \
and the rest to debt instruments. Start with SIP investments of {sip} monthly in \
diversified equity funds.",
        risk = p.risk_tolerance,
        age = p.age,
        range = equity_range(p.risk_tolerance),
        sip = format_inr(sip),
    )
}

fn insurance_reply(p: &Profile) -> String {
    format!(
        "Based on your income and {} dependents, you should have life insurance coverage of {} \
(10-12 times your annual income). For health insurance, ensure you have coverage of at least \
₹5-10 lakhs for yourself and family. Given your age of {}, term insurance premiums would be \
quite affordable.",
        p.dependents,
        format_inr(p.annual_income() * LIFE_COVER_MULTIPLE),
        p.age,
    )
}

fn tax_reply(p: &Profile) -> String {
    let used_80c = p.deductions.get(deduction_codes::SECTION_80C);
    let headroom = (SECTION_80C_LIMIT - used_80c).max(0.0);
    format!(
        "Looking at your income of {} monthly, you can save significant tax by maximizing \
deductions. You're currently using {} under 80C - you can invest up to {} more. \
Consider ELSS mutual funds for dual benefit of tax saving and wealth creation. Also, ensure \
you're claiming HRA if you pay rent, and consider NPS for additional ₹50K deduction under \
80CCD(1B).",
        format_inr(p.income),
        format_inr(used_80c),
        format_inr(headroom),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Deductions;

    fn profile() -> Profile {
        Profile {
            income: 100_000.0,
            expenses: 60_000.0,
            risk_tolerance: RiskTolerance::High,
            age: 30,
            dependents: 2,
            deductions: Deductions::new().with(deduction_codes::SECTION_80C, 50_000.0),
            ..Profile::default()
        }
    }

    #[test]
    fn test_savings_reply_uses_profile() {
        let reply = respond(Some(&profile()), "How much should I save each month?");
        assert!(reply.contains("₹1,00,000"));
        assert!(reply.contains("₹20,000 per month"));
        assert!(reply.contains("surplus of ₹40,000"));
    }

    #[test]
    fn test_investment_reply() {
        let reply = respond(Some(&profile()), "where to invest?");
        assert!(reply.contains("70-80%"));
        assert!(reply.contains("₹28,000 monthly"));
    }

    #[test]
    fn test_insurance_reply() {
        let reply = respond(Some(&profile()), "How much life insurance do I need?");
        assert!(reply.contains("2 dependents"));
        assert!(reply.contains("₹1,20,00,000"));
    }

    #[test]
    fn test_tax_reply() {
        let reply = respond(Some(&profile()), "reduce my tax");
        assert!(reply.contains("using ₹50,000 under 80C"));
        assert!(reply.contains("up to ₹1,00,000 more"));
    }

    #[test]
    fn test_without_profile() {
        let reply = respond(None, "how do I save more");
        assert!(reply.contains("Complete your financial profile"));
        assert!(reply.contains("savings"));

        assert_eq!(respond(None, "hello"), GENERAL_REPLY);
    }

    #[test]
    fn test_is_deterministic() {
        let p = profile();
        assert_eq!(respond(Some(&p), "tax"), respond(Some(&p), "tax"));
    }
}
