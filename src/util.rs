//! Small formatting helpers shared by the advisor and the CLI.

use num_format::{Locale, ToFormattedString};

/// Rounds to the nearest whole currency unit.
pub fn round_currency(amount: f64) -> f64 {
    amount.round()
}

/// Formats an amount as whole rupees with Indian digit grouping, e.g.
/// `₹12,34,567`.
pub fn format_inr(amount: f64) -> String {
    let rounded = round_currency(amount) as i64;
    format!("₹{}", rounded.to_formatted_string(&Locale::en_IN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr() {
        assert_eq!(format_inr(50_000.0), "₹50,000");
        assert_eq!(format_inr(150_000.0), "₹1,50,000");
        assert_eq!(format_inr(999.6), "₹1,000");
        assert_eq!(format_inr(0.0), "₹0");
    }
}
