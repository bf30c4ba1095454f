//! Shareable result summaries
//!
//! Produces the plain-text strings handed to the platform clipboard/share
//! capability. The CLI prints them to stdout, which doubles as the
//! manual-copy fallback when no clipboard integration is available.

use rust_decimal::Decimal;

use crate::models::BmiCategory;
use crate::units::round_display;

/// Multi-line summary for copying
pub fn copy_summary(bmi: Decimal, category: BmiCategory) -> String {
    format!(
        "My BMI Result:\nBMI: {}\nCategory: {}\nCalculated with bmirs",
        round_display(bmi, 1),
        category
    )
}

/// One-line message for sharing
pub fn share_message(bmi: Decimal, category: BmiCategory) -> String {
    format!(
        "I just checked my BMI: {} ({}) using bmirs!",
        round_display(bmi, 1),
        category
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_copy_summary() {
        let result = crate::bmi::calculate(dec!(175.26), dec!(70)).unwrap();
        let text = copy_summary(result.bmi, result.category);
        assert!(text.contains("BMI: 22.8"));
        assert!(text.contains("Category: Normal Weight"));
    }

    #[test]
    fn test_share_message() {
        let result = crate::bmi::calculate(dec!(160), dec!(80)).unwrap();
        let text = share_message(result.bmi, result.category);
        assert!(text.contains("31.3"));
        assert!(text.contains("Obese"));
    }
}
