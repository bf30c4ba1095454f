//! BMI derivation
//!
//! BMI = weight(kg) / height(m)^2, with category assignment from the fixed
//! WHO thresholds 18.5 / 25 / 30. Boundary values land in the upper
//! category. The progress value positions the score on a four-band scale
//! (25 points per band) for rendering.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{CalculationError, Result};
use crate::models::{BmiCategory, BmiResult};
use crate::units::round_display;

/// Upper sanity bound; anything above this is treated as input garbage
const BMI_SANITY_MAX: Decimal = dec!(100);

/// Calculate BMI from canonical metric values
///
/// Fails if height is non-positive or the result exceeds the sanity bound.
pub fn calculate(height_cm: Decimal, weight_kg: Decimal) -> Result<BmiResult> {
    if height_cm <= Decimal::ZERO {
        return Err(CalculationError::DivisionByZero {
            calculation: "BMI".to_string(),
        }
        .into());
    }

    let height_m = height_cm / dec!(100);
    let bmi = weight_kg / (height_m * height_m);

    if bmi <= Decimal::ZERO || bmi > BMI_SANITY_MAX {
        return Err(CalculationError::ImplausibleResult {
            calculation: "BMI".to_string(),
            value: bmi.to_string(),
        }
        .into());
    }

    let category = BmiCategory::from_bmi(bmi);
    Ok(BmiResult {
        bmi,
        category,
        progress: progress_fraction(bmi, category),
    })
}

impl BmiCategory {
    /// Assign the category for a BMI score
    pub fn from_bmi(bmi: Decimal) -> Self {
        if bmi < dec!(18.5) {
            BmiCategory::Underweight
        } else if bmi < dec!(25) {
            BmiCategory::NormalWeight
        } else if bmi < dec!(30) {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    /// Fixed advisory text shown with the result
    pub fn advisory(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => {
                "Consider consulting a healthcare provider about healthy weight gain strategies. \
                 Focus on nutrient-dense foods, strength training, and regular meals."
            }
            BmiCategory::NormalWeight => {
                "Great job maintaining a healthy weight! Continue with regular exercise, \
                 balanced nutrition, and stay hydrated for optimal health."
            }
            BmiCategory::Overweight => {
                "Consider gradual lifestyle changes including portion control, regular physical \
                 activity, and consulting a nutritionist for personalized advice."
            }
            BmiCategory::Obese => {
                "Consult with a healthcare provider for a comprehensive weight management plan. \
                 Focus on sustainable lifestyle changes and professional guidance."
            }
        }
    }
}

/// Position of a BMI score on the four-band progress scale, 0.0-1.0
///
/// Each band spans a quarter of the scale; within a band the score moves
/// linearly from the band's lower to upper threshold. The Obese band is
/// open-ended and saturates at BMI 40.
fn progress_fraction(bmi: Decimal, category: BmiCategory) -> Decimal {
    let quarter = dec!(0.25);
    let fraction = match category {
        BmiCategory::Underweight => bmi / dec!(18.5) * quarter,
        BmiCategory::NormalWeight => quarter + (bmi - dec!(18.5)) / dec!(6.5) * quarter,
        BmiCategory::Overweight => dec!(0.5) + (bmi - dec!(25)) / dec!(5) * quarter,
        BmiCategory::Obese => {
            let tail = ((bmi - dec!(30)) / dec!(10) * quarter).min(quarter);
            dec!(0.75) + tail
        }
    };
    round_display(fraction.clamp(Decimal::ZERO, Decimal::ONE), 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_identity() {
        // 70 kg at 175.26 cm: 70 / 1.7526^2
        let result = calculate(dec!(175.26), dec!(70)).unwrap();
        let expected = dec!(70) / (dec!(1.7526) * dec!(1.7526));
        assert_eq!(result.bmi, expected);
        assert_eq!(result.category, BmiCategory::NormalWeight);
        assert_eq!(round_display(result.bmi, 1), dec!(22.8));
    }

    #[test]
    fn test_boundary_categories() {
        // Boundaries land in the upper category
        assert_eq!(BmiCategory::from_bmi(dec!(18.5)), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(dec!(25)), BmiCategory::Overweight);
        assert_eq!(BmiCategory::from_bmi(dec!(30)), BmiCategory::Obese);

        assert_eq!(BmiCategory::from_bmi(dec!(18.4999)), BmiCategory::Underweight);
        assert_eq!(BmiCategory::from_bmi(dec!(24.9999)), BmiCategory::NormalWeight);
        assert_eq!(BmiCategory::from_bmi(dec!(29.9999)), BmiCategory::Overweight);
    }

    #[test]
    fn test_progress_band_edges() {
        let r = calculate(dec!(175.26), dec!(56.83)).unwrap();
        assert_eq!(r.category, BmiCategory::NormalWeight);
        // Just past the 18.5 boundary
        assert!(r.progress >= dec!(0.25) && r.progress < dec!(0.26));

        // Deep obese saturates at 1.0
        let r = calculate(dec!(150), dec!(180)).unwrap();
        assert_eq!(r.category, BmiCategory::Obese);
        assert_eq!(r.progress, dec!(1.0));
    }

    #[test]
    fn test_progress_within_bounds() {
        for weight in [20, 45, 60, 70, 85, 100, 150] {
            let r = calculate(dec!(175), Decimal::from(weight)).unwrap();
            assert!(r.progress >= Decimal::ZERO && r.progress <= Decimal::ONE);
        }
    }

    #[test]
    fn test_idempotence() {
        let a = calculate(dec!(170), dec!(65)).unwrap();
        let b = calculate(dec!(170), dec!(65)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(calculate(dec!(0), dec!(70)).is_err());
        assert!(calculate(dec!(-170), dec!(70)).is_err());
        // 227 kg at 50 cm -> BMI 908, far past the sanity bound
        assert!(calculate(dec!(50), dec!(227)).is_err());
    }

    #[test]
    fn test_advisory_text() {
        assert!(BmiCategory::Underweight.advisory().contains("weight gain"));
        assert!(BmiCategory::NormalWeight.advisory().contains("healthy weight"));
    }
}
