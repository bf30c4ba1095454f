//! Input validation
//!
//! All form values are checked against the declared bounds before any
//! derivation runs. Bounds are inclusive and apply to the canonical metric
//! values, so an out-of-range entry in any unit is caught after conversion.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{Result, ValidationError};
use crate::models::{ActivityLevel, Gender, MetricInputs};

pub const HEIGHT_CM_MIN: Decimal = dec!(50);
pub const HEIGHT_CM_MAX: Decimal = dec!(300);
pub const WEIGHT_KG_MIN: Decimal = dec!(9);
pub const WEIGHT_KG_MAX: Decimal = dec!(227);
pub const AGE_MIN: u16 = 15;
pub const AGE_MAX: u16 = 120;

fn out_of_range(
    field: &str,
    value: impl ToString,
    min: impl ToString,
    max: impl ToString,
) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        value: value.to_string(),
        min: min.to_string(),
        max: max.to_string(),
    }
}

impl MetricInputs {
    /// Assemble validated inputs from canonical metric values and selections
    ///
    /// Gender and activity arrive as `Option` because the form may have no
    /// selection; absence is a `MissingField` error, not a default.
    pub fn new(
        height_cm: Decimal,
        weight_kg: Decimal,
        age_years: u16,
        gender: Option<Gender>,
        activity: Option<ActivityLevel>,
    ) -> Result<Self> {
        if !(HEIGHT_CM_MIN..=HEIGHT_CM_MAX).contains(&height_cm) {
            return Err(out_of_range("Height", height_cm, HEIGHT_CM_MIN, HEIGHT_CM_MAX).into());
        }
        if !(WEIGHT_KG_MIN..=WEIGHT_KG_MAX).contains(&weight_kg) {
            return Err(out_of_range("Weight", weight_kg, WEIGHT_KG_MIN, WEIGHT_KG_MAX).into());
        }
        if !(AGE_MIN..=AGE_MAX).contains(&age_years) {
            return Err(out_of_range("Age", age_years, AGE_MIN, AGE_MAX).into());
        }
        let gender = gender.ok_or_else(|| ValidationError::MissingField {
            field: "gender".to_string(),
        })?;
        let activity = activity.ok_or_else(|| ValidationError::MissingField {
            field: "activity level".to_string(),
        })?;

        Ok(MetricInputs {
            height_cm,
            weight_kg,
            age_years,
            gender,
            activity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BmirsError;

    fn build(height: Decimal, weight: Decimal, age: u16) -> Result<MetricInputs> {
        MetricInputs::new(
            height,
            weight,
            age,
            Some(Gender::Male),
            Some(ActivityLevel::Sedentary),
        )
    }

    #[test]
    fn test_accepts_bounds_inclusive() {
        assert!(build(dec!(50), dec!(9), 15).is_ok());
        assert!(build(dec!(300), dec!(227), 120).is_ok());
    }

    #[test]
    fn test_age_boundaries() {
        assert!(build(dec!(170), dec!(70), 15).is_ok());
        assert!(build(dec!(170), dec!(70), 120).is_ok());
        assert!(build(dec!(170), dec!(70), 14).is_err());
        assert!(build(dec!(170), dec!(70), 121).is_err());
    }

    #[test]
    fn test_height_and_weight_bounds() {
        assert!(build(dec!(49.99), dec!(70), 30).is_err());
        assert!(build(dec!(300.01), dec!(70), 30).is_err());
        assert!(build(dec!(170), dec!(8.99), 30).is_err());
        assert!(build(dec!(170), dec!(227.01), 30).is_err());
    }

    #[test]
    fn test_missing_selections() {
        let err = MetricInputs::new(dec!(170), dec!(70), 30, None, Some(ActivityLevel::Sedentary))
            .unwrap_err();
        assert!(matches!(
            err,
            BmirsError::Validation(ValidationError::MissingField { .. })
        ));
        assert!(err.user_message().contains("gender"));

        assert!(MetricInputs::new(dec!(170), dec!(70), 30, Some(Gender::Female), None).is_err());
    }
}
