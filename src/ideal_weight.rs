//! Ideal weight estimation
//!
//! Five methods: the healthy BMI range plus the Robinson, Devine, Miller
//! and Hamwi regression formulas. The regression formulas are all of the
//! form `base + slope * (inches above 60)` with gender-specific constants
//! and can go negative for heights far below five feet; that mirrors the
//! published formulas and is left to the caller to present.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{Result, ValidationError};
use crate::models::{Gender, IdealWeightEstimate};
use crate::units::round_display;

/// Estimate ideal weight in kilograms for a height and gender
pub fn estimate(height_cm: Decimal, gender: Gender) -> Result<IdealWeightEstimate> {
    if height_cm <= Decimal::ZERO {
        return Err(ValidationError::InvalidMeasurement {
            kind: "height".to_string(),
            reason: "value must be positive".to_string(),
        }
        .into());
    }

    let height_m = height_cm / dec!(100);
    let sq = height_m * height_m;
    let over_60 = height_cm / dec!(2.54) - dec!(60);

    let (robinson, devine, miller, hamwi) = match gender {
        Gender::Male => (
            dec!(52) + dec!(1.9) * over_60,
            dec!(50) + dec!(2.3) * over_60,
            dec!(56.2) + dec!(1.41) * over_60,
            dec!(48) + dec!(2.7) * over_60,
        ),
        Gender::Female => (
            dec!(49) + dec!(1.7) * over_60,
            dec!(45.5) + dec!(2.3) * over_60,
            dec!(53.1) + dec!(1.36) * over_60,
            dec!(45.5) + dec!(2.2) * over_60,
        ),
    };

    Ok(IdealWeightEstimate {
        bmi_range_kg: (
            round_display(dec!(18.5) * sq, 1),
            round_display(dec!(24.9) * sq, 1),
        ),
        robinson_kg: round_display(robinson, 1),
        devine_kg: round_display(devine, 1),
        miller_kg: round_display(miller, 1),
        hamwi_kg: round_display(hamwi, 1),
    })
}
