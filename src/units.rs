//! Unit conversion to and from the canonical metric base
//!
//! All conversions route through centimeters (height) and kilograms
//! (weight) using exact international factors. The exact lookup tables in
//! [`crate::lookup`] are consulted before formula conversion for the
//! imperial values they cover.
//!
//! Canonical values keep full precision; rounding happens only on the way
//! back out, half-up with a fixed decimal count per target unit.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::{Result, ValidationError};
use crate::lookup;
use crate::models::{HeightMeasurement, HeightUnit, WeightMeasurement, WeightUnit};

/// Round half-up to a fixed number of decimal places
pub fn round_display(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Display decimal places per height unit
pub fn height_display_dp(unit: HeightUnit) -> u32 {
    match unit {
        HeightUnit::Cm => 2,
        HeightUnit::M => 4,
        HeightUnit::Mm => 0,
        HeightUnit::Ft => 4,
        HeightUnit::In => 0,
    }
}

/// Display decimal places per weight unit
pub fn weight_display_dp(unit: WeightUnit) -> u32 {
    match unit {
        WeightUnit::Kg => 4,
        WeightUnit::G => 0,
        WeightUnit::Lbs => 2,
        WeightUnit::Oz => 1,
        WeightUnit::St => 2,
    }
}

fn invalid(kind: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidMeasurement {
        kind: kind.to_string(),
        reason: reason.to_string(),
    }
}

/// Split a decimal-feet shorthand value into a feet/inches pair
///
/// Users commonly type `5.9` meaning 5'9". A one- or two-digit fractional
/// part that reads as 0-11 is taken as inches; anything else is treated as
/// true decimal feet and converted mathematically.
pub fn split_feet_shorthand(value: Decimal) -> (Decimal, Decimal) {
    let feet = value.trunc();
    let frac = value.fract();
    let scale = value.scale();

    if frac != Decimal::ZERO && (1..=2).contains(&scale) {
        let candidate = frac * Decimal::from(10u32.pow(scale));
        if candidate.fract() == Decimal::ZERO && candidate >= dec!(0) && candidate <= dec!(11) {
            return (feet, candidate);
        }
    }

    let inches = round_display(frac * dec!(12), 0);
    (feet, inches)
}

impl HeightMeasurement {
    /// Build a measurement from a single value in the given unit, applying
    /// the decimal-feet shorthand for [`HeightUnit::Ft`]
    pub fn from_value(value: Decimal, unit: HeightUnit) -> Self {
        match unit {
            HeightUnit::Cm => HeightMeasurement::Centimeters(value),
            HeightUnit::M => HeightMeasurement::Meters(value),
            HeightUnit::Mm => HeightMeasurement::Millimeters(value),
            HeightUnit::In => HeightMeasurement::Inches(value),
            HeightUnit::Ft => {
                let (feet, inches) = split_feet_shorthand(value);
                HeightMeasurement::FeetInches { feet, inches }
            }
        }
    }

    /// Convert to canonical centimeters
    ///
    /// Feet/inches pairs go through the exact lookup table first.
    pub fn to_cm(&self) -> Result<Decimal> {
        let cm = match self {
            HeightMeasurement::Centimeters(v) => *v,
            HeightMeasurement::Meters(v) => *v * dec!(100),
            HeightMeasurement::Millimeters(v) => *v * dec!(0.1),
            HeightMeasurement::Inches(v) => *v * dec!(2.54),
            HeightMeasurement::FeetInches { feet, inches } => {
                if *feet < Decimal::ZERO || *inches < Decimal::ZERO {
                    return Err(invalid("height", "negative feet/inches value").into());
                }
                let exact = match (feet.to_u32(), inches.to_u32()) {
                    (Some(f), Some(i))
                        if feet.fract() == Decimal::ZERO && inches.fract() == Decimal::ZERO =>
                    {
                        lookup::exact_height_cm(f, i)
                    }
                    _ => None,
                };
                match exact {
                    Some(cm) => {
                        tracing::debug!(feet = %feet, inches = %inches, cm = %cm, "exact height lookup hit");
                        cm
                    }
                    None => (*feet * dec!(12) + *inches) * dec!(2.54),
                }
            }
        };

        if cm <= Decimal::ZERO {
            return Err(invalid("height", "value must be positive").into());
        }
        Ok(cm)
    }
}

impl WeightMeasurement {
    /// Build a measurement from a single value in the given unit
    pub fn from_value(value: Decimal, unit: WeightUnit) -> Self {
        match unit {
            WeightUnit::Kg => WeightMeasurement::Kilograms(value),
            WeightUnit::G => WeightMeasurement::Grams(value),
            WeightUnit::Lbs => WeightMeasurement::Pounds(value),
            WeightUnit::Oz => WeightMeasurement::Ounces(value),
            WeightUnit::St => WeightMeasurement::Stones(value),
        }
    }

    /// Convert to canonical kilograms
    ///
    /// Whole-pound values go through the exact lookup table first.
    pub fn to_kg(&self) -> Result<Decimal> {
        let kg = match self {
            WeightMeasurement::Kilograms(v) => *v,
            WeightMeasurement::Grams(v) => *v * dec!(0.001),
            WeightMeasurement::Ounces(v) => *v * dec!(0.028349523125),
            WeightMeasurement::Stones(v) => *v * dec!(6.35029318),
            WeightMeasurement::Pounds(v) => match lookup::exact_weight_kg(*v) {
                Some(kg) => {
                    tracing::debug!(lbs = %v, kg = %kg, "exact weight lookup hit");
                    kg
                }
                None => *v * dec!(0.45359237),
            },
        };

        if kg <= Decimal::ZERO {
            return Err(invalid("weight", "value must be positive").into());
        }
        Ok(kg)
    }
}

/// Convert canonical centimeters to a target height unit, rounded for display
pub fn height_from_cm(cm: Decimal, unit: HeightUnit) -> Result<Decimal> {
    if cm <= Decimal::ZERO {
        return Err(invalid("height", "value must be positive").into());
    }
    let value = match unit {
        HeightUnit::Cm => cm,
        HeightUnit::M => cm / dec!(100),
        HeightUnit::Mm => cm * dec!(10),
        HeightUnit::Ft => cm / dec!(30.48),
        HeightUnit::In => cm / dec!(2.54),
    };
    Ok(round_display(value, height_display_dp(unit)))
}

/// Convert canonical kilograms to a target weight unit, rounded for display
///
/// Kilogram values matching an exact table row within +/- 0.0001 return the
/// tabled pounds/stones verbatim.
pub fn weight_from_kg(kg: Decimal, unit: WeightUnit) -> Result<Decimal> {
    if kg <= Decimal::ZERO {
        return Err(invalid("weight", "value must be positive").into());
    }
    if let Some(lbs) = lookup::exact_pounds_for_kg(kg) {
        match unit {
            WeightUnit::Lbs => return Ok(lbs),
            WeightUnit::St => {
                if let Some(st) = lookup::exact_weight_stones(lbs) {
                    return Ok(st);
                }
            }
            _ => {}
        }
    }
    let value = match unit {
        WeightUnit::Kg => kg,
        WeightUnit::G => kg * dec!(1000),
        WeightUnit::Lbs => kg / dec!(0.45359237),
        WeightUnit::Oz => kg / dec!(0.028349523125),
        WeightUnit::St => kg / dec!(6.35029318),
    };
    Ok(round_display(value, weight_display_dp(unit)))
}

/// Render canonical centimeters as a combined feet-and-inches string, e.g. `5' 9"`
pub fn format_feet_inches(cm: Decimal) -> String {
    let total_inches = cm / dec!(2.54);
    let feet = (total_inches / dec!(12)).trunc();
    let remaining = round_display(total_inches - feet * dec!(12), 1).normalize();
    format!("{}' {}\"", feet, remaining)
}

/// Render canonical kilograms as a combined stones-and-pounds string, e.g. `11 st 0.3 lb`
pub fn format_stones_pounds(kg: Decimal) -> String {
    let total_pounds = kg / dec!(0.45359237);
    let stones = (total_pounds / dec!(14)).trunc();
    let remaining = round_display(total_pounds - stones * dec!(14), 1).normalize();
    format!("{} st {} lb", stones, remaining)
}
