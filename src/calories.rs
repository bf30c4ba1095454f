//! Calorie needs estimation
//!
//! BMR via the Mifflin-St Jeor equation, TDEE via the standard activity
//! multipliers, and +/- 500 kcal/day targets for roughly half a kilogram
//! of weight change per week. TDEE is computed from the unrounded BMR and
//! each figure is rounded to whole kcal independently.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{ActivityLevel, CalorieEstimate, Gender, MetricInputs};
use crate::units::round_display;

impl ActivityLevel {
    /// TDEE multiplier applied to BMR
    pub fn multiplier(&self) -> Decimal {
        match self {
            ActivityLevel::Sedentary => dec!(1.2),
            ActivityLevel::LightlyActive => dec!(1.375),
            ActivityLevel::ModeratelyActive => dec!(1.55),
            ActivityLevel::VeryActive => dec!(1.725),
            ActivityLevel::ExtremelyActive => dec!(1.9),
        }
    }
}

/// Basal Metabolic Rate per Mifflin-St Jeor, unrounded
fn mifflin_st_jeor(inputs: &MetricInputs) -> Decimal {
    let base = dec!(10) * inputs.weight_kg + dec!(6.25) * inputs.height_cm
        - dec!(5) * Decimal::from(inputs.age_years);
    match inputs.gender {
        Gender::Male => base + dec!(5),
        Gender::Female => base - dec!(161),
    }
}

/// Estimate daily calorie needs from validated metric inputs
pub fn estimate(inputs: &MetricInputs) -> CalorieEstimate {
    let bmr = mifflin_st_jeor(inputs);
    let tdee = bmr * inputs.activity.multiplier();

    let round_kcal = |v: Decimal| round_display(v, 0).to_i32().unwrap_or(0);

    CalorieEstimate {
        bmr: round_kcal(bmr),
        maintenance: round_kcal(tdee),
        weight_loss: round_kcal(tdee - dec!(500)),
        weight_gain: round_kcal(tdee + dec!(500)),
    }
}
