use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Height units accepted by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    Cm,
    M,
    Mm,
    /// Combined feet + inches pair
    Ft,
    In,
}

/// Weight units accepted by the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    Kg,
    G,
    Lbs,
    Oz,
    St,
}

impl std::fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeightUnit::Cm => write!(f, "cm"),
            HeightUnit::M => write!(f, "m"),
            HeightUnit::Mm => write!(f, "mm"),
            HeightUnit::Ft => write!(f, "ft"),
            HeightUnit::In => write!(f, "in"),
        }
    }
}

impl std::fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightUnit::Kg => write!(f, "kg"),
            WeightUnit::G => write!(f, "g"),
            WeightUnit::Lbs => write!(f, "lbs"),
            WeightUnit::Oz => write!(f, "oz"),
            WeightUnit::St => write!(f, "st"),
        }
    }
}

impl std::str::FromStr for HeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" => Ok(HeightUnit::Cm),
            "m" => Ok(HeightUnit::M),
            "mm" => Ok(HeightUnit::Mm),
            "ft" | "feet" => Ok(HeightUnit::Ft),
            "in" | "inches" => Ok(HeightUnit::In),
            _ => Err(format!("Invalid height unit: {}", s)),
        }
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "g" => Ok(WeightUnit::G),
            "lbs" | "lb" | "pounds" => Ok(WeightUnit::Lbs),
            "oz" => Ok(WeightUnit::Oz),
            "st" | "stones" => Ok(WeightUnit::St),
            _ => Err(format!("Invalid weight unit: {}", s)),
        }
    }
}

/// A raw height measurement as entered on the form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HeightMeasurement {
    Centimeters(Decimal),
    Meters(Decimal),
    Millimeters(Decimal),
    /// Separate feet and inches fields
    FeetInches { feet: Decimal, inches: Decimal },
    Inches(Decimal),
}

/// A raw weight measurement as entered on the form
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WeightMeasurement {
    Kilograms(Decimal),
    Grams(Decimal),
    Pounds(Decimal),
    Ounces(Decimal),
    Stones(Decimal),
}

/// Gender selection used by the derivation formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(format!("Invalid gender: {}", s)),
        }
    }
}

/// Activity level for Total Daily Energy Expenditure estimation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Exercise 1-3 days/week
    LightlyActive,
    /// Exercise 3-5 days/week
    ModeratelyActive,
    /// Exercise 6-7 days/week
    VeryActive,
    /// Physical job or twice-daily training
    ExtremelyActive,
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityLevel::Sedentary => write!(f, "sedentary"),
            ActivityLevel::LightlyActive => write!(f, "lightly active"),
            ActivityLevel::ModeratelyActive => write!(f, "moderately active"),
            ActivityLevel::VeryActive => write!(f, "very active"),
            ActivityLevel::ExtremelyActive => write!(f, "extremely active"),
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly" | "light" => Ok(ActivityLevel::LightlyActive),
            "moderately" | "moderate" => Ok(ActivityLevel::ModeratelyActive),
            "very" => Ok(ActivityLevel::VeryActive),
            "extremely" | "extreme" => Ok(ActivityLevel::ExtremelyActive),
            _ => Err(format!("Invalid activity level: {}", s)),
        }
    }
}

/// Validated, canonical-metric inputs ready for derivation
///
/// All fields are range-checked before construction; derivation functions
/// assume the invariants hold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricInputs {
    /// Height in centimeters (50-300)
    pub height_cm: Decimal,

    /// Weight in kilograms (9-227)
    pub weight_kg: Decimal,

    /// Age in years (15-120)
    pub age_years: u16,

    /// Gender selection
    pub gender: Gender,

    /// Activity level for calorie estimation
    pub activity: ActivityLevel,
}

/// BMI category from the fixed 18.5 / 25 / 30 thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    NormalWeight,
    Overweight,
    Obese,
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BmiCategory::Underweight => write!(f, "Underweight"),
            BmiCategory::NormalWeight => write!(f, "Normal Weight"),
            BmiCategory::Overweight => write!(f, "Overweight"),
            BmiCategory::Obese => write!(f, "Obese"),
        }
    }
}

/// Computed BMI result
///
/// Immutable once computed; the caller threads it into render and save steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// Body Mass Index, weight(kg) / height(m)^2
    pub bmi: Decimal,

    /// Category assigned from the fixed thresholds
    pub category: BmiCategory,

    /// Position within the category scale, 0.0-1.0, for progress rendering
    pub progress: Decimal,
}

/// Ideal weight estimates from the five supported methods, all in kilograms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdealWeightEstimate {
    /// Healthy BMI range (18.5 - 24.9) for the given height
    pub bmi_range_kg: (Decimal, Decimal),

    /// Robinson formula (1983)
    pub robinson_kg: Decimal,

    /// Devine formula (1974)
    pub devine_kg: Decimal,

    /// Miller formula (1983)
    pub miller_kg: Decimal,

    /// Hamwi formula (1964)
    pub hamwi_kg: Decimal,
}

/// Daily calorie needs in kcal/day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalorieEstimate {
    /// Basal Metabolic Rate (Mifflin-St Jeor)
    pub bmr: i32,

    /// Maintenance calories (BMR x activity multiplier)
    pub maintenance: i32,

    /// Target for losing ~0.5 kg/week (500 kcal deficit)
    pub weight_loss: i32,

    /// Target for gaining ~0.5 kg/week (500 kcal surplus)
    pub weight_gain: i32,
}

/// Form values captured alongside a saved BMI record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub height: Option<Decimal>,
    pub height_unit: Option<HeightUnit>,
    pub weight: Option<Decimal>,
    pub weight_unit: Option<WeightUnit>,
    pub age: Option<u16>,
    pub gender: Option<Gender>,
    pub activity: Option<ActivityLevel>,
}

/// A single saved BMI history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// BMI score at save time, rounded for display
    pub bmi: Decimal,

    /// Category at save time
    pub category: BmiCategory,

    /// Calendar date of the record
    pub date: NaiveDate,

    /// Precise save timestamp, used for ordering
    pub timestamp: DateTime<Utc>,

    /// Raw form values that produced the record
    #[serde(default)]
    pub metadata: RecordMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unit_parsing() {
        assert_eq!("cm".parse::<HeightUnit>().unwrap(), HeightUnit::Cm);
        assert_eq!("feet".parse::<HeightUnit>().unwrap(), HeightUnit::Ft);
        assert_eq!("stones".parse::<WeightUnit>().unwrap(), WeightUnit::St);
        assert!("furlong".parse::<HeightUnit>().is_err());
    }

    #[test]
    fn test_gender_and_activity_parsing() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!("f".parse::<Gender>().unwrap(), Gender::Female);
        assert_eq!(
            "moderately".parse::<ActivityLevel>().unwrap(),
            ActivityLevel::ModeratelyActive
        );
        assert!("couch".parse::<ActivityLevel>().is_err());
    }

    #[test]
    fn test_history_record_serialization() {
        let record = HistoryRecord {
            bmi: dec!(22.8),
            category: BmiCategory::NormalWeight,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            timestamp: Utc::now(),
            metadata: RecordMetadata {
                height: Some(dec!(175.26)),
                height_unit: Some(HeightUnit::Cm),
                weight: Some(dec!(70)),
                weight_unit: Some(WeightUnit::Kg),
                age: Some(30),
                gender: Some(Gender::Male),
                activity: Some(ActivityLevel::ModeratelyActive),
            },
        };

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: HistoryRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, record);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(BmiCategory::NormalWeight.to_string(), "Normal Weight");
        assert_eq!(BmiCategory::Obese.to_string(), "Obese");
    }
}
