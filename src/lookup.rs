//! Exact conversion lookup tables
//!
//! Pre-rounded canonical values for commonly-quoted imperial heights and
//! weights. A hit here bypasses formula conversion entirely so that, for
//! example, 5'9" is always exactly 175.26 cm rather than a value with
//! trailing floating-point drift.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// (feet, inches, cm scaled e2) rows matching the published height table
const HEIGHT_TABLE: [(u32, u32, i64); 15] = [
    (5, 0, 15240),
    (5, 1, 15494),
    (5, 2, 15748),
    (5, 3, 16002),
    (5, 4, 16256),
    (5, 5, 16510),
    (5, 6, 16764),
    (5, 7, 17018),
    (5, 8, 17272),
    (5, 9, 17526),
    (5, 10, 17780),
    (5, 11, 18034),
    (6, 0, 18288),
    (6, 1, 18542),
    (6, 2, 18796),
];

/// (lbs, kg scaled e4, stones scaled e2) rows matching the published weight table
const WEIGHT_TABLE: [(u32, i64, i64); 11] = [
    (100, 453592, 714),
    (110, 498952, 786),
    (120, 544311, 857),
    (130, 589670, 929),
    (140, 635029, 1000),
    (150, 680389, 1071),
    (160, 725748, 1143),
    (170, 771107, 1214),
    (180, 816466, 1286),
    (190, 861826, 1357),
    (200, 907185, 1429),
];

/// Tolerance for the reverse kg -> lbs table match
fn reverse_tolerance() -> Decimal {
    dec!(0.0001)
}

/// Exact centimeters for a known feet/inches pair, if tabled
pub fn exact_height_cm(feet: u32, inches: u32) -> Option<Decimal> {
    HEIGHT_TABLE
        .iter()
        .find(|(f, i, _)| *f == feet && *i == inches)
        .map(|(_, _, cm_e2)| Decimal::new(*cm_e2, 2))
}

/// Exact meters for a known feet/inches pair, if tabled
pub fn exact_height_m(feet: u32, inches: u32) -> Option<Decimal> {
    exact_height_cm(feet, inches).map(|cm| cm / dec!(100))
}

/// Exact kilograms for a known whole-pound value, if tabled
pub fn exact_weight_kg(lbs: Decimal) -> Option<Decimal> {
    if lbs.fract() != Decimal::ZERO {
        return None;
    }
    let whole = u32::try_from(lbs.mantissa() / 10i128.pow(lbs.scale())).ok()?;
    WEIGHT_TABLE
        .iter()
        .find(|(l, _, _)| *l == whole)
        .map(|(_, kg_e4, _)| Decimal::new(*kg_e4, 4))
}

/// Exact stones for a known whole-pound value, if tabled
pub fn exact_weight_stones(lbs: Decimal) -> Option<Decimal> {
    if lbs.fract() != Decimal::ZERO {
        return None;
    }
    let whole = u32::try_from(lbs.mantissa() / 10i128.pow(lbs.scale())).ok()?;
    WEIGHT_TABLE
        .iter()
        .find(|(l, _, _)| *l == whole)
        .map(|(_, _, st_e2)| Decimal::new(*st_e2, 2))
}

/// Reverse lookup: pounds for a kilogram value that matches a table row
/// within +/- 0.0001
pub fn exact_pounds_for_kg(kg: Decimal) -> Option<Decimal> {
    let tol = reverse_tolerance();
    WEIGHT_TABLE
        .iter()
        .find(|(_, kg_e4, _)| (kg - Decimal::new(*kg_e4, 4)).abs() < tol)
        .map(|(lbs, _, _)| Decimal::from(*lbs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_heights() {
        assert_eq!(exact_height_cm(5, 9), Some(dec!(175.26)));
        assert_eq!(exact_height_cm(5, 0), Some(dec!(152.40)));
        assert_eq!(exact_height_cm(6, 0), Some(dec!(182.88)));
        assert_eq!(exact_height_cm(6, 2), Some(dec!(187.96)));
        assert_eq!(exact_height_m(5, 9), Some(dec!(1.7526)));
    }

    #[test]
    fn test_height_misses() {
        assert_eq!(exact_height_cm(4, 11), None);
        assert_eq!(exact_height_cm(6, 3), None);
        assert_eq!(exact_height_cm(5, 12), None);
    }

    #[test]
    fn test_exact_weights() {
        assert_eq!(exact_weight_kg(dec!(100)), Some(dec!(45.3592)));
        assert_eq!(exact_weight_kg(dec!(150)), Some(dec!(68.0389)));
        assert_eq!(exact_weight_kg(dec!(200)), Some(dec!(90.7185)));
        assert_eq!(exact_weight_stones(dec!(140)), Some(dec!(10.00)));
    }

    #[test]
    fn test_weight_misses() {
        assert_eq!(exact_weight_kg(dec!(105)), None);
        assert_eq!(exact_weight_kg(dec!(150.5)), None);
        assert_eq!(exact_weight_kg(dec!(90)), None);
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(exact_pounds_for_kg(dec!(68.0389)), Some(dec!(150)));
        // Within tolerance
        assert_eq!(exact_pounds_for_kg(dec!(68.03895)), Some(dec!(150)));
        // Outside tolerance
        assert_eq!(exact_pounds_for_kg(dec!(68.04)), None);
    }
}
