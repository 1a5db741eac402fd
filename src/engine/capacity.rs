//! Gastric capacity ceiling.
//!
//! Independent of the glucose path: computes how much a single meal can
//! safely be, given the cyst crowding the stomach, and bands a proposed
//! meal volume against that ceiling.

use std::f64::consts::PI;

use super::models::{EngineError, MealFit};

/// Minimum feeding allowance in grams, regardless of cyst size.
pub const CAPACITY_FLOOR_G: f64 = 15.0;

/// How strongly the cyst volume displaces usable stomach capacity.
const PRESSURE_DISPLACEMENT: f64 = 3.5;
/// Reduced motility from the crowded stomach.
const MOTILITY_REDUCTION: f64 = 0.85;
/// Fraction of the ceiling at which a meal counts as near-limit.
const NEAR_LIMIT_RATIO: f64 = 0.8;

/// Safe per-meal volume ceiling in grams.
///
/// The cyst is treated as a sphere of the given diameter; its volume in
/// cm³ displaces capacity through the pressure factor, and the remainder
/// is discounted for reduced motility.
pub fn max_meal_volume(base_capacity_g: f64, cyst_diameter_mm: f64) -> Result<f64, EngineError> {
    if base_capacity_g <= 0.0 {
        return Err(EngineError::NonPositiveCapacity(base_capacity_g));
    }
    if cyst_diameter_mm < 0.0 {
        return Err(EngineError::NegativeDiameter(cyst_diameter_mm));
    }

    let radius_cm = cyst_diameter_mm / 20.0;
    let cyst_volume = (4.0 / 3.0) * PI * radius_cm.powi(3);
    let capacity = (base_capacity_g - cyst_volume * PRESSURE_DISPLACEMENT) * MOTILITY_REDUCTION;
    Ok(capacity.max(CAPACITY_FLOOR_G))
}

/// Band a proposed meal volume against the ceiling.
pub fn classify_meal(proposed_g: f64, ceiling_g: f64) -> Result<MealFit, EngineError> {
    if proposed_g <= 0.0 {
        return Err(EngineError::NonPositiveMeal(proposed_g));
    }
    let fit = if proposed_g > ceiling_g {
        MealFit::Overload
    } else if proposed_g >= ceiling_g * NEAR_LIMIT_RATIO {
        MealFit::NearLimit
    } else {
        MealFit::Safe
    };
    Ok(fit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cyst_leaves_motility_discount_only() {
        let ceiling = max_meal_volume(80.0, 0.0).unwrap();
        assert_eq!(ceiling, 68.0);
    }

    #[test]
    fn test_strictly_decreasing_in_diameter() {
        let base = 200.0;
        let mut previous = f64::INFINITY;
        for diameter in [5.0, 10.0, 20.0, 30.0, 40.0] {
            let ceiling = max_meal_volume(base, diameter).unwrap();
            assert!(ceiling < previous, "ceiling not decreasing at {diameter} mm");
            previous = ceiling;
        }
    }

    #[test]
    fn test_floor_for_arbitrarily_large_cyst() {
        assert_eq!(max_meal_volume(80.0, 200.0).unwrap(), CAPACITY_FLOOR_G);
        assert_eq!(max_meal_volume(80.0, 5000.0).unwrap(), CAPACITY_FLOOR_G);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            max_meal_volume(0.0, 10.0),
            Err(EngineError::NonPositiveCapacity(_))
        ));
        assert!(matches!(
            max_meal_volume(80.0, -1.0),
            Err(EngineError::NegativeDiameter(_))
        ));
        assert!(matches!(
            classify_meal(0.0, 68.0),
            Err(EngineError::NonPositiveMeal(_))
        ));
    }

    #[test]
    fn test_meal_fit_bands() {
        // Near-limit starts at 80% of the ceiling
        assert_eq!(classify_meal(31.9, 40.0).unwrap(), MealFit::Safe);
        assert_eq!(classify_meal(32.0, 40.0).unwrap(), MealFit::NearLimit);
        assert_eq!(classify_meal(40.0, 40.0).unwrap(), MealFit::NearLimit);
        assert_eq!(classify_meal(40.1, 40.0).unwrap(), MealFit::Overload);

        let ceiling = max_meal_volume(80.0, 0.0).unwrap();
        assert_eq!(classify_meal(30.0, ceiling).unwrap(), MealFit::Safe);
        assert_eq!(classify_meal(60.0, ceiling).unwrap(), MealFit::NearLimit);
        assert_eq!(classify_meal(70.0, ceiling).unwrap(), MealFit::Overload);
    }
}
