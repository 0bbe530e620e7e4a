use crate::config::NutritionRates;

/// Carbohydrate targets are rounded to this many grams.
pub const CARBS_UNIT_G: f64 = 10.0;
/// Water targets are rounded to this many milliliters.
pub const WATER_UNIT_ML: f64 = 50.0;

pub fn round_to(value: f64, unit: f64) -> f64 {
    (value / unit).round() * unit
}

/// Carbs (g) and water (mL) to take on during a segment of this duration.
pub fn segment_targets(segment_time_min: f64, rates: &NutritionRates) -> (f64, f64) {
    let hours = segment_time_min / 60.0;
    (
        round_to(hours * rates.carbs_g_per_hour, CARBS_UNIT_G),
        round_to(hours * rates.water_ml_per_hour, WATER_UNIT_ML),
    )
}
