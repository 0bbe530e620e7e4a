//! Base pace from a known race performance.

use crate::errors::PlanError;

/// Riegel fatigue exponent.
pub const RIEGEL_EXPONENT: f64 = 1.06;
/// Longest distance still raced at marathon intensity.
pub const ULTRA_START_KM: f64 = 42.2;

const ULTRA_DOWNSHIFT_RATE: f64 = 0.08;
const ULTRA_DOWNSHIFT_CAP: f64 = 0.30;

/// Predicts a finish time with `T2 = T1 × (D2/D1)^1.06`.
///
/// # Errors
/// `InvalidProfile` if any input is not a positive finite number.
pub fn predict_time_riegel(
    known_km: f64,
    known_min: f64,
    target_km: f64,
) -> Result<f64, PlanError> {
    if [known_km, known_min, target_km]
        .iter()
        .any(|v| !v.is_finite() || *v <= 0.0)
    {
        return Err(PlanError::InvalidProfile(
            "All distances and times must be positive".to_string(),
        ));
    }
    Ok(known_min * (target_km / known_km).powf(RIEGEL_EXPONENT))
}

/// Extra slowdown, as a fraction of pace, on top of Riegel for ultra
/// targets. Grows with how far the prediction extrapolates past the known
/// distance.
pub fn ultra_downshift(target_km: f64, known_km: f64) -> f64 {
    if target_km <= ULTRA_START_KM || target_km <= known_km {
        return 0.0;
    }
    (ULTRA_DOWNSHIFT_RATE * (target_km / known_km).ln()).min(ULTRA_DOWNSHIFT_CAP)
}

/// Flat pace in min/km for `target_km`, derived from a known result.
pub fn base_pace_from_performance(
    known_km: f64,
    known_min: f64,
    target_km: f64,
    apply_ultra_downshift: bool,
) -> Result<f64, PlanError> {
    let predicted = predict_time_riegel(known_km, known_min, target_km)?;
    let pace = predicted / target_km;
    if apply_ultra_downshift {
        Ok(pace * (1.0 + ultra_downshift(target_km, known_km)))
    } else {
        Ok(pace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_riegel_same_distance_is_identity() {
        let t = predict_time_riegel(10.0, 50.0, 10.0).unwrap();
        assert!((t - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_riegel_doubling() {
        let t = predict_time_riegel(10.0, 50.0, 20.0).unwrap();
        assert!((t - 50.0 * 2f64.powf(1.06)).abs() < 1e-9);
        assert!(t > 100.0);
    }

    #[test]
    fn test_riegel_rejects_non_positive() {
        assert!(predict_time_riegel(0.0, 50.0, 10.0).is_err());
        assert!(predict_time_riegel(10.0, -1.0, 10.0).is_err());
        assert!(predict_time_riegel(10.0, 50.0, f64::NAN).is_err());
    }

    #[test]
    fn test_ultra_downshift() {
        assert_eq!(ultra_downshift(21.1, 10.0), 0.0);
        assert_eq!(ultra_downshift(42.2, 21.1), 0.0);
        assert!(ultra_downshift(50.0, 10.0) > 0.0);
        assert!(ultra_downshift(100.0, 42.2) > 0.0);
        // a longer known result means less extrapolation
        assert!(ultra_downshift(100.0, 50.0) < ultra_downshift(100.0, 10.0));
        assert_eq!(ultra_downshift(100.0, 120.0), 0.0);
        assert_eq!(ultra_downshift(1000.0, 1.0), 0.30);
    }

    #[test]
    fn test_base_pace_ranges() {
        let cases = [
            // known km, known min, target km, pace range
            (10.0, 45.0, 50.0, 5.4, 5.8),
            (21.1, 90.0, 100.0, 5.0, 5.5),
            (10.0, 40.0, 42.2, 4.3, 4.5),
        ];
        for (known_km, known_min, target_km, low, high) in cases {
            let pace = base_pace_from_performance(known_km, known_min, target_km, true).unwrap();
            assert!(
                (low..=high).contains(&pace),
                "{known_km} km in {known_min} min -> {target_km} km: {pace:.3}"
            );
        }
    }

    #[test]
    fn test_five_k_to_hundred_miles_slows_down() {
        let pace = base_pace_from_performance(5.0, 20.0, 160.0, true).unwrap();
        assert!(pace > 6.0, "{pace:.3}");
    }

    #[test]
    fn test_marathon_gets_no_downshift() {
        let plain = base_pace_from_performance(10.0, 40.0, 42.2, false).unwrap();
        let shifted = base_pace_from_performance(10.0, 40.0, 42.2, true).unwrap();
        assert_eq!(plain, shifted);
    }

    #[test]
    fn test_base_pace_with_downshift() {
        let plain = base_pace_from_performance(42.195, 240.0, 100.0, false).unwrap();
        let shifted = base_pace_from_performance(42.195, 240.0, 100.0, true).unwrap();
        assert!(shifted > plain);
        assert!((shifted / plain - (1.0 + ultra_downshift(100.0, 42.195))).abs() < 1e-12);
    }
}
