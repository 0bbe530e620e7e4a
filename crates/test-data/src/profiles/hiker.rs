//! Hiker archetype.

use pacing::{ClimbingAbility, FitnessLevel};

use super::AthleteArchetype;

/// Athlete who walks most of the course.
///
/// Based on typical recreational hikers:
/// - Base pace: ~11:00/km (about 5.5 km/h) on the flat
/// - Conservative climbing and low technical skill
#[derive(Debug, Clone)]
pub struct HikerArchetype {
    pace: f64,
    climbing: ClimbingAbility,
    fitness: FitnessLevel,
    skill: f64,
    variance: f64,
}

impl Default for HikerArchetype {
    fn default() -> Self {
        Self {
            pace: 11.0,
            climbing: ClimbingAbility::Conservative,
            fitness: FitnessLevel::Recreational,
            skill: 0.3,
            variance: 0.12,
        }
    }
}

impl HikerArchetype {
    /// A hiker with the given flat speed in km/h.
    pub fn with_speed(speed_kmh: f64) -> Self {
        Self {
            pace: 60.0 / speed_kmh,
            ..Default::default()
        }
    }

    /// Fast hiker (~6.5 km/h).
    pub fn fast() -> Self {
        Self {
            climbing: ClimbingAbility::Moderate,
            fitness: FitnessLevel::Trained,
            ..Self::with_speed(6.5)
        }
    }

    /// Slower, with a loaded pack.
    pub fn backpacker() -> Self {
        Self {
            pace: 14.0,
            fitness: FitnessLevel::Untrained,
            variance: 0.15,
            ..Default::default()
        }
    }
}

impl AthleteArchetype for HikerArchetype {
    fn base_pace_min_per_km(&self) -> f64 {
        self.pace
    }

    fn climbing_ability(&self) -> ClimbingAbility {
        self.climbing
    }

    fn fitness_level(&self) -> FitnessLevel {
        self.fitness
    }

    fn skill_level(&self) -> f64 {
        self.skill
    }

    fn variance(&self) -> f64 {
        self.variance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_to_pace() {
        let hiker = HikerArchetype::with_speed(6.0);
        assert!((hiker.base_pace_min_per_km() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_backpacker_is_slowest() {
        assert!(
            HikerArchetype::backpacker().base_pace_min_per_km()
                > HikerArchetype::default().base_pace_min_per_km()
        );
    }
}
