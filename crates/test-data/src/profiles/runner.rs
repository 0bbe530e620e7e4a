//! Trail runner archetype.

use pacing::{ClimbingAbility, FitnessLevel};

use super::AthleteArchetype;

/// Athlete who runs the flats and most descents.
///
/// Based on typical recreational to competitive trail runners:
/// - Base pace: ~6:00/km on smooth trail
/// - Moderate climbing, recreational fitness
#[derive(Debug, Clone)]
pub struct RunnerArchetype {
    pace: f64,
    climbing: ClimbingAbility,
    fitness: FitnessLevel,
    skill: f64,
    variance: f64,
}

impl Default for RunnerArchetype {
    fn default() -> Self {
        Self {
            pace: 6.0,
            climbing: ClimbingAbility::Moderate,
            fitness: FitnessLevel::Recreational,
            skill: 0.5,
            variance: 0.08,
        }
    }
}

impl RunnerArchetype {
    /// A runner with the given flat pace in min/km.
    pub fn with_pace(pace_min_per_km: f64) -> Self {
        Self {
            pace: pace_min_per_km,
            ..Default::default()
        }
    }

    /// Front-of-the-pack runner (~4:15/km).
    pub fn elite() -> Self {
        Self {
            pace: 4.25,
            climbing: ClimbingAbility::Elite,
            fitness: FitnessLevel::Elite,
            skill: 0.85,
            variance: 0.04,
        }
    }

    pub fn recreational() -> Self {
        Self::default()
    }

    /// Road runner new to trails: fast on the flat, timid downhill.
    pub fn road_convert() -> Self {
        Self {
            pace: 5.0,
            climbing: ClimbingAbility::Strong,
            fitness: FitnessLevel::Trained,
            skill: 0.2,
            variance: 0.06,
        }
    }
}

impl AthleteArchetype for RunnerArchetype {
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
    fn test_default_archetype() {
        let profile = RunnerArchetype::default().profile();
        assert_eq!(profile.base_pace_min_per_km, 6.0);
        assert!(profile.fatigue_enabled);
    }

    #[test]
    fn test_elite_is_faster() {
        assert!(
            RunnerArchetype::elite().base_pace_min_per_km()
                < RunnerArchetype::recreational().base_pace_min_per_km()
        );
    }
}
