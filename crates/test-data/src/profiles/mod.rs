//! Athlete archetypes.
//!
//! Archetypes turn a loose description of an athlete ("fast trail runner",
//! "steady hiker") into a concrete [`AthleteProfile`], with optional random
//! variation so generated populations are not all identical.

mod hiker;
mod runner;

pub use hiker::HikerArchetype;
pub use runner::RunnerArchetype;

use pacing::{AthleteProfile, ClimbingAbility, FitnessLevel};
use rand_distr::{Distribution, Normal};

/// A family of athletes sharing typical abilities.
///
/// Implementations should provide:
/// - Flat pace in min/km
/// - Climbing ability and fitness
/// - Typical descent/technical skill
/// - Day-to-day variance of pace
pub trait AthleteArchetype: Send + Sync {
    fn base_pace_min_per_km(&self) -> f64;

    fn climbing_ability(&self) -> ClimbingAbility;

    fn fitness_level(&self) -> FitnessLevel;

    /// Descent and technical skill, 0.0 to 1.0.
    fn skill_level(&self) -> f64;

    /// Coefficient of variation applied to pace when sampling (0.1 = ±10%).
    fn variance(&self) -> f64;

    /// The archetype's typical athlete, without variation.
    fn profile(&self) -> AthleteProfile {
        AthleteProfile::new(
            self.base_pace_min_per_km(),
            self.climbing_ability(),
            self.fitness_level(),
            self.skill_level(),
        )
    }
}

/// Samples one athlete from an archetype, varying pace and skill.
pub fn sample_athlete(archetype: &dyn AthleteArchetype, rng: &mut impl rand::Rng) -> AthleteProfile {
    let mut profile = archetype.profile();

    let std_dev = archetype.variance();
    if let Ok(normal) = Normal::new(1.0, std_dev) {
        let factor: f64 = normal.sample(rng);
        profile.base_pace_min_per_km *= factor.clamp(0.7, 1.4);
    }
    if let Ok(normal) = Normal::new(profile.skill_level, 0.1) {
        let skill: f64 = normal.sample(rng);
        profile.skill_level = skill.clamp(0.0, 1.0);
    }
    profile
}
