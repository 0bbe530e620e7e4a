//! Athlete ability inputs and the lookup tables keyed on them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{PlanError, validation_message};
use crate::fatigue::FatigueParams;

/// Sustained climbing ability, mapped to a vertical speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimbingAbility {
    Conservative,
    Moderate,
    Strong,
    VeryStrong,
    Elite,
}

impl ClimbingAbility {
    pub const ALL: [ClimbingAbility; 5] = [
        ClimbingAbility::Conservative,
        ClimbingAbility::Moderate,
        ClimbingAbility::Strong,
        ClimbingAbility::VeryStrong,
        ClimbingAbility::Elite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClimbingAbility::Conservative => "conservative",
            ClimbingAbility::Moderate => "moderate",
            ClimbingAbility::Strong => "strong",
            ClimbingAbility::VeryStrong => "very_strong",
            ClimbingAbility::Elite => "elite",
        }
    }

    /// Base vertical speed in meters per hour.
    pub fn vertical_speed_m_per_h(&self) -> f64 {
        match self {
            ClimbingAbility::Conservative => 600.0,
            ClimbingAbility::Moderate => 800.0,
            ClimbingAbility::Strong => 1000.0,
            ClimbingAbility::VeryStrong => 1250.0,
            ClimbingAbility::Elite => 1500.0,
        }
    }

    /// Relative cost of changing pace on a climb. Stronger climbers pay less.
    pub fn climb_cost_multiplier(&self) -> f64 {
        match self {
            ClimbingAbility::Conservative => 1.2,
            ClimbingAbility::Moderate => 1.0,
            ClimbingAbility::Strong => 0.9,
            ClimbingAbility::VeryStrong => 0.8,
            ClimbingAbility::Elite => 0.75,
        }
    }
}

impl fmt::Display for ClimbingAbility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClimbingAbility {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClimbingAbility::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| PlanError::configuration(format!("unknown climbing ability '{s}'")))
    }
}

/// Endurance fitness, which drives fatigue onset and the effort budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Untrained,
    Recreational,
    Trained,
    Elite,
}

impl FitnessLevel {
    pub const ALL: [FitnessLevel; 4] = [
        FitnessLevel::Untrained,
        FitnessLevel::Recreational,
        FitnessLevel::Trained,
        FitnessLevel::Elite,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Untrained => "untrained",
            FitnessLevel::Recreational => "recreational",
            FitnessLevel::Trained => "trained",
            FitnessLevel::Elite => "elite",
        }
    }

    pub fn fatigue_params(&self) -> FatigueParams {
        match self {
            FitnessLevel::Untrained => FatigueParams::new(25.0, 0.35, 1.8),
            FitnessLevel::Recreational => FatigueParams::new(37.5, 0.25, 1.5),
            FitnessLevel::Trained => FatigueParams::new(55.0, 0.20, 1.4),
            FitnessLevel::Elite => FatigueParams::new(75.0, 0.15, 1.3),
        }
    }

    /// Largest share of natural moving time the solver may shift.
    pub fn effort_budget_fraction(&self) -> f64 {
        match self {
            FitnessLevel::Untrained => 0.15,
            FitnessLevel::Recreational => 0.25,
            FitnessLevel::Trained => 0.35,
            FitnessLevel::Elite => 0.50,
        }
    }

    /// Allocation cost multiplier reached at the finish line.
    pub fn late_cost_ceiling(&self) -> f64 {
        match self {
            FitnessLevel::Untrained => 1.5,
            FitnessLevel::Recreational => 1.3,
            FitnessLevel::Trained => 1.15,
            FitnessLevel::Elite => 1.05,
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitnessLevel {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FitnessLevel::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| PlanError::configuration(format!("unknown fitness level '{s}'")))
    }
}

fn default_fatigue_enabled() -> bool {
    true
}

/// Ability inputs supplied once per plan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AthleteProfile {
    /// Flat-ground reference pace.
    #[validate(range(exclusive_min = 0.0, message = "base_pace_min_per_km must be positive"))]
    pub base_pace_min_per_km: f64,
    pub climbing_ability: ClimbingAbility,
    pub fitness_level: FitnessLevel,
    /// Descent and technical-terrain proficiency, 0.0 (novice) to 1.0 (expert).
    #[validate(range(min = 0.0, max = 1.0, message = "skill_level must be between 0 and 1"))]
    pub skill_level: f64,
    #[serde(default = "default_fatigue_enabled")]
    pub fatigue_enabled: bool,
}

impl AthleteProfile {
    pub fn new(
        base_pace_min_per_km: f64,
        climbing_ability: ClimbingAbility,
        fitness_level: FitnessLevel,
        skill_level: f64,
    ) -> Self {
        Self {
            base_pace_min_per_km,
            climbing_ability,
            fitness_level,
            skill_level,
            fatigue_enabled: true,
        }
    }

    pub fn with_fatigue(mut self, enabled: bool) -> Self {
        self.fatigue_enabled = enabled;
        self
    }

    pub fn check(&self) -> Result<(), PlanError> {
        if !self.base_pace_min_per_km.is_finite() || !self.skill_level.is_finite() {
            return Err(PlanError::InvalidProfile(
                "pace and skill must be finite".to_string(),
            ));
        }
        self.validate()
            .map_err(|e| PlanError::InvalidProfile(validation_message(&e)))
    }

    /// Fastest pace any segment may be assigned.
    pub fn min_pace(&self) -> f64 {
        self.base_pace_min_per_km * crate::engine::MIN_PACE_FACTOR
    }

    /// Slowest pace any segment may be assigned.
    pub fn max_pace(&self) -> f64 {
        self.base_pace_min_per_km * crate::engine::MAX_PACE_FACTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_speeds_increase_with_ability() {
        let speeds: Vec<f64> = ClimbingAbility::ALL
            .iter()
            .map(|c| c.vertical_speed_m_per_h())
            .collect();
        assert_eq!(speeds.first(), Some(&600.0));
        assert_eq!(speeds.last(), Some(&1500.0));
        assert!(speeds.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_unknown_keys_fail_fast() {
        assert!(matches!(
            "superhuman".parse::<ClimbingAbility>(),
            Err(PlanError::Configuration(_))
        ));
        assert!(matches!(
            "pro".parse::<FitnessLevel>(),
            Err(PlanError::Configuration(_))
        ));
        assert_eq!(
            "very_strong".parse::<ClimbingAbility>().unwrap(),
            ClimbingAbility::VeryStrong
        );
    }

    #[test]
    fn test_profile_validation() {
        let profile = AthleteProfile::new(
            6.0,
            ClimbingAbility::Moderate,
            FitnessLevel::Recreational,
            0.5,
        );
        assert!(profile.check().is_ok());

        let mut bad = profile.clone();
        bad.skill_level = 1.5;
        assert!(matches!(bad.check(), Err(PlanError::InvalidProfile(_))));

        let mut bad = profile;
        bad.base_pace_min_per_km = 0.0;
        assert!(bad.check().is_err());
    }

    #[test]
    fn test_fatigue_defaults_on_when_missing() {
        let json = r#"{
            "base_pace_min_per_km": 6.5,
            "climbing_ability": "strong",
            "fitness_level": "trained",
            "skill_level": 0.3
        }"#;
        let profile: AthleteProfile = serde_json::from_str(json).unwrap();
        assert!(profile.fatigue_enabled);
        assert_eq!(profile.climbing_ability, ClimbingAbility::Strong);
    }
}
