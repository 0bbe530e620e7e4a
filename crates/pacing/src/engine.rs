//! Forward pacing engine.
//!
//! Converts one segment into an adjusted pace by running, in this order:
//! climbing adjustment, terrain efficiency, fatigue, safety caps. The order
//! matters and must not change.

use tracing::warn;

use crate::climbing::GradientEfficiency;
use crate::errors::PlanError;
use crate::fatigue::EffortState;
use crate::models::Segment;
use crate::profile::AthleteProfile;
use crate::terrain;

/// Fastest allowed pace as a multiple of base pace.
pub const MIN_PACE_FACTOR: f64 = 0.8;
/// Slowest allowed pace as a multiple of base pace.
pub const MAX_PACE_FACTOR: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatigueMode {
    Enabled,
    Disabled,
}

impl FatigueMode {
    pub fn for_profile(profile: &AthleteProfile) -> Self {
        if profile.fatigue_enabled {
            FatigueMode::Enabled
        } else {
            FatigueMode::Disabled
        }
    }
}

/// Output of the pipeline for a single segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPace {
    pub elevation_pace: f64,
    pub terrain_factor: f64,
    pub fatigue_multiplier: f64,
    pub fatigue_seconds_per_km: f64,
    pub pace: f64,
    pub pace_capped: bool,
    pub effort_km: f64,
    pub cumulative_effort_km: f64,
    pub segment_time_min: f64,
}

#[derive(Debug, Clone)]
pub struct PacingEngine<'a> {
    profile: &'a AthleteProfile,
    climbing: GradientEfficiency,
    fatigue: FatigueMode,
}

impl<'a> PacingEngine<'a> {
    pub fn new(profile: &'a AthleteProfile, climbing: GradientEfficiency) -> Self {
        Self {
            profile,
            climbing,
            fatigue: FatigueMode::for_profile(profile),
        }
    }

    /// Engine used by the inverse solver, where fatigue is always zero.
    pub fn without_fatigue(mut self) -> Self {
        self.fatigue = FatigueMode::Disabled;
        self
    }

    pub fn profile(&self) -> &AthleteProfile {
        self.profile
    }

    pub fn fatigue_mode(&self) -> FatigueMode {
        self.fatigue
    }

    /// Paces segment `index` and advances `state` past it.
    pub fn pace_segment(
        &self,
        index: usize,
        segment: &Segment,
        state: &mut EffortState,
    ) -> Result<SegmentPace, PlanError> {
        segment.check(index)?;
        let base_pace = self.profile.base_pace_min_per_km;

        let elevation_pace =
            self.climbing
                .elevation_pace(segment, base_pace, self.profile.climbing_ability);

        let terrain_factor = terrain::segment_factor(segment, self.profile.skill_level);
        let pre_fatigue_pace = elevation_pace * terrain_factor;

        let effort_km = segment.effort_km();
        let cumulative_effort_km = state.add_effort(effort_km);

        let fatigue_multiplier = match self.fatigue {
            FatigueMode::Enabled => self
                .profile
                .fitness_level
                .fatigue_params()
                .multiplier(cumulative_effort_km),
            FatigueMode::Disabled => 1.0,
        };
        let fatigued_pace = pre_fatigue_pace * fatigue_multiplier;
        let fatigue_seconds_per_km = (fatigued_pace - pre_fatigue_pace) * 60.0;

        let pace = fatigued_pace.clamp(self.profile.min_pace(), self.profile.max_pace());
        let pace_capped = pace != fatigued_pace;
        if pace_capped {
            warn!(
                segment = index,
                uncapped = fatigued_pace,
                capped = pace,
                "Pace capped to safety bounds"
            );
        }

        let segment_time_min = segment.distance_km * pace;
        state.add_moving_time(segment_time_min);

        Ok(SegmentPace {
            elevation_pace,
            terrain_factor,
            fatigue_multiplier,
            fatigue_seconds_per_km,
            pace,
            pace_capped,
            effort_km,
            cumulative_effort_km,
            segment_time_min,
        })
    }
}
