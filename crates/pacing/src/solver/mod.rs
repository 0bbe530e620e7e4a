//! Inverse target-time solver.
//!
//! Works back from a goal finish time to per-segment paces: the natural
//! plan is computed with fatigue off, the difference to the target is
//! spread by [`allocation::AllocationModel`], and the finished plan is
//! assembled from the allocated paces.

pub mod allocation;
pub mod thresholds;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SolverConfig;
use crate::engine::{PacingEngine, SegmentPace};
use crate::errors::PlanError;
use crate::fatigue::EffortState;
use crate::models::{EffortLevel, PlanResult, Segment, SegmentResult};
use crate::plan::{PacedSegment, PlanAssembler, SegmentPacer};

pub use allocation::{Allocation, AllocationModel};
pub use thresholds::EffortThresholds;

/// Result of working back from a target time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InversePlan {
    pub plan: PlanResult,
    /// Natural moving time, fatigue off.
    pub natural_time_min: f64,
    /// Requested total race time, stops included.
    pub target_time_min: f64,
    pub achievable: bool,
    pub allocated_min: f64,
    /// Minutes of the requested deviation left uncovered by the budget.
    pub shortfall_min: f64,
    pub thresholds: EffortThresholds,
}

/// Replays the natural plan with allocated deviations applied.
struct AllocatedPacer<'a> {
    natural: &'a [SegmentResult],
    allocation: &'a Allocation,
    min_pace: f64,
    max_pace: f64,
}

impl SegmentPacer for AllocatedPacer<'_> {
    fn pace(
        &mut self,
        index: usize,
        segment: &Segment,
        state: &mut EffortState,
    ) -> Result<PacedSegment, PlanError> {
        let natural = self
            .natural
            .get(index)
            .ok_or_else(|| PlanError::invalid_segment(index, "no natural pace for segment"))?;
        let fraction = self.allocation.fractions.get(index).copied().unwrap_or(0.0);
        let level = self
            .allocation
            .levels
            .get(index)
            .copied()
            .unwrap_or(EffortLevel::Steady);

        let natural_pace = natural.adjusted_pace_min_per_km;
        let target_pace = natural_pace * (1.0 + fraction);
        let pace = target_pace.clamp(self.min_pace, self.max_pace);

        let effort_km = segment.effort_km();
        let cumulative_effort_km = state.add_effort(effort_km);
        let segment_time_min = segment.distance_km * pace;
        state.add_moving_time(segment_time_min);

        Ok(PacedSegment {
            pace: SegmentPace {
                elevation_pace: natural.elevation_pace_min_per_km,
                terrain_factor: natural.terrain_factor,
                fatigue_multiplier: 1.0,
                fatigue_seconds_per_km: 0.0,
                pace,
                pace_capped: natural.pace_capped || (pace - target_pace).abs() > 1e-9,
                effort_km,
                cumulative_effort_km,
                segment_time_min,
            },
            natural_pace: Some(natural_pace),
            effort_level: Some(level),
        })
    }
}

/// Solves for `target_time_min` of total race time on an already
/// validated route.
pub fn solve(
    assembler: &PlanAssembler<'_>,
    engine: &PacingEngine<'_>,
    target_time_min: f64,
    config: &SolverConfig,
) -> Result<InversePlan, PlanError> {
    let checkpoint_time_min = assembler.checkpoint_time_min();
    if !target_time_min.is_finite() || target_time_min <= checkpoint_time_min {
        return Err(PlanError::InvalidTarget(format!(
            "{target_time_min} min must exceed the {checkpoint_time_min} min of checkpoint stops"
        )));
    }

    let mut natural_engine = engine.clone().without_fatigue();
    let natural = assembler.assemble(&mut natural_engine)?;
    let model = AllocationModel::new(assembler.segments(), &natural, natural_engine.profile());

    let target_moving_min = target_time_min - checkpoint_time_min;
    let allocation = model.allocate(target_moving_min);
    debug!(
        natural_min = model.natural_time_min(),
        target_moving_min,
        requested_min = allocation.requested_min,
        allocated_min = allocation.allocated_min,
        "Allocation complete"
    );
    if !allocation.achievable {
        info!(
            target_time_min,
            shortfall_min = allocation.shortfall_min(),
            budget_min = model.budget_min(),
            "Target time is outside the effort budget; returning closest plan"
        );
    }

    let profile = natural_engine.profile();
    let mut pacer = AllocatedPacer {
        natural: &natural.segments,
        allocation: &allocation,
        min_pace: profile.min_pace(),
        max_pace: profile.max_pace(),
    };
    let plan = assembler.assemble(&mut pacer)?;

    let thresholds = thresholds::find_thresholds(&model, checkpoint_time_min, config);
    info!(
        push_min = thresholds.push_min,
        push_found = thresholds.push_found,
        natural_min = thresholds.natural_min,
        protect_min = thresholds.protect_min,
        protect_found = thresholds.protect_found,
        "Effort thresholds"
    );

    Ok(InversePlan {
        plan,
        natural_time_min: model.natural_time_min(),
        target_time_min,
        achievable: allocation.achievable,
        allocated_min: allocation.allocated_min,
        shortfall_min: allocation.shortfall_min(),
        thresholds,
    })
}
