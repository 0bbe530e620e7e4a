//! Entry points for forward and inverse planning.

use rayon::prelude::*;
use time::Time;
use tracing::debug;

use crate::config::PlannerConfig;
use crate::engine::PacingEngine;
use crate::errors::PlanError;
use crate::models::{Checkpoint, PlanResult, Segment};
use crate::plan::{PlanAssembler, PlanOptions};
use crate::profile::AthleteProfile;
use crate::solver::{self, InversePlan};

/// Validated inputs for one plan computation.
#[derive(Debug, Clone, Copy)]
pub struct PlanInput<'a> {
    pub segments: &'a [Segment],
    pub athlete: &'a AthleteProfile,
    pub checkpoints: &'a [Checkpoint],
}

/// Holds configuration shared by every plan it computes. Holds no
/// per-plan state, so one planner can serve many threads.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
    race_start: Option<Time>,
}

impl Planner {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            race_start: None,
        }
    }

    pub fn with_race_start(mut self, start: Time) -> Self {
        self.race_start = Some(start);
        self
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    fn prepare<'a>(
        &self,
        input: PlanInput<'a>,
    ) -> Result<(PlanAssembler<'a>, PacingEngine<'a>), PlanError> {
        input.athlete.check()?;
        let assembler = PlanAssembler::new(
            input.segments,
            input.checkpoints,
            PlanOptions {
                nutrition: self.config.nutrition,
                race_start: self.race_start,
            },
        )?;
        Ok((
            assembler,
            PacingEngine::new(input.athlete, self.config.climbing),
        ))
    }

    pub fn forward(&self, input: PlanInput<'_>) -> Result<PlanResult, PlanError> {
        let (assembler, mut engine) = self.prepare(input)?;
        let plan = assembler.assemble(&mut engine)?;
        debug!(
            total_min = plan.summary.total_time_min,
            capped = plan.summary.capped_segments,
            "Forward plan computed"
        );
        Ok(plan)
    }

    /// Plans for a total race time of `target_time_min`, stops included.
    pub fn inverse(
        &self,
        input: PlanInput<'_>,
        target_time_min: f64,
    ) -> Result<InversePlan, PlanError> {
        let (assembler, engine) = self.prepare(input)?;
        solver::solve(&assembler, &engine, target_time_min, &self.config.solver)
    }
}

pub fn compute_forward(
    segments: &[Segment],
    athlete: &AthleteProfile,
    checkpoints: &[Checkpoint],
) -> Result<PlanResult, PlanError> {
    Planner::default().forward(PlanInput {
        segments,
        athlete,
        checkpoints,
    })
}

pub fn compute_inverse(
    segments: &[Segment],
    athlete: &AthleteProfile,
    checkpoints: &[Checkpoint],
    target_time_min: f64,
) -> Result<InversePlan, PlanError> {
    Planner::default().inverse(
        PlanInput {
            segments,
            athlete,
            checkpoints,
        },
        target_time_min,
    )
}

/// Computes independent forward plans in parallel. Results keep input order.
pub fn compute_forward_batch(
    planner: &Planner,
    inputs: &[PlanInput<'_>],
) -> Vec<Result<PlanResult, PlanError>> {
    inputs
        .par_iter()
        .map(|input| planner.forward(*input))
        .collect()
}
