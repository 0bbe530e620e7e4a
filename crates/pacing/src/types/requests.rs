//! Plan request body.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PlannerConfig;
use crate::errors::PlanError;
use crate::format::{parse_clock, parse_duration};
use crate::models::{Checkpoint, Segment};
use crate::planner::{PlanInput, Planner};
use crate::profile::AthleteProfile;
use crate::types::PlanResponse;

/// Checkpoint as supplied by a caller; the stop falls back to the
/// configured default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointRequest {
    pub name: String,
    pub after_segment: usize,
    pub stop_minutes: Option<f64>,
}

impl CheckpointRequest {
    pub fn resolve(&self, config: &PlannerConfig) -> Checkpoint {
        Checkpoint::new(
            self.name.clone(),
            self.after_segment,
            self.stop_minutes
                .unwrap_or(config.default_checkpoint_stop_min),
        )
    }
}

/// Plan request. `target_time` switches the request to inverse mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub segments: Vec<Segment>,
    pub athlete: AthleteProfile,
    #[serde(default)]
    pub checkpoints: Vec<CheckpointRequest>,
    /// Start time of day, `HH:MM`.
    pub race_start: Option<String>,
    /// Goal total race time, `HH:MM[:SS]`.
    pub target_time: Option<String>,
}

impl PlanRequest {
    pub fn execute(&self, config: &PlannerConfig) -> Result<PlanResponse, PlanError> {
        let mut planner = Planner::new(config.clone());
        if let Some(start) = &self.race_start {
            planner = planner.with_race_start(parse_clock(start)?);
        }

        let checkpoints: Vec<Checkpoint> =
            self.checkpoints.iter().map(|c| c.resolve(config)).collect();
        let input = PlanInput {
            segments: &self.segments,
            athlete: &self.athlete,
            checkpoints: &checkpoints,
        };

        match &self.target_time {
            Some(target) => {
                let target_min = parse_duration(target)?;
                debug!(target_min, "Inverse plan requested");
                Ok(PlanResponse::Inverse(planner.inverse(input, target_min)?))
            }
            None => Ok(PlanResponse::Forward(planner.forward(input)?)),
        }
    }
}
