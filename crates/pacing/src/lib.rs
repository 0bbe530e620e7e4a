pub mod climbing;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fatigue;
pub mod format;
pub mod models;
pub mod nutrition;
pub mod performance;
pub mod plan;
pub mod planner;
pub mod profile;
pub mod solver;
pub mod terrain;
pub mod types;

pub use crate::{
    config::PlannerConfig,
    errors::PlanError,
    models::{
        Checkpoint, EffortLevel, PlanResult, PlanSummary, Segment, SegmentResult, TerrainType,
    },
    planner::{PlanInput, Planner, compute_forward, compute_forward_batch, compute_inverse},
    profile::{AthleteProfile, ClimbingAbility, FitnessLevel},
    solver::{EffortThresholds, InversePlan},
};
