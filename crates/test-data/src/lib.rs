//! Test data generation for pacing.
//!
//! This crate provides tools for generating realistic race routes and
//! athletes to support manual runs of the planner and property-style
//! integration testing.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let scenario = ScenarioBuilder::new()
//!     .with_landscape(Landscape::Alpine)
//!     .with_distance(50.0)
//!     .with_checkpoints_every(4, 5.0)
//!     .with_archetype(RunnerArchetype::elite())
//!     .build(&mut rng);
//! let request: PlanRequest = scenario.into();
//! ```

pub mod builders;
pub mod config;
pub mod generators;
pub mod profiles;
pub mod terrain;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{Landscape, Scenario, ScenarioBuilder};
    pub use crate::config::{RouteConfig, TerrainMix};
    pub use crate::generators::{RouteGenerator, route::checkpoints_every};
    pub use crate::profiles::{AthleteArchetype, HikerArchetype, RunnerArchetype, sample_athlete};
    pub use crate::terrain::ElevationGenerator;
    pub use pacing::types::PlanRequest;
}
