//! Fluent builder APIs for test scenarios.
//!
//! The [`ScenarioBuilder`] provides a convenient way to construct a
//! generated route, athlete, and aid stations in one go.

mod scenario;

pub use scenario::{Landscape, Scenario, ScenarioBuilder};
