//! Fluent builder for constructing pacing scenarios.

use std::time::Instant;

use pacing::{
    AthleteProfile, Checkpoint, Segment,
    types::{CheckpointRequest, PlanRequest},
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{RouteConfig, TerrainMix};
use crate::generators::{RouteGenerator, route::checkpoints_every};
use crate::profiles::{AthleteArchetype, RunnerArchetype, sample_athlete};
use crate::terrain::ElevationGenerator;

/// Elevation preset for the generated route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landscape {
    Alpine,
    Rolling,
    Flat,
}

impl Landscape {
    fn elevation(self, seed: u32) -> ElevationGenerator {
        match self {
            Landscape::Alpine => ElevationGenerator::alpine(seed),
            Landscape::Rolling => ElevationGenerator::rolling(seed),
            Landscape::Flat => ElevationGenerator::flat(seed),
        }
    }
}

/// A generated route and athlete, ready to plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub segments: Vec<Segment>,
    pub athlete: AthleteProfile,
    pub checkpoints: Vec<Checkpoint>,
    pub race_start: Option<String>,
}

impl Scenario {
    /// A plan request for this scenario; `target_time` (`HH:MM[:SS]`)
    /// makes it an inverse request.
    pub fn to_request(&self, target_time: Option<String>) -> PlanRequest {
        PlanRequest {
            segments: self.segments.clone(),
            athlete: self.athlete.clone(),
            checkpoints: self
                .checkpoints
                .iter()
                .map(|c| CheckpointRequest {
                    name: c.name.clone(),
                    after_segment: c.after_segment,
                    stop_minutes: Some(c.stop_minutes),
                })
                .collect(),
            race_start: self.race_start.clone(),
            target_time,
        }
    }

    pub fn total_distance_km(&self) -> f64 {
        self.segments.iter().map(|s| s.distance_km).sum()
    }
}

impl From<Scenario> for PlanRequest {
    fn from(scenario: Scenario) -> Self {
        scenario.to_request(None)
    }
}

/// Builder for creating pacing scenarios.
///
/// # Example
///
/// ```rust,ignore
/// let scenario = ScenarioBuilder::new()
///     .with_landscape(Landscape::Alpine)
///     .with_distance(80.0)
///     .with_checkpoints_every(5, 4.0)
///     .with_archetype(RunnerArchetype::elite())
///     .build(&mut rng);
/// ```
pub struct ScenarioBuilder {
    landscape: Landscape,
    route: RouteConfig,
    checkpoint_every: usize,
    checkpoint_stop_min: f64,
    archetype: Box<dyn AthleteArchetype>,
    vary_athlete: bool,
    race_start: Option<String>,
    seed: u32,
}

impl Default for ScenarioBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self {
            landscape: Landscape::Alpine,
            route: RouteConfig::default(),
            checkpoint_every: 0,
            checkpoint_stop_min: 5.0,
            archetype: Box::new(RunnerArchetype::default()),
            vary_athlete: false,
            race_start: None,
            seed: 42,
        }
    }

    pub fn with_landscape(mut self, landscape: Landscape) -> Self {
        self.landscape = landscape;
        self
    }

    /// Sets the route length in km.
    pub fn with_distance(mut self, km: f64) -> Self {
        self.route.distance_km = km;
        self
    }

    pub fn with_segment_length(mut self, km: f64) -> Self {
        self.route.segment_km = km;
        self
    }

    pub fn with_terrain_mix(mut self, mix: TerrainMix) -> Self {
        self.route.terrain = mix;
        self
    }

    /// Places an aid station after every `every` segments.
    pub fn with_checkpoints_every(mut self, every: usize, stop_minutes: f64) -> Self {
        self.checkpoint_every = every;
        self.checkpoint_stop_min = stop_minutes;
        self
    }

    pub fn with_archetype(mut self, archetype: impl AthleteArchetype + 'static) -> Self {
        self.archetype = Box::new(archetype);
        self
    }

    /// Samples the athlete around the archetype instead of using it as is.
    pub fn with_athlete_variance(mut self, enabled: bool) -> Self {
        self.vary_athlete = enabled;
        self
    }

    /// Sets the start time of day, `HH:MM`.
    pub fn with_race_start(mut self, start: impl Into<String>) -> Self {
        self.race_start = Some(start.into());
        self
    }

    /// Sets the noise seed for the elevation profile.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(&self, rng: &mut impl Rng) -> Scenario {
        let start = Instant::now();

        let generator =
            RouteGenerator::new(self.landscape.elevation(self.seed), self.route.clone());
        let segments = generator.generate(rng);
        let checkpoints =
            checkpoints_every(segments.len(), self.checkpoint_every, self.checkpoint_stop_min);
        let athlete = if self.vary_athlete {
            sample_athlete(self.archetype.as_ref(), rng)
        } else {
            self.archetype.profile()
        };

        tracing::debug!(
            segments = segments.len(),
            checkpoints = checkpoints.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Scenario generated"
        );

        Scenario {
            segments,
            athlete,
            checkpoints,
            race_start: self.race_start.clone(),
        }
    }
}

// Preset scenarios
impl ScenarioBuilder {
    /// 50 km mountain race with aid every 4 segments.
    pub fn mountain_50k() -> Self {
        Self::new()
            .with_landscape(Landscape::Alpine)
            .with_distance(50.0)
            .with_segment_length(2.5)
            .with_checkpoints_every(4, 5.0)
            .with_race_start("06:00")
    }

    /// 100 mile ultra on rolling terrain.
    pub fn rolling_100_mile() -> Self {
        Self::new()
            .with_landscape(Landscape::Rolling)
            .with_distance(160.9)
            .with_segment_length(5.0)
            .with_checkpoints_every(3, 10.0)
            .with_race_start("05:00")
    }

    /// Road marathon, no stops.
    pub fn road_marathon() -> Self {
        Self::new()
            .with_landscape(Landscape::Flat)
            .with_distance(42.195)
            .with_segment_length(1.0)
            .with_terrain_mix(TerrainMix::road())
            .with_archetype(RunnerArchetype::with_pace(5.0))
    }
}
