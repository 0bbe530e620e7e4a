//! Segment generation from synthetic elevation profiles.

use pacing::{Checkpoint, Segment};
use rand::Rng;

use crate::config::RouteConfig;
use crate::terrain::ElevationGenerator;

/// Cuts a generated elevation profile into route segments.
#[derive(Debug, Clone)]
pub struct RouteGenerator {
    elevation: ElevationGenerator,
    config: RouteConfig,
}

impl RouteGenerator {
    pub fn new(elevation: ElevationGenerator, config: RouteConfig) -> Self {
        Self { elevation, config }
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Segment boundaries in km, from 0 to the route distance.
    fn boundaries(&self) -> Vec<f64> {
        let total = self.config.distance_km.max(0.0);
        let step = self.config.segment_km;
        if total <= 0.0 || step <= 0.0 {
            return Vec::new();
        }
        let mut bounds = vec![0.0];
        let mut at = step;
        // a trailing sliver under a tenth of a segment is merged into the last one
        while at < total - step * 0.1 {
            bounds.push(at);
            at += step;
        }
        bounds.push(total);
        bounds
    }

    /// Sums gain and loss between two points by sampling the profile.
    fn elevation_change(&self, start_km: f64, end_km: f64) -> (f64, f64) {
        let samples = ((end_km - start_km) * self.config.samples_per_km as f64)
            .ceil()
            .max(1.0) as usize;
        let step = (end_km - start_km) / samples as f64;

        let mut ascent = 0.0;
        let mut descent = 0.0;
        let mut previous = self.elevation.elevation_at(start_km);
        for i in 1..=samples {
            let current = self.elevation.elevation_at(start_km + step * i as f64);
            let delta = current - previous;
            if delta > 0.0 {
                ascent += delta;
            } else {
                descent -= delta;
            }
            previous = current;
        }
        (ascent, descent)
    }

    /// Generates the route. Terrain is drawn from `rng`; elevation comes
    /// from the noise seed alone.
    pub fn generate(&self, rng: &mut impl Rng) -> Vec<Segment> {
        self.boundaries()
            .windows(2)
            .map(|w| {
                let (start, end) = (w[0], w[1]);
                let (ascent, descent) = self.elevation_change(start, end);
                let distance = end - start;
                let gradient = (ascent - descent) / (distance * 1000.0);
                let terrain = self.config.terrain.sample(gradient, rng);
                Segment::new(distance, ascent, descent, terrain)
            })
            .collect()
    }
}

/// Aid stations every `every` segments, strictly inside the route.
pub fn checkpoints_every(segment_count: usize, every: usize, stop_minutes: f64) -> Vec<Checkpoint> {
    if every == 0 {
        return Vec::new();
    }
    (0..segment_count.saturating_sub(1))
        .filter(|i| (i + 1) % every == 0)
        .enumerate()
        .map(|(n, after)| Checkpoint::new(format!("CP{}", n + 1), after, stop_minutes))
        .collect()
}
