//! Configuration types for route generation.

use pacing::TerrainType;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Relative likelihood of each surface, split by how steep a segment is.
///
/// Each list pairs a terrain with a weight; weights need not sum to one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainMix {
    /// Used when |gradient| is below `steep_gradient`.
    pub gentle: Vec<(TerrainType, f64)>,
    /// Used at or above `steep_gradient`.
    pub steep: Vec<(TerrainType, f64)>,
    pub steep_gradient: f64,
}

impl Default for TerrainMix {
    fn default() -> Self {
        Self::mountain()
    }
}

impl TerrainMix {
    /// Alpine trail race: mostly trail, technical ground on the steeps.
    pub fn mountain() -> Self {
        Self {
            gentle: vec![
                (TerrainType::Road, 0.5),
                (TerrainType::DirtRoad, 1.5),
                (TerrainType::SmoothTrail, 3.0),
                (TerrainType::RockyRunnable, 1.5),
            ],
            steep: vec![
                (TerrainType::SmoothTrail, 1.0),
                (TerrainType::RockyRunnable, 2.0),
                (TerrainType::Technical, 2.0),
                (TerrainType::VeryTechnical, 1.0),
                (TerrainType::Scrambling, 0.3),
            ],
            steep_gradient: 0.10,
        }
    }

    /// Road and gravel, no technical terrain.
    pub fn road() -> Self {
        Self {
            gentle: vec![(TerrainType::Road, 4.0), (TerrainType::DirtRoad, 1.0)],
            steep: vec![(TerrainType::Road, 1.0), (TerrainType::DirtRoad, 1.0)],
            steep_gradient: 0.08,
        }
    }

    /// Picks a terrain for a segment with this gradient.
    pub fn sample(&self, gradient: f64, rng: &mut impl Rng) -> TerrainType {
        let choices = if gradient.abs() >= self.steep_gradient {
            &self.steep
        } else {
            &self.gentle
        };
        let total: f64 = choices.iter().map(|(_, w)| w.max(0.0)).sum();
        if total <= 0.0 {
            return TerrainType::SmoothTrail;
        }
        let mut pick = rng.gen_range(0.0..total);
        for (terrain, weight) in choices {
            let weight = weight.max(0.0);
            if pick < weight {
                return *terrain;
            }
            pick -= weight;
        }
        choices
            .last()
            .map(|(terrain, _)| *terrain)
            .unwrap_or(TerrainType::SmoothTrail)
    }
}

/// Shape of a generated route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Total route length in km.
    pub distance_km: f64,
    /// Target segment length in km; the last segment takes the remainder.
    pub segment_km: f64,
    /// Elevation samples taken per km when summing ascent and descent.
    pub samples_per_km: usize,
    pub terrain: TerrainMix,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            distance_km: 50.0,
            segment_km: 2.5,
            samples_per_km: 20,
            terrain: TerrainMix::default(),
        }
    }
}
