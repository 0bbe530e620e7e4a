//! Terrain Efficiency Factor (TEF).

use crate::models::{Segment, TerrainType};

/// How strongly gradient amplifies the terrain penalty.
pub const GRADIENT_GAMMA: f64 = 1.25;
/// Share of the terrain effect felt on a net climb.
pub const CLIMB_EFFECT: f64 = 0.7;
/// Share of the terrain effect felt on a net descent.
pub const DESCENT_EFFECT: f64 = 1.0;

/// Multiplicative pace factor for a surface at a gradient.
///
/// Values below 1.0 are possible on road, where the surface is faster
/// than smooth trail.
pub fn terrain_efficiency_factor(
    terrain: TerrainType,
    gradient: f64,
    is_descent: bool,
    skill_level: f64,
) -> f64 {
    let scaled = terrain.base_factor() * (1.0 + GRADIENT_GAMMA * gradient.abs());
    let effect = if is_descent { DESCENT_EFFECT } else { CLIMB_EFFECT };
    let direction_adjusted = 1.0 + (scaled - 1.0) * effect;
    1.0 + (direction_adjusted - 1.0) * (1.0 - skill_level)
}

pub fn segment_factor(segment: &Segment, skill_level: f64) -> f64 {
    terrain_efficiency_factor(
        segment.terrain_type,
        segment.gradient(),
        segment.is_descent(),
        skill_level,
    )
}
