//! Vertical-speed climbing model.
//!
//! Climb time comes from the athlete's vertical speed scaled by how
//! efficient the segment's gradient is to climb. Descents earn a fixed
//! credit against that time.

use serde::{Deserialize, Serialize};

use crate::models::Segment;
use crate::profile::ClimbingAbility;

/// Share of the descent's vertical-time equivalent credited back.
pub const DESCENT_CREDIT: f64 = 0.3;

/// Climbing efficiency as a function of absolute gradient.
///
/// Equal to 1.0 inside `[band_low, band_high]`, easing down to `floor` at
/// flat ground and at `steep_limit` and beyond. Monotone on each side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientEfficiency {
    pub band_low: f64,
    pub band_high: f64,
    pub steep_limit: f64,
    pub floor: f64,
}

impl Default for GradientEfficiency {
    fn default() -> Self {
        Self {
            band_low: 0.06,
            band_high: 0.12,
            steep_limit: 0.30,
            floor: 0.95,
        }
    }
}

fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

impl GradientEfficiency {
    pub fn efficiency(&self, gradient: f64) -> f64 {
        let g = gradient.abs();
        let span = 1.0 - self.floor;
        if g < self.band_low {
            self.floor + span * smoothstep(g / self.band_low)
        } else if g <= self.band_high {
            1.0
        } else if g >= self.steep_limit {
            self.floor
        } else {
            let t = (g - self.band_high) / (self.steep_limit - self.band_high);
            1.0 - span * smoothstep(t)
        }
    }

    /// Vertical speed in m/h for this ability on this gradient.
    pub fn vertical_speed(&self, ability: ClimbingAbility, gradient: f64) -> f64 {
        ability.vertical_speed_m_per_h() * self.efficiency(gradient)
    }

    /// Net minutes the segment's elevation adds to its flat time.
    ///
    /// Negative when the descent credit outweighs the climb.
    pub fn elevation_minutes(&self, segment: &Segment, ability: ClimbingAbility) -> f64 {
        let speed = self.vertical_speed(ability, segment.gradient());
        let climb_min = segment.ascent_m / speed * 60.0;
        let descent_equivalent_min = segment.descent_m / speed * 60.0;
        climb_min - DESCENT_CREDIT * descent_equivalent_min
    }

    /// Flat pace plus elevation time spread over the segment, floored at 0.
    pub fn elevation_pace(
        &self,
        segment: &Segment,
        base_pace: f64,
        ability: ClimbingAbility,
    ) -> f64 {
        let flat_min = segment.distance_km * base_pace;
        let total = flat_min + self.elevation_minutes(segment, ability);
        (total / segment.distance_km).max(0.0)
    }
}
