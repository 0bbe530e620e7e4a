//! Perlin noise-based elevation profiles along a route.

use noise::{NoiseFn, Perlin};

/// Off-lattice row the 1D profile is read from; Perlin is zero on
/// integer coordinates.
const PROFILE_ROW: f64 = 0.371;

/// Generates elevation as a function of distance along a route.
///
/// Uses several octaves of Perlin noise so profiles have both long climbs
/// and short rollers.
#[derive(Debug, Clone)]
pub struct ElevationGenerator {
    perlin: Perlin,
    /// Base elevation in meters (e.g., valley floor).
    base_elevation: f64,
    /// Amplitude of the variation around the base.
    height_scale: f64,
    /// Features per km of the first octave.
    frequency: f64,
    octaves: u32,
}

impl ElevationGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 1200.0,
            height_scale: 600.0,
            frequency: 0.06,
            octaves: 4,
        }
    }

    /// Big mountain terrain: long climbs of a thousand meters or more.
    pub fn alpine(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 1800.0,
            height_scale: 1100.0,
            frequency: 0.05,
            octaves: 5,
        }
    }

    /// Hilly country with short climbs.
    pub fn rolling(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 400.0,
            height_scale: 150.0,
            frequency: 0.15,
            octaves: 3,
        }
    }

    pub fn flat(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            base_elevation: 50.0,
            height_scale: 8.0,
            frequency: 0.2,
            octaves: 2,
        }
    }

    pub fn with_base_elevation(mut self, elevation: f64) -> Self {
        self.base_elevation = elevation;
        self
    }

    pub fn with_height_scale(mut self, scale: f64) -> Self {
        self.height_scale = scale;
        self
    }

    pub fn with_frequency(mut self, freq: f64) -> Self {
        self.frequency = freq;
        self
    }

    pub fn base_elevation(&self) -> f64 {
        self.base_elevation
    }

    pub fn height_scale(&self) -> f64 {
        self.height_scale
    }

    /// Elevation in meters `km` into the route, using fractal Brownian motion.
    pub fn elevation_at(&self, km: f64) -> f64 {
        let mut total = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = self.frequency;
        let mut max_amplitude = 0.0;

        for _ in 0..self.octaves {
            total += self.perlin.get([km * frequency, PROFILE_ROW]) * amplitude;
            max_amplitude += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }

        let normalized = total / max_amplitude; // -1 to 1
        self.base_elevation + normalized * self.height_scale
    }

    /// Elevations sampled every `step_km` from 0 to `distance_km`,
    /// both ends included.
    pub fn profile(&self, distance_km: f64, step_km: f64) -> Vec<f64> {
        if distance_km <= 0.0 || step_km <= 0.0 {
            return vec![self.elevation_at(0.0)];
        }
        let steps = (distance_km / step_km).ceil() as usize;
        (0..=steps)
            .map(|i| self.elevation_at((i as f64 * step_km).min(distance_km)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevation_consistency() {
        let elev_gen = ElevationGenerator::new(42);
        assert_eq!(elev_gen.elevation_at(12.3), elev_gen.elevation_at(12.3));
    }

    #[test]
    fn test_elevation_range() {
        let elev_gen = ElevationGenerator::alpine(42);
        for i in 0..500 {
            let elev = elev_gen.elevation_at(i as f64 * 0.2);
            assert!(elev >= elev_gen.base_elevation() - elev_gen.height_scale());
            assert!(elev <= elev_gen.base_elevation() + elev_gen.height_scale());
        }
    }

    #[test]
    fn test_profile_covers_route() {
        let elev_gen = ElevationGenerator::rolling(3);
        let profile = elev_gen.profile(10.0, 0.5);
        assert_eq!(profile.len(), 21);
        assert_eq!(profile[20], elev_gen.elevation_at(10.0));
    }
}
