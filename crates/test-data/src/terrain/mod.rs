//! Terrain generation utilities.
//!
//! Elevation profiles along a route, built from Perlin noise.

mod elevation;

pub use elevation::ElevationGenerator;
