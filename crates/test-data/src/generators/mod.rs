//! Route generators for test data.
//!
//! - [`RouteGenerator`]: cut an elevation profile into pacing segments

pub mod route;

pub use route::RouteGenerator;
