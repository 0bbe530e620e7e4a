//! Cumulative-effort fatigue model.

use serde::{Deserialize, Serialize};

/// Fatigue curve for one fitness level: no penalty up to `fop` km-effort,
/// then `1 + alpha * ((E - fop) / fop)^beta`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatigueParams {
    /// Fatigue onset point in km-effort.
    pub fop: f64,
    pub alpha: f64,
    pub beta: f64,
}

impl FatigueParams {
    pub const fn new(fop: f64, alpha: f64, beta: f64) -> Self {
        Self { fop, alpha, beta }
    }

    pub fn multiplier(&self, cumulative_effort_km: f64) -> f64 {
        if cumulative_effort_km <= self.fop {
            return 1.0;
        }
        let over = (cumulative_effort_km - self.fop) / self.fop;
        1.0 + self.alpha * over.powf(self.beta)
    }
}

/// Running totals threaded through one plan computation.
///
/// Created fresh for every plan and advanced once per segment in route
/// order; never shared between computations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EffortState {
    pub cumulative_effort_km: f64,
    pub cumulative_moving_time_min: f64,
}

impl EffortState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a segment's km-effort and returns the new running total.
    pub fn add_effort(&mut self, effort_km: f64) -> f64 {
        self.cumulative_effort_km += effort_km;
        self.cumulative_effort_km
    }

    pub fn add_moving_time(&mut self, minutes: f64) -> f64 {
        self.cumulative_moving_time_min += minutes;
        self.cumulative_moving_time_min
    }
}
