//! Planner configuration.

use serde::{Deserialize, Serialize};

use crate::climbing::GradientEfficiency;

/// Fueling rates used to derive per-segment nutrition targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionRates {
    pub carbs_g_per_hour: f64,
    pub water_ml_per_hour: f64,
}

impl Default for NutritionRates {
    fn default() -> Self {
        Self {
            carbs_g_per_hour: 60.0,
            water_ml_per_hour: 500.0,
        }
    }
}

/// Threshold search settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Stop a binary search once its interval is narrower than this.
    pub precision_min: f64,
    /// Hard cap on binary search iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            precision_min: 1.0 / 60.0, // one second
            max_iterations: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub nutrition: NutritionRates,
    /// Stop applied to checkpoints that do not specify their own.
    pub default_checkpoint_stop_min: f64,
    pub climbing: GradientEfficiency,
    pub solver: SolverConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            nutrition: NutritionRates::default(),
            default_checkpoint_stop_min: 5.0,
            climbing: GradientEfficiency::default(),
            solver: SolverConfig::default(),
        }
    }
}
