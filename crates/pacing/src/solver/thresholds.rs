//! Threshold finder: the target times at which half the route flips to
//! push or to protect.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SolverConfig;
use crate::models::EffortLevel;
use crate::solver::allocation::AllocationModel;

/// Share of segments that must carry a label for the threshold to trip.
pub const MAJORITY: f64 = 0.5;

/// Total race times (checkpoint stops included) bracketing the natural time.
///
/// When a search never reaches the majority, its threshold is the far end
/// of the search range and the matching `*_found` flag is false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortThresholds {
    /// Slowest target at which most segments are still push.
    pub push_min: f64,
    pub push_found: bool,
    pub natural_min: f64,
    /// Fastest target at which most segments are still protect.
    pub protect_min: f64,
    pub protect_found: bool,
}

/// Binary search between a candidate expected to satisfy `inside` and one
/// expected not to. Returns the last candidate found inside, or
/// `inside_end` with `false` when even that end fails.
fn bisect<F>(inside_end: f64, outside_end: f64, config: &SolverConfig, inside: F) -> (f64, bool)
where
    F: Fn(f64) -> bool,
{
    if !inside(inside_end) {
        return (inside_end, false);
    }
    let mut good = inside_end;
    let mut bad = outside_end;
    let mut iterations = 0;
    while (bad - good).abs() > config.precision_min && iterations < config.max_iterations {
        let mid = (good + bad) / 2.0;
        if inside(mid) {
            good = mid;
        } else {
            bad = mid;
        }
        iterations += 1;
    }
    (good, true)
}

fn majority(model: &AllocationModel, target_moving_min: f64, level: EffortLevel) -> bool {
    model.allocate(target_moving_min).share(level) >= MAJORITY
}

/// Runs both searches, in parallel, over moving time and reports them as
/// total race times.
pub fn find_thresholds(
    model: &AllocationModel,
    checkpoint_time_min: f64,
    config: &SolverConfig,
) -> EffortThresholds {
    let natural = model.natural_time_min();
    let ((push, push_found), (protect, protect_found)) = rayon::join(
        || {
            bisect(natural * 0.5, natural, config, |t| {
                majority(model, t, EffortLevel::Push)
            })
        },
        || {
            bisect(natural * 1.5, natural, config, |t| {
                majority(model, t, EffortLevel::Protect)
            })
        },
    );
    debug!(
        push,
        push_found,
        natural,
        protect,
        protect_found,
        "Thresholds found (moving time)"
    );

    EffortThresholds {
        push_min: push + checkpoint_time_min,
        push_found,
        natural_min: natural + checkpoint_time_min,
        protect_min: protect + checkpoint_time_min,
        protect_found,
    }
}
