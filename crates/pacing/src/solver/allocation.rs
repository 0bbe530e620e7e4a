//! Cost-weighted effort allocation.
//!
//! Spreads a moving-time deviation over the route, cheapest segments first,
//! within per-segment capacities and a global effort budget.

use std::cmp::Ordering;

use crate::models::{EffortLevel, PlanResult, Segment};
use crate::profile::AthleteProfile;

/// Gradient beyond which a segment counts as a climb or a descent.
pub const CLASS_GRADIENT: f64 = 0.03;
/// Fractional deviation at which a segment is labelled push or protect.
pub const LABEL_FRACTION: f64 = 0.10;

const FLAT_FASTER_CAPACITY: f64 = 0.20;
const CLIMB_FASTER_CAPACITY: f64 = 0.15;
const DESCENT_FASTER_CAPACITY: f64 = 0.25;
const DESCENT_FASTER_CAP: f64 = 0.18;
const SLOWER_CAPACITY: f64 = 0.40;

const EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentClass {
    Climb,
    Flat,
    Descent,
}

impl SegmentClass {
    pub fn of(segment: &Segment) -> Self {
        let gradient = segment.gradient();
        if gradient > CLASS_GRADIENT {
            SegmentClass::Climb
        } else if gradient < -CLASS_GRADIENT {
            SegmentClass::Descent
        } else {
            SegmentClass::Flat
        }
    }
}

/// Labels a fractional deviation from natural pace.
pub fn effort_level(fraction: f64) -> EffortLevel {
    if fraction <= -LABEL_FRACTION + EPSILON {
        EffortLevel::Push
    } else if fraction >= LABEL_FRACTION - EPSILON {
        EffortLevel::Protect
    } else {
        EffortLevel::Steady
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    index: usize,
    natural_time_min: f64,
    faster_capacity: f64,
    slower_capacity: f64,
    weight: f64,
}

/// Outcome of one allocation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Per-segment deviation from natural pace; negative is faster.
    pub fractions: Vec<f64>,
    pub levels: Vec<EffortLevel>,
    /// Signed deviation asked for, natural minus target (positive = faster).
    pub requested_min: f64,
    /// Magnitude of the deviation actually placed.
    pub allocated_min: f64,
    pub achievable: bool,
}

impl Allocation {
    /// Share of segments carrying `level`.
    pub fn share(&self, level: EffortLevel) -> f64 {
        if self.levels.is_empty() {
            return 0.0;
        }
        let count = self.levels.iter().filter(|l| **l == level).count();
        count as f64 / self.levels.len() as f64
    }

    pub fn shortfall_min(&self) -> f64 {
        (self.requested_min.abs() - self.allocated_min).max(0.0)
    }
}

/// Per-segment capacities and cost weights for one route and athlete,
/// precomputed from the natural plan. Immutable once built, so it can be
/// queried for as many target times as the threshold search needs.
#[derive(Debug, Clone)]
pub struct AllocationModel {
    slots: Vec<Slot>,
    natural_time_min: f64,
    budget_min: f64,
}

impl AllocationModel {
    pub fn new(segments: &[Segment], natural: &PlanResult, athlete: &AthleteProfile) -> Self {
        let climb_cost = athlete.climbing_ability.climb_cost_multiplier();
        let skill = athlete.skill_level;
        let fatigue = athlete.fitness_level.fatigue_params();
        let ceiling = athlete.fitness_level.late_cost_ceiling();
        let total_effort = natural.summary.total_effort_km;
        let min_pace = athlete.min_pace();
        let max_pace = athlete.max_pace();

        let mut slots = Vec::with_capacity(segments.len());
        let mut effort_before = 0.0;
        for (segment, result) in segments.iter().zip(&natural.segments) {
            let class = SegmentClass::of(segment);
            let terrain = segment.terrain_type.base_factor().max(1.0);

            let mut faster = match class {
                SegmentClass::Flat => FLAT_FASTER_CAPACITY,
                SegmentClass::Climb => CLIMB_FASTER_CAPACITY / climb_cost,
                SegmentClass::Descent => {
                    (DESCENT_FASTER_CAPACITY * (0.4 + 0.6 * skill)).min(DESCENT_FASTER_CAP)
                }
            } / terrain;
            let mut slower = SLOWER_CAPACITY;

            let natural_pace = result.adjusted_pace_min_per_km;
            faster = faster.min(1.0 - min_pace / natural_pace).max(0.0);
            slower = slower.min(max_pace / natural_pace - 1.0).max(0.0);

            let class_weight = match class {
                SegmentClass::Flat => 1.0,
                SegmentClass::Climb => 1.6 * climb_cost,
                SegmentClass::Descent => 1.2 + 0.8 * (1.0 - skill),
            };
            let progress = if total_effort > 0.0 {
                ((effort_before + result.effort_km / 2.0) / total_effort).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let late_race = 1.0 + (ceiling - 1.0) * progress.powf(fatigue.beta);
            effort_before += result.effort_km;

            slots.push(Slot {
                index: result.index,
                natural_time_min: result.segment_time_min,
                faster_capacity: faster,
                slower_capacity: slower,
                weight: class_weight * terrain * late_race,
            });
        }

        let natural_time_min = natural.summary.moving_time_min;
        Self {
            slots,
            natural_time_min,
            budget_min: athlete.fitness_level.effort_budget_fraction() * natural_time_min,
        }
    }

    pub fn natural_time_min(&self) -> f64 {
        self.natural_time_min
    }

    pub fn budget_min(&self) -> f64 {
        self.budget_min
    }

    /// Allocates the deviation needed to cover `target_moving_min`.
    pub fn allocate(&self, target_moving_min: f64) -> Allocation {
        let requested_min = self.natural_time_min - target_moving_min;
        let needed = requested_min.abs();
        let mut fractions = vec![0.0; self.slots.len()];
        let mut allocated_min = 0.0;

        if needed > EPSILON {
            let faster = requested_min > 0.0;
            let limit = needed.min(self.budget_min);

            let mut order: Vec<&Slot> = self.slots.iter().collect();
            order.sort_by(|a, b| match a.weight.total_cmp(&b.weight) {
                Ordering::Equal => a.index.cmp(&b.index),
                other => other,
            });

            for slot in order {
                let remaining = limit - allocated_min;
                if remaining <= EPSILON {
                    break;
                }
                if slot.natural_time_min <= 0.0 {
                    continue;
                }
                let capacity = if faster {
                    slot.faster_capacity
                } else {
                    slot.slower_capacity
                };
                let fraction = capacity.min(remaining / slot.natural_time_min);
                allocated_min += fraction * slot.natural_time_min;
                fractions[slot.index] = if faster { -fraction } else { fraction };
            }
        }

        let levels = fractions.iter().map(|f| effort_level(*f)).collect();
        Allocation {
            fractions,
            levels,
            requested_min,
            allocated_min,
            achievable: allocated_min >= needed - 1e-6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climbing::GradientEfficiency;
    use crate::engine::PacingEngine;
    use crate::models::TerrainType;
    use crate::plan::{PlanAssembler, PlanOptions};
    use crate::profile::{ClimbingAbility, FitnessLevel};

    fn athlete() -> AthleteProfile {
        AthleteProfile::new(6.0, ClimbingAbility::Moderate, FitnessLevel::Recreational, 0.5)
            .with_fatigue(false)
    }

    fn model(segments: &[Segment], athlete: &AthleteProfile) -> AllocationModel {
        let engine = PacingEngine::new(athlete, GradientEfficiency::default()).without_fatigue();
        let natural = PlanAssembler::new(segments, &[], PlanOptions::default())
            .unwrap()
            .assemble(&mut engine.clone())
            .unwrap();
        AllocationModel::new(segments, &natural, athlete)
    }

    fn mixed_route() -> Vec<Segment> {
        vec![
            Segment::new(5.0, 0.0, 0.0, TerrainType::SmoothTrail),
            Segment::new(4.0, 400.0, 0.0, TerrainType::RockyRunnable),
            Segment::new(5.0, 0.0, 400.0, TerrainType::Technical),
            Segment::new(6.0, 20.0, 10.0, TerrainType::DirtRoad),
        ]
    }

    #[test]
    fn test_classification() {
        assert_eq!(
            SegmentClass::of(&Segment::new(1.0, 40.0, 0.0, TerrainType::Road)),
            SegmentClass::Climb
        );
        assert_eq!(
            SegmentClass::of(&Segment::new(1.0, 30.0, 0.0, TerrainType::Road)),
            SegmentClass::Flat
        );
        assert_eq!(
            SegmentClass::of(&Segment::new(1.0, 0.0, 50.0, TerrainType::Road)),
            SegmentClass::Descent
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(effort_level(-0.10), EffortLevel::Push);
        assert_eq!(effort_level(-0.0999), EffortLevel::Steady);
        assert_eq!(effort_level(0.0), EffortLevel::Steady);
        assert_eq!(effort_level(0.10), EffortLevel::Protect);
    }

    #[test]
    fn test_zero_deviation_is_all_steady() {
        let segments = mixed_route();
        let athlete = athlete();
        let model = model(&segments, &athlete);
        let allocation = model.allocate(model.natural_time_min());
        assert_eq!(allocation.allocated_min, 0.0);
        assert!(allocation.achievable);
        assert!(allocation.fractions.iter().all(|f| *f == 0.0));
        assert_eq!(allocation.share(EffortLevel::Steady), 1.0);
    }

    #[test]
    fn test_small_speedup_uses_cheapest_segment() {
        let segments = mixed_route();
        let athlete = athlete();
        let model = model(&segments, &athlete);
        // a few minutes fits inside the flat opening segment alone
        let allocation = model.allocate(model.natural_time_min() - 3.0);
        assert!(allocation.achievable);
        assert!((allocation.allocated_min - 3.0).abs() < 1e-9);
        assert!(allocation.fractions[0] < 0.0);
        assert!(allocation.fractions[1..].iter().all(|f| *f == 0.0));
    }

    #[test]
    fn test_small_slowdown_uses_cheapest_segment() {
        let segments = mixed_route();
        let athlete = athlete();
        let model = model(&segments, &athlete);
        // the flat opening segment has the lowest weight in either direction
        let allocation = model.allocate(model.natural_time_min() + 1.0);
        assert!(allocation.achievable);
        assert!((allocation.allocated_min - 1.0).abs() < 1e-9);
        assert!(allocation.fractions[0] > 0.0);
        assert!(allocation.fractions[1..].iter().all(|f| *f == 0.0));
    }

    #[test]
    fn test_budget_limits_allocation() {
        let segments = mixed_route();
        let athlete = athlete();
        let model = model(&segments, &athlete);
        let allocation = model.allocate(model.natural_time_min() * 0.4);
        assert!(!allocation.achievable);
        assert!(allocation.allocated_min <= model.budget_min() + 1e-9);
        assert!(allocation.shortfall_min() > 0.0);
    }

    #[test]
    fn test_fractions_stay_inside_pace_bounds() {
        let segments = mixed_route();
        let athlete = athlete();
        let engine = PacingEngine::new(&athlete, GradientEfficiency::default()).without_fatigue();
        let natural = PlanAssembler::new(&segments, &[], PlanOptions::default())
            .unwrap()
            .assemble(&mut engine.clone())
            .unwrap();
        let model = AllocationModel::new(&segments, &natural, &athlete);

        for target in [0.5, 0.8, 1.2, 1.6] {
            let allocation = model.allocate(natural.summary.moving_time_min * target);
            for (result, fraction) in natural.segments.iter().zip(&allocation.fractions) {
                let pace = result.adjusted_pace_min_per_km * (1.0 + fraction);
                assert!(pace >= athlete.min_pace() - 1e-9);
                assert!(pace <= athlete.max_pace() + 1e-9);
            }
        }
    }
}
