//! Plan assembly: folds a pacer over the route and totals the results.

use enum_map::EnumMap;
use time::{Duration, Time};
use tracing::debug;

use crate::config::NutritionRates;
use crate::engine::{PacingEngine, SegmentPace};
use crate::errors::PlanError;
use crate::fatigue::EffortState;
use crate::models::{
    Checkpoint, EffortLevel, PlanResult, PlanSummary, Segment, SegmentResult, TerrainType,
    check_route,
};
use crate::nutrition;

/// A segment's pace plus the inverse-mode annotations, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct PacedSegment {
    pub pace: SegmentPace,
    pub natural_pace: Option<f64>,
    pub effort_level: Option<EffortLevel>,
}

/// Produces the pace for each segment of a plan, in route order.
///
/// Implementations advance the supplied `EffortState` exactly once per call.
pub trait SegmentPacer {
    fn pace(
        &mut self,
        index: usize,
        segment: &Segment,
        state: &mut EffortState,
    ) -> Result<PacedSegment, PlanError>;
}

impl SegmentPacer for PacingEngine<'_> {
    fn pace(
        &mut self,
        index: usize,
        segment: &Segment,
        state: &mut EffortState,
    ) -> Result<PacedSegment, PlanError> {
        Ok(PacedSegment {
            pace: self.pace_segment(index, segment, state)?,
            natural_pace: None,
            effort_level: None,
        })
    }
}

/// Accumulates one summary quantity over the finished segment results.
pub trait PlanMetric {
    type Total;
    fn next_segment(&mut self, result: &SegmentResult);
    fn finish(&mut self) -> Self::Total;
}

#[derive(Debug, Clone, Default)]
struct RouteMetric {
    distance_km: f64,
    ascent_m: f64,
    descent_m: f64,
    effort_km: f64,
}

impl PlanMetric for RouteMetric {
    type Total = (f64, f64, f64, f64);
    fn next_segment(&mut self, result: &SegmentResult) {
        self.distance_km += result.distance_km;
        self.ascent_m += result.ascent_m;
        self.descent_m += result.descent_m;
        self.effort_km += result.effort_km;
    }

    fn finish(&mut self) -> Self::Total {
        (self.distance_km, self.ascent_m, self.descent_m, self.effort_km)
    }
}

#[derive(Debug, Clone, Default)]
struct TimeMetric {
    moving_min: f64,
    checkpoint_min: f64,
    capped: usize,
}

impl PlanMetric for TimeMetric {
    type Total = (f64, f64, usize);
    fn next_segment(&mut self, result: &SegmentResult) {
        self.moving_min += result.segment_time_min;
        self.checkpoint_min += result.checkpoint_stop_min;
        if result.pace_capped {
            self.capped += 1;
        }
    }

    fn finish(&mut self) -> Self::Total {
        (self.moving_min, self.checkpoint_min, self.capped)
    }
}

#[derive(Debug, Clone, Default)]
struct NutritionMetric {
    carbs_g: f64,
    water_ml: f64,
}

impl PlanMetric for NutritionMetric {
    type Total = (f64, f64);
    fn next_segment(&mut self, result: &SegmentResult) {
        self.carbs_g += result.carbs_g;
        self.water_ml += result.water_ml;
    }

    fn finish(&mut self) -> Self::Total {
        (self.carbs_g, self.water_ml)
    }
}

#[derive(Debug, Clone, Default)]
struct TerrainMetric {
    distance_km: EnumMap<TerrainType, f64>,
}

impl PlanMetric for TerrainMetric {
    type Total = EnumMap<TerrainType, f64>;
    fn next_segment(&mut self, result: &SegmentResult) {
        self.distance_km[result.terrain_type] += result.distance_km;
    }

    fn finish(&mut self) -> Self::Total {
        self.distance_km
    }
}

#[derive(Debug, Clone, Default)]
struct Metrics {
    route: RouteMetric,
    time: TimeMetric,
    nutrition: NutritionMetric,
    terrain: TerrainMetric,
}

impl PlanMetric for Metrics {
    type Total = PlanSummary;
    fn next_segment(&mut self, result: &SegmentResult) {
        self.route.next_segment(result);
        self.time.next_segment(result);
        self.nutrition.next_segment(result);
        self.terrain.next_segment(result);
    }

    fn finish(&mut self) -> PlanSummary {
        let (total_distance_km, total_ascent_m, total_descent_m, total_effort_km) =
            self.route.finish();
        let (moving_time_min, checkpoint_time_min, capped_segments) = self.time.finish();
        let (total_carbs_g, total_water_ml) = self.nutrition.finish();
        PlanSummary {
            total_distance_km,
            total_ascent_m,
            total_descent_m,
            total_effort_km,
            moving_time_min,
            checkpoint_time_min,
            total_time_min: moving_time_min + checkpoint_time_min,
            total_carbs_g,
            total_water_ml,
            capped_segments,
            distance_by_terrain: self.terrain.finish(),
        }
    }
}

/// Clock time `minutes` after `start`, as `HH:MM`. Wraps past midnight.
pub fn clock_after(start: Time, minutes: f64) -> String {
    let at = start + Duration::seconds_f64(minutes * 60.0);
    format!("{:02}:{:02}", at.hour(), at.minute())
}

#[derive(Debug, Clone, Default)]
pub struct PlanOptions {
    pub nutrition: NutritionRates,
    pub race_start: Option<Time>,
}

/// Folds a [`SegmentPacer`] over a validated route.
///
/// Holds no mutable state between runs: every call to [`assemble`]
/// starts from a fresh `EffortState`, so repeated calls with the same
/// pacer input give identical plans.
///
/// [`assemble`]: PlanAssembler::assemble
#[derive(Debug, Clone)]
pub struct PlanAssembler<'a> {
    segments: &'a [Segment],
    stops: Vec<f64>,
    options: PlanOptions,
}

impl<'a> PlanAssembler<'a> {
    pub fn new(
        segments: &'a [Segment],
        checkpoints: &[Checkpoint],
        options: PlanOptions,
    ) -> Result<Self, PlanError> {
        check_route(segments)?;
        let mut stops = vec![0.0; segments.len()];
        for checkpoint in checkpoints {
            checkpoint.check(segments.len())?;
            stops[checkpoint.after_segment] += checkpoint.stop_minutes;
        }
        Ok(Self {
            segments,
            stops,
            options,
        })
    }

    pub fn segments(&self) -> &'a [Segment] {
        self.segments
    }

    pub fn checkpoint_time_min(&self) -> f64 {
        self.stops.iter().sum()
    }

    pub fn assemble<P: SegmentPacer>(&self, pacer: &mut P) -> Result<PlanResult, PlanError> {
        let mut state = EffortState::new();
        let mut metrics = Metrics::default();
        let mut elapsed_min = 0.0;
        let mut results = Vec::with_capacity(self.segments.len());

        for (index, segment) in self.segments.iter().enumerate() {
            let paced = pacer.pace(index, segment, &mut state)?;
            let pace = paced.pace;
            elapsed_min += pace.segment_time_min;

            let (carbs_g, water_ml) =
                nutrition::segment_targets(pace.segment_time_min, &self.options.nutrition);
            let result = SegmentResult {
                index,
                distance_km: segment.distance_km,
                ascent_m: segment.ascent_m,
                descent_m: segment.descent_m,
                terrain_type: segment.terrain_type,
                gradient: segment.gradient(),
                elevation_pace_min_per_km: pace.elevation_pace,
                terrain_factor: pace.terrain_factor,
                adjusted_pace_min_per_km: pace.pace,
                natural_pace_min_per_km: paced.natural_pace,
                segment_time_min: pace.segment_time_min,
                fatigue_seconds_per_km: pace.fatigue_seconds_per_km,
                effort_km: pace.effort_km,
                cumulative_effort_km: pace.cumulative_effort_km,
                effort_level: paced.effort_level,
                pace_capped: pace.pace_capped,
                cumulative_time_min: elapsed_min,
                checkpoint_stop_min: self.stops[index],
                arrival_time_of_day: self
                    .options
                    .race_start
                    .map(|start| clock_after(start, elapsed_min)),
                carbs_g,
                water_ml,
            };
            metrics.next_segment(&result);
            elapsed_min += self.stops[index];
            results.push(result);
        }

        let summary = metrics.finish();
        debug!(
            segments = results.len(),
            moving_min = summary.moving_time_min,
            total_min = summary.total_time_min,
            "Plan assembled"
        );
        Ok(PlanResult {
            segments: results,
            summary,
        })
    }
}
