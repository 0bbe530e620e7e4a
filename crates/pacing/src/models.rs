use std::fmt;
use std::str::FromStr;

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::{PlanError, validation_message};

/// Surface category of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Enum)]
#[serde(rename_all = "snake_case")]
pub enum TerrainType {
    Road,
    SmoothTrail,
    DirtRoad,
    RockyRunnable,
    Technical,
    VeryTechnical,
    Scrambling,
}

impl TerrainType {
    pub const ALL: [TerrainType; 7] = [
        TerrainType::Road,
        TerrainType::SmoothTrail,
        TerrainType::DirtRoad,
        TerrainType::RockyRunnable,
        TerrainType::Technical,
        TerrainType::VeryTechnical,
        TerrainType::Scrambling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TerrainType::Road => "road",
            TerrainType::SmoothTrail => "smooth_trail",
            TerrainType::DirtRoad => "dirt_road",
            TerrainType::RockyRunnable => "rocky_runnable",
            TerrainType::Technical => "technical",
            TerrainType::VeryTechnical => "very_technical",
            TerrainType::Scrambling => "scrambling",
        }
    }

    /// Base terrain efficiency multiplier; 1.0 is smooth singletrack.
    pub fn base_factor(&self) -> f64 {
        match self {
            TerrainType::Road => 0.95,
            TerrainType::SmoothTrail => 1.0,
            TerrainType::DirtRoad => 1.05,
            TerrainType::RockyRunnable => 1.15,
            TerrainType::Technical => 1.325,
            TerrainType::VeryTechnical => 1.65,
            TerrainType::Scrambling => 2.0,
        }
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerrainType {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerrainType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PlanError::configuration(format!("unknown terrain type '{s}'")))
    }
}

/// One analysis unit of the route, in route order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Segment {
    #[validate(range(exclusive_min = 0.0, message = "distance_km must be positive"))]
    pub distance_km: f64,
    #[validate(range(min = 0.0, message = "ascent_m must not be negative"))]
    pub ascent_m: f64,
    #[validate(range(min = 0.0, message = "descent_m must not be negative"))]
    pub descent_m: f64,
    pub terrain_type: TerrainType,
}

impl Segment {
    pub fn new(distance_km: f64, ascent_m: f64, descent_m: f64, terrain_type: TerrainType) -> Self {
        Self {
            distance_km,
            ascent_m,
            descent_m,
            terrain_type,
        }
    }

    pub fn net_elevation_m(&self) -> f64 {
        self.ascent_m - self.descent_m
    }

    /// Net elevation over horizontal distance, as a fraction (0.05 = 5%).
    pub fn gradient(&self) -> f64 {
        self.net_elevation_m() / (self.distance_km * 1000.0)
    }

    pub fn is_descent(&self) -> bool {
        self.descent_m > self.ascent_m
    }

    /// Equivalent flat distance: `distance + ascent/100 + descent/200`.
    pub fn effort_km(&self) -> f64 {
        self.distance_km + self.ascent_m / 100.0 + self.descent_m / 200.0
    }

    /// Checks the segment at position `index` of its route.
    pub fn check(&self, index: usize) -> Result<(), PlanError> {
        if ![self.distance_km, self.ascent_m, self.descent_m]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(PlanError::invalid_segment(index, "values must be finite"));
        }
        self.validate()
            .map_err(|e| PlanError::invalid_segment(index, validation_message(&e)))
    }
}

/// Validates a whole route before any pacing work starts.
pub fn check_route(segments: &[Segment]) -> Result<(), PlanError> {
    if segments.is_empty() {
        return Err(PlanError::EmptyRoute);
    }
    segments
        .iter()
        .enumerate()
        .try_for_each(|(i, segment)| segment.check(i))
}

/// Aid-station stop taken after a segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub name: String,
    /// Index of the segment that ends at this checkpoint.
    pub after_segment: usize,
    pub stop_minutes: f64,
}

impl Checkpoint {
    pub fn new(name: impl Into<String>, after_segment: usize, stop_minutes: f64) -> Self {
        Self {
            name: name.into(),
            after_segment,
            stop_minutes,
        }
    }

    pub fn check(&self, segment_count: usize) -> Result<(), PlanError> {
        let invalid = |reason: &str| PlanError::InvalidCheckpoint {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if !self.stop_minutes.is_finite() || self.stop_minutes < 0.0 {
            return Err(invalid("stop_minutes must be a non-negative number"));
        }
        if self.after_segment + 1 >= segment_count {
            return Err(invalid("checkpoint must fall strictly inside the route"));
        }
        Ok(())
    }
}

/// Effort classification relative to natural pace (inverse mode only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffortLevel {
    Push,
    Steady,
    Protect,
}

impl EffortLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffortLevel::Push => "push",
            EffortLevel::Steady => "steady",
            EffortLevel::Protect => "protect",
        }
    }
}

impl fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computed pacing for one segment. Never mutated after the plan is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentResult {
    pub index: usize,
    pub distance_km: f64,
    pub ascent_m: f64,
    pub descent_m: f64,
    pub terrain_type: TerrainType,
    pub gradient: f64,
    /// Pace after the climbing adjustment only.
    pub elevation_pace_min_per_km: f64,
    pub terrain_factor: f64,
    pub adjusted_pace_min_per_km: f64,
    /// Forward-model pace this segment was allocated from (inverse mode).
    pub natural_pace_min_per_km: Option<f64>,
    pub segment_time_min: f64,
    pub fatigue_seconds_per_km: f64,
    pub effort_km: f64,
    pub cumulative_effort_km: f64,
    pub effort_level: Option<EffortLevel>,
    pub pace_capped: bool,
    /// Arrival time at the end of this segment, stops before it included.
    pub cumulative_time_min: f64,
    pub checkpoint_stop_min: f64,
    pub arrival_time_of_day: Option<String>,
    pub carbs_g: f64,
    pub water_ml: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_distance_km: f64,
    pub total_ascent_m: f64,
    pub total_descent_m: f64,
    pub total_effort_km: f64,
    pub moving_time_min: f64,
    pub checkpoint_time_min: f64,
    pub total_time_min: f64,
    pub total_carbs_g: f64,
    pub total_water_ml: f64,
    pub capped_segments: usize,
    pub distance_by_terrain: EnumMap<TerrainType, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub segments: Vec<SegmentResult>,
    pub summary: PlanSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effort_km() {
        // 10 km, +500 m, -300 m
        let segment = Segment::new(10.0, 500.0, 300.0, TerrainType::SmoothTrail);
        assert!((segment.effort_km() - 16.5).abs() < 1e-12);
    }

    #[test]
    fn test_gradient_and_direction() {
        let climb = Segment::new(2.0, 200.0, 40.0, TerrainType::Technical);
        assert!((climb.gradient() - 0.08).abs() < 1e-12);
        assert!(!climb.is_descent());

        let descent = Segment::new(5.0, 10.0, 210.0, TerrainType::Technical);
        assert!((descent.gradient() + 0.04).abs() < 1e-12);
        assert!(descent.is_descent());
    }

    #[test]
    fn test_segment_validation() {
        assert!(Segment::new(1.0, 0.0, 0.0, TerrainType::Road).check(0).is_ok());

        let err = Segment::new(0.0, 0.0, 0.0, TerrainType::Road)
            .check(4)
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidSegment { index: 4, .. }));

        let err = Segment::new(1.0, -5.0, 0.0, TerrainType::Road)
            .check(0)
            .unwrap_err();
        assert!(err.to_string().contains("ascent_m"));

        assert!(
            Segment::new(f64::NAN, 0.0, 0.0, TerrainType::Road)
                .check(0)
                .is_err()
        );
    }

    #[test]
    fn test_empty_route_rejected() {
        assert_eq!(check_route(&[]), Err(PlanError::EmptyRoute));
    }

    #[test]
    fn test_terrain_parsing() {
        assert_eq!(
            "very_technical".parse::<TerrainType>().unwrap(),
            TerrainType::VeryTechnical
        );
        assert!(matches!(
            "sand".parse::<TerrainType>(),
            Err(PlanError::Configuration(_))
        ));
        for terrain in TerrainType::ALL {
            assert_eq!(terrain.as_str().parse::<TerrainType>().unwrap(), terrain);
        }
    }

    #[test]
    fn test_terrain_serde_keys() {
        let json = serde_json::to_string(&TerrainType::RockyRunnable).unwrap();
        assert_eq!(json, "\"rocky_runnable\"");
        assert!(serde_json::from_str::<TerrainType>("\"mud\"").is_err());
    }

    #[test]
    fn test_checkpoint_bounds() {
        assert!(Checkpoint::new("CP1", 0, 5.0).check(2).is_ok());
        assert!(Checkpoint::new("Finish", 1, 5.0).check(2).is_err());
        assert!(Checkpoint::new("CP1", 0, -1.0).check(2).is_err());
    }
}
