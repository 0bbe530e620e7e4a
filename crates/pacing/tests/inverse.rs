use pacing::{
    AthleteProfile, Checkpoint, ClimbingAbility, EffortLevel, FitnessLevel, PlanError,
    InversePlan, PlannerConfig, Segment, TerrainType, compute_inverse,
    types::{CheckpointRequest, PlanRequest, PlanResponse},
};

fn route() -> Vec<Segment> {
    vec![
        Segment::new(5.0, 30.0, 10.0, TerrainType::Road),
        Segment::new(8.0, 720.0, 40.0, TerrainType::RockyRunnable),
        Segment::new(6.0, 10.0, 560.0, TerrainType::Technical),
        Segment::new(10.0, 90.0, 70.0, TerrainType::SmoothTrail),
        Segment::new(7.0, 480.0, 0.0, TerrainType::DirtRoad),
        Segment::new(9.0, 20.0, 650.0, TerrainType::RockyRunnable),
        Segment::new(6.0, 15.0, 25.0, TerrainType::Road),
    ]
}

fn checkpoints() -> Vec<Checkpoint> {
    vec![
        Checkpoint::new("Hut", 1, 6.0),
        Checkpoint::new("Bridge", 4, 4.0),
    ]
}

fn athlete() -> AthleteProfile {
    AthleteProfile::new(6.0, ClimbingAbility::Strong, FitnessLevel::Trained, 0.6)
}

/// Natural moving time of the test route; stops do not change it.
fn natural_moving(athlete: &AthleteProfile) -> f64 {
    compute_inverse(&route(), athlete, &[], 600.0)
        .unwrap()
        .natural_time_min
}

#[test]
fn test_target_time_is_met() {
    let athlete = athlete();
    let natural = natural_moving(&athlete);
    for factor in [0.9, 0.97, 1.05, 1.2] {
        let target = natural * factor + 10.0;
        let inverse = compute_inverse(&route(), &athlete, &checkpoints(), target).unwrap();
        assert!(inverse.achievable, "factor {factor}");
        let moving: f64 = inverse.plan.segments.iter().map(|s| s.segment_time_min).sum();
        assert!((moving - (target - 10.0)).abs() < 1e-4);
        assert!((inverse.plan.summary.total_time_min - target).abs() < 1e-4);
        assert!(inverse.shortfall_min < 1e-6);
    }
}

#[test]
fn test_inverse_has_no_fatigue() {
    let athlete = AthleteProfile::new(
        6.0,
        ClimbingAbility::Conservative,
        FitnessLevel::Untrained,
        0.2,
    );
    let inverse = compute_inverse(&route(), &athlete, &checkpoints(), 700.0).unwrap();
    assert!(
        inverse
            .plan
            .segments
            .iter()
            .all(|s| s.fatigue_seconds_per_km == 0.0)
    );
}

#[test]
fn test_target_equal_to_natural_is_all_steady() {
    let athlete = athlete();
    let natural = natural_moving(&athlete);
    let inverse = compute_inverse(&route(), &athlete, &checkpoints(), natural + 10.0).unwrap();
    assert!(inverse.achievable);
    assert!(inverse.allocated_min.abs() < 1e-6);
    for segment in &inverse.plan.segments {
        assert_eq!(segment.effort_level, Some(EffortLevel::Steady));
        let natural_pace = segment.natural_pace_min_per_km.unwrap();
        assert!((segment.adjusted_pace_min_per_km - natural_pace).abs() < 1e-9);
    }
}

#[test]
fn test_unreachable_target_is_flagged_not_failed() {
    let athlete = athlete();
    let natural = natural_moving(&athlete);
    let inverse = compute_inverse(&route(), &athlete, &checkpoints(), natural * 0.5 + 10.0).unwrap();
    assert!(!inverse.achievable);
    assert!(inverse.shortfall_min > 0.0);
    // still the fastest plan the budget allows
    assert!(inverse.plan.summary.moving_time_min < natural);
    for segment in &inverse.plan.segments {
        assert!(segment.adjusted_pace_min_per_km >= 0.8 * 6.0 - 1e-9);
    }
}

#[test]
fn test_labels_follow_deviation() {
    let athlete = athlete();
    let natural = natural_moving(&athlete);
    let inverse = compute_inverse(&route(), &athlete, &checkpoints(), natural * 1.2 + 10.0).unwrap();
    for segment in &inverse.plan.segments {
        let natural_pace = segment.natural_pace_min_per_km.unwrap();
        let deviation = segment.adjusted_pace_min_per_km / natural_pace - 1.0;
        let expected = if deviation >= 0.1 - 1e-9 {
            EffortLevel::Protect
        } else if deviation <= -0.1 + 1e-9 {
            EffortLevel::Push
        } else {
            EffortLevel::Steady
        };
        assert_eq!(segment.effort_level, Some(expected));
    }
    assert!(
        inverse
            .plan
            .segments
            .iter()
            .any(|s| s.effort_level == Some(EffortLevel::Protect))
    );
}

#[test]
fn test_thresholds_bracket_natural_time() {
    for climbing in ClimbingAbility::ALL {
        for fitness in FitnessLevel::ALL {
            let athlete = AthleteProfile::new(6.0, climbing, fitness, 0.5);
            let inverse = compute_inverse(&route(), &athlete, &checkpoints(), 500.0).unwrap();
            let t = inverse.thresholds;
            assert!(t.push_min <= t.natural_min);
            assert!(t.natural_min <= t.protect_min);
            assert!((t.natural_min - (inverse.natural_time_min + 10.0)).abs() < 1e-9);
            assert!(t.push_min >= 0.5 * inverse.natural_time_min + 10.0 - 1e-9);
            assert!(t.protect_min <= 1.5 * inverse.natural_time_min + 10.0 + 1e-9);
        }
    }
}

fn share(inverse: &InversePlan, level: EffortLevel) -> f64 {
    let segments = &inverse.plan.segments;
    let count = segments
        .iter()
        .filter(|s| s.effort_level == Some(level))
        .count();
    count as f64 / segments.len() as f64
}

/// Two bisection steps past the reported threshold.
fn step() -> f64 {
    2.0 * PlannerConfig::default().solver.precision_min
}

#[test]
fn test_push_threshold_is_the_majority_crossing() {
    let mut found_any = false;
    for climbing in ClimbingAbility::ALL {
        for fitness in FitnessLevel::ALL {
            let athlete = AthleteProfile::new(6.0, climbing, fitness, 0.5);
            let t = compute_inverse(&route(), &athlete, &[], 500.0)
                .unwrap()
                .thresholds;
            let at = compute_inverse(&route(), &athlete, &[], t.push_min).unwrap();
            if t.push_found {
                found_any = true;
                assert!(share(&at, EffortLevel::Push) >= 0.5, "{climbing} {fitness}");
                let slower = compute_inverse(&route(), &athlete, &[], t.push_min + step()).unwrap();
                assert!(share(&slower, EffortLevel::Push) < 0.5, "{climbing} {fitness}");
            } else {
                assert!(share(&at, EffortLevel::Push) < 0.5, "{climbing} {fitness}");
            }
        }
    }
    assert!(found_any);
}

#[test]
fn test_protect_threshold_is_the_majority_crossing() {
    let mut found_any = false;
    for climbing in ClimbingAbility::ALL {
        for fitness in FitnessLevel::ALL {
            let athlete = AthleteProfile::new(6.0, climbing, fitness, 0.5);
            let t = compute_inverse(&route(), &athlete, &[], 500.0)
                .unwrap()
                .thresholds;
            let at = compute_inverse(&route(), &athlete, &[], t.protect_min).unwrap();
            if t.protect_found {
                found_any = true;
                assert!(share(&at, EffortLevel::Protect) >= 0.5, "{climbing} {fitness}");
                let faster =
                    compute_inverse(&route(), &athlete, &[], t.protect_min - step()).unwrap();
                assert!(share(&faster, EffortLevel::Protect) < 0.5, "{climbing} {fitness}");
            } else {
                assert!(share(&at, EffortLevel::Protect) < 0.5, "{climbing} {fitness}");
            }
        }
    }
    assert!(found_any);
}

#[test]
fn test_protect_threshold_not_found_within_small_budget() {
    // the untrained budget fits inside the long opening segment
    let segments = vec![
        Segment::new(40.0, 0.0, 0.0, TerrainType::SmoothTrail),
        Segment::new(5.0, 0.0, 0.0, TerrainType::SmoothTrail),
        Segment::new(5.0, 0.0, 0.0, TerrainType::SmoothTrail),
    ];
    let athlete = AthleteProfile::new(
        6.0,
        ClimbingAbility::Moderate,
        FitnessLevel::Untrained,
        0.5,
    );
    let inverse = compute_inverse(&segments, &athlete, &[], 400.0).unwrap();
    let t = inverse.thresholds;
    assert!(!t.protect_found);
    assert!((t.protect_min - 1.5 * inverse.natural_time_min).abs() < 1e-9);
    let at = compute_inverse(&segments, &athlete, &[], t.protect_min).unwrap();
    assert!(share(&at, EffortLevel::Protect) < 0.5);
}

#[test]
fn test_invalid_target() {
    let athlete = athlete();
    let err = compute_inverse(&route(), &athlete, &checkpoints(), 8.0).unwrap_err();
    assert!(matches!(err, PlanError::InvalidTarget(_)));
}

#[test]
fn test_request_round_trip_through_json() {
    let request = PlanRequest {
        segments: route(),
        athlete: athlete(),
        checkpoints: vec![CheckpointRequest {
            name: "Hut".to_string(),
            after_segment: 1,
            stop_minutes: None,
        }],
        race_start: Some("07:15".to_string()),
        target_time: Some("06:30".to_string()),
    };
    let json = serde_json::to_string(&request).unwrap();
    let parsed: PlanRequest = serde_json::from_str(&json).unwrap();
    let response = parsed.execute(&PlannerConfig::default()).unwrap();

    let PlanResponse::Inverse(inverse) = &response else {
        panic!("expected an inverse response");
    };
    assert_eq!(inverse.target_time_min, 390.0);
    assert_eq!(inverse.plan.summary.checkpoint_time_min, 5.0);
    assert!(
        response
            .plan()
            .segments
            .iter()
            .all(|s| s.arrival_time_of_day.is_some())
    );

    let value = serde_json::to_value(&response).unwrap();
    assert_eq!(value["mode"], "inverse");
    assert!(value["thresholds"]["push_min"].is_number());
    assert!(value["thresholds"]["protect_found"].is_boolean());
}

#[test]
fn test_request_rejects_unknown_enum_keys() {
    let json = r#"{
        "segments": [{ "distance_km": 5.0, "ascent_m": 0.0, "descent_m": 0.0, "terrain_type": "sand" }],
        "athlete": {
            "base_pace_min_per_km": 6.0,
            "climbing_ability": "moderate",
            "fitness_level": "trained",
            "skill_level": 0.5
        }
    }"#;
    assert!(serde_json::from_str::<PlanRequest>(json).is_err());
}

#[test]
fn test_forward_request_with_bad_clock() {
    let request = PlanRequest {
        segments: route(),
        athlete: athlete(),
        checkpoints: vec![],
        race_start: Some("7am".to_string()),
        target_time: None,
    };
    assert!(matches!(
        request.execute(&PlannerConfig::default()),
        Err(PlanError::Configuration(_))
    ));
}
