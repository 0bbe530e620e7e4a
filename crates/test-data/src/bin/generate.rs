//! Writes sample plan requests as JSON.
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin generate -- ./requests
//! ```

use std::{fs, path::PathBuf};

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use test_data::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let out_dir = PathBuf::from(std::env::args().nth(1).unwrap_or_else(|| "requests".to_string()));
    let seed = std::env::var("SEED")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    let mut rng = StdRng::seed_from_u64(seed);

    let scenarios = [
        ("mountain_50k", ScenarioBuilder::mountain_50k(), None),
        (
            "mountain_50k_target",
            ScenarioBuilder::mountain_50k().with_archetype(RunnerArchetype::elite()),
            Some("05:30".to_string()),
        ),
        (
            "rolling_100_mile",
            ScenarioBuilder::rolling_100_mile().with_athlete_variance(true),
            None,
        ),
        (
            "road_marathon_target",
            ScenarioBuilder::road_marathon(),
            Some("03:20".to_string()),
        ),
    ];

    for (name, builder, target) in scenarios {
        let scenario = builder.build(&mut rng);
        let request = scenario.to_request(target);
        let path = out_dir.join(format!("{name}.json"));
        fs::write(&path, serde_json::to_string_pretty(&request)?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(
            "  {}: {} segments, {:.1} km",
            name,
            scenario.segments.len(),
            scenario.total_distance_km()
        );
    }

    tracing::info!("Requests written to {}", out_dir.display());
    Ok(())
}
