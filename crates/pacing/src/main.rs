use std::{env, fs};

use anyhow::Context;
use pacing::{PlannerConfig, types::PlanRequest};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config() -> anyhow::Result<PlannerConfig> {
    match env::var("PACING_CONFIG") {
        Ok(path) => {
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("reading config file {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing config file {path}"))
        }
        Err(_) => Ok(PlannerConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let path = env::args()
        .nth(1)
        .context("usage: pacing <request.json>")?;
    let config = load_config()?;

    tracing::info!("Planning {}", path);

    let raw = fs::read_to_string(&path).with_context(|| format!("reading request {path}"))?;
    let request: PlanRequest =
        serde_json::from_str(&raw).with_context(|| format!("parsing request {path}"))?;
    let response = request.execute(&config)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
