//! Headless runner: paints a demo scene and simulates it for a number of ticks.

mod config;
mod scene;
mod telemetry;

use anyhow::{Context, Result};
use sand_world::Session;
use tracing::{info, warn};

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = config::load_config()?;
    info!(
        width = config.world_config.width,
        height = config.world_config.height,
        radius = config.world_config.radius,
        speed = config.speed,
        seed = config.seed,
        "Starting falling sand runner"
    );

    let mut session = Session::new(&config).context("failed to set up session")?;
    let painted = scene::paint_demo(&mut session)?;
    info!(painted, "Demo scene painted");

    let keys = config::key_script();
    if !keys.is_empty() {
        let applied = session.apply_keys(&keys);
        if applied < keys.chars().count() {
            warn!(keys = %keys, applied, "Ignored unrecognised keys");
        }
    }

    let summary = session.run(config.num_ticks);
    println!("{}", serde_json::to_string_pretty(&summary)?);
    println!("{}", serde_json::to_string_pretty(&session.population())?);

    Ok(())
}
