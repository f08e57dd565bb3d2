//! Headless companion needs scenario.
//!
//! Runs a scripted camp with two hosts sharing one replicated record and
//! prints a summary. Tuning comes from `SIM_DATA_DIR` or the embedded data;
//! see [`config::SimConfig::from_env`] for the other knobs.
//!
//! ```bash
//! RUST_LOG=companion=debug cargo run -p companion-sim
//! ```

mod config;
mod scenario;
mod world;

use anyhow::Result;

use crate::config::SimConfig;
use crate::scenario::Scenario;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SimConfig::from_env();
    tracing::info!(
        target: "sim",
        dt = config.dt,
        duration = config.duration,
        handoff_at = config.handoff_at,
        data_dir = ?config.data_dir,
        "Starting companion scenario"
    );

    let summary = Scenario::new(config)?.run();

    println!("frames            {}", summary.frames);
    println!("owner             {:?}", summary.owner);
    println!("active food       {}", summary.active_food);
    println!("food left         {}", summary.food_left);
    println!("stamina           {:.1}", summary.stamina);
    println!("max health        {:.1}", summary.max_health);
    println!("rested remaining  {:.0}s", summary.rested_remaining);
    println!("wood cutting      {:.0}", summary.wood_cutting);
    println!("events            {}", summary.events);
    println!("record keys       {}", summary.record_keys);
    Ok(())
}
