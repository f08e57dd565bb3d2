//! Scenario settings read from the environment.
use std::env;
use std::path::PathBuf;

/// Headless scenario configuration.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Directory with `config.toml`, `balance.toml`, `skills.ron`, `items.ron`.
    /// Embedded data is used when unset.
    pub data_dir: Option<PathBuf>,
    /// Seconds per simulated frame.
    pub dt: f32,
    /// Total simulated seconds.
    pub duration: f32,
    /// Second at which ownership moves to the second host.
    pub handoff_at: f32,
    /// Second at which a hostile wanders into the camp for a few seconds.
    pub hostile_at: Option<f32>,
    pub food_stacks: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            dt: 0.1,
            duration: 120.0,
            handoff_at: 80.0,
            hostile_at: Some(30.0),
            food_stacks: 5,
        }
    }
}

impl SimConfig {
    /// Construct scenario configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SIM_DATA_DIR` - Data directory (default: embedded data)
    /// - `SIM_DT` - Frame length in seconds (default: 0.1)
    /// - `SIM_DURATION` - Simulated seconds (default: 120)
    /// - `SIM_HANDOFF_AT` - Ownership handoff second (default: 80)
    /// - `SIM_HOSTILE_AT` - Hostile arrival second, `off` to disable (default: 30)
    /// - `SIM_FOOD_STACKS` - Units of each food in the stash (default: 5)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("SIM_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(dt) = read_env::<f32>("SIM_DT") {
            config.dt = dt.clamp(0.01, 1.0);
        }
        if let Some(duration) = read_env::<f32>("SIM_DURATION") {
            config.duration = duration.max(0.0);
        }
        if let Some(at) = read_env::<f32>("SIM_HANDOFF_AT") {
            config.handoff_at = at.max(0.0);
        }
        match env::var("SIM_HOSTILE_AT").as_deref() {
            Ok("off") => config.hostile_at = None,
            Ok(raw) => {
                if let Ok(at) = raw.parse::<f32>() {
                    config.hostile_at = Some(at.max(0.0));
                }
            }
            Err(_) => {}
        }
        if let Some(stacks) = read_env::<u32>("SIM_FOOD_STACKS") {
            config.food_stacks = stacks;
        }

        config
    }

    pub fn frames(&self) -> u32 {
        (self.duration / self.dt).ceil() as u32
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
