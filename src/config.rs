use std::{env, fs, path::PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::{DEFAULT_MAX_WAIT_TIME, Ticks};
use crate::sim::{Bernoulli, SimConfig};

pub const DEFAULT_CONFIG_FILE: &str = "aging-sched.toml";
/// Relative to the working directory. Overridden by `input_path` in the
/// config file or by `PROCESS_INPUT`.
pub const DEFAULT_INPUT_PATH: &str = "process_scheduling_input";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_path: PathBuf,
    // Report goes to stdout when unset
    pub output_path: Option<PathBuf>,
    pub max_wait_time: Ticks,
    // Replaces the input file when present
    pub synthetic: Option<Bernoulli>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    max_wait_time: Option<Ticks>,
    synthetic: Option<Bernoulli>,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            input_path: raw
                .input_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH)),
            output_path: raw.output_path,
            max_wait_time: raw.max_wait_time.unwrap_or(DEFAULT_MAX_WAIT_TIME),
            synthetic: raw.synthetic,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::from(RawConfig::default())
    }
}

impl Config {
    /// Loads `path`, else `aging-sched.toml` in the working directory if it
    /// exists, else defaults; then applies environment overrides.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = path.or_else(|| {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            default_path.exists().then_some(default_path)
        });

        let mut cfg = match path {
            Some(path) => {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                Config::parse(&raw).with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Config::default(),
        };

        if let Ok(v) = env::var("PROCESS_INPUT") {
            cfg.input_path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("PROCESS_OUTPUT") {
            cfg.output_path = Some(PathBuf::from(v));
        }
        maybe_env_u64(&mut cfg.max_wait_time, "MAX_WAIT_TIME");

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let cfg = Config::from(toml::from_str::<RawConfig>(raw)?);
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            max_wait_time: self.max_wait_time,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.max_wait_time == 0 {
            anyhow::bail!("max_wait_time must be at least 1");
        }
        if let Some(synthetic) = &self.synthetic {
            synthetic.validate().context("invalid [synthetic] section")?;
        }
        Ok(())
    }
}

fn maybe_env_u64(val: &mut u64, key: &str) {
    if let Ok(v) = env::var(key) {
        if let Ok(n) = v.parse::<u64>() {
            *val = n;
        }
    }
}
