use std::{path::Path, time::Duration};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Environment variable naming a JSON file with a [`SolverConfig`]
pub const CONFIG_ENV: &str = "MAZE_SOLVER_CONFIG";
/// Environment variable overriding [`SolverConfig::deadline_ms`]
pub const DEADLINE_ENV: &str = "MAZE_SOLVER_DEADLINE_MS";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Give up on a search that has been expanding for longer than this
    pub deadline_ms: Option<u64>,
}

impl SolverConfig {
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Read the config file named by `MAZE_SOLVER_CONFIG` if set, then apply
    /// `MAZE_SOLVER_DEADLINE_MS`
    pub fn load() -> Result<Self, anyhow::Error> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(value) = std::env::var(DEADLINE_ENV) {
            config.apply_deadline_override(&value)?;
        }

        Ok(config)
    }

    fn apply_deadline_override(&mut self, value: &str) -> Result<(), anyhow::Error> {
        let value = value.trim();
        if value.is_empty() {
            self.deadline_ms = None;
            return Ok(());
        }

        let ms = value
            .parse()
            .with_context(|| format!("{} must be a number of milliseconds", DEADLINE_ENV))?;
        self.deadline_ms = Some(ms);
        Ok(())
    }
}
