use std::env;
use std::path::Path;

use autosteer_pid::Gains;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Steering {
    /// Constant throttle paired with every steering command
    pub throttle: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub logger: Logger,
    pub controller: Gains,
    pub steering: Steering,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Self::load("configs", &run_mode)
    }

    /// Layers `{dir}/default`, the optional `{dir}/{run_mode}` and
    /// `AUTOSTEER__*` environment variables, last one wins.
    pub fn load(dir: impl AsRef<Path>, run_mode: &str) -> Result<Self, ConfigError> {
        let dir = dir.as_ref();

        Config::builder()
            .add_source(File::with_name(&dir.join("default").to_string_lossy()))
            .add_source(File::with_name(&dir.join(run_mode).to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix("AUTOSTEER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: Server {
                host: "0.0.0.0".to_string(),
                port: 4567,
            },
            logger: Logger {
                level: "info".to_string(),
            },
            controller: Gains::new(0.085, 0.0008, 0.95),
            steering: Steering { throttle: 0.25 },
        }
    }
}
