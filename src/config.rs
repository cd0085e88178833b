//! Runtime configuration.
//!
//! Every value has a default, so an empty file (or no file at all) yields the reference
//! behaviour: 5 unit moves, 15 degree turns, 5 unit sensor steps up to 200 units and 200 ms
//! between queued commands.

use std::{env, fs, path::PathBuf, time::Duration};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::{Catalog, MotionConfig, SensorConfig, DEFAULT_STEP_DELAY};

pub const CONFIG_PATH_VAR: &str = "ROBOT_SANDBOX_CONFIG";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Environment the session starts in.
    pub environment: String,
    pub motion: MotionSection,
    pub sensor: SensorSection,
    pub executor: ExecutorSection,
    pub programs: ProgramsSection,
    pub app: AppSection,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionSection {
    pub move_step: f64,
    pub turn_step: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SensorSection {
    pub step: f64,
    pub max_range: f64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExecutorSection {
    pub step_delay_ms: u64,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProgramsSection {
    pub path: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppSection {
    /// Simulation updates per second.
    pub tick_hz: f64,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// Reads the file named by `ROBOT_SANDBOX_CONFIG`, or returns the defaults if it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match env::var_os(CONFIG_PATH_VAR) {
            Some(path) => Self::load(PathBuf::from(path)),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("motion.move_step", self.motion.move_step),
            ("motion.turn_step", self.motion.turn_step),
            ("sensor.step", self.sensor.step),
            ("sensor.max_range", self.sensor.max_range),
            ("app.tick_hz", self.app.tick_hz),
        ];
        if let Some((key, value)) = positive.iter().find(|(_, v)| !(v.is_finite() && *v > 0.0)) {
            return Err(ConfigError::Invalid(format!("{key} must be positive, got {value}")));
        }
        if self.executor.step_delay_ms == 0 {
            return Err(ConfigError::Invalid(
                "executor.step_delay_ms must be positive".to_string(),
            ));
        }
        Catalog::global()
            .select(&self.environment)
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(())
    }

    pub fn motion_config(&self) -> MotionConfig {
        MotionConfig::new(self.motion.move_step, self.motion.turn_step)
    }

    pub fn sensor_config(&self) -> SensorConfig {
        SensorConfig::new(self.sensor.step, self.sensor.max_range)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.executor.step_delay_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.app.tick_hz)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Catalog::global().default_environment().name().to_string(),
            motion: MotionSection::default(),
            sensor: SensorSection::default(),
            executor: ExecutorSection::default(),
            programs: ProgramsSection::default(),
            app: AppSection::default(),
        }
    }
}

impl Default for MotionSection {
    fn default() -> Self {
        let motion = MotionConfig::default();
        Self {
            move_step: motion.move_step,
            turn_step: motion.turn_step,
        }
    }
}

impl Default for SensorSection {
    fn default() -> Self {
        let sensor = SensorConfig::default();
        Self {
            step: sensor.step,
            max_range: sensor.max_range,
        }
    }
}

impl Default for ExecutorSection {
    fn default() -> Self {
        Self {
            step_delay_ms: DEFAULT_STEP_DELAY.as_millis() as u64,
        }
    }
}

impl Default for ProgramsSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("programs.json"),
        }
    }
}

impl Default for AppSection {
    fn default() -> Self {
        Self { tick_hz: 60.0 }
    }
}
