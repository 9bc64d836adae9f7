//! Runtime configuration
//!
//! Configuration comes from three layers, later layers winning:
//! built-in defaults, an optional JSON file (`--config`), and command-line
//! flags applied by the binary.
//!
//! ```json
//! {
//!   "engine": { "base_delay_ms": 200, "min_speed": 0.25, "max_speed": 16.0 },
//!   "input": { "size": 30, "seed": 7 },
//!   "ui": { "frame_ms": 16 }
//! }
//! ```
//!
//! Every section and field is optional in the file.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default delay between steps at 1x speed
pub const DEFAULT_BASE_DELAY_MS: u64 = 200;

/// Slowest and fastest supported playback multipliers
pub const DEFAULT_MIN_SPEED: f64 = 0.25;
pub const DEFAULT_MAX_SPEED: f64 = 16.0;

/// Largest generated input accepted from the command line
pub const MAX_INPUT_SIZE: usize = 200;

/// Playback timing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub base_delay_ms: u64,
    pub min_speed: f64,
    pub max_speed: f64,
    pub initial_speed: f64,
}

impl EngineConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            base_delay_ms: DEFAULT_BASE_DELAY_MS,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            initial_speed: 1.0,
        }
    }
}

/// Generated input parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Number of elements in generated arrays
    pub size: usize,
    /// Seed for every random choice made while building inputs or traces
    pub seed: u64,
    /// Upper bound (inclusive) for generated values
    pub max_value: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            size: 30,
            seed: 42,
            max_value: 99,
        }
    }
}

/// Terminal UI parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// How long the event loop waits for input before delivering a frame
    pub frame_ms: u64,
}

impl UiConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig { frame_ms: 16 }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub engine: EngineConfig,
    pub input: InputConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Load a configuration file, filling missing fields with defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Reject values the engine or input generators cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if engine.base_delay_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "engine.base_delay_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if !(engine.min_speed.is_finite() && engine.min_speed > 0.0) {
            return Err(ConfigError::Invalid {
                field: "engine.min_speed",
                reason: format!("must be a positive number, got {}", engine.min_speed),
            });
        }
        if !engine.max_speed.is_finite() || engine.max_speed < engine.min_speed {
            return Err(ConfigError::Invalid {
                field: "engine.max_speed",
                reason: format!(
                    "must be finite and at least min_speed ({}), got {}",
                    engine.min_speed, engine.max_speed
                ),
            });
        }
        if engine.initial_speed.is_nan() {
            return Err(ConfigError::Invalid {
                field: "engine.initial_speed",
                reason: "must be a number".to_string(),
            });
        }
        if self.input.size == 0 || self.input.size > MAX_INPUT_SIZE {
            return Err(ConfigError::Invalid {
                field: "input.size",
                reason: format!("must be between 1 and {}", MAX_INPUT_SIZE),
            });
        }
        if self.input.max_value == 0 {
            return Err(ConfigError::Invalid {
                field: "input.max_value",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.ui.frame_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "ui.frame_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.base_delay(), Duration::from_millis(200));
        assert_eq!(config.engine.min_speed, 0.25);
        assert_eq!(config.engine.max_speed, 16.0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "engine": {{ "base_delay_ms": 50 }}, "input": {{ "seed": 9 }} }}"#)
            .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.engine.base_delay_ms, 50);
        assert_eq!(config.engine.max_speed, DEFAULT_MAX_SPEED);
        assert_eq!(config.input.seed, 9);
        assert_eq!(config.input.size, 30);
        assert_eq!(config.ui, UiConfig::default());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "engine": {{ "delay": 50 }} }}"#).unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {:?}", err);
    }

    #[test]
    fn test_inverted_speed_range_is_rejected() {
        let mut config = Config::default();
        config.engine.min_speed = 4.0;
        config.engine.max_speed = 2.0;

        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "engine.max_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Config::load(Path::new("/nonexistent/algotrace.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/algotrace.json"));
    }
}
