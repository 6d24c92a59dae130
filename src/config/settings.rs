//! Application settings configuration
//!
//! Defines inspector and batch settings, loaded from TOML.

use crate::utils::ConfigError;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default number of days before expiry at which a certificate is flagged
pub const DEFAULT_WARNING_THRESHOLD_DAYS: i64 = 30;

/// Default deadline for connect plus handshake
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default TLS port
pub const DEFAULT_PORT: u16 = 443;

/// Certificate inspection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InspectorSettings {
    pub warning_threshold_days: i64,
    pub timeout_secs: u64,
    pub port: u16,
}

impl Default for InspectorSettings {
    fn default() -> Self {
        Self {
            warning_threshold_days: DEFAULT_WARNING_THRESHOLD_DAYS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            port: DEFAULT_PORT,
        }
    }
}

impl InspectorSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject values the inspector cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.warning_threshold_days < 0 {
            return Err(ConfigError::InvalidValue {
                key: "inspector.warning_threshold_days".to_string(),
                message: format!("must be >= 0, got {}", self.warning_threshold_days),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "inspector.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "inspector.port".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

/// Batch settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    pub parallel: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self { parallel: 5 }
    }
}

/// Application settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub inspector: InspectorSettings,
    #[serde(default)]
    pub batch: BatchSettings,
}

impl Settings {
    /// Load settings from the default config file
    pub fn load_default() -> Result<Self, ConfigError> {
        let config_path = Path::new("config/default.toml");
        if config_path.exists() {
            Self::load_from_file(config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let settings: Settings = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.inspector.validate()?;
        if self.batch.parallel == 0 {
            return Err(ConfigError::InvalidValue {
                key: "batch.parallel".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
