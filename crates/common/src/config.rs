//! Application configuration.
//!
//! Defaults are read from a JSON file when present; the file is never
//! written. Command-line options always win over values loaded here.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output defaults.
    pub output: OutputDefaults,

    /// External capture tool settings.
    pub capture: CaptureDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default output parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputDefaults {
    /// Output directory used when `--output` is not given.
    pub dir: Option<PathBuf>,

    /// JPEG quality (1-100).
    pub quality: u8,
}

/// Settings for external capture tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureDefaults {
    /// Upper bound for every external tool invocation, in seconds.
    pub timeout_secs: u64,

    /// Under a Linux guest on a Windows host, write temporaries into the
    /// bridged host temp directory when it is reachable.
    pub prefer_bridged_temp: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "deskshot=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for OutputDefaults {
    fn default() -> Self {
        Self {
            dir: None,
            quality: 100,
        }
    }
}

impl Default for CaptureDefaults {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            prefer_bridged_temp: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl CaptureDefaults {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if config_path.exists() {
            match std::fs::read_to_string(config_path) {
                Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
                    Ok(config) => return config.sanitized(),
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    fn sanitized(mut self) -> Self {
        if !(1..=100).contains(&self.output.quality) {
            tracing::warn!(
                quality = self.output.quality,
                "Configured quality out of range, using 100"
            );
            self.output.quality = 100;
        }
        self
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .or_else(|_| std::env::var("APPDATA"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("deskshot").join("config.json")
}
