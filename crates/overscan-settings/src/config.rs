//! Configuration and settings management
//!
//! Settings are stored as JSON or TOML, chosen by file extension. A config
//! file in the platform config directory is picked up automatically when it
//! exists.
//!
//! Configuration is organized into two sections:
//! - Job settings (overscan, power, tolerance, feed)
//! - Output settings (file suffix, pass comments)

use overscan_core::{ConfigError, Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix inserted before the extension of the input file name
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_overscan";

/// Job settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobSettings {
    /// Extra travel before and after each pass (mm)
    pub overscan_distance: f64,
    /// Laser power (S value)
    pub laser_power: f64,
    /// Grouping tolerance (mm); zero or less disables quantization
    pub group_tolerance: f64,
    /// Cutting feed rate (mm/min)
    pub cut_feed_rate: f64,
}

impl Default for JobSettings {
    fn default() -> Self {
        Self {
            overscan_distance: 2.0,
            laser_power: 75.0,
            group_tolerance: 0.0001,
            cut_feed_rate: 1000.0,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Suffix for derived output file names
    pub suffix: String,
    /// Write a comment line before each pass
    pub group_comments: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            group_comments: true,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub job: JobSettings,
    pub output: OutputSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Location of the per-user config file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("overscan").join("config.toml"))
    }

    /// Load the per-user config file, or defaults when there is none
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Config = match format {
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                    format: "JSON",
                    reason: e.to_string(),
                })?
            }
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| ConfigError::Parse {
                format: "TOML",
                reason: e.to_string(),
            })?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self).map_err(|e| {
                ConfigError::Serialize {
                    reason: e.to_string(),
                }
            })?,
            ConfigFormat::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
                    reason: e.to_string(),
                })?
            }
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Validate configuration
    ///
    /// Only values the processor cannot turn into G-code are rejected.
    /// Negative or zero tolerances are legal and disable quantization.
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("overscan_distance", self.job.overscan_distance),
            ("laser_power", self.job.laser_power),
            ("group_tolerance", self.job.group_tolerance),
            ("cut_feed_rate", self.job.cut_feed_rate),
        ];
        for (setting, value) in numbers {
            if !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    setting: setting.to_string(),
                    reason: format!("{} is not a finite number", value),
                }
                .into());
            }
        }

        if self.output.suffix.is_empty() {
            return Err(ConfigError::InvalidValue {
                setting: "suffix".to_string(),
                reason: "output suffix must not be empty".to_string(),
            }
            .into());
        }
        if self.output.suffix.contains(['/', '\\']) {
            return Err(ConfigError::InvalidValue {
                setting: "suffix".to_string(),
                reason: "output suffix must not contain path separators".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Output path for `input` using the configured suffix
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        derive_output_path(input, &self.output.suffix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
            .into()),
        }
    }
}

/// Insert `suffix` before the extension of `input`
///
/// `part.gcode` becomes `part_overscan.gcode`; `part` becomes `part_overscan`.
pub fn derive_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match input.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    input.with_file_name(name)
}
