//! Configuration management for the izh CLI

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use izh_runtime::SerialFrame;

use crate::error::{CliError, CliResult};

/// How results are written
#[derive(ValueEnum, Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary and tables
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
    /// bincode (requires an output file)
    Bincode,
}

/// Global CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Simulation defaults
    pub simulation: SimulationDefaults,

    /// Output preferences
    pub output: OutputPreferences,
}

/// Defaults applied when a flag is not given on the command line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationDefaults {
    /// Ticks per run
    pub ticks: u64,
    /// Constant stimulus level
    pub stimulus: u8,
    /// Parameter frame as 8 hex digits, loaded before every run
    pub frame: Option<String>,
}

impl Default for SimulationDefaults {
    fn default() -> Self {
        Self {
            ticks: 1000,
            stimulus: 0,
            frame: None,
        }
    }
}

/// Output preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputPreferences {
    /// Default output format
    pub format: OutputFormat,
}

impl CliConfig {
    /// Load configuration from file; a missing file yields defaults
    pub fn load_from_file(path: &Path) -> CliResult<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            config.default_frame()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Load from an explicit path, or from the platform config directory
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_config_path() {
                Ok(path) => Self::load_from_file(&path),
                Err(_) => Ok(Self::default()),
            },
        }
    }

    /// Save configuration to file
    pub fn save_to_file(&self, path: &Path) -> CliResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::config(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> CliResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CliError::config("Could not determine config directory"))?;
        Ok(config_dir.join("izh").join("config.toml"))
    }

    /// Parsed default frame, if one is configured
    pub fn default_frame(&self) -> CliResult<Option<SerialFrame>> {
        self.simulation
            .frame
            .as_deref()
            .map(|text| {
                text.parse::<SerialFrame>()
                    .map_err(|e| CliError::config(format!("simulation.frame: {}", e)))
            })
            .transpose()
    }
}
