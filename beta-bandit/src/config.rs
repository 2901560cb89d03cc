//! Configuration loading for beta-bandit.
//!
//! Supports loading configuration from TOML files, with sensible defaults
//! for all settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for beta-bandit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Experiment identity settings.
    pub experiment: ExperimentConfig,
    /// Settings for Monte Carlo sampling.
    pub sampling: SamplingConfig,
    /// Settings for online sequential learning.
    pub learning: LearningConfig,
}

/// Experiment identity settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Name used in the rendered report.
    pub name: String,
}

/// Configuration for Monte Carlo sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Number of offline scoring rounds.
    pub iterations: usize,
    /// Number of draws per arm when estimating means and comparisons.
    pub mean_iterations: usize,
}

/// Configuration for online sequential learning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Number of sequential pulls.
    pub rounds: usize,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            name: "console".to_string(),
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            mean_iterations: 10_000,
        }
    }
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self { rounds: 10_000 }
    }
}

/// Default configuration file name.
const DEFAULT_CONFIG_FILE: &str = ".beta-bandit.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from the default file (`.beta-bandit.toml`) or use
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be
    /// parsed.
    pub fn load_or_default() -> Result<Config> {
        let path = Path::new(DEFAULT_CONFIG_FILE);

        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from the specified path, falling back to the
    /// default locations when the path doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load_from(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            Some(_) | None => Self::load_or_default(),
        }
    }
}
