use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HourglassError;
use crate::types::Experience;

/// Top-level configuration loaded from `.hourglass.toml`.
///
/// Supports layered resolution: CLI flags > local config > defaults.
///
/// # Examples
///
/// ```
/// use hourglass_core::{Experience, HourglassConfig};
///
/// let config = HourglassConfig::default();
/// assert_eq!(config.estimate.experience, Experience::Mid);
/// assert!(config.weights.is_empty());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HourglassConfig {
    /// Estimation run settings.
    #[serde(default)]
    pub estimate: EstimateConfig,
    /// Language weight overrides: file extension (no dot) → weight.
    /// Merged over the built-in table.
    #[serde(default)]
    pub weights: HashMap<String, f64>,
}

/// Settings for the `estimate` subcommand.
///
/// # Examples
///
/// ```
/// use hourglass_core::EstimateConfig;
/// use std::path::PathBuf;
///
/// let config = EstimateConfig::default();
/// assert_eq!(config.log_dir, PathBuf::from("./logs"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateConfig {
    /// Default developer experience level.
    #[serde(default)]
    pub experience: Experience,
    /// Directory where estimation trace logs are written.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            experience: Experience::default(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}

impl HourglassConfig {
    /// Load configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`HourglassError::Io`] if the file cannot be read, or
    /// [`HourglassError::Toml`] if the content is not valid TOML.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hourglass_core::HourglassConfig;
    /// use std::path::Path;
    ///
    /// let config = HourglassConfig::from_file(Path::new(".hourglass.toml")).unwrap();
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, HourglassError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`HourglassError::Toml`] if parsing fails, or
    /// [`HourglassError::Config`] if a weight override is not positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use hourglass_core::{Experience, HourglassConfig};
    ///
    /// let toml = r#"
    /// [estimate]
    /// experience = "senior"
    /// "#;
    /// let config = HourglassConfig::from_toml(toml).unwrap();
    /// assert_eq!(config.estimate.experience, Experience::Senior);
    /// ```
    pub fn from_toml(content: &str) -> Result<Self, HourglassError> {
        let config: Self = toml::from_str(content)?;
        for (ext, weight) in &config.weights {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(HourglassError::Config(format!(
                    "weight for '{ext}' must be a positive number, got {weight}"
                )));
            }
        }
        Ok(config)
    }
}
