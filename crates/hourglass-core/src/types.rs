use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Assumed skill level of the developers whose work is being estimated.
///
/// Scales the baseline time of every commit: junior developers are assumed
/// to need more time for the same change, senior developers less.
///
/// # Examples
///
/// ```
/// use hourglass_core::Experience;
///
/// let exp: Experience = "junior".parse().unwrap();
/// assert_eq!(exp, Experience::Junior);
/// assert_eq!(exp.multiplier(), 1.5);
/// assert_eq!(Experience::default(), Experience::Mid);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Experience {
    /// Junior developer: baseline time × 1.5.
    Junior,
    /// Mid-level developer: no adjustment.
    #[default]
    Mid,
    /// Senior developer: baseline time × 0.8.
    Senior,
}

impl Experience {
    /// Scaling factor applied to a commit's baseline time.
    pub fn multiplier(self) -> f64 {
        match self {
            Experience::Junior => 1.5,
            Experience::Mid => 1.0,
            Experience::Senior => 0.8,
        }
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Experience::Junior => write!(f, "junior"),
            Experience::Mid => write!(f, "mid"),
            Experience::Senior => write!(f, "senior"),
        }
    }
}

impl FromStr for Experience {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "junior" => Ok(Experience::Junior),
            "mid" => Ok(Experience::Mid),
            "senior" => Ok(Experience::Senior),
            other => Err(format!("unknown experience level: {other}")),
        }
    }
}

/// Output format for command results.
///
/// # Examples
///
/// ```
/// use hourglass_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable estimation trace.
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
