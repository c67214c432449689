use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunables of the transition planner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShiftConfig {
    /// Lower bound reported as `max_line_number`, so the line-number gutter
    /// keeps a stable width for short snippets.
    pub min_max_line_number: usize,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        ShiftConfig {
            min_max_line_number: 10,
        }
    }
}

impl ShiftConfig {
    /// Reads a configuration from TOML text. Missing keys keep their defaults.
    ///
    /// ```
    /// use codeshift::ShiftConfig;
    ///
    /// let config = ShiftConfig::from_toml_str("min_max_line_number = 100").unwrap();
    /// assert_eq!(config.min_max_line_number, 100);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }
}
