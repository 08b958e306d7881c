use crate::classify::ClassifierTuning;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default minimum popularity.
///
/// Zero keeps every item whose popularity can be determined, so a freshly
/// constructed filter is a no-op until a real threshold is supplied. This
/// is the safe default for a hook that rewrites live responses.
pub const DEFAULT_MIN_POPULARITY: u64 = 0;

/// Configuration for the response filter
#[derive(Debug, Clone)]
pub struct Config {
    /// Items with a popularity below this value are dropped. An item whose
    /// popularity equals the threshold is kept.
    pub min_popularity: u64,
    /// When false, traversal and classification still run but every item
    /// is kept.
    pub enabled: bool,
    /// Classifier thresholds.
    pub tuning: ClassifierTuning,
}

impl Config {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self {
            min_popularity: DEFAULT_MIN_POPULARITY,
            enabled: true,
            tuning: ClassifierTuning::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let file: FileConfig = toml::from_str(&raw)?;

        let mut config = Config::new();
        if let Some(min) = file.min_popularity {
            config.min_popularity = min;
        }
        if let Some(enabled) = file.enabled {
            config.enabled = enabled;
        }
        if let Some(classifier) = file.classifier {
            config.tuning = classifier;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_popularity > i64::MAX as u64 {
            return Err(Error::Config(format!(
                "minimum popularity {} exceeds the supported range",
                self.min_popularity
            )));
        }

        if self.tuning.sample_size == 0 {
            return Err(Error::Config(
                "classifier sample size must be at least 1".to_string(),
            ));
        }

        if !(self.tuning.min_object_ratio > 0.0 && self.tuning.min_object_ratio <= 1.0) {
            return Err(Error::Config(format!(
                "classifier object ratio {} must be within (0, 1]",
                self.tuning.min_object_ratio
            )));
        }

        if self.tuning.min_extraction_hits == 0 {
            return Err(Error::Config(
                "classifier extraction hits must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk configuration shape. Every field is optional; omitted fields
/// keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileConfig {
    min_popularity: Option<u64>,
    enabled: Option<bool>,
    classifier: Option<ClassifierTuning>,
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            config: Config::new(),
        }
    }

    /// Create a builder seeded from an existing configuration
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the minimum popularity threshold
    pub fn min_popularity(mut self, min: u64) -> Self {
        self.config.min_popularity = min;
        self
    }

    /// Set the threshold from a string, tolerating digit grouping the same
    /// way field extraction does ("12,345" parses as 12345)
    pub fn min_popularity_str(mut self, raw: &str) -> Result<Self> {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(Error::Config(format!(
                "invalid minimum popularity '{}'",
                raw
            )));
        }
        let min = digits.parse().map_err(|_| {
            Error::Config(format!("minimum popularity '{}' is out of range", raw))
        })?;
        self.config.min_popularity = min;
        Ok(self)
    }

    /// Enable or disable filtering
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.config.enabled = enabled;
        self
    }

    /// Replace the classifier tuning
    pub fn tuning(mut self, tuning: ClassifierTuning) -> Self {
        self.config.tuning = tuning;
        self
    }

    /// Set the classifier sample size
    pub fn sample_size(mut self, sample_size: usize) -> Self {
        self.config.tuning.sample_size = sample_size;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
