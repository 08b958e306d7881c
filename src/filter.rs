//! Keep/drop decision for a single item.

use crate::config::Config;
use crate::extract::extract_popularity;
use serde_json::Value;

/// Filter result indicating whether an item should be kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    Keep,
    FilterOut,
}

/// Filtering mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Drop items whose popularity falls below the threshold
    Threshold,
    /// Keep everything. Traversal and classification still run.
    Disabled,
}

/// Per-item filter built from the configuration
#[derive(Debug, Clone)]
pub struct ItemFilter {
    mode: FilterMode,
    min_popularity: i64,
}

impl ItemFilter {
    pub fn new(config: &Config) -> Self {
        let mode = if config.enabled {
            FilterMode::Threshold
        } else {
            FilterMode::Disabled
        };
        Self {
            mode,
            // Validated to fit; see Config::validate
            min_popularity: config.min_popularity as i64,
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Check if an item should be kept.
    ///
    /// An item whose popularity cannot be determined is always kept;
    /// extraction failure is not evidence of low popularity. The boundary
    /// is inclusive: popularity equal to the threshold is kept.
    pub fn should_keep(&self, item: &Value) -> FilterResult {
        if self.mode == FilterMode::Disabled {
            return FilterResult::Keep;
        }

        match extract_popularity(item) {
            Some(count) if count >= self.min_popularity => FilterResult::Keep,
            Some(_) => FilterResult::FilterOut,
            None => FilterResult::Keep,
        }
    }
}
