//! Heuristic response-body filter for intercepted media feed JSON.
//!
//! Given a JSON response body captured by an interception proxy, this
//! library locates arrays that look like lists of media items and removes
//! items whose play/view count falls below a configured threshold. Bodies
//! that are empty, binary, or not JSON pass through untouched; every error
//! path degrades to keeping data, so the filter can never break a response.

pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod hook;
pub mod processor;
pub mod types;
pub mod walker;

pub use classify::{ClassifierTuning, MIN_EXTRACTION_HITS, MIN_OBJECT_RATIO, SAMPLE_SIZE};
pub use config::{Config, ConfigBuilder, DEFAULT_MIN_POPULARITY};
pub use error::{Error, Result};
pub use extract::extract_popularity;
pub use filter::{FilterMode, FilterResult, ItemFilter};
pub use hook::ResponseHook;
pub use processor::ResponsePipeline;
pub use types::{BodyOutcome, InspectReport, RewriteAction, RewriteOutcome};
pub use walker::DocumentWalker;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{Config, ConfigBuilder};
    pub use crate::error::{Error, Result};
    pub use crate::hook::ResponseHook;
    pub use crate::processor::ResponsePipeline;
    pub use crate::types::{BodyOutcome, InspectReport, RewriteAction, RewriteOutcome};
    pub use futures::StreamExt;
}
