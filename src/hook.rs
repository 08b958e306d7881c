//! Entry point invoked once per intercepted response body.

use crate::config::Config;
use crate::error::Result;
use crate::filter::ItemFilter;
use crate::types::{InspectReport, RewriteAction, RewriteOutcome};
use crate::walker::DocumentWalker;
use serde_json::Value;
use tracing::{debug, warn};

/// Post-processing hook for matched responses.
///
/// The hook never fails and never produces a half-filtered body: every
/// error path resolves to passing the original body through unchanged.
#[derive(Debug, Clone)]
pub struct ResponseHook {
    config: Config,
    filter: ItemFilter,
}

impl ResponseHook {
    pub fn new(config: Config) -> Self {
        let filter = ItemFilter::new(&config);
        Self { config, filter }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process a raw body.
    ///
    /// Empty, non-text, non-JSON, and unparseable bodies all pass through.
    pub fn process(&self, body: &[u8]) -> RewriteOutcome {
        if body.is_empty() {
            debug!("empty body, passing through");
            return RewriteOutcome::passthrough();
        }

        match std::str::from_utf8(body) {
            Ok(text) => self.process_str(text),
            Err(_) => {
                debug!("non-text body, passing through");
                RewriteOutcome::passthrough()
            }
        }
    }

    /// Process a textual body.
    pub fn process_str(&self, body: &str) -> RewriteOutcome {
        // Cheap content sniff before paying for a parse. Anything that does
        // not open as an object or array (protobuf, HTML, plain text) is
        // left alone.
        let trimmed = body.trim_start();
        if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
            debug!("body does not look like JSON, passing through");
            return RewriteOutcome::passthrough();
        }

        let root: Value = match serde_json::from_str(body) {
            Ok(value) => value,
            Err(error) => {
                debug!(%error, "body is not valid JSON, passing through");
                return RewriteOutcome::passthrough();
            }
        };

        let mut walker = DocumentWalker::new(&self.filter, self.config.tuning);
        let filtered = walker.walk(root);
        let dropped = walker.dropped();
        let candidate_lists = walker.candidate_lists();

        match serde_json::to_string(&filtered) {
            Ok(serialized) => {
                if dropped > 0 {
                    debug!(dropped, candidate_lists, "rewrote response body");
                }
                RewriteOutcome {
                    action: RewriteAction::Replace(serialized),
                    dropped,
                    candidate_lists,
                }
            }
            Err(error) => {
                warn!(%error, "failed to serialize filtered body, passing through");
                RewriteOutcome::passthrough()
            }
        }
    }

    /// Dry run: report what filtering would do without producing a body.
    ///
    /// Unlike [`process`](Self::process), this surfaces the parse error,
    /// since a diagnostic run wants to know why nothing would happen.
    pub fn inspect(&self, body: &str) -> Result<InspectReport> {
        let root: Value = serde_json::from_str(body)?;

        let mut walker = DocumentWalker::new(&self.filter, self.config.tuning);
        walker.walk(root);

        Ok(InspectReport {
            min_popularity: self.config.min_popularity,
            candidate_lists: walker.candidate_lists(),
            items_dropped: walker.dropped(),
            would_rewrite: walker.dropped() > 0,
        })
    }
}
