use serde::Serialize;

/// What the hook decided to do with a response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteAction {
    /// Substitute the serialized, filtered body for the original
    Replace(String),
    /// Leave the original response body untouched
    Passthrough,
}

impl RewriteAction {
    pub fn is_passthrough(&self) -> bool {
        matches!(self, RewriteAction::Passthrough)
    }

    /// The replacement body, if any
    pub fn body(&self) -> Option<&str> {
        match self {
            RewriteAction::Replace(body) => Some(body),
            RewriteAction::Passthrough => None,
        }
    }
}

/// Outcome of one hook invocation: the action plus traversal statistics
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub action: RewriteAction,
    /// Items removed from candidate lists
    pub dropped: usize,
    /// Arrays classified as candidate item lists
    pub candidate_lists: usize,
}

impl RewriteOutcome {
    /// An outcome that leaves the original body unmodified
    pub fn passthrough() -> Self {
        Self {
            action: RewriteAction::Passthrough,
            dropped: 0,
            candidate_lists: 0,
        }
    }
}

/// One processed body in a batch run
#[derive(Debug, Clone, Serialize)]
pub struct BodyOutcome {
    /// Where the body came from (file path or stdin line number)
    pub source: String,
    /// The outgoing body: filtered when rewritten, the original on passthrough
    pub body: String,
    pub passthrough: bool,
    pub dropped: usize,
}

/// Dry-run report for the inspect command
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub min_popularity: u64,
    pub candidate_lists: usize,
    pub items_dropped: usize,
    pub would_rewrite: bool,
}
