//! Depth-first traversal that rewrites candidate item lists.

use crate::classify::{self, ClassifierTuning};
use crate::filter::{FilterResult, ItemFilter};
use serde_json::{Map, Value};

/// Walks a parsed document and filters arrays classified as item lists.
///
/// Candidate lists are filtered before recursion, so dropped elements are
/// never walked. Every other node is reproduced exactly: same keys, same
/// nesting, same scalar values, element order preserved. Objects are
/// rebuilt rather than mutated mid-iteration.
pub struct DocumentWalker<'a> {
    filter: &'a ItemFilter,
    tuning: ClassifierTuning,
    dropped: usize,
    candidate_lists: usize,
}

impl<'a> DocumentWalker<'a> {
    pub fn new(filter: &'a ItemFilter, tuning: ClassifierTuning) -> Self {
        Self {
            filter,
            tuning,
            dropped: 0,
            candidate_lists: 0,
        }
    }

    /// Number of items dropped so far
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Number of arrays classified as item lists so far
    pub fn candidate_lists(&self) -> usize {
        self.candidate_lists
    }

    /// Transform a value. The result has the same shape class as the input,
    /// structurally changed only at candidate-list arrays.
    pub fn walk(&mut self, value: Value) -> Value {
        match value {
            Value::Array(elements) => Value::Array(self.walk_array(elements)),
            Value::Object(map) => Value::Object(self.walk_object(map)),
            scalar => scalar,
        }
    }

    fn walk_array(&mut self, elements: Vec<Value>) -> Vec<Value> {
        if classify::is_item_list(&elements, &self.tuning) {
            self.candidate_lists += 1;
            let before = elements.len();
            let filter = self.filter;
            let kept: Vec<Value> = elements
                .into_iter()
                .filter(|item| filter.should_keep(item) == FilterResult::Keep)
                .map(|item| self.walk(item))
                .collect();
            self.dropped += before - kept.len();
            kept
        } else {
            elements
                .into_iter()
                .map(|element| self.walk(element))
                .collect()
        }
    }

    fn walk_object(&mut self, map: Map<String, Value>) -> Map<String, Value> {
        map.into_iter()
            .map(|(key, value)| {
                let walked = self.walk(value);
                (key, walked)
            })
            .collect()
    }
}
