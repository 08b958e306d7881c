//! Heuristic that decides whether an array is a list of media items.
//!
//! The classifier never inspects more than a bounded prefix of the array.
//! It requires a majority of sampled elements to be objects, which rules
//! out arrays of primitives, plus at least one element with an extractable
//! popularity value, which rules out unrelated object arrays such as
//! category tags.

use crate::extract::extract_popularity;
use serde::Deserialize;
use serde_json::Value;

/// How many leading elements of an array are sampled. Later elements are
/// assumed to share the shape of earlier ones.
pub const SAMPLE_SIZE: usize = 12;

/// Fraction of sampled elements that must be objects. The comparison is
/// strict, so an array that is exactly half objects is not a candidate.
pub const MIN_OBJECT_RATIO: f64 = 0.5;

/// Minimum number of sampled elements that must yield a popularity value.
pub const MIN_EXTRACTION_HITS: usize = 1;

/// Tunable classifier thresholds. The defaults match the constants above;
/// they are carried in the configuration rather than re-derived.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierTuning {
    pub sample_size: usize,
    pub min_object_ratio: f64,
    pub min_extraction_hits: usize,
}

impl Default for ClassifierTuning {
    fn default() -> Self {
        Self {
            sample_size: SAMPLE_SIZE,
            min_object_ratio: MIN_OBJECT_RATIO,
            min_extraction_hits: MIN_EXTRACTION_HITS,
        }
    }
}

/// Decide whether the elements look like a list of popularity-bearing items.
///
/// Empty arrays are never candidates. Classification reads only the sampled
/// prefix and never consults structure outside the array.
pub fn is_item_list(elements: &[Value], tuning: &ClassifierTuning) -> bool {
    if elements.is_empty() {
        return false;
    }

    let sample = &elements[..elements.len().min(tuning.sample_size)];
    let objects = sample.iter().filter(|v| v.is_object()).count();
    let hits = sample
        .iter()
        .filter(|v| extract_popularity(v).is_some())
        .count();

    let object_ratio = objects as f64 / sample.len() as f64;
    object_ratio > tuning.min_object_ratio && hits >= tuning.min_extraction_hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tuning() -> ClassifierTuning {
        ClassifierTuning::default()
    }

    fn elements(value: Value) -> Vec<Value> {
        value.as_array().cloned().expect("test value must be an array")
    }

    #[test]
    fn test_empty_is_never_candidate() {
        assert!(!is_item_list(&[], &tuning()));
    }

    #[test]
    fn test_primitives_are_not_candidates() {
        let arr = elements(json!([1, 2, 3, "a", "b"]));
        assert!(!is_item_list(&arr, &tuning()));
    }

    #[test]
    fn test_items_with_counts_are_candidates() {
        let arr = elements(json!([
            {"stat": {"view": 1200}},
            {"title": "no counts"},
            {"stat": {"view": 88}}
        ]));
        assert!(is_item_list(&arr, &tuning()));
    }

    #[test]
    fn test_minority_objects_are_not_candidates() {
        // One object out of three, even with a clear count. Object ratio
        // 1/3 fails the majority requirement.
        let arr = elements(json!([{"stat": {"view": 10000}}, 1, 2]));
        assert!(!is_item_list(&arr, &tuning()));
    }

    #[test]
    fn test_exactly_half_objects_is_not_enough() {
        let arr = elements(json!([{"stat": {"view": 5}}, 7]));
        assert!(!is_item_list(&arr, &tuning()));
    }

    #[test]
    fn test_objects_without_counts_are_not_candidates() {
        let arr = elements(json!([{"name": "a"}, {"name": "b"}, {"name": "c"}]));
        assert!(!is_item_list(&arr, &tuning()));
    }

    #[test]
    fn test_sampling_is_bounded() {
        // The only popularity-bearing element sits past the sample window.
        let mut arr: Vec<Value> = (0..SAMPLE_SIZE).map(|i| json!({"title": i})).collect();
        arr.push(json!({"stat": {"view": 10}}));
        assert!(!is_item_list(&arr, &tuning()));
    }

    #[test]
    fn test_tuning_widens_the_sample() {
        let mut arr: Vec<Value> = (0..SAMPLE_SIZE).map(|i| json!({"title": i})).collect();
        arr.push(json!({"stat": {"view": 10}}));

        let wide = ClassifierTuning {
            sample_size: SAMPLE_SIZE + 1,
            ..ClassifierTuning::default()
        };
        assert!(is_item_list(&arr, &wide));
    }
}
