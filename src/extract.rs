//! Locates a popularity metric inside an item of unknown shape.
//!
//! Upstream feed schemas disagree on where the play/view count lives, and
//! drift over time. Extraction is an ordered list of attribute-path
//! strategies tried against the item; the first one that produces a usable
//! integer wins. A lookup that finds nothing usable moves on to the next
//! strategy, so a malformed field never aborts extraction.

use serde_json::Value;

/// One attribute-path lookup rule for locating an item's popularity value.
type Strategy = fn(&Value) -> Option<&Value>;

/// Strategies in priority order. The first raw value that normalizes to an
/// integer wins; no merging across strategies.
const STRATEGIES: &[Strategy] = &[
    stat_counts,
    top_level_counts,
    stat_view_count,
    data_counts,
    archive_stat_view,
];

/// Extract a popularity count from an item.
///
/// Only objects are eligible. Returns `None` when the item is not an object
/// or no strategy yields a usable integer.
pub fn extract_popularity(item: &Value) -> Option<i64> {
    if !item.is_object() {
        return None;
    }
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(item).and_then(normalize))
}

/// Counts nested in a `stat` sub-object. First present key wins, even if its
/// value turns out unusable.
fn stat_counts(item: &Value) -> Option<&Value> {
    let stat = item.get("stat")?;
    ["play", "view", "playCount", "views"]
        .iter()
        .find_map(|key| stat.get(key))
}

/// Counts at the item's top level.
fn top_level_counts(item: &Value) -> Option<&Value> {
    ["play", "play_count", "playCount", "view", "views"]
        .iter()
        .find_map(|key| item.get(key))
}

fn stat_view_count(item: &Value) -> Option<&Value> {
    item.get("stat")?.get("view_count")
}

/// Counts nested in a `data` sub-object.
fn data_counts(item: &Value) -> Option<&Value> {
    let data = item.get("data")?;
    ["play", "view"].iter().find_map(|key| data.get(key))
}

/// Repost-style items carry the count on the embedded archive.
fn archive_stat_view(item: &Value) -> Option<&Value> {
    item.get("archive")?.get("stat")?.get("view")
}

/// Convert a raw field value into an integer count.
///
/// Strings are reduced to their digit characters before parsing, which
/// tolerates grouped renderings like `"12,345"`. Fractional numbers are
/// truncated. Anything else is unusable.
fn normalize(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => {
            let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.is_empty() {
                None
            } else {
                digits.parse().ok()
            }
        }
        _ => None,
    }
}
