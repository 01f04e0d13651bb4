//! Shared helpers used by the validator and by report consumers.

use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

use crate::path::Path;
use crate::value::{Value, mapping_get};

static DATE_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}Z$").unwrap());

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// True for UTC timestamps of the exact form `YYYY-MM-DDTHH:MM:SSZ`.
///
/// Fractional seconds and numeric offsets are rejected. Calendar ranges are
/// enforced, so `2019-02-30T00:00:00Z` is not a valid timestamp.
pub fn is_valid_date_time(s: &str) -> bool {
    DATE_TIME_RE.is_match(s) && NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT).is_ok()
}

/// Follow `path` from `root`, descending into mappings by string key and
/// into sequences by numeric segment.
///
/// Returns `None` when any segment does not resolve. The root path returns
/// `root` itself.
pub fn resolve_path<'a>(path: &Path, root: &'a Value) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.segments() {
        current = match current {
            Value::Mapping(m) => mapping_get(m, segment)?,
            Value::Sequence(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
