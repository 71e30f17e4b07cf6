//! Collection coercers.
//!
//! These apply the scalar rules of `scalar.rs`/`text.rs` to every entry of an
//! [`OrderedMap`], keeping keys and order. One extra switch, `recursive`,
//! decides what happens to entries that are collections themselves:
//!
//! - `recursive = true`: the nested collection is coerced with the same
//!   arguments, at any depth.
//! - `recursive = false`: the nested collection is one opaque entry.
//!   `Variable` first swaps it for the entry default ([`replace_nested`]), so
//!   the step sees exactly what it would see for a missing value and the key
//!   survives. Called directly, these functions hand the nested collection to
//!   the scalar rule, which treats it as unparseable.
//!
//! Filtering coercers (id lists) may drop entries; a list that lost entries
//! is re-indexed so it stays `0..n`.

use std::collections::HashSet;
use std::hash::Hash;

use crate::scalar::{self, parse_integer};
use crate::text::delimited_list;
use crate::value::{is_list, reindex};
use crate::{OrderedMap, Value};

/// Scope of token deduplication in list validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Uniqueness {
    /// Deduplicate within one entry's own delimiter-split list.
    #[default]
    Row,
    /// Deduplicate across the whole outer collection.
    All,
}

/// Apply `f` to every scalar entry of `map`.
pub fn map_entries<F>(map: &OrderedMap, recursive: bool, f: &mut F) -> OrderedMap
where
    F: FnMut(&Value) -> Value,
{
    let mut out = OrderedMap::with_capacity(map.len());
    for (key, value) in map {
        let coerced = match value {
            Value::Map(inner) if recursive => Value::Map(map_entries(inner, recursive, f)),
            other => f(other),
        };
        out.insert(key.clone(), coerced);
    }
    out
}

/// Like [`map_entries`], but entries for which `f` returns `None` are dropped.
pub fn filter_entries<F>(map: &OrderedMap, recursive: bool, f: &mut F) -> OrderedMap
where
    F: FnMut(&Value) -> Option<Value>,
{
    let mut out = OrderedMap::with_capacity(map.len());
    for (key, value) in map {
        let coerced = match value {
            Value::Map(inner) if recursive => Some(Value::Map(filter_entries(inner, recursive, f))),
            other => f(other),
        };
        if let Some(v) = coerced {
            out.insert(key.clone(), v);
        }
    }
    if out.len() < map.len() && is_list(map) { reindex(out) } else { out }
}

/// Per entry: the coerced integer if it is `>= min`, otherwise `default`.
pub fn clamp_min(map: &OrderedMap, min: i64, default: i64, recursive: bool) -> OrderedMap {
    map_entries(map, recursive, &mut |v| Value::Int(scalar::at_least(v, min, default)))
}

/// Per entry: the coerced integer if it is `<= max`, otherwise `default`.
pub fn clamp_max(map: &OrderedMap, max: i64, default: i64, recursive: bool) -> OrderedMap {
    map_entries(map, recursive, &mut |v| Value::Int(scalar::at_most(v, max, default)))
}

/// Keep the tokens not yet in `seen`, recording them as they pass.
pub fn dedupe<T: Eq + Hash + Clone>(tokens: impl IntoIterator<Item = T>, seen: &mut HashSet<T>) -> Vec<T> {
    tokens.into_iter().filter(|t| seen.insert(t.clone())).collect()
}

/// Positive integer ids found in a delimited string, in order, minus those in `seen`.
pub fn ids_in(text: &str, delimiter: &str, seen: &mut HashSet<i64>) -> Vec<i64> {
    let ids = delimited_list(text, delimiter, &[""]).into_iter().filter_map(|t| parse_integer(&t, true)).filter(|n| *n > 0);
    dedupe(ids, seen)
}

pub fn join<T: ToString>(items: &[T], delimiter: &str) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(delimiter)
}

/// Validate a delimited id list: `"5, -1, abc, 5"` → `"5"`.
pub fn validate_id_list(text: &str, delimiter: &str) -> String {
    join(&ids_in(text, delimiter, &mut HashSet::new()), delimiter)
}

/// [`validate_id_list`] over every entry; entries left without ids are dropped.
pub fn validate_id_lists(map: &OrderedMap, delimiter: &str, uniqueness: Uniqueness, recursive: bool) -> OrderedMap {
    let mut shared = HashSet::new();
    filter_entries(map, recursive, &mut |v| {
        let mut row = HashSet::new();
        let seen = match uniqueness {
            Uniqueness::Row => &mut row,
            Uniqueness::All => &mut shared,
        };
        let ids = ids_in(&scalar::to_string(v, ""), delimiter, seen);
        (!ids.is_empty()).then(|| Value::Str(join(&ids, delimiter)))
    })
}

/// Comma-separated tags, trimmed, without empties, minus those in `seen`.
pub fn tags_in(text: &str, seen: &mut HashSet<String>) -> Vec<String> {
    let tags = delimited_list(text, ",", &[]).into_iter().map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    dedupe(tags, seen)
}

/// Validate a comma-separated tag list: `" a, ,b,a "` → `"a,b"`.
pub fn validate_tag_list(text: &str) -> String {
    tags_in(text, &mut HashSet::new()).join(",")
}

/// [`validate_tag_list`] over every entry, deduplicating across the whole
/// collection including nested levels.
pub fn validate_tag_lists(map: &OrderedMap, recursive: bool) -> OrderedMap {
    let mut seen = HashSet::new();
    map_entries(map, recursive, &mut |v| Value::Str(tags_in(&scalar::to_string(v, ""), &mut seen).join(",")))
}

/// One positive id per entry, unique across the collection; anything else is dropped.
pub fn id_entries(map: &OrderedMap, recursive: bool) -> OrderedMap {
    let mut seen = HashSet::new();
    filter_entries(map, recursive, &mut |v| match scalar::to_integer(v, 0, false) {
        n if n > 0 && seen.insert(n) => Some(Value::Int(n)),
        _ => None,
    })
}

/// Replace every entry that is itself a collection with `fallback`.
pub fn replace_nested(map: OrderedMap, fallback: &Value) -> OrderedMap {
    map.into_iter()
        .map(|(key, value)| match value {
            Value::Map(_) => (key, fallback.clone()),
            scalar => (key, scalar),
        })
        .collect()
}
