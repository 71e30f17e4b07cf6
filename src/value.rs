//! Loosely-typed payload carried through the pipeline.
//!
//! Request parameters arrive as strings, numbers, or nested string-keyed
//! collections. `Value` models that as an explicit tagged union so every
//! coercer can `match` on the two shapes (scalar vs collection) instead of
//! inspecting runtime types.
//!
//! ```text
//! Value ──┬─ Null | Bool | Int | Float | Str     (scalars)
//!         └─ Map(OrderedMap<Key, Value>)          (collections, any depth)
//! ```
//!
//! Collections preserve insertion order. A collection whose keys are exactly
//! `0..n` in order is a *list*; the distinction is observable (see
//! [`Value::is_list`]) but does not change coercion logic.

use indexmap::IndexMap;
use std::fmt;

/// Ordered key → value collection.
pub type OrderedMap = IndexMap<Key, Value>;

/// Collection key: sequential integers (list semantics) or names (map semantics).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(i64),
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Index(i)
    }
}

impl From<usize> for Key {
    fn from(i: usize) -> Self {
        Key::Index(i as i64)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Index(i64::from(i))
    }
}

/// Numeric-looking names become indexes, mirroring how request parameters
/// like `ids[0]` and `ids[1]` are keyed.
impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match s.parse::<i64>() {
            Ok(i) if i.to_string() == s => Key::Index(i),
            _ => Key::Name(s.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::from(s.as_str())
    }
}

/// A scalar or a (possibly nested) ordered collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Map(OrderedMap),
}

impl Value {
    /// Build a list (keys `0..n`) from any iterable of values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Map(items.into_iter().enumerate().map(|(i, v)| (Key::from(i), v.into())).collect())
    }

    /// Build a map from `(key, value)` pairs.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_scalar(&self) -> bool {
        !self.is_collection()
    }

    /// True for collections whose keys are exactly `0..n` in insertion order.
    pub fn is_list(&self) -> bool {
        match self {
            Value::Map(map) => is_list(map),
            _ => false,
        }
    }

    pub fn as_map(&self) -> Option<&OrderedMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Look up an entry of a collection; scalars have no entries.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Short name of the variant, used in error messages and traces.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Map(_) => "collection",
        }
    }
}

pub(crate) fn is_list(map: &OrderedMap) -> bool {
    map.keys().enumerate().all(|(i, k)| *k == Key::Index(i as i64))
}

/// Re-key a list after entries were dropped so it stays `0..n`.
pub(crate) fn reindex(map: OrderedMap) -> OrderedMap {
    map.into_values().enumerate().map(|(i, v)| (Key::from(i), v)).collect()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Map(map) => {
                let list = is_list(map);
                f.write_str(if list { "[" } else { "{" })?;
                for (idx, (k, v)) in map.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    if list {
                        write!(f, "{v}")?;
                    } else {
                        write!(f, "{k}: {v}")?;
                    }
                }
                f.write_str(if list { "]" } else { "}" })
            }
        }
    }
}

// --- Conversions -------------------------------------------------------------

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

macro_rules! value_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(i: $t) -> Self {
                Value::Int(i64::from(i))
            }
        })*
    };
}

value_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<OrderedMap> for Value {
    fn from(map: OrderedMap) -> Self {
        Value::Map(map)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::list(items)
    }
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::map(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_detection_follows_keys() {
        assert!(Value::list(["a", "b"]).is_list());
        assert!(Value::map([("0", "a"), ("1", "b")]).is_list());
        assert!(!Value::map([("1", "a"), ("0", "b")]).is_list());
        assert!(!Value::map([("name", "a")]).is_list());
        assert!(!Value::from("a").is_list());
    }

    #[test]
    fn reindex_restores_list_keys() {
        let mut map = Value::list([1, 2, 3]).as_map().cloned().unwrap();
        map.shift_remove(&Key::Index(1));
        assert!(!is_list(&map));
        assert!(is_list(&reindex(map)));
    }

    #[test]
    fn numeric_names_become_indexes() {
        assert_eq!(Key::from("3"), Key::Index(3));
        assert_eq!(Key::from("03"), Key::Name("03".into()));
        assert_eq!(Key::from("x"), Key::Name("x".into()));
    }

    #[test]
    fn display_is_compact() {
        let v = Value::map([("a", Value::list([1, 2])), ("b", Value::from("x"))]);
        assert_eq!(v.to_string(), "{a: [1, 2], b: \"x\"}");
    }
}
