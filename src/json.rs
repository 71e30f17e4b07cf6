//! Conversion between [`serde_json::Value`] and [`Value`].
//!
//! Arrays become lists, objects become maps (numeric-looking object keys turn
//! into indexes, see `Key::from`). Integral numbers that fit `i64` become
//! `Int`, everything else `Float`. Non-finite floats have no JSON form and
//! map back to `null`.

use serde_json::{Map as JsonMap, Number, Value as Json};

use crate::{Key, OrderedMap, Value};

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::list(items),
            Json::Object(fields) => Value::Map(fields.into_iter().map(|(k, v)| (Key::from(k), Value::from(v))).collect()),
        }
    }
}

impl From<&Value> for Json {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Int(i) => Json::from(*i),
            Value::Float(f) => Number::from_f64(*f).map_or(Json::Null, Json::Number),
            Value::Str(s) => Json::String(s.clone()),
            Value::Map(map) if value.is_list() => Json::Array(map.values().map(Json::from).collect()),
            Value::Map(map) => Json::Object(to_object(map)),
        }
    }
}

impl From<Value> for Json {
    fn from(value: Value) -> Self {
        Json::from(&value)
    }
}

fn to_object(map: &OrderedMap) -> JsonMap<String, Json> {
    map.iter().map(|(k, v)| (k.to_string(), Json::from(v))).collect()
}
