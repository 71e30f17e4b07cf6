//! Single-value coercers.
//!
//! Every coercer here is total: malformed input never panics or errors, it
//! falls back to the caller-supplied default. The only `Err` these functions
//! return is for a misconfigured *default* (the non-negative variants).
//!
//! ```text
//! Value ──┬─ Int / Float / Bool ──▶ cast
//!         ├─ Str ────────────────▶ trim ─▶ token table (lenient) ─▶ parse
//!         └─ Null / Map ─────────▶ default
//! ```

#[path = "scalar/number.rs"]
mod number;

pub use number::{DecimalSeparator, RoundingMode, format_number, parse_decimal, round_to};

use crate::Value;
use crate::error::{Error, Result};

/// Lenient spellings of `0`/`false`.
const FALSE_TOKENS: [&str; 4] = ["0", "false", "off", "no"];
/// Lenient spellings of `1`/`true`.
const TRUE_TOKENS: [&str; 4] = ["1", "true", "on", "yes"];

/// Coerce to an integer.
///
/// Strings are trimmed and must be integer text (`[+-]digits`). With
/// `strict = false` the tokens `0/false/off/no` and `1/true/on/yes`
/// (case-insensitive) are recognized first, and decimal text is truncated
/// toward zero (`"12.7"` → 12). Out-of-range or unparseable input returns
/// `default`.
pub fn to_integer(value: &Value, default: i64, strict: bool) -> i64 {
    let parsed = match value {
        Value::Int(i) => Some(*i),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::Float(f) => in_i64_range(*f),
        Value::Str(s) => parse_integer(s, strict),
        Value::Null | Value::Map(_) => None,
    };

    parsed.unwrap_or_else(|| {
        tracing::trace!(kind = value.kind(), default, "integer coercion fell back to default");
        default
    })
}

pub(crate) fn parse_integer(text: &str, strict: bool) -> Option<i64> {
    let text = text.trim();
    if regex!(r"^[+-]?\d+$").is_match(text) {
        return text.parse::<i64>().ok();
    }
    if strict {
        return None;
    }

    let lower = text.to_lowercase();
    if FALSE_TOKENS.contains(&lower.as_str()) {
        return Some(0);
    }
    if TRUE_TOKENS.contains(&lower.as_str()) {
        return Some(1);
    }

    parse_decimal(text, DecimalSeparator::Dot).and_then(in_i64_range)
}

/// Truncate toward zero; out-of-range and non-finite values have no integer form.
fn in_i64_range(f: f64) -> Option<i64> {
    (f.is_finite() && f.abs() < i64::MAX as f64).then(|| f.trunc() as i64)
}

/// [`to_integer`], with negative results collapsing to `default`.
///
/// A negative `default` is a configuration error.
pub fn to_non_negative_integer(value: &Value, default: i64, strict: bool) -> Result<i64> {
    if default < 0 {
        return Err(Error::NegativeDefault { operation: "to_non_negative_integer", default: default.to_string() });
    }
    let n = to_integer(value, default, strict);
    Ok(if n < 0 { default } else { n })
}

/// Coerce to an integer and keep it only if it is `>= min`; otherwise `default`.
pub fn at_least(value: &Value, min: i64, default: i64) -> i64 {
    let n = to_integer(value, default, false);
    if n < min { default } else { n }
}

/// Coerce to an integer and keep it only if it is `<= max`; otherwise `default`.
pub fn at_most(value: &Value, max: i64, default: i64) -> i64 {
    let n = to_integer(value, default, false);
    if n > max { default } else { n }
}

/// Coerce to a float rounded to `decimals` digits.
///
/// Strings go through [`parse_decimal`] with the active `separator`. `Null`,
/// booleans and collections return `default` unscaled.
pub fn to_float(value: &Value, decimals: u32, mode: RoundingMode, default: f64, separator: DecimalSeparator) -> f64 {
    match to_f64(value, separator) {
        Some(v) => round_to(v, decimals, mode),
        None => {
            tracing::trace!(kind = value.kind(), default, "float coercion fell back to default");
            default
        }
    }
}

/// Read a number without rounding; `None` for anything non-numeric.
pub fn to_f64(value: &Value, separator: DecimalSeparator) -> Option<f64> {
    match value {
        Value::Int(i) => Some(*i as f64),
        Value::Float(f) if f.is_finite() => Some(*f),
        Value::Str(s) => parse_decimal(s, separator),
        _ => None,
    }
}

/// [`to_float`], with negative results collapsing to `default`.
pub fn to_non_negative_float(
    value: &Value,
    decimals: u32,
    mode: RoundingMode,
    default: f64,
    separator: DecimalSeparator,
) -> Result<f64> {
    if default < 0.0 {
        return Err(Error::NegativeDefault { operation: "to_non_negative_float", default: default.to_string() });
    }
    let v = to_float(value, decimals, mode, default, separator);
    Ok(if v < 0.0 { default } else { v })
}

/// Coerce to a boolean.
///
/// Numbers are `!= 0`. Strings are trimmed, stripped of markup tags and
/// lower-cased; `"true"`/`"false"` always match, and with `strict = false`
/// the tokens `0/off/no` and `1/on/yes` match as well. Everything else,
/// including `Null` and collections, returns `default`.
pub fn to_bool(value: &Value, default: bool, strict: bool) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Int(i) => *i != 0,
        Value::Float(f) => *f != 0.0,
        Value::Str(s) => {
            let text = regex!(r"<[^>]*>").replace_all(s.trim(), "").trim().to_lowercase();
            match text.as_str() {
                "true" => true,
                "false" => false,
                t if !strict && TRUE_TOKENS.contains(&t) => true,
                t if !strict && FALSE_TOKENS.contains(&t) => false,
                _ => default,
            }
        }
        Value::Null | Value::Map(_) => default,
    }
}

/// Coerce to text.
///
/// `Null` and collections return `default`; booleans become `"true"`/`"false"`;
/// numbers use their canonical decimal form (`12.0` → `"12"`).
pub fn to_string(value: &Value, default: &str) -> String {
    match value {
        Value::Str(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(f) if f.is_finite() => f.to_string(),
        Value::Float(_) | Value::Null | Value::Map(_) => default.to_string(),
    }
}
