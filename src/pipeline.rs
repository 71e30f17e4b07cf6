//! Chainable coercion steps on [`Variable`].
//!
//! Every step has the same structure:
//!
//! ```text
//! take data ──┬─ Null        ──▶ Null (the default applies at resolution)
//!             ├─ scalar      ──▶ scalar coercer
//!             └─ collection  ──▶ collection coercer (honours `recursive`)
//! ──▶ write data back ──▶ record step ──▶ return self
//! ```
//!
//! Steps take the container by value and return it, so a chain reads
//! `Variable::new(raw).trim().crop(25).to_integer(false)`. Steps that can
//! reject their configuration return `Result<Self>` and chain with `?`.
//!
//! Per-entry defaults come from the container default (see
//! `Variable::entry_default`); a bad entry resolves to that default without
//! affecting its siblings.

use std::time::Instant;

use crate::collection::{self, Uniqueness};
use crate::error::{Error, Result};
use crate::scalar::{self, RoundingMode};
use crate::text::{self, ReduceFlags};
use crate::{OrderedMap, ShapeHint, Value, Variable};

impl Variable {
    /// Apply `f` to the scalar payload or to every entry of the collection.
    pub(crate) fn apply<F>(mut self, operation: &'static str, mut f: F) -> Self
    where
        F: FnMut(&Value) -> Value,
    {
        let started = Instant::now();
        let data = match std::mem::take(&mut self.data) {
            Value::Null => Value::Null,
            Value::Map(map) => {
                let map = self.entries(map);
                Value::Map(collection::map_entries(&map, self.options.recursive, &mut f))
            }
            scalar => f(&scalar),
        };
        self.data = data;
        self.record(operation, started);
        self
    }

    /// Like [`Variable::apply`], with a dedicated collection coercer.
    fn dispatch<S, C>(mut self, operation: &'static str, on_scalar: S, on_collection: C) -> Self
    where
        S: FnOnce(&Value) -> Value,
        C: FnOnce(&OrderedMap, bool) -> OrderedMap,
    {
        let started = Instant::now();
        let data = match std::mem::take(&mut self.data) {
            Value::Null => Value::Null,
            Value::Map(map) => {
                let map = self.entries(map);
                Value::Map(on_collection(&map, self.options.recursive))
            }
            scalar => on_scalar(&scalar),
        };
        self.data = data;
        self.record(operation, started);
        self
    }

    /// Without recursion a nested collection is one opaque entry: it takes
    /// the entry default before the step runs, like any invalid scalar.
    fn entries(&self, map: OrderedMap) -> OrderedMap {
        if self.options.recursive { map } else { collection::replace_nested(map, self.entry_default()) }
    }

    /// Rewrite string payloads; numbers and booleans pass through.
    fn apply_text<F>(self, operation: &'static str, f: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        self.apply(operation, |v| match v {
            Value::Str(s) => Value::Str(f(s)),
            other => other.clone(),
        })
    }

    fn require_scalar(&self, operation: &'static str) -> Result<()> {
        if self.shape == ShapeHint::Array {
            tracing::debug!(operation, "scalar-only operation on array container");
            return Err(Error::ScalarOnly { operation });
        }
        Ok(())
    }

    fn require_non_negative_default(&self, operation: &'static str) -> Result<()> {
        let default = self.entry_default();
        let negative = match default {
            Value::Int(i) => *i < 0,
            Value::Float(f) => *f < 0.0,
            _ => self.float_default() < 0.0,
        };
        if negative {
            tracing::debug!(operation, %default, "negative default rejected");
            return Err(Error::NegativeDefault { operation, default: default.to_string() });
        }
        Ok(())
    }

    // --- Text -----------------------------------------------------------------

    /// Trim the configured charset and control bytes from string payloads.
    pub fn trim(self) -> Self {
        let charset = self.options.trim_charset.clone();
        self.apply_text("trim", move |s| text::trim(s, &charset))
    }

    pub fn trim_with(self, charset: &str) -> Self {
        self.apply_text("trim", |s| text::trim(s, charset))
    }

    /// Trim and keep the first `length` characters.
    pub fn crop(self, length: usize) -> Self {
        self.apply_text("crop", |s| text::crop(s, length))
    }

    /// Shorten to `length` characters; see [`text::reduce`].
    pub fn reduce(self, length: usize, ending: &str, flags: ReduceFlags) -> Self {
        self.apply_text("reduce", |s| text::reduce(s, length, ending, flags))
    }

    pub fn upper(self) -> Self {
        self.apply_text("upper", text::upper)
    }

    pub fn lower(self) -> Self {
        self.apply_text("lower", text::lower)
    }

    pub fn html_encode(self) -> Self {
        self.apply_text("html_encode", text::html_encode)
    }

    pub fn html_decode(self) -> Self {
        self.apply_text("html_decode", text::html_decode)
    }

    /// Convert every scalar to text; `Null` entries take the default.
    pub fn to_text(self) -> Self {
        let default = self.string_default();
        self.apply("to_text", |v| Value::Str(scalar::to_string(v, &default)))
    }

    // --- Numbers ----------------------------------------------------------------

    pub fn to_integer(self, strict: bool) -> Self {
        let default = self.int_default();
        self.apply("to_integer", |v| Value::Int(scalar::to_integer(v, default, strict)))
    }

    /// Integers where negative results collapse to the default.
    pub fn to_non_negative_integer(self, strict: bool) -> Result<Self> {
        self.require_non_negative_default("to_non_negative_integer")?;
        let default = self.int_default();
        Ok(self.apply("to_non_negative_integer", |v| {
            // default was checked above, so this cannot fail
            Value::Int(scalar::to_non_negative_integer(v, default, strict).unwrap_or(default))
        }))
    }

    pub fn to_float(self, decimals: u32, mode: RoundingMode) -> Self {
        let default = self.float_default();
        let separator = self.context.decimal_separator;
        self.apply("to_float", |v| Value::Float(scalar::to_float(v, decimals, mode, default, separator)))
    }

    /// Floats where negative results collapse to the default.
    pub fn to_non_negative_float(self, decimals: u32, mode: RoundingMode) -> Result<Self> {
        self.require_non_negative_default("to_non_negative_float")?;
        let default = self.float_default();
        let separator = self.context.decimal_separator;
        Ok(self.apply("to_non_negative_float", |v| {
            let x = scalar::to_float(v, decimals, mode, default, separator);
            Value::Float(if x < 0.0 { default } else { x })
        }))
    }

    pub fn to_bool(self, strict: bool) -> Self {
        let default = self.bool_default();
        self.apply("to_bool", |v| Value::Bool(scalar::to_bool(v, default, strict)))
    }

    /// Integers below `min` are replaced by the default.
    pub fn clamp_min(self, min: i64) -> Self {
        let default = self.int_default();
        self.dispatch(
            "clamp_min",
            |v| Value::Int(scalar::at_least(v, min, default)),
            |map, recursive| collection::clamp_min(map, min, default, recursive),
        )
    }

    /// Integers above `max` are replaced by the default.
    pub fn clamp_max(self, max: i64) -> Self {
        let default = self.int_default();
        self.dispatch(
            "clamp_max",
            |v| Value::Int(scalar::at_most(v, max, default)),
            |map, recursive| collection::clamp_max(map, max, default, recursive),
        )
    }

    /// Integers below `min` are raised to `min`. Scalar containers only.
    pub fn limit_min(self, min: i64) -> Result<Self> {
        self.require_scalar("limit_min")?;
        let default = self.int_default();
        Ok(self.apply("limit_min", |v| Value::Int(scalar::to_integer(v, default, false).max(min))))
    }

    /// Integers above `max` are lowered to `max`. Scalar containers only.
    pub fn limit_max(self, max: i64) -> Result<Self> {
        self.require_scalar("limit_max")?;
        let default = self.int_default();
        Ok(self.apply("limit_max", |v| Value::Int(scalar::to_integer(v, default, false).min(max))))
    }

    /// Keep `0`/`1`; values below fall back to `below`, values above to `above`.
    pub fn toggle(self, below: i64, above: i64) -> Self {
        let default = self.int_default();
        self.apply("toggle", |v| {
            let n = scalar::to_integer(v, default, false);
            Value::Int(if n < 0 {
                below
            } else if n > 1 {
                above
            } else {
                n
            })
        })
    }

    /// Render numbers as text with fixed decimals and the given separators.
    pub fn format_number(self, decimals: u32, decimal_sep: &str, thousands_sep: &str) -> Self {
        let default = self.float_default();
        let separator = self.context.decimal_separator;
        self.apply("format_number", |v| {
            let x = scalar::to_float(v, decimals, RoundingMode::Auto, default, separator);
            Value::Str(scalar::format_number(x, decimals, decimal_sep, thousands_sep))
        })
    }

    // --- Lists ------------------------------------------------------------------

    /// Validate delimited id lists; collection entries left empty are dropped.
    pub fn validate_id_list(self, delimiter: &str, uniqueness: Uniqueness) -> Self {
        self.dispatch(
            "validate_id_list",
            |v| Value::Str(collection::validate_id_list(&scalar::to_string(v, ""), delimiter)),
            |map, recursive| collection::validate_id_lists(map, delimiter, uniqueness, recursive),
        )
    }

    /// Validate comma-separated tag lists, unique across the whole payload.
    pub fn validate_tag_list(self) -> Self {
        self.dispatch(
            "validate_tag_list",
            |v| Value::Str(collection::validate_tag_list(&scalar::to_string(v, ""))),
            collection::validate_tag_lists,
        )
    }

    /// One positive id per entry, unique; anything else is dropped.
    pub fn keep_ids(self) -> Self {
        self.dispatch(
            "keep_ids",
            |v| match scalar::to_integer(v, 0, false) {
                n if n > 0 => Value::Int(n),
                _ => Value::Null,
            },
            collection::id_entries,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, DecimalSeparator};

    #[test]
    fn chains_rewrite_in_place() {
        let v = Variable::new("  42abc ").trim().crop(2).to_integer(true);
        assert_eq!(v.resolve(), Ok(Value::Int(42)));
    }

    #[test]
    fn collection_entries_fall_back_individually() {
        let v = Variable::with_default(Value::list(["3", "x", "-1"]), 9).to_integer(false);
        assert_eq!(v.resolve(), Ok(Value::list([3, 9, -1])));
    }

    #[test]
    fn float_uses_context_separator() {
        let ctx = Context { decimal_separator: DecimalSeparator::Comma };
        let v = Variable::new("12,5").with_context(ctx).to_float(2, RoundingMode::Auto).format_number(2, ".", "");
        assert_eq!(v.resolve(), Ok(Value::from("12.50")));
    }

    #[test]
    fn non_negative_steps_reject_negative_defaults() {
        let err = Variable::with_default("5", -1).to_non_negative_integer(false).unwrap_err();
        assert!(matches!(err, Error::NegativeDefault { .. }));

        let v = Variable::with_default("-5", 2).to_non_negative_integer(false).unwrap();
        assert_eq!(v.resolve(), Ok(Value::Int(2)));
    }

    #[test]
    fn limits_clamp_to_bound_on_scalars_only() {
        let v = Variable::new("-4").limit_min(0).unwrap();
        assert_eq!(v.resolve(), Ok(Value::Int(0)));

        let err = Variable::new(Value::list([1])).limit_min(0).unwrap_err();
        assert_eq!(err, Error::ScalarOnly { operation: "limit_min" });
    }

    #[test]
    fn clamp_substitutes_default() {
        let v = Variable::with_default("-4", 1).clamp_min(1);
        assert_eq!(v.resolve(), Ok(Value::Int(1)));
        let v = Variable::with_default("40", 10).clamp_max(20);
        assert_eq!(v.resolve(), Ok(Value::Int(10)));
    }

    #[test]
    fn toggle_bounds_fall_back_independently() {
        let out: Vec<Value> = ["-3", "0", "1", "7"]
            .into_iter()
            .map(|raw| Variable::new(raw).toggle(0, 1).resolve().unwrap())
            .collect();
        assert_eq!(out, vec![Value::Int(0), Value::Int(0), Value::Int(1), Value::Int(1)]);
    }

    #[test]
    fn text_steps_leave_numbers_alone() {
        let v = Variable::new(Value::list([Value::from(" <b> "), Value::Int(3)])).trim().html_encode();
        assert_eq!(v.resolve(), Ok(Value::list([Value::from("&lt;b&gt;"), Value::Int(3)])));
    }

    #[test]
    fn non_recursive_collections_collapse_nested_entries() {
        let raw = Value::map([("a", Value::from("2")), ("b", Value::list(["3"]))]);
        let v = Variable::with_default(raw, 0).recursive(false).to_integer(false);
        assert_eq!(v.resolve(), Ok(Value::map([("a", 2), ("b", 0)])));
    }

    #[test]
    fn non_recursive_steps_run_nested_entries_on_the_default() {
        let steps: [(&str, fn(Variable) -> Variable); 16] = [
            ("trim", Variable::trim),
            ("crop", |v| v.crop(1)),
            ("reduce", |v| v.reduce(2, "", ReduceFlags::empty())),
            ("upper", Variable::upper),
            ("lower", Variable::lower),
            ("html_encode", Variable::html_encode),
            ("html_decode", Variable::html_decode),
            ("to_text", Variable::to_text),
            ("to_integer", |v| v.to_integer(false)),
            ("to_float", |v| v.to_float(2, RoundingMode::Auto)),
            ("to_bool", |v| v.to_bool(false)),
            ("clamp_min", |v| v.clamp_min(10)),
            ("toggle", |v| v.toggle(0, 1)),
            ("format_number", |v| v.format_number(1, ".", "")),
            ("validate_tag_list", Variable::validate_tag_list),
            ("validate_id_list", |v| v.validate_id_list(",", Uniqueness::Row)),
        ];
        let raw = Value::map([("a", Value::from(" x ")), ("b", Value::list([" y "]))]);

        for (name, step) in steps {
            let nested = step(Variable::with_default(raw.clone(), " 7 ").recursive(false)).resolve().unwrap();
            let scalar = step(Variable::with_default(" 7 ", " 7 ")).resolve().unwrap();
            assert_eq!(nested.get(&"b".into()), Some(&scalar), "{name}");
        }

        let kept = Variable::with_default(raw, 7).recursive(false).keep_ids().resolve().unwrap();
        assert_eq!(kept, Value::map([("b", 7)]));
    }

    #[test]
    fn traced_chains_record_steps() {
        let v = Variable::new(" 7 ").traced().trim().to_integer(false);
        let trace = v.trace().unwrap();
        assert_eq!(trace.operations(), vec!["trim", "to_integer"]);
        assert_eq!(trace.steps[1].snapshot, Value::Int(7));
    }
}
