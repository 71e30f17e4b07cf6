//! The value container (`Variable`) and its terminal resolution.
//!
//! A `Variable` owns one raw value, one default, and a shape hint. Pipeline
//! methods (see `pipeline.rs`) consume the container, rewrite `data`, and
//! hand it back; `resolve*` reads the final value without mutating.
//!
//! ```text
//! raw ──▶ Variable::new ──▶ .trim() ──▶ .to_integer(..) ──▶ … ──▶ .resolve()
//!                 │                                               │
//!                 └─ shape: Scalar | Array (fixed once declared)  └─ empty-string
//!                                                                    substitution,
//!                                                                    default fallback
//! ```
//!
//! ## Shape
//!
//! The shape starts out inferred from the raw value (collection → `Array`,
//! anything else → `Scalar`) and becomes fixed on the first declaring call:
//! `as_array`, `as_scalar`, or an array-only recipe. A conflicting
//! declaration afterwards is a configuration error.

use std::fmt;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::trace::{Step, Trace};
use crate::{Context, Key, Options, OrderedMap, Value};

/// Which output shape the caller intends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShapeHint {
    #[default]
    Scalar,
    Array,
}

impl fmt::Display for ShapeHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShapeHint::Scalar => "scalar",
            ShapeHint::Array => "array",
        })
    }
}

/// Owned, single-caller container for one loosely-typed value.
#[derive(Debug, Clone)]
pub struct Variable {
    pub(crate) data: Value,
    pub(crate) default: Value,
    pub(crate) shape: ShapeHint,
    /// Set once a call declared the shape explicitly.
    pub(crate) shape_fixed: bool,
    pub(crate) options: Options,
    pub(crate) context: Context,
    pub(crate) trace: Option<Trace>,
}

impl Variable {
    /// Create a container around `raw` with a `Null` default.
    pub fn new(raw: impl Into<Value>) -> Self {
        Self::with_default(raw, Value::Null)
    }

    /// Create a container around `raw` with the given default.
    pub fn with_default(raw: impl Into<Value>, default: impl Into<Value>) -> Self {
        let data = raw.into();
        let shape = if data.is_collection() { ShapeHint::Array } else { ShapeHint::Scalar };
        Self {
            data,
            default: default.into(),
            shape,
            shape_fixed: false,
            options: Options::default(),
            context: Context::default(),
            trace: None,
        }
    }

    /// Create an array-shaped container (shape fixed).
    pub fn array(raw: impl Into<Value>, default: impl Into<Value>) -> Result<Self> {
        Self::with_default(raw, default).as_array()
    }

    /// Create a scalar-shaped container (shape fixed).
    pub fn scalar(raw: impl Into<Value>, default: impl Into<Value>) -> Result<Self> {
        Self::with_default(raw, default).as_scalar()
    }

    // --- Configuration --------------------------------------------------------

    /// Replace the default.
    pub fn default_to(mut self, default: impl Into<Value>) -> Self {
        self.default = default.into();
        self
    }

    /// Descend into nested collections (default `true`).
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.options.recursive = recursive;
        self
    }

    /// Replace zero-length string results with `substitute` at resolution.
    pub fn empty_as(mut self, substitute: impl Into<String>) -> Self {
        self.options.empty_substitute = substitute.into();
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Record every pipeline step; see [`Variable::trace`].
    pub fn traced(mut self) -> Self {
        self.trace = Some(Trace::default());
        self
    }

    // --- Shape ----------------------------------------------------------------

    /// Declare array shape. A non-empty scalar becomes a one-element list;
    /// `Null` and `""` become "no entries".
    pub fn as_array(self) -> Result<Self> {
        self.declare(ShapeHint::Array)
    }

    /// Declare scalar shape.
    pub fn as_scalar(self) -> Result<Self> {
        self.declare(ShapeHint::Scalar)
    }

    fn declare(mut self, requested: ShapeHint) -> Result<Self> {
        if self.shape != requested {
            if self.shape_fixed || self.data.is_collection() {
                tracing::debug!(declared = %self.shape, %requested, "shape declaration rejected");
                return Err(Error::ShapeLocked { declared: self.shape, requested });
            }
            self.data = match std::mem::take(&mut self.data) {
                Value::Null => Value::Null,
                Value::Str(s) if s.is_empty() => Value::Null,
                scalar => Value::list([scalar]),
            };
            self.shape = requested;
        }
        self.shape_fixed = true;
        Ok(self)
    }

    pub fn shape(&self) -> ShapeHint {
        self.shape
    }

    /// Current (unresolved) payload.
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Steps recorded since [`Variable::traced`] was called.
    pub fn trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    pub(crate) fn record(&mut self, operation: &'static str, started: Instant) {
        tracing::debug!(operation, shape = %self.shape, "pipeline step");
        if let Some(trace) = self.trace.as_mut() {
            trace.push(Step { operation, shape: self.shape, duration: started.elapsed(), snapshot: self.data.clone() });
        }
    }

    // --- Resolution -----------------------------------------------------------

    /// Resolve the whole value.
    ///
    /// Zero-length strings are replaced by the empty substitute. A `Null`
    /// payload resolves to the default: as-is for scalar containers, and for
    /// array containers wrapped as a one-element list when the default is a
    /// scalar (`Null` default → empty list).
    pub fn resolve(&self) -> Result<Value> {
        self.check_default()?;
        let data = substitute_empty(self.data.clone(), &self.options.empty_substitute);
        if !data.is_null() {
            return Ok(data);
        }

        let default = self.substituted_default();
        Ok(match self.shape {
            ShapeHint::Scalar => default,
            ShapeHint::Array => match default {
                Value::Null => Value::Map(OrderedMap::new()),
                Value::Map(map) => Value::Map(map),
                scalar => Value::list([scalar]),
            },
        })
    }

    /// Resolve one entry of an array container, or its default when absent.
    pub fn resolve_key(&self, key: impl Into<Key>) -> Result<Value> {
        if self.shape == ShapeHint::Scalar {
            return Err(Error::KeyOnScalar);
        }
        let key = key.into();
        let data = self.resolve()?;
        Ok(data.get(&key).cloned().unwrap_or_else(|| self.default_for(&key)))
    }

    /// Resolve several keys into a map; absent keys get their default.
    pub fn resolve_keys<I, K>(&self, keys: I) -> Result<OrderedMap>
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        let data = self.resolve()?;
        Ok(keys
            .into_iter()
            .map(|k| {
                let key = k.into();
                let value = data.get(&key).cloned().unwrap_or_else(|| self.default_for(&key));
                (key, value)
            })
            .collect())
    }

    /// Consume the container and resolve it.
    pub fn into_value(self) -> Result<Value> {
        self.resolve()
    }

    fn check_default(&self) -> Result<()> {
        if self.shape == ShapeHint::Scalar && self.default.is_collection() {
            tracing::debug!("collection default on scalar container");
            return Err(Error::DefaultShape { shape: self.shape });
        }
        Ok(())
    }

    fn substituted_default(&self) -> Value {
        substitute_empty(self.default.clone(), &self.options.empty_substitute)
    }

    fn default_for(&self, key: &Key) -> Value {
        match self.substituted_default() {
            Value::Map(map) => map.get(key).cloned().unwrap_or(Value::Null),
            scalar => scalar,
        }
    }

    // --- Per-entry defaults used by the pipeline ---------------------------------

    /// The default that applies to one scalar entry. A collection default
    /// describes whole-array fallback, not entries, so entries see `Null`.
    pub(crate) fn entry_default(&self) -> &Value {
        match &self.default {
            Value::Map(_) => &Value::Null,
            other => other,
        }
    }

    pub(crate) fn int_default(&self) -> i64 {
        crate::scalar::to_integer(self.entry_default(), 0, false)
    }

    pub(crate) fn float_default(&self) -> f64 {
        crate::scalar::to_f64(self.entry_default(), self.context.decimal_separator).unwrap_or(0.0)
    }

    pub(crate) fn bool_default(&self) -> bool {
        crate::scalar::to_bool(self.entry_default(), false, false)
    }

    pub(crate) fn string_default(&self) -> String {
        crate::scalar::to_string(self.entry_default(), "")
    }
}

/// Replace every zero-length string (at any depth) with `substitute`.
fn substitute_empty(value: Value, substitute: &str) -> Value {
    if substitute.is_empty() {
        return value;
    }
    match value {
        Value::Str(s) if s.is_empty() => Value::Str(substitute.to_string()),
        Value::Map(map) => Value::Map(map.into_iter().map(|(k, v)| (k, substitute_empty(v, substitute))).collect()),
        other => other,
    }
}
