use crate::error::Result;
use crate::recipe::IntoRecipe;
use crate::{DecimalSeparator, OrderedMap, Value, Variable};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Locale variables probed by [`Context::from_env`], most specific first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_NUMERIC", "LANG"];

/// Coercion context.
///
/// This holds environment the coercers need but the caller does not pass on
/// every call (the active decimal separator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Context {
    /// Separator accepted as the decimal point when parsing floats.
    pub decimal_separator: DecimalSeparator,
}

impl Context {
    /// Context for a locale name such as `"de_DE.UTF-8"` or `"en_US"`.
    pub fn for_locale(locale: &str) -> Self {
        Self { decimal_separator: DecimalSeparator::for_locale(locale) }
    }

    /// Probe `LC_ALL`, `LC_NUMERIC` and `LANG`; the first non-empty one wins.
    pub fn from_env() -> Self {
        LOCALE_VARS
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .map(|locale| Self::for_locale(&locale))
            .unwrap_or_default()
    }
}

/// Options that affect how a container coerces and resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Descend into nested collections.
    pub recursive: bool,
    /// Replaces zero-length string results at resolution (`""` disables).
    pub empty_substitute: String,
    /// Characters stripped by `trim`, in addition to control bytes.
    pub trim_charset: String,
}

impl Default for Options {
    fn default() -> Self {
        Self { recursive: true, empty_substitute: String::new(), trim_charset: crate::text::DEFAULT_TRIM.to_string() }
    }
}

/// A key → value source of raw request parameters.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use tamed::{Params, Value};
///
/// let mut query = HashMap::new();
/// query.insert("page".to_string(), Value::from("3"));
///
/// assert_eq!(query.input("page", 1).get_integer("page"), Ok(3));
/// assert_eq!(query.input("missing", 1).get_integer("page"), Ok(1));
/// ```
pub trait Params {
    fn lookup(&self, key: &str) -> Option<&Value>;

    /// Container around the value under `key` (`Null` when absent).
    fn input(&self, key: &str, default: impl Into<Value>) -> Variable {
        let raw = self.lookup(key).cloned().unwrap_or(Value::Null);
        Variable::with_default(raw, default)
    }
}

impl Params for OrderedMap {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(&crate::Key::from(key))
    }
}

impl Params for HashMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

impl Params for IndexMap<String, Value> {
    fn lookup(&self, key: &str) -> Option<&Value> {
        self.get(key)
    }
}

/// Run `recipe` on `raw` with a `Null` default and resolve.
///
/// # Example
/// ```
/// use tamed::{Value, coerce};
///
/// assert_eq!(coerce(" 12 ", "int"), Ok(Value::Int(12)));
/// assert_eq!(coerce("1,299.5", "cost"), Ok(Value::from("1299.50")));
/// ```
pub fn coerce(raw: impl Into<Value>, recipe: impl IntoRecipe) -> Result<Value> {
    coerce_with(raw, Value::Null, recipe, &Context::default(), &Options::default())
}

/// Run `recipe` on `raw` with the provided default, `context` and `options`.
pub fn coerce_with(
    raw: impl Into<Value>,
    default: impl Into<Value>,
    recipe: impl IntoRecipe,
    context: &Context,
    options: &Options,
) -> Result<Value> {
    Variable::with_default(raw, default)
        .with_context(*context)
        .with_options(options.clone())
        .apply_recipe(recipe)?
        .into_value()
}
