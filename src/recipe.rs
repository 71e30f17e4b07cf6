//! Named recipes: fixed compositions of pipeline steps.
//!
//! A recipe carries no state; it expands to the same step sequence every
//! time, parameterised only by the container's shape and default.
//!
//! | name | steps |
//! |---|---|
//! | `int` | trim → integer |
//! | `uint` | trim → non-negative integer |
//! | `float` / `ufloat` | trim → (non-negative) float, 6 decimals |
//! | `bool` | boolean (lenient) |
//! | `string` / `text` | trim → text (→ entity-encode) |
//! | `upper` / `lower` | trim → case fold |
//! | `id` | trim → integer → `>= 1` else default (scalar only) |
//! | `ids` | delimited id list, or positive-or-empty for numbers (scalar only) |
//! | `id_list` | one positive unique id per entry (array only) |
//! | `tags` | comma tag list, unique across the payload |
//! | `price[_up\|_down]` | crop 25 → non-negative float, 0 decimals → `"123"` |
//! | `cost[_up\|_down]` | crop 25 → non-negative float, 2 decimals → `"123.45"` |
//! | `toggle` | integer in `[0, 1]`, default outside |
//! | `page` / `pagination` | integer `>= 1`, default 1 |
//! | `options` | delimited non-negative integers per entry, invalid → default (0) |

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::collection::Uniqueness;
use crate::error::{Error, Result};
use crate::scalar::{self, RoundingMode};
use crate::{OrderedMap, ShapeHint, Value, Variable};

/// Maximum input length considered by the price/cost recipes.
const PRICE_INPUT_LENGTH: usize = 25;
/// Precision of the generic `float` recipes.
const FLOAT_DECIMALS: u32 = 6;
/// Delimiter of `ids` and `options` lists.
const LIST_DELIMITER: &str = ",";

/// A named coercion recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recipe {
    Int,
    Uint,
    Float,
    Ufloat,
    Bool,
    String,
    Text,
    Upper,
    Lower,
    Id,
    Ids,
    IdList,
    Tags,
    /// Whole-unit price.
    Price(RoundingMode),
    /// Price with cents.
    Cost(RoundingMode),
    Toggle,
    Page,
    Options,
}

impl Recipe {
    pub fn name(self) -> &'static str {
        match self {
            Recipe::Int => "int",
            Recipe::Uint => "uint",
            Recipe::Float => "float",
            Recipe::Ufloat => "ufloat",
            Recipe::Bool => "bool",
            Recipe::String => "string",
            Recipe::Text => "text",
            Recipe::Upper => "upper",
            Recipe::Lower => "lower",
            Recipe::Id => "id",
            Recipe::Ids => "ids",
            Recipe::IdList => "id_list",
            Recipe::Tags => "tags",
            Recipe::Price(RoundingMode::Auto) => "price",
            Recipe::Price(RoundingMode::Upward) => "price_up",
            Recipe::Price(RoundingMode::Downward) => "price_down",
            Recipe::Cost(RoundingMode::Auto) => "cost",
            Recipe::Cost(RoundingMode::Upward) => "cost_up",
            Recipe::Cost(RoundingMode::Downward) => "cost_down",
            Recipe::Toggle => "toggle",
            Recipe::Page => "page",
            Recipe::Options => "options",
        }
    }

    /// Recipes that only make sense for a single value.
    pub fn scalar_only(self) -> bool {
        matches!(self, Recipe::Id | Recipe::Ids)
    }

    /// Recipes that declare the container array-shaped.
    pub fn array_only(self) -> bool {
        matches!(self, Recipe::IdList)
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Recipe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let recipe = match s.trim().to_ascii_lowercase().as_str() {
            "int" | "integer" => Recipe::Int,
            "uint" | "unsigned" => Recipe::Uint,
            "float" => Recipe::Float,
            "ufloat" => Recipe::Ufloat,
            "bool" | "boolean" => Recipe::Bool,
            "string" => Recipe::String,
            "text" => Recipe::Text,
            "upper" => Recipe::Upper,
            "lower" => Recipe::Lower,
            "id" => Recipe::Id,
            "ids" => Recipe::Ids,
            "id_list" => Recipe::IdList,
            "tags" => Recipe::Tags,
            "price" => Recipe::Price(RoundingMode::Auto),
            "price_up" => Recipe::Price(RoundingMode::Upward),
            "price_down" => Recipe::Price(RoundingMode::Downward),
            "cost" => Recipe::Cost(RoundingMode::Auto),
            "cost_up" => Recipe::Cost(RoundingMode::Upward),
            "cost_down" => Recipe::Cost(RoundingMode::Downward),
            "toggle" => Recipe::Toggle,
            "page" | "pagination" => Recipe::Page,
            "options" => Recipe::Options,
            _ => return Err(Error::UnknownRecipe { name: s.to_string() }),
        };
        Ok(recipe)
    }
}

/// Anything that names a recipe: a [`Recipe`] or its name.
pub trait IntoRecipe {
    fn into_recipe(self) -> Result<Recipe>;
}

impl IntoRecipe for Recipe {
    fn into_recipe(self) -> Result<Recipe> {
        Ok(self)
    }
}

impl IntoRecipe for &str {
    fn into_recipe(self) -> Result<Recipe> {
        self.parse()
    }
}

impl IntoRecipe for &String {
    fn into_recipe(self) -> Result<Recipe> {
        self.parse()
    }
}

impl Variable {
    /// Run a named recipe.
    pub fn apply_recipe(mut self, recipe: impl IntoRecipe) -> Result<Self> {
        let recipe = recipe.into_recipe()?;
        if recipe.array_only() {
            self = self.as_array()?;
        }
        if recipe.scalar_only() && self.shape == ShapeHint::Array {
            tracing::debug!(%recipe, "scalar-only recipe on array container");
            return Err(Error::ScalarOnly { operation: recipe.name() });
        }
        tracing::debug!(%recipe, shape = %self.shape, "applying recipe");

        match recipe {
            Recipe::Int => Ok(self.trim().to_integer(false)),
            Recipe::Uint => self.trim().to_non_negative_integer(false),
            Recipe::Float => Ok(self.trim().to_float(FLOAT_DECIMALS, RoundingMode::Auto)),
            Recipe::Ufloat => self.trim().to_non_negative_float(FLOAT_DECIMALS, RoundingMode::Auto),
            Recipe::Bool => Ok(self.to_bool(false)),
            Recipe::String => Ok(self.trim().to_text()),
            Recipe::Text => Ok(self.trim().to_text().html_encode()),
            Recipe::Upper => Ok(self.trim().upper()),
            Recipe::Lower => Ok(self.trim().lower()),
            Recipe::Id => Ok(self.trim().to_integer(false).clamp_min(1)),
            Recipe::Ids => Ok(self.ids()),
            Recipe::IdList => Ok(self.keep_ids()),
            Recipe::Tags => Ok(self.validate_tag_list()),
            Recipe::Price(mode) => self.price(0, mode),
            Recipe::Cost(mode) => self.price(2, mode),
            Recipe::Toggle => {
                let default = self.int_default();
                Ok(self.toggle(default, default))
            }
            Recipe::Page => self.page(),
            Recipe::Options => self.options_list(),
        }
    }

    /// Numbers short-circuit to "positive or empty"; text is an id list.
    fn ids(self) -> Self {
        match self.data {
            Value::Int(_) | Value::Float(_) => {
                let n = scalar::to_integer(&self.data, 0, false);
                let mut this = self;
                this.data = if n > 0 { Value::Int(n) } else { Value::Str(String::new()) };
                this
            }
            _ => self.validate_id_list(LIST_DELIMITER, Uniqueness::Row),
        }
    }

    fn price(self, decimals: u32, mode: RoundingMode) -> Result<Self> {
        Ok(self
            .crop(PRICE_INPUT_LENGTH)
            .to_non_negative_float(decimals, mode)?
            .format_number(decimals, ".", ""))
    }

    fn page(mut self) -> Result<Self> {
        let default = match &self.default {
            Value::Null => 1,
            _ => self.int_default(),
        };
        if default < 1 {
            tracing::debug!(default, "non-positive pagination default");
            return Err(Error::NonPositiveDefault { recipe: "page", default });
        }
        self.default = Value::Int(default);
        Ok(self.trim().to_integer(false).clamp_min(1))
    }

    fn options_list(mut self) -> Result<Self> {
        let default = match &self.default {
            Value::Null => 0,
            Value::Int(n) => *n,
            other => {
                return Err(Error::DefaultType { recipe: "options", expected: "an integer", found: other.kind() });
            }
        };
        if default < 0 {
            return Err(Error::NegativeDefault { operation: "options", default: default.to_string() });
        }
        self.default = Value::Int(default);

        Ok(self.apply("options", |v| match v {
            Value::Str(text) => Value::Str(option_list(text, default)),
            other => Value::Int(non_negative(other, default)),
        }))
    }

    // --- Convenience getters ----------------------------------------------------

    /// Run `recipe` on a scalar container and return the result as an integer.
    pub fn get_integer(self, recipe: impl IntoRecipe) -> Result<i64> {
        let value = self.as_scalar()?.apply_recipe(recipe)?.resolve()?;
        Ok(scalar::to_integer(&value, 0, false))
    }

    /// Run `recipe` on a scalar container and return the result as a float.
    pub fn get_float(self, recipe: impl IntoRecipe) -> Result<f64> {
        let this = self.as_scalar()?.apply_recipe(recipe)?;
        let separator = this.context.decimal_separator;
        let value = this.resolve()?;
        Ok(scalar::to_f64(&value, separator).unwrap_or(0.0))
    }

    /// Run `recipe` on an array container and return the entries.
    pub fn get_array(self, recipe: impl IntoRecipe) -> Result<OrderedMap> {
        match self.as_array()?.apply_recipe(recipe)?.resolve()? {
            Value::Map(map) => Ok(map),
            _ => Ok(OrderedMap::new()),
        }
    }

    /// Run `recipe` on a scalar container and return the result as text.
    pub fn get_input(self, recipe: impl IntoRecipe) -> Result<String> {
        let value = self.as_scalar()?.apply_recipe(recipe)?.resolve()?;
        Ok(scalar::to_string(&value, ""))
    }
}

/// Delimited option ids: each token a non-negative integer or `default`, unique.
fn option_list(text: &str, default: i64) -> String {
    let tokens = crate::text::delimited_list(text, LIST_DELIMITER, &[]);
    let values = tokens.iter().map(|t| non_negative(&Value::from(t.as_str()), default));
    let unique = crate::collection::dedupe(values, &mut HashSet::new());
    crate::collection::join(&unique, LIST_DELIMITER)
}

fn non_negative(value: &Value, default: i64) -> i64 {
    match scalar::to_integer(value, default, true) {
        n if n < 0 => default,
        n => n,
    }
}
