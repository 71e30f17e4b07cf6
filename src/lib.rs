//! Coercion of loosely-typed input into bounded, well-typed values.
//!
//! Request parameters arrive as strings, numbers, or nested collections of
//! those. This crate wraps one such raw value in a [`Variable`], runs a chain
//! of coercion steps over it, and resolves the result against a default:
//!
//! ```
//! use tamed::{Value, Variable};
//!
//! let page = Variable::with_default(" 3 ", 1).trim().to_integer(false).clamp_min(1);
//! assert_eq!(page.resolve(), Ok(Value::Int(3)));
//!
//! let price = Variable::new("1 234.567").apply_recipe("cost").unwrap();
//! assert_eq!(price.resolve(), Ok(Value::from("1234.57")));
//! ```
//!
//! Dirty data never fails: it resolves to the default, entry by entry for
//! collections. Only a misconfigured call (a negative default for a
//! non-negative step, a conflicting shape declaration, …) returns an
//! [`Error`].
//!
//! ## Layout
//!
//! - `value.rs`: [`Value`], [`Key`], [`OrderedMap`].
//! - `scalar.rs`: single-value coercers (integers, floats, booleans, text).
//! - `text.rs`: trimming, cropping, truncation, case folding, HTML entities.
//! - `collection.rs`: per-entry coercion of collections, id and tag lists.
//! - `container.rs`: [`Variable`] and resolution.
//! - `pipeline.rs` / `recipe.rs`: chainable steps and named [`Recipe`]s.
//! - `api.rs`: [`Context`], [`Options`], [`Params`], [`coerce`].

#[macro_use]
mod macros;
mod api;
pub mod collection;
mod container;
mod error;
mod json;
mod pipeline;
mod recipe;
pub mod scalar;
pub mod text;
mod trace;
mod value;

pub use api::{Context, Options, Params, coerce, coerce_with};
pub use collection::Uniqueness;
pub use container::{ShapeHint, Variable};
pub use error::{Error, Result};
pub use recipe::{IntoRecipe, Recipe};
pub use scalar::{DecimalSeparator, RoundingMode};
pub use text::ReduceFlags;
pub use trace::{Step, Trace};
pub use value::{Key, OrderedMap, Value};
