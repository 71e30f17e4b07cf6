//! Configuration errors.
//!
//! Only programmer mistakes surface as `Err`: a default of the wrong shape or
//! sign, a scalar-only operation on an array container, a conflicting shape
//! declaration. Dirty *data* never produces an error; it resolves to the
//! configured default instead.

use thiserror::Error;

use crate::container::ShapeHint;

/// Errors raised by a misconfigured call site.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A non-negative coercion was configured with a negative default.
    #[error("{operation} requires a non-negative default, got {default}")]
    NegativeDefault { operation: &'static str, default: String },

    /// A recipe that needs a positive default was given zero or less.
    #[error("recipe `{recipe}` requires a positive default, got {default}")]
    NonPositiveDefault { recipe: &'static str, default: i64 },

    /// The default has the wrong kind for the recipe.
    #[error("recipe `{recipe}` requires {expected} default, got {found}")]
    DefaultType { recipe: &'static str, expected: &'static str, found: &'static str },

    /// A collection default was configured on a scalar-shaped container.
    #[error("collection default is not allowed on a {shape} container")]
    DefaultShape { shape: ShapeHint },

    /// The container shape was already fixed to something else.
    #[error("container shape is fixed to {declared}, cannot switch to {requested}")]
    ShapeLocked { declared: ShapeHint, requested: ShapeHint },

    /// A scalar-only operation was requested on an array-shaped container.
    #[error("`{operation}` is only defined for scalar containers")]
    ScalarOnly { operation: &'static str },

    /// Single-key resolution only makes sense for array-shaped containers.
    #[error("cannot resolve a single key on a scalar container")]
    KeyOnScalar,

    /// The recipe name is not known.
    #[error("unknown recipe `{name}`")]
    UnknownRecipe { name: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
