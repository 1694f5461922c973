//! Error types
//!
//! Scaling itself never fails: every degenerate input has a defined fallback.
//! Only the boundaries that take outside input can error, loading a recipe and
//! loading a [`ScalingPolicy`](crate::ScalingPolicy).

use thiserror::Error;

use crate::model::{IngredientId, Taste};

/// Error loading a recipe from the backend representation
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed recipe json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A recipe that parsed but breaks an invariant of the model
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("'{field}' is not a number: {value:?}")]
    NotANumber { field: String, value: String },

    #[error("'{field}' must be a finite number")]
    NonFinite { field: String },

    #[error("ingredient '{name}' has a negative base amount: {amount}")]
    NegativeAmount { name: String, amount: f64 },

    #[error("duplicate ingredient id '{0}'")]
    DuplicateId(IngredientId),

    #[error("{taste} baseline out of range 0..=5: {value}")]
    TasteOutOfRange { taste: Taste, value: i64 },
}

/// Error in a [`ScalingPolicy`](crate::ScalingPolicy)
#[derive(Debug, Error)]
pub enum PolicyError {
    #[cfg(feature = "policy_file")]
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("invalid '{field}': {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
