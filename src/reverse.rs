//! Inferring servings from an edited amount
//!
//! When the user types an amount for one ingredient, the servings that would
//! give that amount are computed, and the rest of the recipe follows them.
//!
//! The inverse is the plain linear one, `amount / base_amount * base_servings`.
//! Taste weighting and category damping are not undone, so after editing a
//! damped or taste weighted ingredient its recomputed amount can differ from
//! what was typed.

use serde::{Deserialize, Serialize};

use crate::{
    model::{Ingredient, Recipe},
    quantity::round_to,
    Scaler,
};

/// Result of resolving an edit into servings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Resolution {
    /// New target servings
    Servings(f64),
    /// The input was empty or not a number. Servings become `0` and amounts
    /// are shown blank.
    ZeroQuantity,
    /// The edit can't be resolved, the current servings are kept
    Unchanged,
}

/// Parses the text of an amount or servings field
///
/// Accepts non negative decimal numbers with surrounding whitespace. Returns
/// [`None`] for empty, negative, non finite or non numeric input.
pub fn parse_amount_input(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl Scaler {
    /// Servings that give `new_amount` of `ingredient`, linearly
    ///
    /// Rounded to the policy servings decimals. Returns `previous` when the
    /// ingredient base amount is `0` or the result is not a finite number.
    pub fn resolve_target_servings(
        &self,
        recipe: &Recipe,
        ingredient: &Ingredient,
        new_amount: f64,
        previous: f64,
    ) -> f64 {
        if ingredient.base_amount == 0.0 {
            return previous;
        }
        let servings = new_amount / ingredient.base_amount * recipe.base_servings;
        if !servings.is_finite() {
            return previous;
        }
        round_to(servings, self.policy.servings_decimals)
    }

    /// Resolves the raw text typed in an ingredient amount field
    ///
    /// Inferred servings are not bounded by [`min_servings`], which only
    /// applies to the servings field. A valid amount that infers `0` servings
    /// is kept as is.
    ///
    /// [`min_servings`]: crate::ScalingPolicy::min_servings
    pub fn resolve_amount_input(
        &self,
        recipe: &Recipe,
        ingredient: &Ingredient,
        raw: &str,
    ) -> Resolution {
        let Some(amount) = parse_amount_input(raw) else {
            return Resolution::ZeroQuantity;
        };
        if ingredient.base_amount == 0.0 {
            return Resolution::Unchanged;
        }
        let servings = self.resolve_target_servings(recipe, ingredient, amount, f64::NAN);
        if servings.is_nan() {
            Resolution::Unchanged
        } else {
            Resolution::Servings(servings)
        }
    }

    /// Resolves the raw text typed in the servings field
    ///
    /// Valid numbers are raised to the policy [`min_servings`].
    ///
    /// [`min_servings`]: crate::ScalingPolicy::min_servings
    pub fn resolve_servings_input(&self, raw: &str) -> Resolution {
        match parse_amount_input(raw) {
            Some(servings) => Resolution::Servings(servings.max(self.policy.min_servings)),
            None => Resolution::ZeroQuantity,
        }
    }
}
