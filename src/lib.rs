//! Serving and taste scaling for 한스푼 recipes.
//!
//! The recipe detail page lets the user change the number of servings and
//! three taste sliders (spiciness, sweetness and saltiness), or type an amount
//! directly for one ingredient. This crate computes what every ingredient
//! amount, and every `@ingredient` reference in the step text, shows for that.
//!
//! Includes:
//! - Forward scaling with category damping and taste weighting.
//! - Inferring the servings from an edited ingredient amount.
//! - Substituting live amounts in step text.
//! - Loading recipes from the backend json.
//!
//! # Basic usage
//! If you just want to compute one amount, see [`compute_amount`].
//!
//! To change the scaling constants construct a [`Scaler`] with a
//! [`ScalingPolicy`]. To keep the state of a recipe page, use a
//! [`ScalingSession`].
//!
//! ```rust
//! # use hanspoon::*;
//! let recipe = Recipe::new(2.0, Category::Korean)
//!     .with_group(
//!         IngredientGroup::new("양념")
//!             .with(Ingredient::new("1", "간장", 10.0, "큰술"))
//!     )
//!     .with_step("@간장 을 넣는다.");
//!
//! let mut session = ScalingSession::new(recipe);
//! session.set_servings(4.0);
//!
//! let view = session.view();
//! // seasoning in korean recipes only follows half of a scale up
//! assert_eq!(view.groups[0].ingredients[0].display.to_string(), "15");
//! assert!(view.instructions[0].contains("간장 15큰술"));
//! ```
//!
//! Scaling never fails. Degenerate input (zero servings, zero amounts,
//! unparseable text) has a defined fallback, see each function.

#![warn(rustdoc::broken_intra_doc_links, clippy::doc_markdown)]

pub mod error;
pub mod load;
pub mod model;
pub mod policy;
pub mod quantity;
pub mod reverse;
pub mod scale;
pub mod session;
pub mod span;
pub mod text;

pub use error::{LoadError, PolicyError, ValidationError};
pub use model::*;
pub use policy::{Rules, ScalingPolicy};
pub use quantity::{AmountDisplay, DisplayAmount, Quantity};
pub use reverse::{parse_amount_input, Resolution};
pub use scale::{
    DirectEdit, ScaleOutcome, ScaledGroup, ScaledIngredient, ScaledRecipe, ScalingState,
};
pub use session::ScalingSession;
pub use span::Span;
pub use text::InstructionText;

/// A recipe scaler
///
/// Holds the [`ScalingPolicy`] used by every operation. It is cheap to create.
///
/// The default scaler uses [`ScalingPolicy::default`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Scaler {
    policy: ScalingPolicy,
}

impl Scaler {
    /// Creates a new scaler
    ///
    /// The policy is not validated here, see [`ScalingPolicy::validate`].
    pub fn new(policy: ScalingPolicy) -> Self {
        Self { policy }
    }

    /// Get the scaler policy
    pub fn policy(&self) -> &ScalingPolicy {
        &self.policy
    }
}

/// Amount of `ingredient` for `state`, with a default [`Scaler`]
///
/// The result is unrounded, use [`DisplayAmount`] to show it. Non finite
/// results are `0`.
pub fn compute_amount(recipe: &Recipe, ingredient: &Ingredient, state: &ScalingState) -> f64 {
    Scaler::default().compute_amount(recipe, ingredient, state)
}

/// Servings that give `new_amount` of `ingredient`, with a default [`Scaler`]
///
/// This is the linear inverse; damping and taste weighting are ignored.
/// Returns `previous` if the ingredient base amount is `0`.
pub fn resolve_target_servings(
    recipe: &Recipe,
    ingredient: &Ingredient,
    new_amount: f64,
    previous: f64,
) -> f64 {
    Scaler::default().resolve_target_servings(recipe, ingredient, new_amount, previous)
}

/// Substitutes the `@name` references of `raw`, with a default [`Scaler`]
pub fn render_instruction(raw: &str, recipe: &Recipe, state: &ScalingState) -> String {
    Scaler::default().render_instruction(raw, recipe, state)
}
