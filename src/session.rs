//! Scaling state of one recipe page visit
//!
//! A [`ScalingSession`] owns the recipe being viewed and its
//! [`ScalingState`], and applies the user actions to it: typing in the
//! servings field, typing in an ingredient amount field and moving the taste
//! sliders.

use crate::{
    model::{IngredientId, Recipe, Taste},
    reverse::Resolution,
    scale::{DirectEdit, ScaledRecipe, ScalingState},
    Scaler,
};

/// A recipe being viewed and what the user chose for it
#[derive(Debug, Clone)]
pub struct ScalingSession {
    scaler: Scaler,
    recipe: Recipe,
    state: ScalingState,
}

impl ScalingSession {
    /// Starts viewing a recipe with the default [`Scaler`]
    pub fn new(recipe: Recipe) -> Self {
        Self::with_scaler(Scaler::default(), recipe)
    }

    pub fn with_scaler(scaler: Scaler, recipe: Recipe) -> Self {
        let state = ScalingState::for_recipe(&recipe);
        Self {
            scaler,
            recipe,
            state,
        }
    }

    /// Replaces the recipe
    ///
    /// The state is rebuilt from the new recipe. Nothing from the previous one
    /// is kept.
    #[tracing::instrument(level = "debug", skip_all, fields(recipe = %recipe.name))]
    pub fn load(&mut self, recipe: Recipe) {
        self.state = ScalingState::for_recipe(&recipe);
        self.recipe = recipe;
    }

    /// Back to the base servings and taste baseline
    pub fn reset(&mut self) {
        self.state = ScalingState::for_recipe(&self.recipe);
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn state(&self) -> &ScalingState {
        &self.state
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    pub fn into_parts(self) -> (Recipe, ScalingState) {
        (self.recipe, self.state)
    }

    /// Sets the servings, as the servings field does
    ///
    /// Raised to the policy `min_servings`. Non finite values are ignored.
    pub fn set_servings(&mut self, servings: f64) {
        if !servings.is_finite() {
            tracing::debug!(servings, "ignoring non finite servings");
            return;
        }
        self.state.direct_edit = None;
        self.state.zero_quantity = false;
        self.state.target_servings = servings.max(self.scaler.policy().min_servings);
    }

    /// Applies the text typed in the servings field
    pub fn set_servings_input(&mut self, raw: &str) -> Resolution {
        self.state.direct_edit = None;
        let resolution = self.scaler.resolve_servings_input(raw);
        match resolution {
            Resolution::Servings(servings) => {
                self.state.target_servings = servings;
                self.state.zero_quantity = false;
            }
            Resolution::ZeroQuantity => self.enter_zero_quantity(),
            Resolution::Unchanged => {}
        }
        tracing::debug!(raw, ?resolution, "servings edited");
        resolution
    }

    /// Applies the text typed in the amount field of an ingredient
    ///
    /// The field keeps showing what was typed until
    /// [`Self::finish_ingredient_edit`] or a servings change. Every other
    /// ingredient follows the resolved servings.
    pub fn edit_ingredient_amount(&mut self, id: &IngredientId, raw: &str) -> Resolution {
        let Some(ingredient) = self.recipe.ingredient(id) else {
            tracing::debug!(%id, "edit of unknown ingredient");
            return Resolution::Unchanged;
        };

        let resolution = self.scaler.resolve_amount_input(&self.recipe, ingredient, raw);
        match resolution {
            Resolution::Servings(servings) => {
                self.state.target_servings = servings;
                self.state.zero_quantity = false;
            }
            Resolution::ZeroQuantity => self.enter_zero_quantity(),
            Resolution::Unchanged => {}
        }
        self.state.direct_edit = Some(DirectEdit {
            ingredient_id: id.clone(),
            raw_text: raw.to_owned(),
        });
        tracing::debug!(%id, raw, ?resolution, "ingredient amount edited");
        resolution
    }

    /// The user left the amount field, it shows the computed amount again
    pub fn finish_ingredient_edit(&mut self) {
        self.state.direct_edit = None;
    }

    /// Moves a taste slider. Levels over the maximum are clamped.
    pub fn set_taste_level(&mut self, taste: Taste, level: u8) {
        self.state.taste_levels.set(taste, level);
    }

    /// Every amount and instruction for the current state
    pub fn view(&self) -> ScaledRecipe {
        self.scaler.scale(&self.recipe, &self.state)
    }

    fn enter_zero_quantity(&mut self) {
        self.state.target_servings = 0.0;
        self.state.zero_quantity = true;
    }
}
