//! Support for recipe scaling
//!
//! The amount of an ingredient is its base amount times the serving ratio,
//! adjusted by two rules (see [`Rules`]):
//!
//! - Damping. For categories that [damp seasoning](Category::damps_seasoning),
//!   non main ingredients only follow half of a scale up. Scaling down is
//!   linear.
//! - Taste weighting. Each taste slider step away from the recipe baseline
//!   changes the ingredients of that taste by 10%.

use serde::{Deserialize, Serialize};

use crate::{
    model::{Category, Ingredient, IngredientId, Recipe, TasteLevels, TasteType},
    policy::Rules,
    quantity::{AmountDisplay, DisplayAmount},
    text::NameIndex,
    Scaler,
};

/// What the user has chosen for the recipe being viewed
///
/// This belongs to one recipe. When another recipe is loaded, a new state is
/// created with [`ScalingState::for_recipe`]; never carry one over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingState {
    /// Servings to scale to
    pub target_servings: f64,
    /// Current taste sliders
    pub taste_levels: TasteLevels,
    /// Ingredient amount field the user is typing in
    pub direct_edit: Option<DirectEdit>,
    /// Amounts are shown blank until a valid number is entered
    #[serde(default)]
    pub zero_quantity: bool,
}

/// An ingredient amount field being edited
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectEdit {
    pub ingredient_id: IngredientId,
    pub raw_text: String,
}

impl ScalingState {
    /// Initial state for a recipe: its base servings and taste baseline
    pub fn for_recipe(recipe: &Recipe) -> Self {
        Self {
            target_servings: recipe.base_servings,
            taste_levels: recipe.taste_baseline,
            direct_edit: None,
            zero_quantity: false,
        }
    }

    pub fn with_target_servings(mut self, target_servings: f64) -> Self {
        self.target_servings = target_servings;
        self
    }

    pub fn with_taste_levels(mut self, taste_levels: TasteLevels) -> Self {
        self.taste_levels = taste_levels;
        self
    }

    /// Enters zero quantity mode, as an empty or invalid edit does
    pub fn with_zero_quantity(mut self) -> Self {
        self.target_servings = 0.0;
        self.zero_quantity = true;
        self
    }

    /// Amounts are shown blank after an empty or invalid edit
    pub fn is_zero_quantity(&self) -> bool {
        self.zero_quantity
    }

    /// The text typed for an ingredient, if it is being edited
    pub fn editing_text(&self, id: &IngredientId) -> Option<&str> {
        self.direct_edit
            .as_ref()
            .filter(|e| &e.ingredient_id == id)
            .map(|e| e.raw_text.as_str())
    }
}

/// How the amount of an ingredient came to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleOutcome {
    /// Same as the base amount
    Unchanged,
    /// Scaled linearly and/or weighted by taste
    Scaled,
    /// Scale up was damped
    Damped,
    /// The computation was not a finite number, the amount is `0`
    NonFinite,
}

/// A recipe with all amounts computed for a [`ScalingState`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledRecipe {
    pub target_servings: f64,
    pub zero_quantity: bool,
    /// Groups in the recipe order
    pub groups: Vec<ScaledGroup>,
    /// Step texts with the ingredient references substituted
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledGroup {
    pub group_name: String,
    pub ingredients: Vec<ScaledIngredient>,
}

/// An ingredient ready to display
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaledIngredient {
    pub id: IngredientId,
    pub name: String,
    pub unit: String,
    /// Unrounded amount
    pub amount: f64,
    pub display: AmountDisplay,
    /// Baker's percentage, only for categories that show it
    pub ratio: Option<f64>,
    pub is_main_ingredient: bool,
    pub taste_type: TasteType,
    pub outcome: ScaleOutcome,
}

impl ScaledRecipe {
    /// Iterator over the ingredients of all groups
    pub fn ingredients(&self) -> impl Iterator<Item = &ScaledIngredient> {
        self.groups.iter().flat_map(|g| g.ingredients.iter())
    }

    pub fn ingredient(&self, id: &IngredientId) -> Option<&ScaledIngredient> {
        self.ingredients().find(|i| &i.id == id)
    }
}

impl Scaler {
    /// Raw serving ratio, `target / base`
    ///
    /// A base of zero, negative or not finite gives a ratio of `1`.
    pub fn serving_ratio(&self, recipe: &Recipe, state: &ScalingState) -> f64 {
        let base = recipe.base_servings;
        if base > 0.0 && base.is_finite() {
            state.target_servings / base
        } else {
            1.0
        }
    }

    /// Serving ratio after category damping
    pub fn effective_ratio(
        &self,
        category: Category,
        ingredient: &Ingredient,
        ratio: f64,
    ) -> f64 {
        if self.damps(category, ingredient) && ratio > 1.0 {
            1.0 + (ratio - 1.0) * self.policy.damping_factor
        } else {
            ratio
        }
    }

    /// Multiplier from the taste slider of the ingredient, `1` if none
    pub fn taste_weight(
        &self,
        recipe: &Recipe,
        ingredient: &Ingredient,
        state: &ScalingState,
    ) -> f64 {
        if !self.policy.rules.contains(Rules::TASTE_WEIGHTING) {
            return 1.0;
        }
        let Some(taste) = ingredient.taste_type.taste() else {
            return 1.0;
        };
        let steps = f64::from(state.taste_levels.get(taste))
            - f64::from(recipe.taste_baseline.get(taste));
        1.0 + steps * self.policy.taste_step
    }

    /// Unrounded amount of an ingredient for the given state
    ///
    /// Never returns a non finite number, those are `0`.
    pub fn compute_amount(
        &self,
        recipe: &Recipe,
        ingredient: &Ingredient,
        state: &ScalingState,
    ) -> f64 {
        self.amount_with_outcome(recipe, ingredient, state).0
    }

    /// Same as [`Self::compute_amount`] but rounded for display
    pub fn display_amount(
        &self,
        recipe: &Recipe,
        ingredient: &Ingredient,
        state: &ScalingState,
    ) -> DisplayAmount {
        self.round_amount(self.compute_amount(recipe, ingredient, state))
    }

    pub(crate) fn round_amount(&self, amount: f64) -> DisplayAmount {
        DisplayAmount::new(amount, self.policy.amount_decimals)
    }

    fn damps(&self, category: Category, ingredient: &Ingredient) -> bool {
        self.policy.rules.contains(Rules::KOREAN_DAMPING)
            && category.damps_seasoning()
            && !ingredient.is_main_ingredient
    }

    fn amount_with_outcome(
        &self,
        recipe: &Recipe,
        ingredient: &Ingredient,
        state: &ScalingState,
    ) -> (f64, ScaleOutcome) {
        let ratio = self.serving_ratio(recipe, state);
        let effective = self.effective_ratio(recipe.category, ingredient, ratio);
        let weight = self.taste_weight(recipe, ingredient, state);
        let amount = ingredient.base_amount * effective * weight;

        if !amount.is_finite() {
            tracing::warn!(
                ingredient = %ingredient.id,
                base_amount = ingredient.base_amount,
                ratio,
                "non finite amount, showing 0"
            );
            return (0.0, ScaleOutcome::NonFinite);
        }

        let outcome = if effective != ratio {
            ScaleOutcome::Damped
        } else if effective == 1.0 && weight == 1.0 {
            ScaleOutcome::Unchanged
        } else {
            ScaleOutcome::Scaled
        };
        (amount, outcome)
    }

    /// Computes every amount and instruction of a recipe
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(recipe = %recipe.name, target = state.target_servings)
    )]
    pub fn scale(&self, recipe: &Recipe, state: &ScalingState) -> ScaledRecipe {
        let zero_quantity = state.is_zero_quantity();

        let groups = recipe
            .ingredient_groups
            .iter()
            .map(|group| ScaledGroup {
                group_name: group.group_name.clone(),
                ingredients: group
                    .ingredients
                    .iter()
                    .map(|i| self.scale_ingredient(recipe, i, state))
                    .collect(),
            })
            .collect();

        let names = NameIndex::new(recipe);
        let instructions = recipe
            .steps
            .iter()
            .map(|step| self.render_with_index(&step.content, recipe, state, &names))
            .collect();

        ScaledRecipe {
            target_servings: state.target_servings,
            zero_quantity,
            groups,
            instructions,
        }
    }

    fn scale_ingredient(
        &self,
        recipe: &Recipe,
        ingredient: &Ingredient,
        state: &ScalingState,
    ) -> ScaledIngredient {
        let (amount, outcome) = self.amount_with_outcome(recipe, ingredient, state);

        let display = if let Some(raw) = state.editing_text(&ingredient.id) {
            AmountDisplay::Editing(raw.to_owned())
        } else if state.is_zero_quantity() {
            AmountDisplay::Blank
        } else {
            AmountDisplay::Amount(self.round_amount(amount))
        };

        ScaledIngredient {
            id: ingredient.id.clone(),
            name: ingredient.name.clone(),
            unit: ingredient.unit.clone(),
            amount,
            display,
            ratio: recipe.displayed_ratio(ingredient),
            is_main_ingredient: ingredient.is_main_ingredient,
            taste_type: ingredient.taste_type,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::IngredientGroup, policy::ScalingPolicy};
    use test_case::test_case;

    fn stew() -> (Recipe, Ingredient) {
        let garlic = Ingredient::new("1", "마늘", 10.0, "g");
        let recipe = Recipe::new(2.0, Category::Korean)
            .with_group(IngredientGroup::new("양념").with(garlic.clone()));
        (recipe, garlic)
    }

    #[test_case(2.0 => 1.0; "same")]
    #[test_case(4.0 => 1.5; "up is damped")]
    #[test_case(1.0 => 0.5; "down is linear")]
    #[test_case(6.0 => 2.0; "triple")]
    fn damping(target: f64) -> f64 {
        let (recipe, garlic) = stew();
        let scaler = Scaler::default();
        let state = ScalingState::for_recipe(&recipe).with_target_servings(target);
        let ratio = scaler.serving_ratio(&recipe, &state);
        scaler.effective_ratio(recipe.category, &garlic, ratio)
    }

    #[test]
    fn damping_can_be_disabled() {
        let (recipe, garlic) = stew();
        let scaler = Scaler::new(ScalingPolicy {
            rules: Rules::TASTE_WEIGHTING,
            ..Default::default()
        });
        let state = ScalingState::for_recipe(&recipe).with_target_servings(4.0);
        assert_eq!(scaler.compute_amount(&recipe, &garlic, &state), 20.0);
    }

    #[test]
    fn bad_base_servings_is_ratio_one() {
        for base in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let recipe = Recipe::new(base, Category::Western);
            let state = ScalingState::for_recipe(&recipe).with_target_servings(3.0);
            assert_eq!(Scaler::default().serving_ratio(&recipe, &state), 1.0);
        }
    }

    #[test]
    fn non_finite_amount_is_zero() {
        let bad = Ingredient::new("x", "물", f64::NAN, "ml");
        let recipe = Recipe::new(1.0, Category::Other)
            .with_group(IngredientGroup::new("").with(bad.clone()));
        let state = ScalingState::for_recipe(&recipe);
        let scaler = Scaler::default();
        assert_eq!(scaler.compute_amount(&recipe, &bad, &state), 0.0);

        let scaled = scaler.scale(&recipe, &state);
        let ing = scaled.ingredient(&"x".into()).unwrap();
        assert_eq!(ing.outcome, ScaleOutcome::NonFinite);
        assert_eq!(ing.display.to_string(), "0");
    }

    #[test]
    fn outcomes() {
        let (recipe, _) = stew();
        let scaler = Scaler::default();
        let base = ScalingState::for_recipe(&recipe);
        let outcome =
            |state: &ScalingState| scaler.scale(&recipe, state).groups[0].ingredients[0].outcome;

        assert_eq!(outcome(&base), ScaleOutcome::Unchanged);
        assert_eq!(
            outcome(&base.clone().with_target_servings(4.0)),
            ScaleOutcome::Damped
        );
        assert_eq!(outcome(&base.with_target_servings(1.0)), ScaleOutcome::Scaled);
    }
}
