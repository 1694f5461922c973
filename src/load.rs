//! Loading recipes from the backend
//!
//! The recipe detail endpoint has used more than one shape over time
//! (`ingredientGroup` and `ingredientGroups`, `servings` and `baseServings`,
//! numbers sent as strings...). Everything is normalized here so the engine
//! only ever sees the canonical [`Recipe`].

use std::collections::HashSet;

use serde::Deserialize;

use crate::{
    error::{LoadError, ValidationError},
    model::{
        Category, Ingredient, IngredientGroup, IngredientId, Recipe, Step, Taste, TasteLevels,
        TasteType, MAX_TASTE_LEVEL,
    },
};

impl Recipe {
    /// Parses and validates a recipe from the backend json
    #[tracing::instrument(level = "debug", skip_all, fields(len = json.len()))]
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let raw: RawRecipe = serde_json::from_str(json)?;
        Ok(raw.into_recipe()?)
    }

    /// Same as [`Self::from_json`] from an already parsed value
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, LoadError> {
        let raw: RawRecipe = serde_json::from_value(value)?;
        Ok(raw.into_recipe()?)
    }

    /// Checks the model invariants
    ///
    /// Recipes built by hand can use this, [`Self::from_json`] already does.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_servings.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "baseServings".into(),
            });
        }

        let mut ids = HashSet::new();
        for ingredient in self.ingredients() {
            if !ingredient.base_amount.is_finite() {
                return Err(ValidationError::NonFinite {
                    field: format!("{}.baseAmount", ingredient.name),
                });
            }
            if ingredient.base_amount < 0.0 {
                return Err(ValidationError::NegativeAmount {
                    name: ingredient.name.clone(),
                    amount: ingredient.base_amount,
                });
            }
            if ingredient.ratio.is_some_and(|r| !r.is_finite()) {
                return Err(ValidationError::NonFinite {
                    field: format!("{}.ratio", ingredient.name),
                });
            }
            if !ids.insert(&ingredient.id) {
                return Err(ValidationError::DuplicateId(ingredient.id.clone()));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecipe {
    #[serde(default, alias = "title", alias = "recipeName")]
    name: Option<String>,
    #[serde(alias = "servings")]
    base_servings: RawNumber,
    #[serde(default)]
    category: Option<String>,
    #[serde(default, alias = "taste")]
    taste_baseline: RawTaste,
    #[serde(default, alias = "ingredientGroup")]
    ingredient_groups: Vec<RawGroup>,
    #[serde(default, alias = "recipeSteps")]
    steps: Vec<RawStep>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RawTaste {
    spiciness: i64,
    sweetness: i64,
    saltiness: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGroup {
    #[serde(default, alias = "customName", alias = "name")]
    group_name: Option<String>,
    #[serde(default)]
    ingredients: Vec<RawIngredient>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawIngredient {
    #[serde(alias = "ingredientId")]
    id: RawId,
    name: String,
    #[serde(alias = "amount", alias = "quantity")]
    base_amount: RawNumber,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    taste_type: Option<String>,
    #[serde(default, alias = "isMain", alias = "main")]
    is_main_ingredient: bool,
    #[serde(default)]
    ratio: Option<RawNumber>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawStep {
    Text(String),
    Object {
        #[serde(alias = "description", alias = "text")]
        content: String,
    },
}

impl RawNumber {
    fn into_f64(self, field: impl Into<String>) -> Result<f64, ValidationError> {
        let n = match self {
            RawNumber::Number(n) => n,
            RawNumber::Text(s) => {
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| ValidationError::NotANumber {
                        field: field.into(),
                        value: s.clone(),
                    })?
            }
        };
        Ok(n)
    }
}

impl From<RawId> for IngredientId {
    fn from(value: RawId) -> Self {
        match value {
            RawId::Number(n) => n.into(),
            RawId::Text(s) => s.into(),
        }
    }
}

impl RawTaste {
    fn into_levels(self) -> Result<TasteLevels, ValidationError> {
        let check = |taste, value: i64| {
            u8::try_from(value)
                .ok()
                .filter(|v| *v <= MAX_TASTE_LEVEL)
                .ok_or(ValidationError::TasteOutOfRange { taste, value })
        };
        Ok(TasteLevels::new(
            check(Taste::Spiciness, self.spiciness)?,
            check(Taste::Sweetness, self.sweetness)?,
            check(Taste::Saltiness, self.saltiness)?,
        ))
    }
}

impl RawRecipe {
    fn into_recipe(self) -> Result<Recipe, ValidationError> {
        let category = match self.category.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::debug!(category = s, "unknown category");
                Category::Other
            }),
            _ => Category::Other,
        };

        let ingredient_groups = self
            .ingredient_groups
            .into_iter()
            .map(RawGroup::into_group)
            .collect::<Result<Vec<_>, _>>()?;

        let steps = self
            .steps
            .into_iter()
            .map(|s| match s {
                RawStep::Text(content) | RawStep::Object { content } => Step { content },
            })
            .collect();

        let recipe = Recipe {
            name: self.name.unwrap_or_default(),
            base_servings: self.base_servings.into_f64("baseServings")?,
            category,
            taste_baseline: self.taste_baseline.into_levels()?,
            ingredient_groups,
            steps,
        };
        recipe.validate()?;
        Ok(recipe)
    }
}

impl RawGroup {
    fn into_group(self) -> Result<IngredientGroup, ValidationError> {
        let ingredients = self
            .ingredients
            .into_iter()
            .map(RawIngredient::into_ingredient)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(IngredientGroup {
            group_name: self.group_name.unwrap_or_default(),
            ingredients,
        })
    }
}

impl RawIngredient {
    fn into_ingredient(self) -> Result<Ingredient, ValidationError> {
        let base_amount = self
            .base_amount
            .into_f64(format!("{}.baseAmount", self.name))?;
        let ratio = self
            .ratio
            .map(|r| r.into_f64(format!("{}.ratio", self.name)))
            .transpose()?;
        let taste_type = self
            .taste_type
            .as_deref()
            .and_then(|t| t.trim().parse::<TasteType>().ok())
            .unwrap_or_default();

        Ok(Ingredient {
            id: self.id.into(),
            name: self.name,
            base_amount,
            unit: self.unit.unwrap_or_default(),
            taste_type,
            is_main_ingredient: self.is_main_ingredient,
            ratio,
        })
    }
}
