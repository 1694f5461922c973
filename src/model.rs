//! Recipe representation
//!
//! These are the canonical shapes the engine works with. Backend payloads with
//! alternate field names are normalized into them by [`crate::load`].

use std::fmt;

use enum_map::{Enum, EnumMap};
use serde::{Deserialize, Serialize};

/// Highest position of a taste slider. The lowest is `0`.
pub const MAX_TASTE_LEVEL: u8 = 5;

/// A recipe as shown in the detail page
///
/// This is read-only for the engine. Group and ingredient order is the display
/// order and is never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Recipe title
    #[serde(default)]
    pub name: String,
    /// Number of servings the base amounts were written for
    pub base_servings: f64,
    /// Category, which changes the scaling rules
    #[serde(default)]
    pub category: Category,
    /// Taste slider positions the base amounts were written for
    #[serde(default)]
    pub taste_baseline: TasteLevels,
    /// Ingredient groups in display order
    pub ingredient_groups: Vec<IngredientGroup>,
    /// Cooking steps
    ///
    /// Their text can reference ingredients with `@name`, see [`crate::text`].
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Creates an empty recipe
    pub fn new(base_servings: f64, category: Category) -> Self {
        Self {
            name: String::new(),
            base_servings,
            category,
            taste_baseline: TasteLevels::default(),
            ingredient_groups: Vec::new(),
            steps: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_baseline(mut self, baseline: TasteLevels) -> Self {
        self.taste_baseline = baseline;
        self
    }

    pub fn with_group(mut self, group: IngredientGroup) -> Self {
        self.ingredient_groups.push(group);
        self
    }

    pub fn with_step(mut self, content: impl Into<String>) -> Self {
        self.steps.push(Step {
            content: content.into(),
        });
        self
    }

    /// Iterator over the ingredients of all groups, in display order
    pub fn ingredients(&self) -> impl Iterator<Item = &Ingredient> {
        self.ingredient_groups
            .iter()
            .flat_map(|g| g.ingredients.iter())
    }

    /// Finds an ingredient by its id
    pub fn ingredient(&self, id: &IngredientId) -> Option<&Ingredient> {
        self.ingredients().find(|i| &i.id == id)
    }

    /// The baker's percentage of an ingredient, if this recipe shows them
    pub fn displayed_ratio(&self, ingredient: &Ingredient) -> Option<f64> {
        if self.category.shows_ratio() {
            ingredient.ratio
        } else {
            None
        }
    }
}

/// A named group of ingredients, like "sauce" or "main"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientGroup {
    #[serde(default)]
    pub group_name: String,
    pub ingredients: Vec<Ingredient>,
}

impl IngredientGroup {
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            ingredients: Vec::new(),
        }
    }

    pub fn with(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }
}

/// A recipe ingredient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Unique in the recipe and stable between renders
    pub id: IngredientId,
    pub name: String,
    /// Amount for the recipe base servings. Never negative.
    pub base_amount: f64,
    #[serde(default)]
    pub unit: String,
    /// Which taste slider affects this ingredient
    #[serde(default)]
    pub taste_type: TasteType,
    /// Main ingredients are exempt from category damping
    #[serde(default)]
    pub is_main_ingredient: bool,
    /// Baker's percentage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
}

impl Ingredient {
    pub fn new(
        id: impl Into<IngredientId>,
        name: impl Into<String>,
        base_amount: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            base_amount,
            unit: unit.into(),
            taste_type: TasteType::None,
            is_main_ingredient: false,
            ratio: None,
        }
    }

    /// Marks the ingredient as a main ingredient
    pub fn main(mut self) -> Self {
        self.is_main_ingredient = true;
        self
    }

    pub fn with_taste(mut self, taste_type: TasteType) -> Self {
        self.taste_type = taste_type;
        self
    }

    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }
}

/// Opaque ingredient identifier
///
/// The backend sends numbers or strings, both are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(String);

impl IngredientId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IngredientId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for IngredientId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for IngredientId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A cooking step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub content: String,
}

/// Recipe category
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Category {
    Korean,
    Western,
    Chinese,
    Japanese,
    Baking,
    Dessert,
    #[default]
    Other,
}

impl Category {
    /// Non main ingredients are damped when scaling up
    pub fn damps_seasoning(self) -> bool {
        self == Self::Korean
    }

    /// Ingredient ratios (baker's percentages) are shown
    pub fn shows_ratio(self) -> bool {
        self == Self::Baking
    }
}

/// How an ingredient reacts to the taste sliders
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum TasteType {
    #[default]
    None,
    Spicy,
    Sweet,
    Salty,
}

impl TasteType {
    /// The slider that weights this ingredient
    pub fn taste(self) -> Option<Taste> {
        match self {
            TasteType::None => None,
            TasteType::Spicy => Some(Taste::Spiciness),
            TasteType::Sweet => Some(Taste::Sweetness),
            TasteType::Salty => Some(Taste::Saltiness),
        }
    }
}

/// A taste slider
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Enum, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Taste {
    Spiciness,
    Sweetness,
    Saltiness,
}

/// Positions of the three taste sliders, each in `0..=MAX_TASTE_LEVEL`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TasteLevelsRepr", into = "TasteLevelsRepr")]
pub struct TasteLevels(EnumMap<Taste, u8>);

impl TasteLevels {
    /// Creates the levels, clamping each to [`MAX_TASTE_LEVEL`]
    pub fn new(spiciness: u8, sweetness: u8, saltiness: u8) -> Self {
        let mut levels = Self::default();
        levels.set(Taste::Spiciness, spiciness);
        levels.set(Taste::Sweetness, sweetness);
        levels.set(Taste::Saltiness, saltiness);
        levels
    }

    pub fn get(&self, taste: Taste) -> u8 {
        self.0[taste]
    }

    /// Sets a slider. Values over [`MAX_TASTE_LEVEL`] are clamped.
    pub fn set(&mut self, taste: Taste, level: u8) {
        self.0[taste] = level.min(MAX_TASTE_LEVEL);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Taste, u8)> + '_ {
        self.0.iter().map(|(t, l)| (t, *l))
    }
}

#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct TasteLevelsRepr {
    spiciness: u8,
    sweetness: u8,
    saltiness: u8,
}

impl From<TasteLevelsRepr> for TasteLevels {
    fn from(r: TasteLevelsRepr) -> Self {
        Self::new(r.spiciness, r.sweetness, r.saltiness)
    }
}

impl From<TasteLevels> for TasteLevelsRepr {
    fn from(l: TasteLevels) -> Self {
        Self {
            spiciness: l.get(Taste::Spiciness),
            sweetness: l.get(Taste::Sweetness),
            saltiness: l.get(Taste::Saltiness),
        }
    }
}
