use hanspoon::{
    resolve_target_servings, Category, Ingredient, IngredientGroup, Recipe, Resolution, Rules,
    Scaler, ScalingPolicy, ScalingState,
};
use test_case::test_case;

fn recipe() -> Recipe {
    Recipe::new(3.0, Category::Korean).with_group(
        IngredientGroup::new("")
            .with(Ingredient::new("rice", "쌀", 270.0, "g").main())
            .with(Ingredient::new("water", "물", 330.0, "ml"))
            .with(Ingredient::new("salt", "소금", 0.0, "약간")),
    )
}

/// Forward amount without taste and damping
fn linear_amount(recipe: &Recipe, ingredient: &Ingredient, target: f64) -> f64 {
    let linear = Scaler::new(ScalingPolicy {
        rules: Rules::empty(),
        ..Default::default()
    });
    let state = ScalingState::for_recipe(recipe).with_target_servings(target);
    linear.compute_amount(recipe, ingredient, &state)
}

#[test_case(0.5)]
#[test_case(1.0)]
#[test_case(2.5)]
#[test_case(3.0)]
#[test_case(7.3)]
#[test_case(12.0)]
fn forward_reverse_round_trip(target: f64) {
    let recipe = recipe();
    for id in ["rice", "water"] {
        let ingredient = recipe.ingredient(&id.into()).unwrap();
        let amount = linear_amount(&recipe, ingredient, target);
        let back = resolve_target_servings(&recipe, ingredient, amount, 99.0);
        assert!((back - target).abs() <= 0.05, "{id}: {back} != {target}");
    }
}

#[test]
fn zero_base_amount_is_a_no_op() {
    let recipe = recipe();
    let salt = recipe.ingredient(&"salt".into()).unwrap();
    assert_eq!(resolve_target_servings(&recipe, salt, 12.0, 4.5), 4.5);
    assert_eq!(resolve_target_servings(&recipe, salt, 0.0, 4.5), 4.5);
}

#[test]
fn damping_is_not_inverted() {
    let recipe = recipe();
    let water = recipe.ingredient(&"water".into()).unwrap();
    let scaler = Scaler::default();

    // damped forward amount for 6 servings: 330 * 1.5
    let state = ScalingState::for_recipe(&recipe).with_target_servings(6.0);
    let shown = scaler.compute_amount(&recipe, water, &state);
    assert_eq!(shown, 495.0);

    // typing it back gives the linear inverse, not 6
    let servings = scaler.resolve_target_servings(&recipe, water, shown, 6.0);
    assert_eq!(servings, 4.5);
}

#[test]
fn inferred_servings_are_not_floored() {
    let recipe = Recipe::new(10.0, Category::Western)
        .with_group(IngredientGroup::new("").with(Ingredient::new("f", "flour", 1000.0, "g")));
    let flour = recipe.ingredient(&"f".into()).unwrap();
    let scaler = Scaler::new(ScalingPolicy {
        servings_decimals: 3,
        ..Default::default()
    });
    assert_eq!(
        scaler.resolve_amount_input(&recipe, flour, "5"),
        Resolution::Servings(0.05)
    );
}

#[test_case("" ; "empty")]
#[test_case("abc" ; "text")]
#[test_case("-5" ; "negative")]
fn invalid_amount_is_zero_quantity(raw: &str) {
    let recipe = recipe();
    let rice = recipe.ingredient(&"rice".into()).unwrap();
    assert_eq!(
        Scaler::default().resolve_amount_input(&recipe, rice, raw),
        Resolution::ZeroQuantity
    );
}
