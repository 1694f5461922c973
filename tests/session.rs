use hanspoon::{
    AmountDisplay, Category, Ingredient, IngredientGroup, Recipe, Resolution, ScalingSession,
    Taste, TasteLevels, TasteType,
};

fn bulgogi() -> Recipe {
    Recipe::new(2.0, Category::Korean)
        .with_name("불고기")
        .with_baseline(TasteLevels::new(0, 3, 2))
        .with_group(
            IngredientGroup::new("주재료")
                .with(Ingredient::new("beef", "소고기", 400.0, "g").main()),
        )
        .with_group(
            IngredientGroup::new("양념")
                .with(Ingredient::new("soy", "간장", 4.0, "큰술").with_taste(TasteType::Salty))
                .with(Ingredient::new("sugar", "설탕", 2.0, "큰술").with_taste(TasteType::Sweet)),
        )
        .with_step("@소고기 에 @간장, @설탕 을 넣고 재운다.")
}

fn pancakes() -> Recipe {
    Recipe::new(4.0, Category::Dessert)
        .with_name("pancakes")
        .with_baseline(TasteLevels::new(0, 4, 1))
        .with_group(
            IngredientGroup::new("")
                .with(Ingredient::new("flour", "flour", 250.0, "g"))
                .with(Ingredient::new("sugar", "sugar", 30.0, "g").with_taste(TasteType::Sweet)),
        )
}

fn display(session: &ScalingSession, id: &str) -> String {
    session
        .view()
        .ingredient(&id.into())
        .unwrap()
        .display
        .to_string()
}

#[test]
fn starts_at_recipe_base() {
    let session = ScalingSession::new(bulgogi());
    assert_eq!(session.state().target_servings, 2.0);
    assert_eq!(session.state().taste_levels, TasteLevels::new(0, 3, 2));
    assert!(session.state().direct_edit.is_none());
    assert_eq!(display(&session, "soy"), "4");
}

#[test]
fn loading_another_recipe_replaces_the_state() {
    let mut session = ScalingSession::new(bulgogi());
    session.set_servings(5.0);
    session.set_taste_level(Taste::Sweetness, 5);
    session.edit_ingredient_amount(&"soy".into(), "");
    assert!(session.state().is_zero_quantity());

    session.load(pancakes());
    assert_eq!(session.state().target_servings, 4.0);
    assert_eq!(session.state().taste_levels, TasteLevels::new(0, 4, 1));
    assert!(session.state().direct_edit.is_none());
    assert_eq!(display(&session, "sugar"), "30");
}

#[test]
fn editing_an_amount_moves_the_whole_recipe() {
    let mut session = ScalingSession::new(bulgogi());
    let resolution = session.edit_ingredient_amount(&"beef".into(), "600");
    assert_eq!(resolution, Resolution::Servings(3.0));
    assert_eq!(session.state().target_servings, 3.0);

    assert_eq!(display(&session, "beef"), "600");
    // 4 * (1 + 0.5 * 0.5)
    assert_eq!(display(&session, "soy"), "5");
    assert_eq!(display(&session, "sugar"), "2.5");
}

#[test]
fn edited_field_shows_what_was_typed() {
    let mut session = ScalingSession::new(bulgogi());

    // soy is damped, its recomputed amount would be 4.5
    assert_eq!(
        session.edit_ingredient_amount(&"soy".into(), "5"),
        Resolution::Servings(2.5)
    );
    assert_eq!(
        session.view().ingredient(&"soy".into()).unwrap().display,
        AmountDisplay::Editing("5".into())
    );
    assert_eq!(display(&session, "beef"), "500");

    // a trailing dot survives so "600.5" can be typed
    session.edit_ingredient_amount(&"beef".into(), "600.");
    assert_eq!(display(&session, "beef"), "600.");
    assert_eq!(display(&session, "soy"), "5");
    session.edit_ingredient_amount(&"beef".into(), "600.5");
    assert_eq!(display(&session, "beef"), "600.5");

    session.finish_ingredient_edit();
    assert!(session.state().direct_edit.is_none());
    // 600.5 / 400 * 2 = 3.0025, one decimal
    assert_eq!(display(&session, "beef"), "600");
}

#[test]
fn tiny_valid_amount_is_not_zero_quantity() {
    let mut session = ScalingSession::new(bulgogi());
    // 5 / 400 * 2 rounds to 0 servings
    assert_eq!(
        session.edit_ingredient_amount(&"beef".into(), "5"),
        Resolution::Servings(0.0)
    );
    assert!(!session.state().is_zero_quantity());

    let view = session.view();
    assert!(!view.zero_quantity);
    assert_eq!(display(&session, "soy"), "0");
    assert_eq!(display(&session, "beef"), "5");
    assert!(view.instructions[0].contains("간장 0큰술"));
}

#[test]
fn empty_edit_enters_zero_quantity_mode() {
    let mut session = ScalingSession::new(bulgogi());
    assert_eq!(
        session.edit_ingredient_amount(&"soy".into(), ""),
        Resolution::ZeroQuantity
    );

    let view = session.view();
    assert!(view.zero_quantity);
    // the edited field keeps what was typed, the rest is blank
    assert_eq!(
        view.ingredient(&"soy".into()).unwrap().display,
        AmountDisplay::Editing(String::new())
    );
    assert_eq!(
        view.ingredient(&"beef".into()).unwrap().display,
        AmountDisplay::Blank
    );
    assert_eq!(view.instructions[0].matches("소고기").count(), 1);
    assert!(!view.instructions[0].contains("400g"));

    // a valid number brings the amounts back
    session.edit_ingredient_amount(&"soy".into(), "8");
    assert!(!session.state().is_zero_quantity());
    // 8 / 4 * 2
    assert_eq!(session.state().target_servings, 4.0);
    assert_eq!(display(&session, "beef"), "800");
    assert_eq!(display(&session, "soy"), "8");
}

#[test]
fn servings_field() {
    let mut session = ScalingSession::new(bulgogi());
    assert_eq!(session.set_servings_input("0"), Resolution::Servings(0.1));
    assert_eq!(session.state().target_servings, 0.1);
    assert_eq!(display(&session, "beef"), "20");

    assert_eq!(session.set_servings_input("abc"), Resolution::ZeroQuantity);
    assert!(session.state().is_zero_quantity());
    assert_eq!(display(&session, "beef"), "");
}

#[test]
fn taste_sliders() {
    let mut session = ScalingSession::new(bulgogi());
    session.set_taste_level(Taste::Saltiness, 4);
    // 4 * 1.2
    assert_eq!(display(&session, "soy"), "4.8");
    session.set_taste_level(Taste::Saltiness, 9);
    assert_eq!(session.state().taste_levels.get(Taste::Saltiness), 5);
    // 4 * 1.3
    assert_eq!(display(&session, "soy"), "5.2");

    session.reset();
    assert_eq!(display(&session, "soy"), "4");
}
