use oxide_recipe::{
    render_recipe, Ingredient, Listing, Recipe, SectionBody, Step, INGREDIENTS_FALLBACK,
    STEPS_FALLBACK,
};
use serde_json::{json, Value};

use super::support::shakshuka;

fn decode(recipe: Value) -> Recipe {
    serde_json::from_value(recipe).expect("recipes decode leniently")
}

#[test]
fn given_a_complete_recipe_should_list_ingredients_and_numbered_steps() {
    let view = render_recipe(&decode(shakshuka()["recipe"].clone()));

    assert_eq!(view.title, "Shakshuka");
    assert_eq!(view.description, "Eggs poached in spiced tomato sauce.");
    assert_eq!(view.ingredients.heading, "Ingredients:");
    assert_eq!(
        view.ingredients.body,
        SectionBody::Items(vec!["4 eggs".to_string(), "400 g tomatoes".to_string()])
    );
    assert_eq!(view.steps.heading, "Steps:");
    assert_eq!(
        view.steps.body,
        SectionBody::Items(vec![
            "Step 1: Simmer the tomatoes.".to_string(),
            "Step 2: Crack in the eggs and cover.".to_string(),
        ])
    );
}

#[test]
fn given_missing_listings_should_render_fallback_notices() {
    let recipe = decode(json!({ "title": "Toast", "description": "Bread, heated." }));

    assert_eq!(recipe.ingredients, Listing::Unavailable);
    let view = render_recipe(&recipe);
    assert_eq!(view.ingredients.body, SectionBody::Notice(INGREDIENTS_FALLBACK));
    assert_eq!(view.steps.body, SectionBody::Notice(STEPS_FALLBACK));
}

#[test]
fn given_listings_of_the_wrong_shape_should_render_fallback_notices() {
    let shapes = [
        json!(null),
        json!("eggs, flour"),
        json!({ "name": "eggs" }),
        json!(3),
        json!(["eggs", "flour"]),
        json!([["a"]]),
        json!([{ "name": "eggs", "step": "Crack" }, ["flour", "1 cup"]]),
    ];

    for shape in shapes {
        let recipe = decode(json!({ "title": "Odd", "ingredients": shape, "steps": shape }));
        let view = render_recipe(&recipe);

        assert_eq!(
            view.ingredients.body,
            SectionBody::Notice(INGREDIENTS_FALLBACK),
            "ingredients {shape}"
        );
        assert_eq!(view.steps.body, SectionBody::Notice(STEPS_FALLBACK), "steps {shape}");
    }
}

#[test]
fn given_empty_listings_should_render_fallback_notices() {
    let recipe = Recipe {
        title: "Nothing".to_string(),
        ingredients: Listing::Present(Vec::new()),
        steps: Listing::Present(Vec::new()),
        ..Recipe::default()
    };

    let view = render_recipe(&recipe);

    assert_eq!(view.ingredients.body, SectionBody::Notice(INGREDIENTS_FALLBACK));
    assert_eq!(view.steps.body, SectionBody::Notice(STEPS_FALLBACK));
}

#[test]
fn given_entries_with_missing_fields_should_render_what_is_there() {
    let recipe = decode(json!({
        "title": null,
        "ingredients": [{ "name": "salt" }, { "name": "eggs", "quantity": 2 }],
        "steps": [{}]
    }));

    assert_eq!(recipe.title, "");
    assert_eq!(
        recipe.ingredients,
        Listing::Present(vec![
            Ingredient {
                name: "salt".to_string(),
                quantity: String::new()
            },
            Ingredient {
                name: "eggs".to_string(),
                quantity: "2".to_string()
            },
        ])
    );
    assert_eq!(recipe.steps, Listing::Present(vec![Step::default()]));

    let view = render_recipe(&recipe);
    assert_eq!(
        view.ingredients.body,
        SectionBody::Items(vec![" salt".to_string(), "2 eggs".to_string()])
    );
    assert_eq!(view.steps.body, SectionBody::Items(vec!["Step 1: ".to_string()]));
}

#[test]
fn given_steps_written_as_nested_arrays_should_render_the_fallback_notice() {
    let recipe = decode(json!({ "title": "Odd", "steps": [["a"]] }));

    assert_eq!(recipe.steps, Listing::Unavailable);
    assert_eq!(render_recipe(&recipe).steps.body, SectionBody::Notice(STEPS_FALLBACK));
}
