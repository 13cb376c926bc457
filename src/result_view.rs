//! Display tree for a generated recipe.

use crate::recipe::{Listing, Recipe};

pub const INGREDIENTS_FALLBACK: &str = "No ingredients specified.";
pub const STEPS_FALLBACK: &str = "No steps provided.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeView {
    pub title: String,
    pub description: String,
    pub ingredients: SectionView,
    pub steps: SectionView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionView {
    pub heading: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionBody {
    Items(Vec<String>),
    Notice(&'static str),
}

/// Build the display tree for `recipe`.
///
/// Missing, malformed and empty listings render as a notice.
pub fn render_recipe(recipe: &Recipe) -> RecipeView {
    RecipeView {
        title: recipe.title.clone(),
        description: recipe.description.clone(),
        ingredients: section(
            "Ingredients:",
            &recipe.ingredients,
            INGREDIENTS_FALLBACK,
            |_, ingredient| format!("{} {}", ingredient.quantity, ingredient.name),
        ),
        steps: section(
            "Steps:",
            &recipe.steps,
            STEPS_FALLBACK,
            |index, step| format!("Step {}: {}", index + 1, step.step),
        ),
    }
}

fn section<T>(
    heading: &'static str,
    listing: &Listing<T>,
    fallback: &'static str,
    line: impl Fn(usize, &T) -> String,
) -> SectionView {
    let body = match listing.items() {
        Some(items) => SectionBody::Items(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| line(index, item))
                .collect(),
        ),
        None => SectionBody::Notice(fallback),
    };

    SectionView { heading, body }
}
