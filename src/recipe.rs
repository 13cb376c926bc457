//! Recipe entities and the request sent to the recipe service.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Body of the generation request.
///
/// Serializes as `{"recipe": {"ingredients": [...], "diet_type": "Keto" | null}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRequest {
    pub recipe: RecipeQuery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeQuery {
    pub ingredients: Vec<String>,
    pub diet_type: Option<String>,
}

impl RecipeRequest {
    pub fn new(ingredients: Vec<String>, diet_type: Option<String>) -> Self {
        Self {
            recipe: RecipeQuery {
                ingredients,
                diet_type,
            },
        }
    }
}

/// A generated recipe.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Recipe {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default)]
    pub ingredients: Listing<Ingredient>,
    #[serde(default)]
    pub steps: Listing<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Ingredient {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Step {
    #[serde(default, deserialize_with = "lenient_text")]
    pub step: String,
}

/// A list supplied by the recipe service that may be missing or malformed.
///
/// Decoding never fails: a missing field, `null`, a non-array, or an array
/// with an element that is not an object all become [`Listing::Unavailable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing<T> {
    Present(Vec<T>),
    Unavailable,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Listing::Unavailable
    }
}

impl<T> Listing<T> {
    /// The items, if there is at least one.
    pub fn items(&self) -> Option<&[T]> {
        match self {
            Listing::Present(items) if !items.is_empty() => Some(items),
            _ => None,
        }
    }
}

impl<T> From<Vec<T>> for Listing<T> {
    fn from(items: Vec<T>) -> Self {
        Listing::Present(items)
    }
}

impl<'de, T> Deserialize<'de> for Listing<T>
where
    T: serde::de::DeserializeOwned,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let well_formed = value
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_object));
        if !well_formed {
            return Ok(Listing::Unavailable);
        }

        Ok(serde_json::from_value::<Vec<T>>(value)
            .map(Listing::Present)
            .unwrap_or(Listing::Unavailable))
    }
}

/// Text fields tolerate `null` (empty) and non-string scalars (their JSON text).
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}
