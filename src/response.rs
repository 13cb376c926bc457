//! Interpretation of recipe service responses.
//!
//! The service is an external collaborator, so every shape it might send is
//! mapped to exactly one [`SubmissionOutcome`]; nothing here can fail the
//! application.

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::SubmissionError;
use crate::recipe::Recipe;

/// Shown for an error response that carries no usable `errors` field.
pub const GENERIC_FAILURE: &str = "Something went wrong";
/// Shown for a success response with neither `recipe` nor `errors`.
pub const NO_RECIPE_FOUND: &str = "No recipe found.";
/// Shown for transport failures and unreadable responses.
pub const NETWORK_FAILURE: &str = "Server/Network error";

/// Raw status and body as received from the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: String,
}

impl GatewayResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// What a settled submission means for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Recipe(Recipe),
    Errors(Vec<String>),
}

impl SubmissionOutcome {
    fn error(message: &str) -> Self {
        SubmissionOutcome::Errors(vec![message.to_string()])
    }
}

/// Settle a gateway result into an outcome, collapsing every failure into
/// [`NETWORK_FAILURE`].
pub fn settle(result: Result<GatewayResponse, SubmissionError>) -> SubmissionOutcome {
    match result.and_then(|response| interpret(&response)) {
        Ok(outcome) => outcome,
        Err(err) => {
            warn!(error = %err, "recipe submission failed");
            SubmissionOutcome::error(NETWORK_FAILURE)
        }
    }
}

/// Classify a response by status and body.
///
/// Fails only when the body is not JSON. A truthy `recipe` that is not an
/// object still counts as a recipe, just an empty one.
pub fn interpret(response: &GatewayResponse) -> Result<SubmissionOutcome, SubmissionError> {
    let body: Value = serde_json::from_str(&response.body)?;
    if body.is_null() {
        return Err(SubmissionError::MalformedBody(serde::de::Error::custom(
            "response body is null",
        )));
    }

    if !response.is_success() {
        let errors = match truthy_field(&body, "errors") {
            Some(errors) => error_list(errors),
            None => vec![GENERIC_FAILURE.to_string()],
        };
        return Ok(SubmissionOutcome::Errors(errors));
    }

    if let Some(recipe) = truthy_field(&body, "recipe") {
        let recipe = if recipe.is_object() {
            serde_json::from_value(recipe.clone()).map_err(SubmissionError::MalformedRecipe)?
        } else {
            debug!(%recipe, "recipe is not an object, showing an empty one");
            Recipe::default()
        };
        return Ok(SubmissionOutcome::Recipe(recipe));
    }

    if let Some(errors) = truthy_field(&body, "errors") {
        return Ok(SubmissionOutcome::Errors(error_list(errors)));
    }

    Ok(SubmissionOutcome::error(NO_RECIPE_FOUND))
}

/// Normalize an `errors` value into display strings.
///
/// Arrays map element-wise. A string holding a JSON array is decoded,
/// any other string is a single message. Anything else is shown as JSON text.
pub fn error_list(errors: &Value) -> Vec<String> {
    match errors {
        Value::Array(items) => items.iter().map(message_text).collect(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Array(items)) => items.iter().map(message_text).collect(),
            _ => vec![raw.clone()],
        },
        other => vec![other.to_string()],
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn truthy_field<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|value| is_truthy(value))
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy; arrays and
/// objects are truthy even when empty.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
