//! Error types.

use thiserror::Error;

/// Why a submission never produced an interpretable response.
///
/// None of these reach the user verbatim: the form collapses every variant
/// into one generic message and logs the details.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("invalid recipe service endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("request to recipe service failed: {reason}")]
    Transport { reason: String },

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("recipe service returned malformed JSON: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("recipe service returned an unusable recipe: {0}")]
    MalformedRecipe(#[source] serde_json::Error),
}

impl SubmissionError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }
}

/// A terminal command that could not be parsed or carried out.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}, type `help` for the list")]
    Unknown(String),

    #[error("`{command}` expects {expected}")]
    Usage {
        command: &'static str,
        expected: &'static str,
    },

    #[error("no ingredient slot #{0}")]
    NoSuchSlot(usize),

    #[error("unknown diet {0:?}")]
    UnknownDiet(String),

    #[error("the ingredient list is already full")]
    SlotsFull,

    #[error("submitting needs enough ingredients and no request in flight")]
    SubmitDisabled,

    #[error("nothing rendered yet")]
    NotReady,
}
