//! Configuration for the form and for the recipe service client.

use std::time::Duration;

/// Endpoint of a locally running recipe service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/v1/recipes";

/// Ordered diet labels offered next to the "no specific diet" option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DietOptions(Vec<String>);

impl DietOptions {
    /// Build from labels, dropping blanks and duplicates while keeping order.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for label in labels {
            let label = label.into().trim().to_string();
            if !label.is_empty() && !unique.contains(&label) {
                unique.push(label);
            }
        }
        Self(unique)
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    /// The configured label matching `label` exactly.
    pub fn find(&self, label: &str) -> Option<&str> {
        self.0.iter().map(String::as_str).find(|known| *known == label)
    }
}

impl Default for DietOptions {
    fn default() -> Self {
        Self::new(["Keto", "Vegan"])
    }
}

/// Limits and choices of the recipe form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormConfig {
    pub diets: DietOptions,
    /// Non-blank ingredients needed before submitting is allowed.
    pub min_ingredients: usize,
    /// Upper bound on ingredient slots.
    pub max_ingredients: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            diets: DietOptions::default(),
            min_ingredients: 2,
            max_ingredients: 10,
        }
    }
}

impl FormConfig {
    pub fn with_diets(mut self, diets: DietOptions) -> Self {
        self.diets = diets;
        self
    }

    pub fn with_max_ingredients(mut self, max: usize) -> Self {
        self.max_ingredients = max.max(1);
        self
    }

    pub fn with_min_ingredients(mut self, min: usize) -> Self {
        self.min_ingredients = min;
        self
    }
}

/// Where and how to reach the recipe service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(30),
            user_agent: format!("oxide-recipe/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
