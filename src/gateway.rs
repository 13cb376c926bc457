//! Access to the remote recipe-generation service.

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{Client, Url};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::SubmissionError;
use crate::recipe::RecipeRequest;
use crate::response::GatewayResponse;

/// Sends a generation request and returns the raw response.
///
/// Any status counts as a response; only failing to get one at all is an
/// error. The returned future must not borrow the gateway, so the form can
/// move it into an effect.
pub trait RecipeGateway: Send + Sync {
    fn submit(&self, request: RecipeRequest)
        -> BoxFuture<'static, Result<GatewayResponse, SubmissionError>>;
}

/// [`RecipeGateway`] speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRecipeGateway {
    http_client: Client,
    endpoint: Url,
}

impl HttpRecipeGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, SubmissionError> {
        let endpoint =
            Url::parse(&config.endpoint).map_err(|e| SubmissionError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
                reason: e.to_string(),
            })?;

        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(SubmissionError::ClientBuild)?;

        Ok(Self {
            http_client,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl RecipeGateway for HttpRecipeGateway {
    fn submit(
        &self,
        request: RecipeRequest,
    ) -> BoxFuture<'static, Result<GatewayResponse, SubmissionError>> {
        let http_client = self.http_client.clone();
        let endpoint = self.endpoint.clone();

        async move {
            debug!(%endpoint, "posting recipe request");

            let response = http_client
                .post(endpoint)
                .header("Content-Type", "application/json")
                .json(&request)
                .send()
                .await
                .map_err(|e| SubmissionError::transport(e.to_string()))?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(SubmissionError::Body)?;

            debug!(status, bytes = body.len(), "recipe service responded");
            Ok(GatewayResponse { status, body })
        }
        .boxed()
    }
}
