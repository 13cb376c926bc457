use std::time::Duration;

use anyhow::Result;
use oxide_recipe::{
    settle, ClientConfig, HttpRecipeGateway, RecipeGateway, RecipeRequest, SubmissionError,
    SubmissionOutcome, NETWORK_FAILURE,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::support::shakshuka;

const RECIPES_PATH: &str = "/api/v1/recipes";

fn gateway_for(server: &MockServer) -> HttpRecipeGateway {
    let config = ClientConfig::default().with_endpoint(format!("{}{RECIPES_PATH}", server.uri()));
    HttpRecipeGateway::new(&config).expect("mock server uri is a valid endpoint")
}

fn request(ingredients: &[&str], diet: Option<&str>) -> RecipeRequest {
    RecipeRequest::new(
        ingredients.iter().map(|i| i.to_string()).collect(),
        diet.map(str::to_string),
    )
}

#[tokio::test]
async fn given_a_request_should_post_json_to_the_endpoint() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RECIPES_PATH))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "recipe": { "ingredients": ["eggs", "tomatoes"], "diet_type": "Vegan" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(shakshuka()))
        .expect(1)
        .mount(&server)
        .await;

    let response = gateway_for(&server)
        .submit(request(&["eggs", "tomatoes"], Some("Vegan")))
        .await?;

    assert_eq!(response.status, 200);
    let SubmissionOutcome::Recipe(recipe) = settle(Ok(response)) else {
        panic!("expected a recipe");
    };
    assert_eq!(recipe.title, "Shakshuka");
    Ok(())
}

#[tokio::test]
async fn given_no_diet_should_send_a_null_diet_type() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RECIPES_PATH))
        .and(body_json(json!({
            "recipe": { "ingredients": ["rice", "peas"], "diet_type": null }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(shakshuka()))
        .expect(1)
        .mount(&server)
        .await;

    gateway_for(&server)
        .submit(request(&["rice", "peas"], None))
        .await?;
    Ok(())
}

#[tokio::test]
async fn given_a_non_success_status_should_return_the_response() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RECIPES_PATH))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({ "errors": ["A", "B"] })))
        .mount(&server)
        .await;

    let response = gateway_for(&server)
        .submit(request(&["eggs", "leek"], None))
        .await?;

    assert_eq!(response.status, 422);
    assert!(!response.is_success());
    assert_eq!(
        settle(Ok(response)),
        SubmissionOutcome::Errors(vec!["A".to_string(), "B".to_string()])
    );
    Ok(())
}

#[tokio::test]
async fn given_a_non_json_error_page_should_settle_on_the_network_message() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Internal Server Error</h1>"))
        .mount(&server)
        .await;

    let response = gateway_for(&server)
        .submit(request(&["eggs", "leek"], None))
        .await?;

    assert_eq!(
        settle(Ok(response)),
        SubmissionOutcome::Errors(vec![NETWORK_FAILURE.to_string()])
    );
    Ok(())
}

#[tokio::test]
async fn given_a_slow_service_should_give_up_after_the_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(shakshuka())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    let config = ClientConfig::default()
        .with_endpoint(format!("{}{RECIPES_PATH}", server.uri()))
        .with_request_timeout(Duration::from_millis(100));
    let gateway = HttpRecipeGateway::new(&config).expect("valid endpoint");

    let result = gateway.submit(request(&["eggs", "leek"], None)).await;

    assert!(matches!(result, Err(SubmissionError::Transport { .. })));
}

#[tokio::test]
async fn given_nothing_listening_should_fail_with_a_transport_error() {
    let config = ClientConfig::default().with_endpoint("http://127.0.0.1:1/api/v1/recipes");
    let gateway = HttpRecipeGateway::new(&config).expect("valid endpoint");

    let result = gateway.submit(request(&["eggs", "leek"], None)).await;

    assert!(matches!(result, Err(SubmissionError::Transport { .. })));
    assert_eq!(
        settle(result),
        SubmissionOutcome::Errors(vec![NETWORK_FAILURE.to_string()])
    );
}

#[test]
fn given_an_unparseable_endpoint_should_refuse_to_build() {
    let config = ClientConfig::default().with_endpoint("not a url");

    let result = HttpRecipeGateway::new(&config);

    assert!(matches!(
        result,
        Err(SubmissionError::InvalidEndpoint { ref endpoint, .. }) if endpoint == "not a url"
    ));
}

#[test]
fn given_the_default_config_should_target_the_local_service() {
    let gateway = HttpRecipeGateway::new(&ClientConfig::default()).expect("default is valid");

    assert_eq!(gateway.endpoint().as_str(), "http://localhost:3000/api/v1/recipes");
}
