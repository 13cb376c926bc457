//! A recipe-generation client built as a Model-View-Update (MVU) program.
//!
//! The user fills in ingredient slots and optionally picks a diet; submitting
//! sends one request to the recipe service, and the shell shows either the
//! returned recipe or a list of errors.
//!
//! The crate ships its own small MVU runtime: [`MvuLogic`] describes the
//! program, [`Effect`] describes deferred work, [`Renderer`] receives Props and
//! [`MvuRuntime`] drives the loop. [`RecipeApp`] is the program.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use futures::future::BoxFuture;
//! use oxide_recipe::{
//!     ClientConfig, Controls, FormConfig, HttpRecipeGateway, MvuRuntime, RecipeApp,
//!     TerminalRenderer,
//! };
//!
//! # async fn start() -> Result<(), oxide_recipe::SubmissionError> {
//! let gateway = HttpRecipeGateway::new(&ClientConfig::default())?;
//! let app = RecipeApp::new(FormConfig::default(), Arc::new(gateway));
//! let renderer = TerminalRenderer::new(std::io::stdout(), Controls::new());
//!
//! let spawner = |task: BoxFuture<'static, ()>| {
//!     tokio::spawn(task);
//! };
//! let mut runtime = MvuRuntime::new(app.initial_model(), app, renderer, spawner);
//! runtime.run().await;
//! # Ok(())
//! # }
//! ```

mod app;
mod config;
mod effect;
mod emitter;
mod error;
mod form;
mod gateway;
mod logic;
mod recipe;
mod renderer;
mod response;
mod result_view;
mod runtime;
mod terminal;

// MVU runtime
pub use effect::Effect;
pub use emitter::Emitter;
pub use logic::MvuLogic;
pub use renderer::Renderer;
pub use runtime::{MvuRuntime, Spawner};

// Recipe application
pub use app::{AppEvent, AppModel, AppProps, ErrorPanel, RecipeApp};
pub use config::{ClientConfig, DietOptions, FormConfig, DEFAULT_ENDPOINT};
pub use error::{CommandError, SubmissionError};
pub use form::{
    Callback, DietChoiceProps, FormCallbacks, FormEvent, FormModel, FormProps, IngredientFields,
    IngredientSlotProps, RecipeForm, SubmissionState, SubmitProps,
};
pub use gateway::{HttpRecipeGateway, RecipeGateway};
pub use recipe::{Ingredient, Listing, Recipe, RecipeQuery, RecipeRequest, Step};
pub use response::{
    error_list, interpret, settle, GatewayResponse, SubmissionOutcome, GENERIC_FAILURE,
    NETWORK_FAILURE, NO_RECIPE_FOUND,
};
pub use result_view::{
    render_recipe, RecipeView, SectionBody, SectionView, INGREDIENTS_FALLBACK, STEPS_FALLBACK,
};
pub use terminal::{write_screen, Command, Controls, TerminalRenderer, HELP};

// Test utilities (only available with 'testing' feature or during tests)
#[cfg(any(test, feature = "testing"))]
pub use renderer::TestRenderer;
#[cfg(any(test, feature = "testing"))]
pub use runtime::{create_test_spawner, ManualSpawner, TestMvuDriver, TestMvuRuntime};
