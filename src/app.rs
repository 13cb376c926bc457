//! The application shell: owns what is on display and composes the views.

use std::sync::Arc;

use tracing::debug;

use crate::config::FormConfig;
use crate::form::{FormCallbacks, FormEvent, FormModel, FormProps, RecipeForm};
use crate::gateway::RecipeGateway;
use crate::recipe::Recipe;
use crate::result_view::{render_recipe, RecipeView};
use crate::{Effect, Emitter, MvuLogic};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Form(FormEvent),
    RecipeReceived(Recipe),
    ErrorsReported(Vec<String>),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppModel {
    pub form: FormModel,
    pub recipe: Option<Recipe>,
    pub errors: Vec<String>,
}

pub struct ErrorPanel {
    pub heading: &'static str,
    pub messages: Vec<String>,
}

pub struct AppProps {
    pub headline: &'static str,
    pub tagline: &'static str,
    pub form: FormProps,
    /// Only present when there is at least one error.
    pub errors: Option<ErrorPanel>,
    /// Only present once a recipe was received.
    pub recipe: Option<RecipeView>,
}

/// The recipe application, ready to hand to an [`MvuRuntime`](crate::MvuRuntime).
pub struct RecipeApp {
    form: RecipeForm<AppEvent>,
}

impl RecipeApp {
    pub fn new(config: FormConfig, gateway: Arc<dyn RecipeGateway>) -> Self {
        let callbacks = FormCallbacks {
            on_result: AppEvent::RecipeReceived,
            on_error: AppEvent::ErrorsReported,
            on_reset: || AppEvent::Reset,
            forward: AppEvent::Form,
        };

        Self {
            form: RecipeForm::new(config, gateway, callbacks),
        }
    }

    pub fn initial_model(&self) -> AppModel {
        AppModel {
            form: self.form.initial_model(),
            recipe: None,
            errors: Vec::new(),
        }
    }
}

impl MvuLogic<AppEvent, AppModel, AppProps> for RecipeApp {
    fn init(&self, model: AppModel) -> (AppModel, Effect<AppEvent>) {
        (model, Effect::none())
    }

    fn update(&self, event: AppEvent, model: &AppModel) -> (AppModel, Effect<AppEvent>) {
        match event {
            AppEvent::Form(event) => {
                let (form, effect) = self.form.update(event, &model.form);
                let new_model = AppModel {
                    form,
                    ..model.clone()
                };
                (new_model, effect)
            }
            AppEvent::RecipeReceived(recipe) => {
                let new_model = AppModel {
                    recipe: Some(recipe),
                    ..model.clone()
                };
                (new_model, Effect::none())
            }
            AppEvent::ErrorsReported(errors) => {
                let new_model = AppModel {
                    errors,
                    ..model.clone()
                };
                (new_model, Effect::none())
            }
            AppEvent::Reset => {
                debug!("clearing displayed recipe and errors");
                let new_model = AppModel {
                    recipe: None,
                    errors: Vec::new(),
                    ..model.clone()
                };
                (new_model, Effect::none())
            }
        }
    }

    fn view(&self, model: &AppModel, emitter: &Emitter<AppEvent>) -> AppProps {
        AppProps {
            headline: "Let's create recipe!",
            tagline: "Provide a list of ingredients you have, any you don't want, \
                      and optionally choose your preferred diet type.",
            form: self.form.view(&model.form, emitter),
            errors: (!model.errors.is_empty()).then(|| ErrorPanel {
                heading: "Errors:",
                messages: model.errors.clone(),
            }),
            recipe: model.recipe.as_ref().map(render_recipe),
        }
    }
}
