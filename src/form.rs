//! The recipe form: ingredient slots, diet choice and the submission lifecycle.
//!
//! The form never touches the display state of the application. It reports
//! through [`FormCallbacks`], each of which turns a form outcome into an event
//! of the embedding application.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::FormConfig;
use crate::gateway::RecipeGateway;
use crate::recipe::{Recipe, RecipeRequest};
use crate::response::{self, SubmissionOutcome};
use crate::{Effect, Emitter};

/// A Props callback without arguments.
pub type Callback = Box<dyn Fn() + Send>;

/// How the form talks to its parent.
///
/// `on_reset` fires first on every accepted submit; exactly one of
/// `on_result`/`on_error` fires once that submission settles. `forward` lifts
/// the form's own events into the parent event type.
pub struct FormCallbacks<E> {
    pub on_result: fn(Recipe) -> E,
    pub on_error: fn(Vec<String>) -> E,
    pub on_reset: fn() -> E,
    pub forward: fn(FormEvent) -> E,
}

impl<E> Clone for FormCallbacks<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for FormCallbacks<E> {}

/// Ordered ingredient slots, capped at a maximum count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientFields {
    slots: Vec<String>,
    max: usize,
}

impl IngredientFields {
    /// One empty slot to start with.
    pub fn new(max: usize) -> Self {
        Self {
            slots: vec![String::new()],
            max: max.max(1),
        }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn can_add(&self) -> bool {
        self.slots.len() < self.max
    }

    /// Append an empty slot. Returns `false` when already at the maximum.
    pub fn add(&mut self) -> bool {
        if !self.can_add() {
            return false;
        }
        self.slots.push(String::new());
        true
    }

    /// Remove the slot at `index`, shifting the rest up.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.slots.len() {
            return false;
        }
        self.slots.remove(index);
        true
    }

    /// Replace the text of the slot at `index`.
    pub fn edit(&mut self, index: usize, text: impl Into<String>) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    /// Entries that are not blank, verbatim and in slot order.
    pub fn non_blank(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter(|slot| !slot.trim().is_empty())
            .cloned()
            .collect()
    }

    pub fn non_blank_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.trim().is_empty()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Loading { submission: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModel {
    pub ingredients: IngredientFields,
    /// Selected diet label; `None` means no specific diet.
    pub diet: Option<String>,
    pub state: SubmissionState,
    last_submission: u64,
}

impl FormModel {
    pub fn new(config: &FormConfig) -> Self {
        Self {
            ingredients: IngredientFields::new(config.max_ingredients),
            diet: None,
            state: SubmissionState::Idle,
            last_submission: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SubmissionState::Loading { .. })
    }

    /// Token of the most recently accepted submission, `0` before the first.
    pub fn last_submission(&self) -> u64 {
        self.last_submission
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    IngredientAdded,
    IngredientRemoved(usize),
    IngredientEdited { index: usize, text: String },
    DietSelected(Option<String>),
    Submitted,
    /// A submission finished. Ignored unless `submission` is the one in flight.
    Settled {
        submission: u64,
        outcome: SubmissionOutcome,
    },
}

pub struct DietChoiceProps {
    /// Label sent to the service, `None` for the "no specific diet" entry.
    pub value: Option<String>,
    pub text: String,
    pub selected: bool,
    pub on_select: Callback,
}

pub struct IngredientSlotProps {
    pub placeholder: String,
    pub value: String,
    pub on_change: Box<dyn Fn(String) + Send>,
    pub on_remove: Callback,
}

pub struct SubmitProps {
    pub text: &'static str,
    pub enabled: bool,
    pub loading: bool,
    /// Only present while submitting is allowed.
    pub on_submit: Option<Callback>,
}

pub struct FormProps {
    pub diet_heading: &'static str,
    pub diet_choices: Vec<DietChoiceProps>,
    pub ingredients_heading: String,
    pub slots: Vec<IngredientSlotProps>,
    /// Only present below the slot limit.
    pub on_add: Option<Callback>,
    pub submit: SubmitProps,
}

/// The form controller.
pub struct RecipeForm<E> {
    config: FormConfig,
    gateway: Arc<dyn RecipeGateway>,
    callbacks: FormCallbacks<E>,
}

impl<E: Send + 'static> RecipeForm<E> {
    pub fn new(
        config: FormConfig,
        gateway: Arc<dyn RecipeGateway>,
        callbacks: FormCallbacks<E>,
    ) -> Self {
        Self {
            config,
            gateway,
            callbacks,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn initial_model(&self) -> FormModel {
        FormModel::new(&self.config)
    }

    /// Idle and holding enough non-blank ingredients.
    pub fn can_submit(&self, model: &FormModel) -> bool {
        !model.is_loading() && model.ingredients.non_blank_count() >= self.config.min_ingredients
    }

    pub fn update(&self, event: FormEvent, model: &FormModel) -> (FormModel, Effect<E>) {
        let mut next = model.clone();

        match event {
            FormEvent::IngredientAdded => {
                if !next.ingredients.add() {
                    debug!(max = self.config.max_ingredients, "ingredient slots full");
                }
            }
            FormEvent::IngredientRemoved(index) => {
                if !next.ingredients.remove(index) {
                    debug!(index, "no ingredient slot to remove");
                }
            }
            FormEvent::IngredientEdited { index, text } => {
                if !next.ingredients.edit(index, text) {
                    debug!(index, "no ingredient slot to edit");
                }
            }
            FormEvent::DietSelected(None) => next.diet = None,
            FormEvent::DietSelected(Some(label)) => match self.config.diets.find(&label) {
                Some(known) => next.diet = Some(known.to_string()),
                None => warn!(%label, "ignoring unknown diet"),
            },
            FormEvent::Submitted => return self.submit(model),
            FormEvent::Settled {
                submission,
                outcome,
            } => return self.settle(model, submission, outcome),
        }

        (next, Effect::none())
    }

    fn submit(&self, model: &FormModel) -> (FormModel, Effect<E>) {
        if !self.can_submit(model) {
            debug!(
                loading = model.is_loading(),
                ingredients = model.ingredients.non_blank_count(),
                "submit ignored"
            );
            return (model.clone(), Effect::none());
        }

        let submission = model.last_submission + 1;
        let request = RecipeRequest::new(model.ingredients.non_blank(), model.diet.clone());
        info!(
            submission,
            ingredients = request.recipe.ingredients.len(),
            diet = ?request.recipe.diet_type,
            "submitting recipe request"
        );

        let mut next = model.clone();
        next.last_submission = submission;
        next.state = SubmissionState::Loading { submission };

        let gateway = Arc::clone(&self.gateway);
        let forward = self.callbacks.forward;
        let effect = Effect::batch(vec![
            Effect::just((self.callbacks.on_reset)()),
            Effect::task(move |emitter| async move {
                let outcome = response::settle(gateway.submit(request).await);
                emitter.emit(forward(FormEvent::Settled {
                    submission,
                    outcome,
                }));
            }),
        ]);

        (next, effect)
    }

    fn settle(
        &self,
        model: &FormModel,
        submission: u64,
        outcome: SubmissionOutcome,
    ) -> (FormModel, Effect<E>) {
        if model.state != (SubmissionState::Loading { submission }) {
            debug!(submission, state = ?model.state, "dropping stale settlement");
            return (model.clone(), Effect::none());
        }

        let mut next = model.clone();
        next.state = SubmissionState::Idle;

        let report = match outcome {
            SubmissionOutcome::Recipe(recipe) => {
                info!(submission, title = %recipe.title, "recipe received");
                (self.callbacks.on_result)(recipe)
            }
            SubmissionOutcome::Errors(errors) => {
                info!(submission, count = errors.len(), "submission reported errors");
                (self.callbacks.on_error)(errors)
            }
        };

        (next, Effect::just(report))
    }

    pub fn view(&self, model: &FormModel, emitter: &Emitter<E>) -> FormProps {
        let forward = self.callbacks.forward;
        let send = move |event: FormEvent| -> Callback {
            let emitter = emitter.clone();
            Box::new(move || emitter.emit(forward(event.clone())))
        };

        let mut diet_choices = vec![DietChoiceProps {
            value: None,
            text: "-- No specific diet --".to_string(),
            selected: model.diet.is_none(),
            on_select: send(FormEvent::DietSelected(None)),
        }];
        diet_choices.extend(self.config.diets.labels().iter().map(|label| DietChoiceProps {
            value: Some(label.clone()),
            text: label.clone(),
            selected: model.diet.as_deref() == Some(label.as_str()),
            on_select: send(FormEvent::DietSelected(Some(label.clone()))),
        }));

        let slots = model
            .ingredients
            .slots()
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let emitter = emitter.clone();
                IngredientSlotProps {
                    placeholder: format!("Ingredient #{}", index + 1),
                    value: value.clone(),
                    on_change: Box::new(move |text: String| {
                        emitter.emit(forward(FormEvent::IngredientEdited { index, text }))
                    }),
                    on_remove: send(FormEvent::IngredientRemoved(index)),
                }
            })
            .collect();

        let enabled = self.can_submit(model);
        let loading = model.is_loading();

        FormProps {
            diet_heading: "Diet Type (Optional):",
            diet_choices,
            ingredients_heading: format!(
                "Ingredients (min. {} required)",
                self.config.min_ingredients
            ),
            slots,
            on_add: model
                .ingredients
                .can_add()
                .then(|| send(FormEvent::IngredientAdded)),
            submit: SubmitProps {
                text: if loading { "Loading..." } else { "Create" },
                enabled,
                loading,
                on_submit: enabled.then(|| send(FormEvent::Submitted)),
            },
        }
    }
}
