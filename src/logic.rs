//! Application logic trait defining the MVU contract.

use crate::{Effect, Emitter};

/// Application logic: three functions over an immutable model.
///
/// - [`init`](Self::init): prepare the starting model and any startup effect
/// - [`update`](Self::update): `(Event, &Model) -> (Model, Effect)`
/// - [`view`](Self::view): derive Props, wiring callbacks through the [`Emitter`]
///
/// [`RecipeApp`](crate::RecipeApp) is the implementation shipped with this crate.
pub trait MvuLogic<Event: Send, Model, Props> {
    /// Called once when the runtime starts.
    fn init(&self, model: Model) -> (Model, Effect<Event>);

    /// Reduce an event to an updated model and the effect to run next.
    ///
    /// All state changes happen here. Side effects are only described, via
    /// the returned [`Effect`].
    fn update(&self, event: Event, model: &Model) -> (Model, Effect<Event>);

    /// Reduce the model to renderable Props.
    ///
    /// Callbacks inside the Props emit events through `emitter`.
    fn view(&self, model: &Model, emitter: &Emitter<Event>) -> Props;
}
