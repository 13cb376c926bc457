//! Event emitter for embedding callbacks in Props.

use flume::Sender;

/// Event emitter that can be embedded in Props.
///
/// Every callback a view hands out (ingredient edits, diet selection, submit)
/// captures a clone of this handle. Cloning is cheap; sending never blocks
/// because the runtime's queue is unbounded.
///
/// # Example
///
/// ```rust
/// use oxide_recipe::{AppEvent, Emitter, FormEvent};
///
/// fn on_submit(emitter: &Emitter<AppEvent>) -> Box<dyn Fn() + Send> {
///     let emitter = emitter.clone();
///     Box::new(move || emitter.emit(AppEvent::Form(FormEvent::Submitted)))
/// }
/// # let _ = on_submit;
/// ```
pub struct Emitter<Event: Send>(pub(crate) Sender<Event>);

impl<Event: Send> Clone for Emitter<Event> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Event: Send> Emitter<Event> {
    pub(crate) fn new(sender: Sender<Event>) -> Self {
        Self(sender)
    }

    /// Queue an event for the runtime.
    ///
    /// Events emitted after the runtime is gone are dropped.
    pub fn emit(&self, event: Event) {
        if self.0.send(event).is_err() {
            tracing::debug!("event dropped, runtime no longer listening");
        }
    }
}
