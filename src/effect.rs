//! Declarative effect system for describing deferred event production.

use core::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::Emitter;

type Job<Event> = Box<dyn FnOnce(Emitter<Event>) -> BoxFuture<'static, ()> + Send + 'static>;

/// Declarative description of work that will produce events.
///
/// Effects are returned from [`MvuLogic::init`](crate::MvuLogic::init) and
/// [`MvuLogic::update`](crate::MvuLogic::update) alongside the new model, so
/// `update` itself stays pure: a recipe request is described here, never
/// performed there.
///
/// Events from [`Effect::just`] are queued as soon as the runtime executes the
/// effect, right after the update that returned it. Work from [`Effect::task`]
/// is handed to the runtime's [`Spawner`](crate::Spawner) as one future.
///
/// # Example
///
/// ```rust
/// use oxide_recipe::Effect;
///
/// enum Event {
///     Cleared,
///     Loaded(String),
/// }
///
/// let effect = Effect::batch(vec![
///     Effect::just(Event::Cleared),
///     Effect::task(|emitter| async move {
///         emitter.emit(Event::Loaded("Shakshuka".to_string()));
///     }),
/// ]);
/// # let _ = effect;
/// ```
pub struct Effect<Event: Send> {
    events: Vec<Event>,
    jobs: Vec<Job<Event>>,
}

impl<Event: Send + 'static> Effect<Event> {
    /// No side effects.
    pub fn none() -> Self {
        Self {
            events: Vec::new(),
            jobs: Vec::new(),
        }
    }

    /// Queue a single follow-up event.
    pub fn just(event: Event) -> Self {
        Self {
            events: vec![event],
            jobs: Vec::new(),
        }
    }

    /// Run asynchronous work that may emit any number of events.
    ///
    /// The closure receives its own [`Emitter`] handle and is only invoked
    /// when the spawned future is first polled.
    pub fn task<F, Fut>(work: F) -> Self
    where
        F: FnOnce(Emitter<Event>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let job: Job<Event> = Box::new(move |emitter| work(emitter).boxed());
        Self {
            events: Vec::new(),
            jobs: vec![job],
        }
    }

    /// Combine effects into one.
    ///
    /// All immediate events are queued in the given order; the tasks then run
    /// one after another, also in the given order.
    pub fn batch(effects: Vec<Effect<Event>>) -> Self {
        effects
            .into_iter()
            .fold(Self::none(), |mut combined, effect| {
                combined.events.extend(effect.events);
                combined.jobs.extend(effect.jobs);
                combined
            })
    }

    /// Whether executing this effect would do anything at all.
    pub fn is_none(&self) -> bool {
        self.events.is_empty() && self.jobs.is_empty()
    }

    /// Queue the immediate events on `emitter` and return the task work, if
    /// any, as a single future to spawn.
    pub fn execute(self, emitter: &Emitter<Event>) -> Option<BoxFuture<'static, ()>> {
        for event in self.events {
            emitter.emit(event);
        }

        if self.jobs.is_empty() {
            return None;
        }

        let emitter = emitter.clone();
        let jobs = self.jobs;
        Some(
            async move {
                for job in jobs {
                    job(emitter.clone()).await;
                }
            }
            .boxed(),
        )
    }
}
