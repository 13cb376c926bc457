//! The MVU runtime that orchestrates the event loop.

use futures::future::BoxFuture;
#[cfg(any(test, feature = "testing"))]
use futures::FutureExt;

#[cfg(any(test, feature = "testing"))]
use std::sync::Arc;

use flume::Receiver;

use crate::{Effect, Emitter, MvuLogic, Renderer};

/// Executes effect futures on an async runtime.
///
/// The binary spawns onto tokio; tests either block on each future
/// ([`create_test_spawner`]) or hold them back ([`ManualSpawner`]).
///
/// Closures and function pointers implement this trait via the blanket impl.
pub trait Spawner {
    fn spawn(&self, future: BoxFuture<'static, ()>);
}

impl<F> Spawner for F
where
    F: Fn(BoxFuture<'static, ()>),
{
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        self(future)
    }
}

/// The MVU runtime.
///
/// 1. Initializes the model and startup effect via [`MvuLogic::init`]
/// 2. Processes each queued event through [`MvuLogic::update`]
/// 3. Reduces the new model to Props via [`MvuLogic::view`]
/// 4. Hands the Props to the [`Renderer`]
/// 5. Executes the returned [`Effect`]: immediate events are queued, tasks spawned
///
/// Events may be emitted from any thread; they are always processed one at a
/// time, in arrival order, on the task awaiting [`MvuRuntime::run`].
pub struct MvuRuntime<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send,
    Model: Clone,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    logic: Logic,
    renderer: Render,
    event_receiver: Receiver<Event>,
    model: Model,
    emitter: Emitter<Event>,
    spawner: Spawn,
    _props: core::marker::PhantomData<Props>,
}

impl<Event, Model, Props, Logic, Render, Spawn>
    MvuRuntime<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    /// Create a new runtime. Nothing happens until [`run`](Self::run) is awaited.
    pub fn new(init_model: Model, logic: Logic, renderer: Render, spawner: Spawn) -> Self {
        let (event_sender, event_receiver) = flume::unbounded();

        MvuRuntime {
            logic,
            renderer,
            event_receiver,
            model: init_model,
            emitter: Emitter::new(event_sender),
            spawner,
            _props: core::marker::PhantomData,
        }
    }

    /// A handle for feeding events from outside the view.
    pub fn emitter(&self) -> Emitter<Event> {
        self.emitter.clone()
    }

    /// Render the initial state, then process events until the queue closes.
    ///
    /// The runtime keeps an emitter of its own, so in practice this only
    /// returns when the future is dropped.
    pub async fn run(&mut self) {
        self.start();

        while let Ok(event) = self.event_receiver.recv_async().await {
            self.step(event);
        }
    }

    fn start(&mut self) {
        let (init_model, init_effect) = self.logic.init(self.model.clone());
        self.model = init_model;

        let initial_props = self.logic.view(&self.model, &self.emitter);
        self.renderer.render(initial_props);

        self.spawn(init_effect);
    }

    fn step(&mut self, event: Event) {
        let (new_model, effect) = self.logic.update(event, &self.model);

        let props = self.logic.view(&new_model, &self.emitter);
        self.renderer.render(props);

        self.model = new_model;

        self.spawn(effect);
    }

    fn spawn(&self, effect: Effect<Event>) {
        if let Some(future) = effect.execute(&self.emitter) {
            self.spawner.spawn(future);
        }
    }
}

/// Spawner function that blocks on each future right away.
#[cfg(any(test, feature = "testing"))]
pub fn test_spawner_fn(fut: BoxFuture<'static, ()>) {
    futures::executor::block_on(fut);
}

/// Creates a spawner that executes effects synchronously.
///
/// Every effect has fully run, and its events are queued, by the time
/// [`TestMvuDriver::process_events`] moves on to the next event.
#[cfg(any(test, feature = "testing"))]
pub fn create_test_spawner() -> fn(BoxFuture<'static, ()>) {
    test_spawner_fn
}

/// Spawner that holds effect futures until the test polls them.
///
/// Lets a test observe the state between "request sent" and "response
/// arrived". Each [`poll_pending`](Self::poll_pending) call polls every held
/// future once, in spawn order, and drops the ones that completed.
#[cfg(any(test, feature = "testing"))]
#[derive(Clone, Default)]
pub struct ManualSpawner {
    tasks: Arc<spin::Mutex<Vec<BoxFuture<'static, ()>>>>,
}

#[cfg(any(test, feature = "testing"))]
impl ManualSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Poll every held future once. Returns how many are still pending.
    pub fn poll_pending(&self) -> usize {
        let mut tasks = core::mem::take(&mut *self.tasks.lock());

        let waker = futures::task::noop_waker();
        let mut cx = core::task::Context::from_waker(&waker);
        tasks.retain_mut(|task| task.poll_unpin(&mut cx).is_pending());

        let mut queue = self.tasks.lock();
        tasks.append(&mut queue);
        *queue = tasks;
        queue.len()
    }

    /// Number of futures spawned but not yet completed.
    pub fn pending(&self) -> usize {
        self.tasks.lock().len()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Spawner for ManualSpawner {
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        self.tasks.lock().push(future);
    }
}

/// Driver for a started [`TestMvuRuntime`].
///
/// Events are only processed when [`process_events`](Self::process_events)
/// is called, which gives tests precise control over timing.
#[cfg(any(test, feature = "testing"))]
pub struct TestMvuDriver<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    runtime: MvuRuntime<Event, Model, Props, Logic, Render, Spawn>,
}

#[cfg(any(test, feature = "testing"))]
impl<Event, Model, Props, Logic, Render, Spawn>
    TestMvuDriver<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    /// Process queued events until the queue is empty, including events
    /// queued while processing.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.runtime.event_receiver.try_recv() {
            self.runtime.step(event);
        }
    }

    /// Emit an event directly, bypassing the Props callbacks.
    pub fn emitter(&self) -> Emitter<Event> {
        self.runtime.emitter()
    }

    /// The current model.
    pub fn model(&self) -> &Model {
        &self.runtime.model
    }
}

/// Test runtime with manual event processing.
///
/// Unlike [`MvuRuntime`], emitted events sit in the queue until the test
/// calls [`TestMvuDriver::process_events`].
///
/// ```rust
/// use std::sync::Arc;
///
/// use futures::future::BoxFuture;
/// use oxide_recipe::{
///     create_test_spawner, FormConfig, GatewayResponse, RecipeApp, RecipeGateway,
///     RecipeRequest, SubmissionError, TestMvuRuntime, TestRenderer,
/// };
///
/// struct Offline;
///
/// impl RecipeGateway for Offline {
///     fn submit(
///         &self,
///         _request: RecipeRequest,
///     ) -> BoxFuture<'static, Result<GatewayResponse, SubmissionError>> {
///         Box::pin(async { Err(SubmissionError::transport("offline")) })
///     }
/// }
///
/// let app = RecipeApp::new(FormConfig::default(), Arc::new(Offline));
/// let renderer = TestRenderer::new();
/// let model = app.initial_model();
/// let runtime = TestMvuRuntime::new(model, app, renderer.clone(), create_test_spawner());
/// let mut driver = runtime.run();
/// driver.process_events();
///
/// assert_eq!(renderer.count(), 1);
/// ```
#[cfg(any(test, feature = "testing"))]
pub struct TestMvuRuntime<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    runtime: MvuRuntime<Event, Model, Props, Logic, Render, Spawn>,
}

#[cfg(any(test, feature = "testing"))]
impl<Event, Model, Props, Logic, Render, Spawn>
    TestMvuRuntime<Event, Model, Props, Logic, Render, Spawn>
where
    Event: Send + 'static,
    Model: Clone + 'static,
    Props: 'static,
    Logic: MvuLogic<Event, Model, Props>,
    Render: Renderer<Props>,
    Spawn: Spawner,
{
    pub fn new(init_model: Model, logic: Logic, renderer: Render, spawner: Spawn) -> Self {
        TestMvuRuntime {
            runtime: MvuRuntime::new(init_model, logic, renderer, spawner),
        }
    }

    /// Render the initial state, spawn the startup effect and hand back a driver.
    pub fn run(mut self) -> TestMvuDriver<Event, Model, Props, Logic, Render, Spawn> {
        self.runtime.start();

        TestMvuDriver {
            runtime: self.runtime,
        }
    }
}
