//! Renderer abstraction for rendering Props.

#[cfg(any(test, feature = "testing"))]
use std::sync::Arc;

#[cfg(any(test, feature = "testing"))]
use spin::Mutex;

/// Renderer abstraction for rendering Props.
///
/// The runtime calls [`render`](Self::render) after every processed event with
/// fresh Props from [`MvuLogic::view`](crate::MvuLogic::view). The terminal
/// front-end ([`TerminalRenderer`](crate::TerminalRenderer)) is one
/// implementation; a browser or TUI binding would be another.
pub trait Renderer<Props> {
    /// Render the given props.
    ///
    /// Props may carry callbacks; keep them around to react to user input.
    fn render(&mut self, props: Props);
}

/// Test renderer that captures all rendered Props for assertions.
///
/// Only available with the `testing` feature. Clones share the same capture
/// buffer, so hand one clone to the runtime and keep another for assertions.
///
/// ```rust
/// use oxide_recipe::{AppProps, TestRenderer};
///
/// let renderer = TestRenderer::<AppProps>::new();
/// assert_eq!(renderer.count(), 0);
/// ```
#[cfg(any(test, feature = "testing"))]
pub struct TestRenderer<Props> {
    renders: Arc<Mutex<Vec<Props>>>,
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Clone for TestRenderer<Props> {
    fn clone(&self) -> Self {
        Self {
            renders: self.renders.clone(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Renderer<Props> for TestRenderer<Props> {
    fn render(&mut self, props: Props) {
        self.renders.lock().push(props);
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> Default for TestRenderer<Props> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<Props> TestRenderer<Props> {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of renders so far.
    pub fn count(&self) -> usize {
        self.renders.lock().len()
    }

    /// Access the captured renders with a closure.
    ///
    /// Use it to assert on Props or to invoke a captured callback, e.g.
    /// `renderer.with_renders(|r| (r[0].form.slots[0].on_change)("leek".into()))`.
    pub fn with_renders<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Vec<Props>) -> R,
    {
        let renders = self.renders.lock();
        f(&renders)
    }

    /// Access only the most recent render.
    ///
    /// Panics when nothing has been rendered yet.
    pub fn with_latest<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Props) -> R,
    {
        let renders = self.renders.lock();
        f(renders.last().expect("no props rendered yet"))
    }
}
