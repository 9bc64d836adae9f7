//! Observer contract between the engine and whatever displays its steps

/// Receives playback notifications from an [`Engine`](super::Engine)
///
/// Payloads are borrowed from the engine's immutable step sequence; an
/// observer that wants to keep one must clone it.
pub trait Observer<S> {
    /// A step was applied. During seeks and backward steps this is called
    /// once per replayed step, in index order, after an [`on_reset`].
    ///
    /// [`on_reset`]: Observer::on_reset
    fn on_step(&mut self, step: &S, index: usize);

    /// Autoplay reached the final step
    fn on_complete(&mut self) {}

    /// The cursor went back to before the first step
    fn on_reset(&mut self) {}
}

type StepFn<S> = Box<dyn FnMut(&S, usize)>;
type EventFn = Box<dyn FnMut()>;

/// Observer made of three optional closure slots
///
/// This is the default observer of an engine; register closures with
/// [`Engine::on_step`](super::Engine::on_step) and friends. Empty slots
/// swallow their notification.
pub struct Callbacks<S> {
    step: Option<StepFn<S>>,
    complete: Option<EventFn>,
    reset: Option<EventFn>,
}

impl<S> Callbacks<S> {
    pub fn new() -> Self {
        Callbacks {
            step: None,
            complete: None,
            reset: None,
        }
    }

    pub fn set_step(&mut self, f: impl FnMut(&S, usize) + 'static) {
        self.step = Some(Box::new(f));
    }

    pub fn set_complete(&mut self, f: impl FnMut() + 'static) {
        self.complete = Some(Box::new(f));
    }

    pub fn set_reset(&mut self, f: impl FnMut() + 'static) {
        self.reset = Some(Box::new(f));
    }
}

impl<S> Default for Callbacks<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for Callbacks<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("step", &self.step.is_some())
            .field("complete", &self.complete.is_some())
            .field("reset", &self.reset.is_some())
            .finish()
    }
}

impl<S> Observer<S> for Callbacks<S> {
    fn on_step(&mut self, step: &S, index: usize) {
        if let Some(f) = self.step.as_mut() {
            f(step, index);
        }
    }

    fn on_complete(&mut self) {
        if let Some(f) = self.complete.as_mut() {
            f();
        }
    }

    fn on_reset(&mut self) {
        if let Some(f) = self.reset.as_mut() {
            f();
        }
    }
}

/// One notification as seen by an observer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<S> {
    Step(usize, S),
    Complete,
    Reset,
}

/// Observer that records every notification it receives
#[derive(Debug, Clone)]
pub struct Recorder<S> {
    pub events: Vec<Notification<S>>,
}

impl<S> Recorder<S> {
    pub fn new() -> Self {
        Recorder { events: Vec::new() }
    }

    /// Take the recorded events, leaving the recorder empty
    pub fn drain(&mut self) -> Vec<Notification<S>> {
        std::mem::take(&mut self.events)
    }

    pub fn resets(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Notification::Reset))
            .count()
    }
}

impl<S> Default for Recorder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Clone> Observer<S> for Recorder<S> {
    fn on_step(&mut self, step: &S, index: usize) {
        self.events.push(Notification::Step(index, step.clone()));
    }

    fn on_complete(&mut self) {
        self.events.push(Notification::Complete);
    }

    fn on_reset(&mut self) {
        self.events.push(Notification::Reset);
    }
}
