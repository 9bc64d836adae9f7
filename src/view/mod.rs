//! Display state derived from step prefixes
//!
//! A view model is a reducer: [`ViewModel::reset`] returns it to the state
//! before any step, and [`ViewModel::apply`] folds in one step. Because the
//! engine replays every prefix from a reset, a view model never needs to
//! undo anything.
//!
//! [`Projector`] adapts a view model into an engine [`Observer`], and
//! [`reduce`] applies a whole prefix at once (used by tests and headless
//! summaries).

pub mod graph;
pub mod race;
pub mod searching;
pub mod sorting;
pub mod strings;
pub mod structures;

pub use graph::GraphView;
pub use race::{Race, RaceResult};
pub use searching::SearchView;
pub use sorting::SortView;
pub use strings::StringView;
pub use structures::StructureView;

use crate::engine::Observer;

/// Reducer from steps of type `S` to display state
pub trait ViewModel<S> {
    /// Return to the state before the first step
    fn reset(&mut self);

    /// Fold in the step at `index`
    fn apply(&mut self, step: &S, index: usize);
}

/// Engine observer that feeds a view model
#[derive(Debug, Clone)]
pub struct Projector<V> {
    view: V,
}

impl<V> Projector<V> {
    pub fn new(view: V) -> Self {
        Projector { view }
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}

impl<S, V: ViewModel<S>> Observer<S> for Projector<V> {
    fn on_step(&mut self, step: &S, index: usize) {
        self.view.apply(step, index);
    }

    fn on_reset(&mut self) {
        self.view.reset();
    }
}

/// Reset `view` and apply `steps` in order
pub fn reduce<S, V: ViewModel<S>>(view: &mut V, steps: &[S]) {
    view.reset();
    for (index, step) in steps.iter().enumerate() {
        view.apply(step, index);
    }
}
