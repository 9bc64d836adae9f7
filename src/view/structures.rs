//! Generic view over a data structure operation

use super::ViewModel;
use crate::trace::structures::Structure;

/// The structure as of the current step, plus the steps that led there
///
/// Highlights are read off the trail by the renderer: the last step is the
/// current focus, and traversal panes shade everything visited so far.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureView<T: Structure> {
    before: T,
    pub current: T,
    pub trail: Vec<T::Step>,
}

impl<T: Structure> StructureView<T> {
    /// View of an operation that starts from `before`
    pub fn new(before: T) -> Self {
        StructureView {
            current: before.clone(),
            before,
            trail: Vec::new(),
        }
    }

    pub fn last(&self) -> Option<&T::Step> {
        self.trail.last()
    }
}

impl<T: Structure> ViewModel<T::Step> for StructureView<T> {
    fn reset(&mut self) {
        self.current.clone_from(&self.before);
        self.trail.clear();
    }

    fn apply(&mut self, step: &T::Step, _index: usize) {
        self.current.apply_step(step);
        self.trail.push(step.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::structures::bst::{BstOp, TreeStep};
    use crate::trace::structures::Bst;
    use crate::view::reduce;

    #[test]
    fn test_view_reaches_outcome_and_resets() {
        let before = Bst::sample();
        let outcome = before.run(&BstOp::Insert(33));
        let mut view = StructureView::new(before.clone());
        reduce(&mut view, &outcome.steps);
        assert_eq!(view.current, outcome.after);
        assert_eq!(view.last(), Some(&TreeStep::InsertDone { value: 33 }));

        view.reset();
        assert_eq!(view.current, before);
        assert!(view.trail.is_empty());
    }
}
