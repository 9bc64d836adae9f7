//! Bar-chart state for sorting traces

use super::ViewModel;
use crate::trace::sorting::{SortKind, SortStep};
use rustc_hash::FxHashMap;

/// Highlight of a single bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarState {
    Compare,
    Swap,
    Overwrite,
    Partition,
    Bucket,
    /// In its final position; survives every later step
    Sorted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortView {
    initial: Vec<u32>,
    pub array: Vec<u32>,
    pub states: FxHashMap<usize, BarState>,
    pub comparisons: usize,
    pub swaps: usize,
    pub writes: usize,
}

impl SortView {
    pub fn new(initial: Vec<u32>) -> Self {
        SortView {
            array: initial.clone(),
            initial,
            states: FxHashMap::default(),
            comparisons: 0,
            swaps: 0,
            writes: 0,
        }
    }

    pub fn state(&self, index: usize) -> Option<BarState> {
        self.states.get(&index).copied()
    }

    pub fn sorted_count(&self) -> usize {
        self.states
            .values()
            .filter(|s| **s == BarState::Sorted)
            .count()
    }
}

impl ViewModel<SortStep> for SortView {
    fn reset(&mut self) {
        self.array.clone_from(&self.initial);
        self.states.clear();
        self.comparisons = 0;
        self.swaps = 0;
        self.writes = 0;
    }

    fn apply(&mut self, step: &SortStep, _index: usize) {
        self.states.retain(|_, s| *s == BarState::Sorted);
        self.array.clone_from(&step.array);

        let mark = match step.kind {
            SortKind::Compare => {
                self.comparisons += 1;
                Some(BarState::Compare)
            }
            SortKind::Swap => {
                self.swaps += 1;
                Some(BarState::Swap)
            }
            SortKind::Overwrite => {
                self.writes += 1;
                Some(BarState::Overwrite)
            }
            SortKind::Sorted => Some(BarState::Sorted),
            SortKind::Partition => Some(BarState::Partition),
            SortKind::Bucket => Some(BarState::Bucket),
            SortKind::MergeSplit => None,
        };

        match mark {
            Some(BarState::Sorted) => {
                for &i in &step.indices {
                    self.states.insert(i, BarState::Sorted);
                }
            }
            Some(state) => {
                for &i in &step.indices {
                    let slot = self.states.entry(i).or_insert(state);
                    if *slot != BarState::Sorted {
                        *slot = state;
                    }
                }
            }
            // `[left, mid, right]`: shade the whole range being merged
            None => {
                if let (Some(&left), Some(&right)) = (step.indices.first(), step.indices.last()) {
                    for i in left..=right {
                        self.states.entry(i).or_insert(BarState::Compare);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::sorting::{self, SortInput};
    use crate::view::reduce;

    #[test]
    fn test_sorted_marks_survive_later_steps() {
        let mut view = SortView::new(vec![2, 1]);
        view.apply(
            &SortStep {
                kind: SortKind::Sorted,
                indices: vec![1],
                array: vec![1, 2],
            },
            0,
        );
        view.apply(
            &SortStep {
                kind: SortKind::Compare,
                indices: vec![0, 1],
                array: vec![1, 2],
            },
            1,
        );
        assert_eq!(view.state(0), Some(BarState::Compare));
        assert_eq!(view.state(1), Some(BarState::Sorted));

        view.apply(
            &SortStep {
                kind: SortKind::Swap,
                indices: vec![0],
                array: vec![1, 2],
            },
            2,
        );
        assert_eq!(view.state(0), Some(BarState::Swap));
        assert_eq!(view.state(1), Some(BarState::Sorted));
        assert_eq!(view.comparisons, 1);
        assert_eq!(view.swaps, 1);
    }

    #[test]
    fn test_full_trace_ends_sorted_with_counters() {
        let values = vec![5, 3, 8, 1, 9, 2];
        let steps = sorting::bubble(&SortInput::new(values.clone()));
        let mut view = SortView::new(values);
        reduce(&mut view, &steps);
        assert_eq!(view.array, vec![1, 2, 3, 5, 8, 9]);
        assert_eq!(view.sorted_count(), 6);
        let compares = steps.iter().filter(|s| s.kind == SortKind::Compare).count();
        assert_eq!(view.comparisons, compares);
        assert!(view.swaps > 0);
    }

    #[test]
    fn test_reset_restores_input() {
        let values = vec![3, 2, 1];
        let steps = sorting::selection(&SortInput::new(values.clone()));
        let mut view = SortView::new(values.clone());
        reduce(&mut view, &steps);
        view.reset();
        assert_eq!(view, SortView::new(values));
    }

    #[test]
    fn test_merge_split_shades_range() {
        let mut view = SortView::new(vec![4, 3, 2, 1]);
        view.apply(
            &SortStep {
                kind: SortKind::MergeSplit,
                indices: vec![0, 1, 3],
                array: vec![4, 3, 2, 1],
            },
            0,
        );
        assert_eq!(view.states.len(), 4);
    }
}
