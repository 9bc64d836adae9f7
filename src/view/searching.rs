//! Cell-row state for searching traces

use super::ViewModel;
use crate::trace::searching::SearchStep;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Checking,
    Found,
    Eliminated,
    /// Skipped over by a jump
    Jumped,
}

/// Search window pointers from the latest `set-bounds` step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub lo: usize,
    pub hi: usize,
    pub mid: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(usize),
    NotFound,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub values: Vec<u32>,
    pub target: u32,
    pub cells: FxHashMap<usize, CellState>,
    pub bounds: Option<Bounds>,
    /// Number of elements probed so far
    pub probes: usize,
    pub outcome: Option<SearchOutcome>,
}

impl SearchView {
    pub fn new(values: Vec<u32>, target: u32) -> Self {
        SearchView {
            values,
            target,
            cells: FxHashMap::default(),
            bounds: None,
            probes: 0,
            outcome: None,
        }
    }

    pub fn cell(&self, index: usize) -> Option<CellState> {
        self.cells.get(&index).copied()
    }

    fn clear_checking(&mut self) {
        self.cells.retain(|_, s| *s != CellState::Checking);
    }
}

impl ViewModel<SearchStep> for SearchView {
    fn reset(&mut self) {
        self.cells.clear();
        self.bounds = None;
        self.probes = 0;
        self.outcome = None;
    }

    fn apply(&mut self, step: &SearchStep, _index: usize) {
        match *step {
            SearchStep::Check { index } => {
                self.clear_checking();
                self.cells.insert(index, CellState::Checking);
                self.probes += 1;
            }
            SearchStep::Found { index } => {
                self.clear_checking();
                self.cells.insert(index, CellState::Found);
                self.outcome = Some(SearchOutcome::Found(index));
            }
            SearchStep::NotFound => {
                self.clear_checking();
                self.outcome = Some(SearchOutcome::NotFound);
            }
            SearchStep::Eliminate { from, to } => {
                for i in from..=to {
                    let cell = self.cells.entry(i).or_insert(CellState::Eliminated);
                    if *cell != CellState::Found {
                        *cell = CellState::Eliminated;
                    }
                }
            }
            SearchStep::SetBounds { lo, hi, mid } => {
                self.bounds = Some(Bounds { lo, hi, mid });
            }
            SearchStep::Jump { from, to } => {
                for i in from..=to {
                    self.cells.entry(i).or_insert(CellState::Jumped);
                }
            }
        }
    }
}
