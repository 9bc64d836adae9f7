//! Searching traces over a sorted array

use super::registry::{AlgorithmInfo, Registry};
use super::TraceStep;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SearchStep {
    /// Probe one element
    Check { index: usize },
    Found { index: usize },
    NotFound,
    /// Current search window; `mid` is absent during a linear scan
    SetBounds {
        lo: usize,
        hi: usize,
        mid: Option<usize>,
    },
    /// Range `[from, to]` ruled out
    Eliminate { from: usize, to: usize },
    /// Block `[from, to]` skipped over
    Jump { from: usize, to: usize },
}

impl TraceStep for SearchStep {
    fn kind(&self) -> &'static str {
        match self {
            SearchStep::Check { .. } => "check",
            SearchStep::Found { .. } => "found",
            SearchStep::NotFound => "not-found",
            SearchStep::SetBounds { .. } => "set-bounds",
            SearchStep::Eliminate { .. } => "eliminate",
            SearchStep::Jump { .. } => "jump",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchInput {
    /// Ascending for every algorithm except linear search
    pub values: Vec<u32>,
    pub target: u32,
}

impl SearchInput {
    pub fn new(values: Vec<u32>, target: u32) -> Self {
        SearchInput { values, target }
    }

    /// Build an input, sorting `values` first
    pub fn sorted(mut values: Vec<u32>, target: u32) -> Self {
        values.sort_unstable();
        SearchInput { values, target }
    }
}

pub fn registry() -> Registry<SearchInput, SearchStep> {
    let mut registry = Registry::new("searching");
    registry
        .register(
            AlgorithmInfo {
                id: "linear",
                name: "Linear Search",
                time: "O(n)",
                space: "O(1)",
                description: "Checks each element in turn until the target is found.",
            },
            linear,
        )
        .register(
            AlgorithmInfo {
                id: "binary",
                name: "Binary Search",
                time: "O(log n)",
                space: "O(1)",
                description: "Halves the search space each step. Requires a sorted array.",
            },
            binary,
        )
        .register(
            AlgorithmInfo {
                id: "jump",
                name: "Jump Search",
                time: "O(√n)",
                space: "O(1)",
                description: "Jumps ahead by √n blocks, then scans within the block.",
            },
            jump,
        )
        .register(
            AlgorithmInfo {
                id: "exponential",
                name: "Exponential Search",
                time: "O(log n)",
                space: "O(1)",
                description: "Doubles a bound to find the range, then binary searches it.",
            },
            exponential,
        );
    registry
}

pub fn linear(input: &SearchInput) -> Vec<SearchStep> {
    let mut steps = Vec::new();
    for (index, &value) in input.values.iter().enumerate() {
        steps.push(SearchStep::Check { index });
        if value == input.target {
            steps.push(SearchStep::Found { index });
            return steps;
        }
    }
    steps.push(SearchStep::NotFound);
    steps
}

pub fn binary(input: &SearchInput) -> Vec<SearchStep> {
    let mut steps = Vec::new();
    let a = &input.values;
    if a.is_empty() {
        steps.push(SearchStep::NotFound);
        return steps;
    }
    let (lo, hi) = (0, a.len() - 1);
    steps.push(SearchStep::SetBounds {
        lo,
        hi,
        mid: Some((lo + hi) / 2),
    });
    bisect(a, input.target, lo, hi, &mut steps);
    steps
}

/// Binary search over the inclusive window `[lo, hi]`
fn bisect(a: &[u32], target: u32, lo: usize, hi: usize, steps: &mut Vec<SearchStep>) {
    // Signed so that `hi` may drop below `lo` = 0
    let (mut lo, mut hi) = (lo as isize, hi as isize);
    while lo <= hi {
        let mid = ((lo + hi) / 2) as usize;
        steps.push(SearchStep::SetBounds {
            lo: lo as usize,
            hi: hi as usize,
            mid: Some(mid),
        });
        steps.push(SearchStep::Check { index: mid });
        if a[mid] == target {
            steps.push(SearchStep::Found { index: mid });
            return;
        } else if a[mid] < target {
            steps.push(SearchStep::Eliminate {
                from: lo as usize,
                to: mid,
            });
            lo = mid as isize + 1;
        } else {
            steps.push(SearchStep::Eliminate {
                from: mid,
                to: hi as usize,
            });
            hi = mid as isize - 1;
        }
    }
    steps.push(SearchStep::NotFound);
}

pub fn jump(input: &SearchInput) -> Vec<SearchStep> {
    let mut steps = Vec::new();
    let a = &input.values;
    let target = input.target;
    let n = a.len();
    if n == 0 {
        steps.push(SearchStep::NotFound);
        return steps;
    }
    let block = (n as f64).sqrt().floor() as usize;
    let (mut prev, mut curr) = (0, block);

    while curr < n && a[curr - 1] < target {
        steps.push(SearchStep::Jump {
            from: prev,
            to: curr - 1,
        });
        steps.push(SearchStep::Check { index: curr - 1 });
        prev = curr;
        curr += block;
    }

    let end = curr.min(n);
    steps.push(SearchStep::SetBounds {
        lo: prev,
        hi: end - 1,
        mid: None,
    });
    for index in prev..end {
        steps.push(SearchStep::Check { index });
        if a[index] == target {
            steps.push(SearchStep::Found { index });
            return steps;
        }
        if a[index] > target {
            break;
        }
    }
    steps.push(SearchStep::NotFound);
    steps
}

pub fn exponential(input: &SearchInput) -> Vec<SearchStep> {
    let mut steps = Vec::new();
    let a = &input.values;
    let target = input.target;
    let n = a.len();
    if n == 0 {
        steps.push(SearchStep::NotFound);
        return steps;
    }
    if a[0] == target {
        steps.push(SearchStep::Check { index: 0 });
        steps.push(SearchStep::Found { index: 0 });
        return steps;
    }

    let mut bound = 1;
    while bound < n && a[bound] <= target {
        steps.push(SearchStep::Check { index: bound });
        steps.push(SearchStep::Jump {
            from: bound / 2,
            to: bound,
        });
        if a[bound] == target {
            steps.push(SearchStep::Found { index: bound });
            return steps;
        }
        bound *= 2;
    }

    let (lo, hi) = (bound / 2, bound.min(n - 1));
    steps.push(SearchStep::SetBounds {
        lo,
        hi,
        mid: Some((lo + hi) / 2),
    });
    bisect(a, target, lo, hi, &mut steps);
    steps
}
