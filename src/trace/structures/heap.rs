//! Array-backed binary heap, min or max ordered

use super::{expect_args, invalid, parse_arg, split_op, Outcome, Structure};
use crate::error::TraceError;
use crate::trace::TraceStep;
use serde::Serialize;
use std::str::FromStr;

const SAMPLE: [i64; 7] = [15, 25, 5, 30, 10, 35, 20];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeapKind {
    #[default]
    Min,
    Max,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Heap {
    pub kind: HeapKind,
    pub items: Vec<i64>,
}

impl Heap {
    pub fn new(kind: HeapKind) -> Self {
        Heap {
            kind,
            items: Vec::new(),
        }
    }

    pub fn sample(kind: HeapKind) -> Self {
        let mut heap = Heap::new(kind);
        for v in SAMPLE {
            heap.items.push(v);
            let mut i = heap.items.len() - 1;
            while i > 0 {
                let parent = (i - 1) / 2;
                if !heap.before(heap.items[i], heap.items[parent]) {
                    break;
                }
                heap.items.swap(i, parent);
                i = parent;
            }
        }
        heap
    }

    /// Whether `a` belongs above `b`
    fn before(&self, a: i64, b: i64) -> bool {
        match self.kind {
            HeapKind::Min => a < b,
            HeapKind::Max => a > b,
        }
    }

    /// Every parent orders before-or-equal to its children
    pub fn is_valid(&self) -> bool {
        (1..self.items.len()).all(|i| !self.before(self.items[i], self.items[(i - 1) / 2]))
    }

    pub fn peek(&self) -> Option<i64> {
        self.items.first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapOp {
    Insert(i64),
    Extract,
}

impl FromStr for HeapOp {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_op(s) {
            ("insert", args) => {
                expect_args(s, &args, 1)?;
                Ok(HeapOp::Insert(parse_arg(s, args[0])?))
            }
            ("extract", args) => expect_args(s, &args, 0).map(|()| HeapOp::Extract),
            (other, _) => Err(invalid(
                s,
                format!("unknown heap operation '{}' (insert, extract)", other),
            )),
        }
    }
}

/// Every step carries the array as it stands after the step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HeapStep {
    Insert {
        index: usize,
        value: i64,
        array: Vec<i64>,
    },
    Compare {
        indices: [usize; 2],
        array: Vec<i64>,
    },
    Swap {
        indices: [usize; 2],
        array: Vec<i64>,
    },
    Highlight {
        indices: Vec<usize>,
        array: Vec<i64>,
    },
    Extract { value: i64, array: Vec<i64> },
    Done { array: Vec<i64> },
}

impl HeapStep {
    pub fn array(&self) -> &[i64] {
        match self {
            HeapStep::Insert { array, .. }
            | HeapStep::Compare { array, .. }
            | HeapStep::Swap { array, .. }
            | HeapStep::Highlight { array, .. }
            | HeapStep::Extract { array, .. }
            | HeapStep::Done { array } => array,
        }
    }
}

impl TraceStep for HeapStep {
    fn kind(&self) -> &'static str {
        match self {
            HeapStep::Insert { .. } => "insert",
            HeapStep::Compare { .. } => "compare",
            HeapStep::Swap { .. } => "swap",
            HeapStep::Highlight { .. } => "highlight",
            HeapStep::Extract { .. } => "extract",
            HeapStep::Done { .. } => "done",
        }
    }
}

impl Structure for Heap {
    type Op = HeapOp;
    type Step = HeapStep;
    const NAME: &'static str = "heap";

    fn run(&self, op: &HeapOp) -> Outcome<Self, HeapStep> {
        let mut steps = Vec::new();
        let mut heap = self.clone();

        match *op {
            HeapOp::Insert(value) => {
                heap.items.push(value);
                let mut i = heap.items.len() - 1;
                steps.push(HeapStep::Insert {
                    index: i,
                    value,
                    array: heap.items.clone(),
                });
                while i > 0 {
                    let parent = (i - 1) / 2;
                    steps.push(HeapStep::Compare {
                        indices: [i, parent],
                        array: heap.items.clone(),
                    });
                    if !heap.before(heap.items[i], heap.items[parent]) {
                        break;
                    }
                    heap.items.swap(i, parent);
                    steps.push(HeapStep::Swap {
                        indices: [i, parent],
                        array: heap.items.clone(),
                    });
                    i = parent;
                }
                steps.push(HeapStep::Done {
                    array: heap.items.clone(),
                });
            }
            HeapOp::Extract => {
                if let Some(&root) = heap.items.first() {
                    steps.push(HeapStep::Highlight {
                        indices: vec![0],
                        array: heap.items.clone(),
                    });
                    heap.items.swap_remove(0);
                    steps.push(HeapStep::Extract {
                        value: root,
                        array: heap.items.clone(),
                    });
                    sift_down(&mut heap, &mut steps);
                    steps.push(HeapStep::Done {
                        array: heap.items.clone(),
                    });
                }
            }
        }

        Outcome { steps, after: heap }
    }

    fn apply_step(&mut self, step: &HeapStep) {
        self.items = step.array().to_vec();
    }
}

fn sift_down(heap: &mut Heap, steps: &mut Vec<HeapStep>) {
    let n = heap.items.len();
    let mut i = 0;
    loop {
        let mut target = i;
        for child in [2 * i + 1, 2 * i + 2] {
            if child < n {
                steps.push(HeapStep::Compare {
                    indices: [target, child],
                    array: heap.items.clone(),
                });
                if heap.before(heap.items[child], heap.items[target]) {
                    target = child;
                }
            }
        }
        if target == i {
            break;
        }
        heap.items.swap(i, target);
        steps.push(HeapStep::Swap {
            indices: [i, target],
            array: heap.items.clone(),
        });
        i = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples() {
        assert_eq!(
            Heap::sample(HeapKind::Min).items,
            vec![5, 10, 15, 30, 25, 35, 20]
        );
        assert_eq!(
            Heap::sample(HeapKind::Max).items,
            vec![35, 25, 30, 15, 10, 5, 20]
        );
    }

    #[test]
    fn test_insert_bubbles_up() {
        let outcome = Heap::sample(HeapKind::Min).run(&HeapOp::Insert(1));
        assert_eq!(outcome.after.peek(), Some(1));
        assert!(outcome.after.is_valid());
        let swaps = outcome
            .steps
            .iter()
            .filter(|s| matches!(s, HeapStep::Swap { .. }))
            .count();
        assert_eq!(swaps, 3);
    }

    #[test]
    fn test_extract_yields_sorted_order() {
        for kind in [HeapKind::Min, HeapKind::Max] {
            let mut heap = Heap::sample(kind);
            let mut out = Vec::new();
            while !heap.items.is_empty() {
                let outcome = heap.run(&HeapOp::Extract);
                match outcome.steps.get(1) {
                    Some(HeapStep::Extract { value, .. }) => out.push(*value),
                    other => panic!("expected extract step, got {:?}", other),
                }
                assert!(outcome.after.is_valid());
                heap = outcome.after;
            }
            let mut expected = SAMPLE.to_vec();
            expected.sort_unstable();
            if kind == HeapKind::Max {
                expected.reverse();
            }
            assert_eq!(out, expected);
        }
    }

    #[test]
    fn test_extract_takes_no_arguments() {
        assert_eq!("extract".parse::<HeapOp>(), Ok(HeapOp::Extract));
        assert!("extract:1".parse::<HeapOp>().is_err());
    }

    #[test]
    fn test_extract_from_empty() {
        assert!(Heap::new(HeapKind::Max).run(&HeapOp::Extract).steps.is_empty());
    }

    #[test]
    fn test_replay_matches_outcome() {
        let heap = Heap::sample(HeapKind::Max);
        for op in [HeapOp::Insert(99), HeapOp::Insert(0), HeapOp::Extract] {
            let outcome = heap.run(&op);
            let mut replay = heap.clone();
            outcome.steps.iter().for_each(|s| replay.apply_step(s));
            assert_eq!(replay, outcome.after);
        }
    }
}
