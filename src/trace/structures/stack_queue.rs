//! Stack (LIFO) and queue (FIFO)
//!
//! Both keep their items in a vector; the stack's top is the last item and
//! the queue's front is the first.

use super::{expect_args, invalid, parse_arg, split_op, Outcome, Structure};
use crate::error::TraceError;
use crate::trace::TraceStep;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stack {
    pub items: Vec<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Queue {
    pub items: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LinearStep {
    Push {
        value: i64,
        index: usize,
        items: Vec<i64>,
    },
    Pop { value: i64, items: Vec<i64> },
    Enqueue {
        value: i64,
        index: usize,
        items: Vec<i64>,
    },
    Dequeue { value: i64, items: Vec<i64> },
    /// Item about to leave
    Highlight { index: usize },
    Peek { index: usize },
    Done { items: Vec<i64> },
}

impl TraceStep for LinearStep {
    fn kind(&self) -> &'static str {
        match self {
            LinearStep::Push { .. } => "push",
            LinearStep::Pop { .. } => "pop",
            LinearStep::Enqueue { .. } => "enqueue",
            LinearStep::Dequeue { .. } => "dequeue",
            LinearStep::Highlight { .. } => "highlight",
            LinearStep::Peek { .. } => "peek",
            LinearStep::Done { .. } => "done",
        }
    }
}

impl LinearStep {
    /// Items snapshot carried by this step
    fn items(&self) -> Option<&Vec<i64>> {
        match self {
            LinearStep::Push { items, .. }
            | LinearStep::Pop { items, .. }
            | LinearStep::Enqueue { items, .. }
            | LinearStep::Dequeue { items, .. }
            | LinearStep::Done { items } => Some(items),
            LinearStep::Highlight { .. } | LinearStep::Peek { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOp {
    Push(i64),
    Pop,
    Peek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueOp {
    Enqueue(i64),
    Dequeue,
    Peek,
}

impl FromStr for StackOp {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_op(s) {
            ("push", args) => {
                expect_args(s, &args, 1)?;
                Ok(StackOp::Push(parse_arg(s, args[0])?))
            }
            ("pop", args) => expect_args(s, &args, 0).map(|()| StackOp::Pop),
            ("peek", args) => expect_args(s, &args, 0).map(|()| StackOp::Peek),
            (other, _) => Err(invalid(
                s,
                format!("unknown stack operation '{}' (push, pop, peek)", other),
            )),
        }
    }
}

impl FromStr for QueueOp {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match split_op(s) {
            ("enqueue", args) => {
                expect_args(s, &args, 1)?;
                Ok(QueueOp::Enqueue(parse_arg(s, args[0])?))
            }
            ("dequeue", args) => expect_args(s, &args, 0).map(|()| QueueOp::Dequeue),
            ("peek", args) => expect_args(s, &args, 0).map(|()| QueueOp::Peek),
            (other, _) => Err(invalid(
                s,
                format!("unknown queue operation '{}' (enqueue, dequeue, peek)", other),
            )),
        }
    }
}

impl Structure for Stack {
    type Op = StackOp;
    type Step = LinearStep;
    const NAME: &'static str = "stack";

    fn run(&self, op: &StackOp) -> Outcome<Self, LinearStep> {
        let mut steps = Vec::new();
        let mut items = self.items.clone();
        match *op {
            StackOp::Push(value) => {
                items.push(value);
                steps.push(LinearStep::Push {
                    value,
                    index: items.len() - 1,
                    items: items.clone(),
                });
                steps.push(LinearStep::Done {
                    items: items.clone(),
                });
            }
            StackOp::Pop => {
                if let Some(&top) = items.last() {
                    steps.push(LinearStep::Highlight {
                        index: items.len() - 1,
                    });
                    items.pop();
                    steps.push(LinearStep::Pop {
                        value: top,
                        items: items.clone(),
                    });
                    steps.push(LinearStep::Done {
                        items: items.clone(),
                    });
                }
            }
            StackOp::Peek => {
                if !items.is_empty() {
                    steps.push(LinearStep::Peek {
                        index: items.len() - 1,
                    });
                    steps.push(LinearStep::Done {
                        items: items.clone(),
                    });
                }
            }
        }
        Outcome {
            steps,
            after: Stack { items },
        }
    }

    fn apply_step(&mut self, step: &LinearStep) {
        if let Some(items) = step.items() {
            self.items = items.clone();
        }
    }
}

impl Structure for Queue {
    type Op = QueueOp;
    type Step = LinearStep;
    const NAME: &'static str = "queue";

    fn run(&self, op: &QueueOp) -> Outcome<Self, LinearStep> {
        let mut steps = Vec::new();
        let mut items = self.items.clone();
        match *op {
            QueueOp::Enqueue(value) => {
                items.push(value);
                steps.push(LinearStep::Enqueue {
                    value,
                    index: items.len() - 1,
                    items: items.clone(),
                });
                steps.push(LinearStep::Done {
                    items: items.clone(),
                });
            }
            QueueOp::Dequeue => {
                if !items.is_empty() {
                    steps.push(LinearStep::Highlight { index: 0 });
                    let front = items.remove(0);
                    steps.push(LinearStep::Dequeue {
                        value: front,
                        items: items.clone(),
                    });
                    steps.push(LinearStep::Done {
                        items: items.clone(),
                    });
                }
            }
            QueueOp::Peek => {
                if !items.is_empty() {
                    steps.push(LinearStep::Peek { index: 0 });
                    steps.push(LinearStep::Done {
                        items: items.clone(),
                    });
                }
            }
        }
        Outcome {
            steps,
            after: Queue { items },
        }
    }

    fn apply_step(&mut self, step: &LinearStep) {
        if let Some(items) = step.items() {
            self.items = items.clone();
        }
    }
}
