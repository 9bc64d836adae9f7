//! Singly linked list

use super::{expect_args, invalid, parse_arg, split_op, Outcome, Structure};
use crate::error::TraceError;
use crate::trace::TraceStep;
use serde::Serialize;
use std::str::FromStr;

/// Node values from head to tail
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkedList {
    pub nodes: Vec<i64>,
}

impl LinkedList {
    pub fn new(nodes: Vec<i64>) -> Self {
        LinkedList { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOp {
    InsertHead(i64),
    InsertTail(i64),
    /// Index clamps to `0..=len`
    InsertAt { index: usize, value: i64 },
    DeleteHead,
    DeleteTail,
    Search(i64),
    Reverse,
}

impl FromStr for ListOp {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, args) = split_op(s);
        let op = match name {
            "insert-head" => {
                expect_args(s, &args, 1)?;
                ListOp::InsertHead(parse_arg(s, args[0])?)
            }
            "insert-tail" | "insert" => {
                expect_args(s, &args, 1)?;
                ListOp::InsertTail(parse_arg(s, args[0])?)
            }
            "insert-at" => {
                expect_args(s, &args, 2)?;
                ListOp::InsertAt {
                    index: parse_arg(s, args[0])?,
                    value: parse_arg(s, args[1])?,
                }
            }
            "delete-head" => {
                expect_args(s, &args, 0)?;
                ListOp::DeleteHead
            }
            "delete-tail" => {
                expect_args(s, &args, 0)?;
                ListOp::DeleteTail
            }
            "search" => {
                expect_args(s, &args, 1)?;
                ListOp::Search(parse_arg(s, args[0])?)
            }
            "reverse" => {
                expect_args(s, &args, 0)?;
                ListOp::Reverse
            }
            other => {
                return Err(invalid(
                    s,
                    format!(
                        "unknown list operation '{}' (insert-head, insert-tail, insert-at, \
                         delete-head, delete-tail, search, reverse)",
                        other
                    ),
                ))
            }
        };
        Ok(op)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ListStep {
    Highlight { index: usize },
    Traverse { index: usize },
    Compare { index: usize, value: i64 },
    Found { index: usize },
    NotFound,
    /// New node at `index`; `nodes` is the list after insertion
    Insert {
        index: usize,
        value: i64,
        nodes: Vec<i64>,
    },
    Delete { index: usize },
    Reverse { nodes: Vec<i64> },
    Done { nodes: Vec<i64> },
}

impl TraceStep for ListStep {
    fn kind(&self) -> &'static str {
        match self {
            ListStep::Highlight { .. } => "highlight",
            ListStep::Traverse { .. } => "traverse",
            ListStep::Compare { .. } => "compare",
            ListStep::Found { .. } => "found",
            ListStep::NotFound => "not-found",
            ListStep::Insert { .. } => "insert",
            ListStep::Delete { .. } => "delete",
            ListStep::Reverse { .. } => "reverse",
            ListStep::Done { .. } => "done",
        }
    }
}

impl Structure for LinkedList {
    type Op = ListOp;
    type Step = ListStep;
    const NAME: &'static str = "linked-list";

    fn run(&self, op: &ListOp) -> Outcome<Self, ListStep> {
        let mut steps = Vec::new();
        let mut nodes = self.nodes.clone();
        let traverse = |steps: &mut Vec<ListStep>, upto: usize| {
            steps.extend((0..upto).map(|index| ListStep::Traverse { index }));
        };

        match *op {
            ListOp::InsertHead(value) => {
                steps.push(ListStep::Highlight { index: 0 });
                nodes.insert(0, value);
                steps.push(ListStep::Insert {
                    index: 0,
                    value,
                    nodes: nodes.clone(),
                });
                steps.push(ListStep::Done {
                    nodes: nodes.clone(),
                });
            }
            ListOp::InsertTail(value) => {
                traverse(&mut steps, nodes.len());
                nodes.push(value);
                steps.push(ListStep::Insert {
                    index: nodes.len() - 1,
                    value,
                    nodes: nodes.clone(),
                });
                steps.push(ListStep::Done {
                    nodes: nodes.clone(),
                });
            }
            ListOp::InsertAt { index, value } => {
                let index = index.min(nodes.len());
                traverse(&mut steps, index);
                nodes.insert(index, value);
                steps.push(ListStep::Insert {
                    index,
                    value,
                    nodes: nodes.clone(),
                });
                steps.push(ListStep::Done {
                    nodes: nodes.clone(),
                });
            }
            ListOp::DeleteHead => {
                if !nodes.is_empty() {
                    steps.push(ListStep::Highlight { index: 0 });
                    steps.push(ListStep::Delete { index: 0 });
                    nodes.remove(0);
                    steps.push(ListStep::Done {
                        nodes: nodes.clone(),
                    });
                }
            }
            ListOp::DeleteTail => {
                if !nodes.is_empty() {
                    traverse(&mut steps, nodes.len());
                    steps.push(ListStep::Delete {
                        index: nodes.len() - 1,
                    });
                    nodes.pop();
                    steps.push(ListStep::Done {
                        nodes: nodes.clone(),
                    });
                }
            }
            ListOp::Search(value) => {
                let mut found = false;
                for (index, &v) in nodes.iter().enumerate() {
                    steps.push(ListStep::Traverse { index });
                    steps.push(ListStep::Compare { index, value });
                    if v == value {
                        steps.push(ListStep::Found { index });
                        found = true;
                        break;
                    }
                }
                if !found {
                    steps.push(ListStep::NotFound);
                }
            }
            ListOp::Reverse => {
                if nodes.len() > 1 {
                    nodes.reverse();
                    steps.push(ListStep::Reverse {
                        nodes: nodes.clone(),
                    });
                    steps.push(ListStep::Done {
                        nodes: nodes.clone(),
                    });
                }
            }
        }

        Outcome {
            steps,
            after: LinkedList { nodes },
        }
    }

    fn apply_step(&mut self, step: &ListStep) {
        match step {
            ListStep::Insert { nodes, .. }
            | ListStep::Reverse { nodes }
            | ListStep::Done { nodes } => self.nodes = nodes.clone(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list() -> LinkedList {
        LinkedList::new(vec![10, 20, 30])
    }

    fn run(op: &str) -> Outcome<LinkedList, ListStep> {
        list().run(&op.parse().unwrap())
    }

    #[test]
    fn test_insert_variants() {
        assert_eq!(run("insert-head:5").after.nodes, vec![5, 10, 20, 30]);
        assert_eq!(run("insert-tail:40").after.nodes, vec![10, 20, 30, 40]);
        assert_eq!(run("insert-at:1:15").after.nodes, vec![10, 15, 20, 30]);
        assert_eq!(run("insert-at:99:7").after.nodes, vec![10, 20, 30, 7]);
    }

    #[test]
    fn test_insert_tail_traverses_every_node() {
        let outcome = run("insert-tail:40");
        let traversed = outcome
            .steps
            .iter()
            .filter(|s| matches!(s, ListStep::Traverse { .. }))
            .count();
        assert_eq!(traversed, 3);
    }

    #[test]
    fn test_deletes() {
        assert_eq!(run("delete-head").after.nodes, vec![20, 30]);
        assert_eq!(run("delete-tail").after.nodes, vec![10, 20]);
        let empty = LinkedList::default().run(&ListOp::DeleteHead);
        assert!(empty.steps.is_empty());
    }

    #[test]
    fn test_search() {
        let hit = run("search:20");
        assert_eq!(hit.steps.last(), Some(&ListStep::Found { index: 1 }));
        let miss = run("search:99");
        assert_eq!(miss.steps.last(), Some(&ListStep::NotFound));
        assert_eq!(miss.after, list());
    }

    #[test]
    fn test_reverse() {
        assert_eq!(run("reverse").after.nodes, vec![30, 20, 10]);
        assert!(LinkedList::new(vec![1]).run(&ListOp::Reverse).steps.is_empty());
    }

    #[test]
    fn test_replaying_steps_reaches_outcome() {
        for op in ["insert-head:1", "insert-at:2:9", "delete-tail", "reverse", "search:30"] {
            let outcome = run(op);
            let mut replay = list();
            for step in &outcome.steps {
                replay.apply_step(step);
            }
            assert_eq!(replay, outcome.after, "{}", op);
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!("insert-at:1".parse::<ListOp>().is_err());
        assert!("search:abc".parse::<ListOp>().is_err());
        assert!("rotate".parse::<ListOp>().is_err());
        assert!("reverse:3".parse::<ListOp>().is_err());
        assert!("delete-head:1".parse::<ListOp>().is_err());
        assert_eq!("delete-tail".parse::<ListOp>(), Ok(ListOp::DeleteTail));
    }
}
