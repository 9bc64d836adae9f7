//! Binary search tree without duplicates
//!
//! Insert and delete traces only record the search path plus a final
//! `insert-done` / `delete-done` step; the structural change is applied
//! when that step is replayed.

use super::{expect_args, invalid, parse_arg, split_op, Outcome, Structure};
use crate::error::TraceError;
use crate::trace::TraceStep;
use serde::Serialize;
use std::collections::VecDeque;
use std::str::FromStr;

const SAMPLE: [i64; 11] = [50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BstNode {
    pub value: i64,
    pub left: Option<Box<BstNode>>,
    pub right: Option<Box<BstNode>>,
}

impl BstNode {
    fn leaf(value: i64) -> Box<Self> {
        Box::new(BstNode {
            value,
            left: None,
            right: None,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Bst {
    pub root: Option<Box<BstNode>>,
}

impl Bst {
    pub fn sample() -> Self {
        let mut tree = Bst::default();
        for v in SAMPLE {
            tree.insert(v);
        }
        tree
    }

    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        let mut tree = Bst::default();
        for v in values {
            tree.insert(v);
        }
        tree
    }

    /// Insert `value`; duplicates are ignored
    pub fn insert(&mut self, value: i64) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            if value < node.value {
                slot = &mut node.left;
            } else if value > node.value {
                slot = &mut node.right;
            } else {
                return;
            }
        }
        *slot = Some(BstNode::leaf(value));
    }

    /// Remove `value` if present. A node with two children takes its
    /// in-order successor's value.
    pub fn delete(&mut self, value: i64) {
        self.root = remove(self.root.take(), value);
    }

    pub fn contains(&self, value: i64) -> bool {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            if value == n.value {
                return true;
            }
            node = if value < n.value {
                n.left.as_deref()
            } else {
                n.right.as_deref()
            };
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn inorder(&self) -> Vec<i64> {
        let mut out = Vec::new();
        walk(self.root.as_deref(), Order::In, &mut out);
        out
    }

    /// Values on the search path for `value`, root first
    fn search_path(&self, value: i64) -> Vec<i64> {
        let mut path = Vec::new();
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            path.push(n.value);
            node = if value < n.value {
                n.left.as_deref()
            } else if value > n.value {
                n.right.as_deref()
            } else {
                None
            };
        }
        path
    }
}

fn remove(node: Option<Box<BstNode>>, value: i64) -> Option<Box<BstNode>> {
    let mut node = node?;
    if value < node.value {
        node.left = remove(node.left.take(), value);
    } else if value > node.value {
        node.right = remove(node.right.take(), value);
    } else {
        match (node.left.take(), node.right.take()) {
            (None, right) => return right,
            (left, None) => return left,
            (left, Some(right)) => {
                let mut min: &BstNode = &right;
                while let Some(l) = min.left.as_deref() {
                    min = l;
                }
                let successor = min.value;
                node.value = successor;
                node.left = left;
                node.right = remove(Some(right), successor);
            }
        }
    }
    Some(node)
}

#[derive(Clone, Copy)]
enum Order {
    Pre,
    In,
    Post,
}

fn walk(node: Option<&BstNode>, order: Order, out: &mut Vec<i64>) {
    let Some(n) = node else { return };
    if let Order::Pre = order {
        out.push(n.value);
    }
    walk(n.left.as_deref(), order, out);
    if let Order::In = order {
        out.push(n.value);
    }
    walk(n.right.as_deref(), order, out);
    if let Order::Post = order {
        out.push(n.value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BstOp {
    Insert(i64),
    Delete(i64),
    Search(i64),
    Inorder,
    Preorder,
    Postorder,
    LevelOrder,
}

impl FromStr for BstOp {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, args) = split_op(s);
        let value = |args: &[&str]| -> Result<i64, TraceError> {
            expect_args(s, args, 1)?;
            parse_arg(s, args[0])
        };
        let bare = |op: BstOp| expect_args(s, &args, 0).map(|()| op);
        match name {
            "insert" => Ok(BstOp::Insert(value(&args)?)),
            "delete" => Ok(BstOp::Delete(value(&args)?)),
            "search" => Ok(BstOp::Search(value(&args)?)),
            "inorder" => bare(BstOp::Inorder),
            "preorder" => bare(BstOp::Preorder),
            "postorder" => bare(BstOp::Postorder),
            "levelorder" | "level-order" => bare(BstOp::LevelOrder),
            other => Err(invalid(
                s,
                format!(
                    "unknown tree operation '{}' (insert, delete, search, inorder, \
                     preorder, postorder, levelorder)",
                    other
                ),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TreeStep {
    Visit { value: i64 },
    Found { value: i64 },
    NotFound,
    InsertDone { value: i64 },
    DeleteDone { value: i64 },
}

impl TraceStep for TreeStep {
    fn kind(&self) -> &'static str {
        match self {
            TreeStep::Visit { .. } => "visit",
            TreeStep::Found { .. } => "found",
            TreeStep::NotFound => "not-found",
            TreeStep::InsertDone { .. } => "insert-done",
            TreeStep::DeleteDone { .. } => "delete-done",
        }
    }
}

impl Structure for Bst {
    type Op = BstOp;
    type Step = TreeStep;
    const NAME: &'static str = "bst";

    fn run(&self, op: &BstOp) -> Outcome<Self, TreeStep> {
        let visits = |values: Vec<i64>| -> Vec<TreeStep> {
            values
                .into_iter()
                .map(|value| TreeStep::Visit { value })
                .collect()
        };
        let mut after = self.clone();
        let steps = match *op {
            BstOp::Insert(value) => {
                let mut steps = visits(self.search_path(value));
                steps.push(TreeStep::InsertDone { value });
                after.insert(value);
                steps
            }
            BstOp::Delete(value) => {
                let mut steps = visits(self.search_path(value));
                steps.push(TreeStep::DeleteDone { value });
                after.delete(value);
                steps
            }
            BstOp::Search(value) => {
                let mut steps = visits(self.search_path(value));
                steps.push(if self.contains(value) {
                    TreeStep::Found { value }
                } else {
                    TreeStep::NotFound
                });
                steps
            }
            BstOp::Inorder | BstOp::Preorder | BstOp::Postorder => {
                let order = match op {
                    BstOp::Preorder => Order::Pre,
                    BstOp::Postorder => Order::Post,
                    _ => Order::In,
                };
                let mut out = Vec::new();
                walk(self.root.as_deref(), order, &mut out);
                visits(out)
            }
            BstOp::LevelOrder => {
                let mut out = Vec::new();
                let mut queue: VecDeque<&BstNode> = self.root.as_deref().into_iter().collect();
                while let Some(n) = queue.pop_front() {
                    out.push(n.value);
                    queue.extend(n.left.as_deref());
                    queue.extend(n.right.as_deref());
                }
                visits(out)
            }
        };
        Outcome { steps, after }
    }

    fn apply_step(&mut self, step: &TreeStep) {
        match *step {
            TreeStep::InsertDone { value } => self.insert(value),
            TreeStep::DeleteDone { value } => self.delete(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visited(outcome: &Outcome<Bst, TreeStep>) -> Vec<i64> {
        outcome
            .steps
            .iter()
            .filter_map(|s| match s {
                TreeStep::Visit { value } => Some(*value),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_sample_inorder_is_sorted() {
        let tree = Bst::sample();
        assert_eq!(
            tree.inorder(),
            vec![10, 20, 25, 30, 35, 40, 45, 50, 60, 70, 80]
        );
    }

    #[test]
    fn test_traversals() {
        let tree = Bst::from_values([2, 1, 3]);
        assert_eq!(visited(&tree.run(&BstOp::Preorder)), vec![2, 1, 3]);
        assert_eq!(visited(&tree.run(&BstOp::Inorder)), vec![1, 2, 3]);
        assert_eq!(visited(&tree.run(&BstOp::Postorder)), vec![1, 3, 2]);
        assert_eq!(
            visited(&Bst::sample().run(&BstOp::LevelOrder)),
            vec![50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45]
        );
    }

    #[test]
    fn test_search_path() {
        let hit = Bst::sample().run(&BstOp::Search(35));
        assert_eq!(visited(&hit), vec![50, 30, 40, 35]);
        assert_eq!(hit.steps.last(), Some(&TreeStep::Found { value: 35 }));

        let miss = Bst::sample().run(&BstOp::Search(55));
        assert_eq!(visited(&miss), vec![50, 70, 60]);
        assert_eq!(miss.steps.last(), Some(&TreeStep::NotFound));
    }

    #[test]
    fn test_delete_two_children_uses_successor() {
        let outcome = Bst::sample().run(&BstOp::Delete(30));
        assert!(!outcome.after.contains(30));
        let left = outcome.after.root.as_ref().and_then(|r| r.left.as_ref());
        assert_eq!(left.map(|n| n.value), Some(35));
        assert_eq!(
            outcome.after.inorder(),
            vec![10, 20, 25, 35, 40, 45, 50, 60, 70, 80]
        );
    }

    #[test]
    fn test_traversals_take_no_arguments() {
        assert_eq!("inorder".parse::<BstOp>(), Ok(BstOp::Inorder));
        assert!("inorder:3".parse::<BstOp>().is_err());
        assert!("level-order:x".parse::<BstOp>().is_err());
    }

    #[test]
    fn test_duplicate_insert_is_ignored() {
        let outcome = Bst::sample().run(&BstOp::Insert(40));
        assert_eq!(outcome.after, Bst::sample());
    }

    #[test]
    fn test_replay_matches_outcome() {
        for op in ["insert:42", "delete:50", "delete:10", "delete:99", "search:25"] {
            let op: BstOp = op.parse().unwrap();
            let outcome = Bst::sample().run(&op);
            let mut replay = Bst::sample();
            outcome.steps.iter().for_each(|s| replay.apply_step(s));
            assert_eq!(replay, outcome.after, "{:?}", op);
        }
    }
}
