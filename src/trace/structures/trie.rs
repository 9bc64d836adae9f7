//! Prefix tree over lowercase words

use super::{expect_args, invalid, split_op, Outcome, Structure};
use crate::error::TraceError;
use crate::trace::TraceStep;
use serde::Serialize;
use std::collections::BTreeMap;
use std::str::FromStr;
use tracing::warn;

const SAMPLE: [&str; 9] = ["cat", "car", "card", "care", "cart", "do", "dog", "dot", "done"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrieNode {
    pub children: BTreeMap<char, TrieNode>,
    pub is_end: bool,
}

impl TrieNode {
    fn is_prunable(&self) -> bool {
        !self.is_end && self.children.is_empty()
    }

    /// Total nodes in this subtree, self included
    pub fn count(&self) -> usize {
        1 + self.children.values().map(TrieNode::count).sum::<usize>()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Trie {
    pub root: TrieNode,
}

impl Trie {
    pub fn sample() -> Self {
        let mut trie = Trie::default();
        for word in SAMPLE {
            trie.insert(word);
        }
        trie
    }

    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.is_end = true;
    }

    fn node(&self, path: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in path.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.node(word).is_some_and(|n| n.is_end)
    }

    /// Unmark `word` and prune the nodes that no longer lead anywhere
    pub fn remove(&mut self, word: &str) {
        let chars: Vec<char> = word.chars().collect();
        prune(&mut self.root, &chars);
    }

    /// All stored words in lexicographic order
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect(&self.root, &mut String::new(), &mut out);
        out
    }
}

/// Returns whether `node` should be removed by its parent
fn prune(node: &mut TrieNode, rest: &[char]) -> bool {
    match rest.split_first() {
        None => node.is_end = false,
        Some((ch, tail)) => {
            let Some(child) = node.children.get_mut(ch) else {
                return false;
            };
            if prune(child, tail) {
                node.children.remove(ch);
            }
        }
    }
    node.is_prunable()
}

fn collect(node: &TrieNode, prefix: &mut String, out: &mut Vec<String>) {
    if node.is_end {
        out.push(prefix.clone());
    }
    for (ch, child) in &node.children {
        prefix.push(*ch);
        collect(child, prefix, out);
        prefix.pop();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrieOp {
    Insert(String),
    Search(String),
    StartsWith(String),
    Delete(String),
}

impl FromStr for TrieOp {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, args) = split_op(s);
        let word = |args: &[&str]| -> Result<String, TraceError> {
            expect_args(s, args, 1)?;
            Ok(args[0].trim().to_lowercase())
        };
        match name {
            "insert" => Ok(TrieOp::Insert(word(&args)?)),
            "search" => Ok(TrieOp::Search(word(&args)?)),
            "starts-with" | "prefix" => Ok(TrieOp::StartsWith(word(&args)?)),
            "delete" | "remove" => Ok(TrieOp::Delete(word(&args)?)),
            other => Err(invalid(
                s,
                format!(
                    "unknown trie operation '{}' (insert, search, starts-with, delete)",
                    other
                ),
            )),
        }
    }
}

/// `path` is the prefix spelled from the root to the node in question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TrieStep {
    VisitNode { path: String },
    CreateNode { path: String },
    MarkEnd { path: String },
    Found { path: String },
    PrefixFound { path: String },
    /// The word exists only as a prefix of longer words
    PrefixOnly { path: String },
    NotFound { path: String },
    DeleteWord { path: String },
    Done,
}

impl TraceStep for TrieStep {
    fn kind(&self) -> &'static str {
        match self {
            TrieStep::VisitNode { .. } => "visit-node",
            TrieStep::CreateNode { .. } => "create-node",
            TrieStep::MarkEnd { .. } => "mark-end",
            TrieStep::Found { .. } => "found",
            TrieStep::PrefixFound { .. } => "prefix-found",
            TrieStep::PrefixOnly { .. } => "prefix-only",
            TrieStep::NotFound { .. } => "not-found",
            TrieStep::DeleteWord { .. } => "delete-word",
            TrieStep::Done => "done",
        }
    }
}

impl TrieStep {
    pub fn path(&self) -> Option<&str> {
        match self {
            TrieStep::VisitNode { path }
            | TrieStep::CreateNode { path }
            | TrieStep::MarkEnd { path }
            | TrieStep::Found { path }
            | TrieStep::PrefixFound { path }
            | TrieStep::PrefixOnly { path }
            | TrieStep::NotFound { path }
            | TrieStep::DeleteWord { path } => Some(path),
            TrieStep::Done => None,
        }
    }
}

impl Trie {
    /// Walk `word` from the root, emitting a visit per existing node.
    /// Returns the node reached, or `None` after a `not-found` step.
    fn walk<'a>(&'a self, word: &str, steps: &mut Vec<TrieStep>) -> Option<&'a TrieNode> {
        let mut node = &self.root;
        let mut path = String::new();
        for ch in word.chars() {
            path.push(ch);
            match node.children.get(&ch) {
                Some(child) => {
                    steps.push(TrieStep::VisitNode { path: path.clone() });
                    node = child;
                }
                None => {
                    steps.push(TrieStep::NotFound { path });
                    return None;
                }
            }
        }
        Some(node)
    }
}

impl Structure for Trie {
    type Op = TrieOp;
    type Step = TrieStep;
    const NAME: &'static str = "trie";

    fn run(&self, op: &TrieOp) -> Outcome<Self, TrieStep> {
        let (TrieOp::Insert(word)
        | TrieOp::Search(word)
        | TrieOp::StartsWith(word)
        | TrieOp::Delete(word)) = op;
        let mut steps = Vec::new();
        if word.is_empty() {
            warn!(?op, "empty word");
            return Outcome {
                steps,
                after: self.clone(),
            };
        }

        match op {
            TrieOp::Insert(word) => {
                let mut node = Some(&self.root);
                let mut path = String::new();
                for ch in word.chars() {
                    path.push(ch);
                    node = node.and_then(|n| n.children.get(&ch));
                    steps.push(match node {
                        Some(_) => TrieStep::VisitNode { path: path.clone() },
                        None => TrieStep::CreateNode { path: path.clone() },
                    });
                }
                steps.push(TrieStep::MarkEnd { path });
                steps.push(TrieStep::Done);
            }
            TrieOp::Search(word) => {
                if let Some(node) = self.walk(word, &mut steps) {
                    let path = word.clone();
                    steps.push(if node.is_end {
                        TrieStep::Found { path }
                    } else {
                        TrieStep::PrefixOnly { path }
                    });
                }
            }
            TrieOp::StartsWith(prefix) => {
                if self.walk(prefix, &mut steps).is_some() {
                    steps.push(TrieStep::PrefixFound {
                        path: prefix.clone(),
                    });
                }
            }
            TrieOp::Delete(word) => {
                if let Some(node) = self.walk(word, &mut steps) {
                    let path = word.clone();
                    if node.is_end {
                        steps.push(TrieStep::DeleteWord { path });
                        steps.push(TrieStep::Done);
                    } else {
                        steps.push(TrieStep::NotFound { path });
                    }
                }
            }
        }

        let mut after = self.clone();
        for step in &steps {
            after.apply_step(step);
        }
        Outcome { steps, after }
    }

    fn apply_step(&mut self, step: &TrieStep) {
        match step {
            TrieStep::CreateNode { path } => {
                let mut node = &mut self.root;
                for ch in path.chars() {
                    node = node.children.entry(ch).or_default();
                }
            }
            TrieStep::MarkEnd { path } => self.insert(path),
            TrieStep::DeleteWord { path } => self.remove(path),
            _ => {}
        }
    }
}
