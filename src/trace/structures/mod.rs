//! Data structure operations as traces
//!
//! Each structure is a plain value. Running an operation never mutates the
//! receiver: it returns the steps together with the structure as it stands
//! after the operation. Replaying those steps through
//! [`Structure::apply_step`] on the original value reproduces the same
//! result, which is what the view models rely on.
//!
//! Operations are parsed from short strings such as `insert:42`,
//! `insert-at:2:7` or `get:apple` (see each module's `Op` type).

pub mod bst;
pub mod hash_table;
pub mod heap;
pub mod linked_list;
pub mod stack_queue;
pub mod trie;

pub use bst::Bst;
pub use hash_table::HashTable;
pub use heap::{Heap, HeapKind};
pub use linked_list::LinkedList;
pub use stack_queue::{Queue, Stack};
pub use trie::Trie;

use super::TraceStep;
use crate::error::TraceError;
use serde::Serialize;
use std::fmt::Debug;
use std::str::FromStr;

/// Result of running one operation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome<T, S> {
    pub steps: Vec<S>,
    pub after: T,
}

/// A visualizable data structure
pub trait Structure: Clone + Debug + PartialEq + Serialize {
    type Op: FromStr<Err = TraceError> + Clone + Debug;
    type Step: TraceStep;

    /// Kebab-case identifier used on the command line
    const NAME: &'static str;

    /// Run `op` against a copy of `self`
    fn run(&self, op: &Self::Op) -> Outcome<Self, Self::Step>;

    /// Apply the structural effect of one step, if it has one
    fn apply_step(&mut self, step: &Self::Step);
}

/// Identifiers accepted by `--structure`, in display order
pub const KINDS: &[&str] = &[
    "linked-list",
    "stack",
    "queue",
    "bst",
    "heap-min",
    "heap-max",
    "hash-table",
    "trie",
];

/// Split `name:arg:arg` into its name and arguments
pub(crate) fn split_op(input: &str) -> (&str, Vec<&str>) {
    let mut parts = input.trim().split(':');
    let name = parts.next().unwrap_or_default();
    (name, parts.collect())
}

pub(crate) fn invalid(input: &str, reason: impl Into<String>) -> TraceError {
    TraceError::InvalidOperation {
        input: input.to_string(),
        reason: reason.into(),
    }
}

/// Check the argument count of a parsed operation
pub(crate) fn expect_args(input: &str, args: &[&str], n: usize) -> Result<(), TraceError> {
    if args.len() == n {
        Ok(())
    } else {
        Err(invalid(
            input,
            format!("expected {} argument(s), got {}", n, args.len()),
        ))
    }
}

pub(crate) fn parse_arg<T: FromStr>(input: &str, arg: &str) -> Result<T, TraceError> {
    arg.trim()
        .parse()
        .map_err(|_| invalid(input, format!("cannot parse '{}'", arg)))
}
