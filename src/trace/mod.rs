//! Trace producers
//!
//! A trace producer is a pure function from an algorithm's input to the
//! complete, ordered list of steps the algorithm performs. Producers never
//! touch shared state: they clone their input into a working copy, and any
//! randomness comes from a seed carried in the input.
//!
//! Each family defines its own closed step type:
//! - [`sorting`]: array snapshots tagged compare / swap / overwrite / ...
//! - [`searching`]: probes, bounds and eliminations over a sorted array
//! - [`graph`]: traversal, shortest path and spanning tree events
//! - [`strings`]: pattern alignment and character comparisons
//! - [`structures`]: operations on list, stack/queue, BST, heap, hash
//!   table and trie
//!
//! Producers are looked up through an explicit [`Registry`] built per
//! family, never through global state.

pub mod graph;
pub mod registry;
pub mod searching;
pub mod sorting;
pub mod strings;
pub mod structures;

pub use registry::{AlgorithmInfo, Producer, Registry};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fmt::Debug;

/// Common interface of every step type
pub trait TraceStep: Clone + Debug + PartialEq + serde::Serialize {
    /// Short kebab-case tag naming the micro-operation
    fn kind(&self) -> &'static str;
}

/// Seeded generator used for every random choice in this module
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
