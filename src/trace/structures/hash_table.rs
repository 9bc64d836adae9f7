//! Hash table with separate chaining over a fixed bucket count

use super::{expect_args, invalid, parse_arg, split_op, Outcome, Structure};
use crate::error::TraceError;
use crate::trace::TraceStep;
use serde::Serialize;
use std::str::FromStr;

pub const BUCKETS: usize = 8;

const SAMPLE: [(&str, i64); 8] = [
    ("apple", 5),
    ("banana", 12),
    ("cherry", 3),
    ("date", 8),
    ("elderberry", 15),
    ("fig", 1),
    ("grape", 9),
    ("honeydew", 7),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HashTable {
    pub buckets: Vec<Vec<Entry>>,
}

impl Default for HashTable {
    fn default() -> Self {
        HashTable {
            buckets: vec![Vec::new(); BUCKETS],
        }
    }
}

/// Multiply-by-31 string hash over UTF-16 code units in 32-bit wrapping
/// arithmetic, reduced to a bucket index
pub fn bucket_of(key: &str, buckets: usize) -> usize {
    let h = key
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32));
    h.unsigned_abs() as usize % buckets
}

impl HashTable {
    pub fn sample() -> Self {
        let mut table = HashTable::default();
        for (key, value) in SAMPLE {
            table.insert(key, value);
        }
        table
    }

    pub fn bucket_of(&self, key: &str) -> usize {
        bucket_of(key, self.buckets.len())
    }

    /// Insert or update
    pub fn insert(&mut self, key: &str, value: i64) {
        let bucket = self.bucket_of(key);
        let chain = &mut self.buckets[bucket];
        match chain.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.value = value,
            None => chain.push(Entry {
                key: key.to_string(),
                value,
            }),
        }
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.buckets[self.bucket_of(key)]
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value)
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HashOp {
    Insert { key: String, value: i64 },
    Get(String),
    Remove(String),
}

impl FromStr for HashOp {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, args) = split_op(s);
        match name {
            "insert" | "put" => {
                expect_args(s, &args, 2)?;
                Ok(HashOp::Insert {
                    key: args[0].to_string(),
                    value: parse_arg(s, args[1])?,
                })
            }
            "get" => {
                expect_args(s, &args, 1)?;
                Ok(HashOp::Get(args[0].to_string()))
            }
            "remove" | "delete" => {
                expect_args(s, &args, 1)?;
                Ok(HashOp::Remove(args[0].to_string()))
            }
            other => Err(invalid(
                s,
                format!("unknown hash table operation '{}' (insert, get, remove)", other),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashAction {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum HashStep {
    Hash { key: String, bucket: usize },
    ProbeBucket { bucket: usize },
    ChainTraverse { bucket: usize, slot: usize },
    Found { bucket: usize, slot: usize },
    NotFound { key: String },
    Update {
        bucket: usize,
        slot: usize,
        key: String,
        value: i64,
    },
    InsertDone {
        bucket: usize,
        key: String,
        value: i64,
    },
    DeleteDone { bucket: usize, slot: usize },
    Done { action: HashAction },
}

impl TraceStep for HashStep {
    fn kind(&self) -> &'static str {
        match self {
            HashStep::Hash { .. } => "hash",
            HashStep::ProbeBucket { .. } => "probe-bucket",
            HashStep::ChainTraverse { .. } => "chain-traverse",
            HashStep::Found { .. } => "found",
            HashStep::NotFound { .. } => "not-found",
            HashStep::Update { .. } => "update",
            HashStep::InsertDone { .. } => "insert-done",
            HashStep::DeleteDone { .. } => "delete-done",
            HashStep::Done { .. } => "done",
        }
    }
}

impl Structure for HashTable {
    type Op = HashOp;
    type Step = HashStep;
    const NAME: &'static str = "hash-table";

    fn run(&self, op: &HashOp) -> Outcome<Self, HashStep> {
        let key = match op {
            HashOp::Insert { key, .. } | HashOp::Get(key) | HashOp::Remove(key) => key,
        };
        let bucket = self.bucket_of(key);
        let mut steps = vec![
            HashStep::Hash {
                key: key.clone(),
                bucket,
            },
            HashStep::ProbeBucket { bucket },
        ];

        let mut hit = None;
        for (slot, entry) in self.buckets[bucket].iter().enumerate() {
            steps.push(HashStep::ChainTraverse { bucket, slot });
            if entry.key == *key {
                hit = Some(slot);
                break;
            }
        }

        match (op, hit) {
            (HashOp::Insert { value, .. }, Some(slot)) => {
                steps.push(HashStep::Update {
                    bucket,
                    slot,
                    key: key.clone(),
                    value: *value,
                });
                steps.push(HashStep::Done {
                    action: HashAction::Update,
                });
            }
            (HashOp::Insert { value, .. }, None) => {
                steps.push(HashStep::InsertDone {
                    bucket,
                    key: key.clone(),
                    value: *value,
                });
                steps.push(HashStep::Done {
                    action: HashAction::Insert,
                });
            }
            (HashOp::Get(_), Some(slot)) => steps.push(HashStep::Found { bucket, slot }),
            (HashOp::Remove(_), Some(slot)) => {
                steps.push(HashStep::DeleteDone { bucket, slot });
                steps.push(HashStep::Done {
                    action: HashAction::Delete,
                });
            }
            (HashOp::Get(_) | HashOp::Remove(_), None) => {
                steps.push(HashStep::NotFound { key: key.clone() })
            }
        }

        let mut after = self.clone();
        for step in &steps {
            after.apply_step(step);
        }
        Outcome { steps, after }
    }

    fn apply_step(&mut self, step: &HashStep) {
        match step {
            HashStep::Update {
                bucket,
                slot,
                value,
                ..
            } => {
                if let Some(entry) = self
                    .buckets
                    .get_mut(*bucket)
                    .and_then(|chain| chain.get_mut(*slot))
                {
                    entry.value = *value;
                }
            }
            HashStep::InsertDone { bucket, key, value } => {
                if let Some(chain) = self.buckets.get_mut(*bucket) {
                    chain.push(Entry {
                        key: key.clone(),
                        value: *value,
                    });
                }
            }
            HashStep::DeleteDone { bucket, slot } => {
                if let Some(chain) = self.buckets.get_mut(*bucket) {
                    if *slot < chain.len() {
                        chain.remove(*slot);
                    }
                }
            }
            _ => {}
        }
    }
}
