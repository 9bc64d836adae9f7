//! Algorithm registry: identifier -> metadata + producer

use crate::error::TraceError;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// A trace-producing function
pub type Producer<I, S> = fn(&I) -> Vec<S>;

/// Display metadata for one registered algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub time: &'static str,
    pub space: &'static str,
    pub description: &'static str,
}

/// Ordered mapping from algorithm identifier to producer
///
/// Iteration follows registration order, which is also the order the
/// terminal UI cycles through.
pub struct Registry<I, S> {
    family: &'static str,
    entries: IndexMap<&'static str, (AlgorithmInfo, Producer<I, S>)>,
}

impl<I, S> Registry<I, S> {
    pub fn new(family: &'static str) -> Self {
        Registry {
            family,
            entries: IndexMap::new(),
        }
    }

    /// Add a producer. A later registration with the same id replaces the
    /// earlier one in place.
    pub fn register(&mut self, info: AlgorithmInfo, producer: Producer<I, S>) -> &mut Self {
        self.entries.insert(info.id, (info, producer));
        self
    }

    pub fn family(&self) -> &'static str {
        self.family
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn info(&self, id: &str) -> Option<&AlgorithmInfo> {
        self.entries.get(id).map(|(info, _)| info)
    }

    pub fn infos(&self) -> impl Iterator<Item = &AlgorithmInfo> {
        self.entries.values().map(|(info, _)| info)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// First registered id
    pub fn first_id(&self) -> Option<&'static str> {
        self.entries.keys().next().copied()
    }

    /// The id registered after `id`, wrapping around
    pub fn next_id(&self, id: &str) -> Option<&'static str> {
        let index = self.entries.get_index_of(id)?;
        let next = (index + 1) % self.entries.len();
        self.entries.get_index(next).map(|(k, _)| *k)
    }

    /// Run the producer registered under `id`
    pub fn run(&self, id: &str, input: &I) -> Result<Vec<S>, TraceError> {
        let (_, producer) = self.entries.get(id).ok_or_else(|| TraceError::UnknownAlgorithm {
            id: id.to_string(),
            available: self.ids().collect::<Vec<_>>().join(", "),
        })?;
        let steps = producer(input);
        debug!(family = self.family, algorithm = id, steps = steps.len(), "produced trace");
        Ok(steps)
    }
}

impl<I, S> Clone for Registry<I, S> {
    fn clone(&self) -> Self {
        Registry {
            family: self.family,
            entries: self.entries.clone(),
        }
    }
}

impl<I, S> std::fmt::Debug for Registry<I, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("family", &self.family)
            .field("ids", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn double(input: &Vec<u32>) -> Vec<u32> {
        input.iter().map(|v| v * 2).collect()
    }

    fn reverse(input: &Vec<u32>) -> Vec<u32> {
        input.iter().rev().copied().collect()
    }

    fn info(id: &'static str) -> AlgorithmInfo {
        AlgorithmInfo {
            id,
            name: id,
            time: "O(n)",
            space: "O(n)",
            description: "",
        }
    }

    fn registry() -> Registry<Vec<u32>, u32> {
        let mut registry = Registry::new("test");
        registry
            .register(info("double"), double)
            .register(info("reverse"), reverse);
        registry
    }

    #[test]
    fn test_run_dispatches_by_id() {
        let registry = registry();
        assert_eq!(registry.run("double", &vec![1, 2]).unwrap(), vec![2, 4]);
        assert_eq!(registry.run("reverse", &vec![1, 2]).unwrap(), vec![2, 1]);
    }

    #[test]
    fn test_unknown_id_lists_available() {
        let err = registry().run("triple", &vec![1]).unwrap_err();
        assert_eq!(
            err,
            TraceError::UnknownAlgorithm {
                id: "triple".to_string(),
                available: "double, reverse".to_string(),
            }
        );
    }

    #[test]
    fn test_next_id_wraps() {
        let registry = registry();
        assert_eq!(registry.first_id(), Some("double"));
        assert_eq!(registry.next_id("double"), Some("reverse"));
        assert_eq!(registry.next_id("reverse"), Some("double"));
        assert_eq!(registry.next_id("missing"), None);
    }
}
