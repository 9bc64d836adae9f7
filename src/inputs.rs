//! Input construction shared by the headless and terminal front ends
//!
//! Every builder takes the seed explicitly so the terminal UI can
//! regenerate an input with the next seed without touching the other
//! settings.

use crate::config::InputConfig;
use crate::trace::graph::{Graph, GraphInput, NodeId};
use crate::trace::searching::SearchInput;
use crate::trace::seeded_rng;
use crate::trace::sorting::{generate, Shape, SortInput};
use crate::trace::strings::MatchInput;
use rand::Rng;

pub const DEFAULT_TEXT: &str = "ABABDABACDABABCABAB";
pub const DEFAULT_PATTERN: &str = "ABABCABAB";

/// Node the sample graph's shortest-path runs head for by default
pub const DEFAULT_GRAPH_TARGET: u32 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct InputSettings {
    pub size: usize,
    pub seed: u64,
    pub max_value: u32,
    pub shape: Shape,
    /// Search target; drawn from the array when absent
    pub target: Option<u32>,
    pub source: u32,
    pub to: Option<u32>,
    pub text: String,
    pub pattern: String,
}

impl InputSettings {
    pub fn from_config(config: &InputConfig) -> Self {
        InputSettings {
            size: config.size,
            seed: config.seed,
            max_value: config.max_value,
            shape: Shape::default(),
            target: None,
            source: 0,
            to: None,
            text: DEFAULT_TEXT.to_string(),
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }

    pub fn sort_input(&self, seed: u64) -> SortInput {
        SortInput::new(generate(self.shape, self.size, self.max_value, seed)).with_seed(seed)
    }

    /// Sorted array plus a target that is present unless given explicitly
    pub fn search_input(&self, seed: u64) -> SearchInput {
        let values = generate(self.shape, self.size, self.max_value, seed);
        let target = match self.target {
            Some(t) => t,
            None if values.is_empty() => 0,
            None => {
                let mut rng = seeded_rng(seed ^ 0x5EA2C4);
                values[rng.gen_range(0..values.len())]
            }
        };
        SearchInput::sorted(values, target)
    }

    /// The sample graph. Seeds other than the configured one redraw the
    /// edge weights in `1..=12`.
    pub fn graph_input(&self, seed: u64) -> GraphInput {
        let graph = if seed == self.seed {
            Graph::sample()
        } else {
            reweighted(&Graph::sample(), seed)
        };
        let target = NodeId(self.to.unwrap_or(DEFAULT_GRAPH_TARGET));
        GraphInput::new(graph, NodeId(self.source), Some(target))
    }

    pub fn match_input(&self) -> MatchInput {
        MatchInput::new(self.text.clone(), self.pattern.clone())
    }
}

impl Default for InputSettings {
    fn default() -> Self {
        InputSettings::from_config(&InputConfig::default())
    }
}

/// Copy of `graph` with every edge weight redrawn
fn reweighted(graph: &Graph, seed: u64) -> Graph {
    let mut rng = seeded_rng(seed);
    let mut out = Graph::new(graph.is_directed());
    for (_, node) in graph.nodes() {
        out.add_node(node.x, node.y, Some(node.label.clone()));
    }
    for edge in graph.edges() {
        out.add_edge(edge.from, edge.to, rng.gen_range(1..=12));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_target_is_present() {
        let settings = InputSettings::default();
        for seed in 0..20 {
            let input = settings.search_input(seed);
            assert!(input.values.contains(&input.target));
            assert!(input.values.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_explicit_target_wins() {
        let settings = InputSettings {
            target: Some(1000),
            ..InputSettings::default()
        };
        assert_eq!(settings.search_input(3).target, 1000);
    }

    #[test]
    fn test_reseeded_graph_keeps_shape() {
        let settings = InputSettings::default();
        let base = settings.graph_input(settings.seed);
        let other = settings.graph_input(settings.seed + 1);
        assert_eq!(base.graph, Graph::sample());
        assert_eq!(other.graph.node_count(), base.graph.node_count());
        assert_eq!(other.graph.edge_count(), base.graph.edge_count());
        assert!(other.graph.edges().iter().all(|e| (1..=12).contains(&e.weight)));
        assert_eq!(other.target, Some(NodeId(DEFAULT_GRAPH_TARGET)));
    }

    #[test]
    fn test_sort_input_is_deterministic() {
        let settings = InputSettings::default();
        assert_eq!(settings.sort_input(9), settings.sort_input(9));
        assert_eq!(settings.sort_input(9).values.len(), settings.size);
    }
}
