//! Node and edge colouring for graph traces

use super::ViewModel;
use crate::trace::graph::{GraphStep, NodeId};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Source,
    Target,
    /// Discovered / on the frontier
    Visiting,
    Visited,
    Path,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeState {
    Relaxed,
    Mst,
    Path,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphView {
    directed: bool,
    pub nodes: FxHashMap<NodeId, NodeState>,
    edges: FxHashMap<(NodeId, NodeId), EdgeState>,
    pub distances: FxHashMap<NodeId, i64>,
    pub mst_weight: Option<i64>,
    pub negative_cycle: Option<(NodeId, NodeId)>,
    /// Edge looked at by the latest step
    pub considering: Option<(NodeId, NodeId)>,
}

impl GraphView {
    pub fn new(directed: bool) -> Self {
        GraphView {
            directed,
            nodes: FxHashMap::default(),
            edges: FxHashMap::default(),
            distances: FxHashMap::default(),
            mst_weight: None,
            negative_cycle: None,
            considering: None,
        }
    }

    /// Undirected edges are stored under one orientation
    fn key(&self, from: NodeId, to: NodeId) -> (NodeId, NodeId) {
        if self.directed || from <= to {
            (from, to)
        } else {
            (to, from)
        }
    }

    pub fn node(&self, id: NodeId) -> Option<NodeState> {
        self.nodes.get(&id).copied()
    }

    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<EdgeState> {
        self.edges.get(&self.key(from, to)).copied()
    }

    pub fn distance(&self, id: NodeId) -> Option<i64> {
        self.distances.get(&id).copied()
    }

    fn mark_edge(&mut self, from: NodeId, to: NodeId, state: EdgeState) {
        let key = self.key(from, to);
        self.edges.insert(key, state);
    }
}

impl ViewModel<GraphStep> for GraphView {
    fn reset(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.distances.clear();
        self.mst_weight = None;
        self.negative_cycle = None;
        self.considering = None;
    }

    fn apply(&mut self, step: &GraphStep, _index: usize) {
        self.considering = None;
        match step {
            GraphStep::Source { node } => {
                self.nodes.insert(*node, NodeState::Source);
            }
            GraphStep::Target { node } => {
                self.nodes.insert(*node, NodeState::Target);
            }
            GraphStep::Visit { node } | GraphStep::Enqueue { node } => {
                self.nodes.insert(*node, NodeState::Visiting);
            }
            GraphStep::Visited { node } => {
                self.nodes.insert(*node, NodeState::Visited);
            }
            GraphStep::Consider { from, to } => {
                self.considering = Some((*from, *to));
            }
            GraphStep::Relax { from, to, distance } => {
                self.mark_edge(*from, *to, EdgeState::Relaxed);
                if let Some(d) = distance {
                    self.distances.insert(*to, *d);
                }
            }
            GraphStep::Distance { node, distance } => {
                self.distances.insert(*node, *distance);
            }
            GraphStep::MstAdd {
                from,
                to,
                total_weight,
                ..
            } => {
                self.mark_edge(*from, *to, EdgeState::Mst);
                self.nodes.insert(*from, NodeState::Visited);
                self.nodes.insert(*to, NodeState::Visited);
                self.mst_weight = Some(*total_weight);
            }
            GraphStep::Path { nodes, edges } => {
                for n in nodes {
                    self.nodes.insert(*n, NodeState::Path);
                }
                for (f, t) in edges {
                    self.mark_edge(*f, *t, EdgeState::Path);
                }
            }
            GraphStep::NegativeCycle { from, to } => {
                self.negative_cycle = Some((*from, *to));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::graph::{dijkstra, kruskal, Graph, GraphInput};
    use crate::view::reduce;

    #[test]
    fn test_shortest_path_view() {
        let input = GraphInput::new(Graph::sample(), NodeId(0), Some(NodeId(7)));
        let mut view = GraphView::new(false);
        reduce(&mut view, &dijkstra(&input));
        assert_eq!(view.distance(NodeId(7)), Some(10));
        for n in [0, 3, 4, 7] {
            assert_eq!(view.node(NodeId(n)), Some(NodeState::Path));
        }
        assert_eq!(view.edge(NodeId(4), NodeId(3)), Some(EdgeState::Path));
    }

    #[test]
    fn test_mst_view() {
        let input = GraphInput::new(Graph::sample(), NodeId(0), None);
        let mut view = GraphView::new(false);
        reduce(&mut view, &kruskal(&input));
        assert_eq!(view.mst_weight, Some(23));
        assert_eq!(view.edge(NodeId(7), NodeId(4)), Some(EdgeState::Mst));
        assert_eq!(view.edge(NodeId(1), NodeId(4)), None);
    }

    #[test]
    fn test_directed_edges_keep_orientation() {
        let mut view = GraphView::new(true);
        view.apply(
            &GraphStep::Relax {
                from: NodeId(2),
                to: NodeId(1),
                distance: None,
            },
            0,
        );
        assert_eq!(view.edge(NodeId(2), NodeId(1)), Some(EdgeState::Relaxed));
        assert_eq!(view.edge(NodeId(1), NodeId(2)), None);
    }
}
