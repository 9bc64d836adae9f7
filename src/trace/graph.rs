//! Weighted graph and graph algorithm traces
//!
//! The graph is an ordered node map plus a flat edge list. Neighbor order
//! follows edge insertion order, which fixes the visiting order of every
//! traversal below and keeps traces deterministic.

use super::registry::{AlgorithmInfo, Registry};
use super::TraceStep;
use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    directed: bool,
    next_id: u32,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Graph {
            nodes: IndexMap::new(),
            edges: Vec::new(),
            directed,
            next_id: 0,
        }
    }

    /// The eight-node undirected sample graph
    pub fn sample() -> Self {
        let mut g = Graph::new(false);
        let positions = [
            (150.0, 120.0),
            (350.0, 80.0),
            (550.0, 120.0),
            (100.0, 280.0),
            (300.0, 300.0),
            (500.0, 280.0),
            (200.0, 450.0),
            (400.0, 450.0),
        ];
        for (x, y) in positions {
            g.add_node(x, y, None);
        }
        let edges = [
            (0, 1, 4),
            (0, 3, 2),
            (1, 2, 5),
            (1, 4, 10),
            (2, 5, 3),
            (3, 4, 7),
            (3, 6, 8),
            (4, 5, 6),
            (4, 7, 1),
            (5, 7, 9),
            (6, 7, 2),
        ];
        for (from, to, weight) in edges {
            g.add_edge(NodeId(from), NodeId(to), weight);
        }
        g
    }

    /// Add a node; the label defaults to its id. Ids are never reused.
    pub fn add_node(&mut self, x: f64, y: f64, label: Option<String>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        let label = label.unwrap_or_else(|| id.to_string());
        self.nodes.insert(id, Node { x, y, label });
        id
    }

    /// Add an edge unless it is a self loop or already present. Returns
    /// whether the edge was added.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: i64) -> bool {
        if from == to || self.has_edge(from, to) {
            return false;
        }
        self.edges.push(Edge { from, to, weight });
        true
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edges.iter().any(|e| {
            (e.from == from && e.to == to) || (!self.directed && e.from == to && e.to == from)
        })
    }

    /// Outgoing `(neighbor, weight)` pairs in edge order. Undirected edges
    /// are seen from both ends.
    pub fn neighbors(&self, id: NodeId) -> Vec<(NodeId, i64)> {
        let mut out = Vec::new();
        for e in &self.edges {
            if e.from == id {
                out.push((e.to, e.weight));
            }
            if !self.directed && e.to == id {
                out.push((e.from, e.weight));
            }
        }
        out
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().map(|(id, n)| (*id, n))
    }

    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// `(u, v)` relaxation pairs for one edge: one for directed graphs,
    /// both directions otherwise
    fn directions(&self, e: &Edge) -> Vec<(NodeId, NodeId)> {
        if self.directed {
            vec![(e.from, e.to)]
        } else {
            vec![(e.from, e.to), (e.to, e.from)]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum GraphStep {
    Source { node: NodeId },
    Target { node: NodeId },
    /// Node discovered / entered
    Visit { node: NodeId },
    /// Node finished
    Visited { node: NodeId },
    Consider { from: NodeId, to: NodeId },
    Enqueue { node: NodeId },
    /// Edge becomes the best known route to `to`
    Relax {
        from: NodeId,
        to: NodeId,
        distance: Option<i64>,
    },
    Distance { node: NodeId, distance: i64 },
    MstAdd {
        from: NodeId,
        to: NodeId,
        weight: i64,
        total_weight: i64,
    },
    Path {
        nodes: Vec<NodeId>,
        edges: Vec<(NodeId, NodeId)>,
    },
    /// Edge still relaxable after `|V| - 1` rounds
    NegativeCycle { from: NodeId, to: NodeId },
}

impl TraceStep for GraphStep {
    fn kind(&self) -> &'static str {
        match self {
            GraphStep::Source { .. } => "source",
            GraphStep::Target { .. } => "target",
            GraphStep::Visit { .. } => "visit",
            GraphStep::Visited { .. } => "visited",
            GraphStep::Consider { .. } => "consider",
            GraphStep::Enqueue { .. } => "enqueue",
            GraphStep::Relax { .. } => "relax",
            GraphStep::Distance { .. } => "distance",
            GraphStep::MstAdd { .. } => "mst-add",
            GraphStep::Path { .. } => "path",
            GraphStep::NegativeCycle { .. } => "negative-cycle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphInput {
    pub graph: Graph,
    pub source: NodeId,
    pub target: Option<NodeId>,
}

impl GraphInput {
    pub fn new(graph: Graph, source: NodeId, target: Option<NodeId>) -> Self {
        GraphInput {
            graph,
            source,
            target,
        }
    }
}

pub fn registry() -> Registry<GraphInput, GraphStep> {
    let mut registry = Registry::new("graph");
    registry
        .register(
            AlgorithmInfo {
                id: "bfs",
                name: "BFS",
                time: "O(V+E)",
                space: "O(V)",
                description: "Breadth-first search explores level by level using a queue.",
            },
            bfs,
        )
        .register(
            AlgorithmInfo {
                id: "dfs",
                name: "DFS",
                time: "O(V+E)",
                space: "O(V)",
                description: "Depth-first search explores as deep as possible before backtracking.",
            },
            dfs,
        )
        .register(
            AlgorithmInfo {
                id: "dijkstra",
                name: "Dijkstra",
                time: "O((V+E)logV)",
                space: "O(V)",
                description: "Shortest paths from the source using a priority queue.",
            },
            dijkstra,
        )
        .register(
            AlgorithmInfo {
                id: "bellman-ford",
                name: "Bellman-Ford",
                time: "O(VE)",
                space: "O(V)",
                description: "Shortest paths with negative weights; detects negative cycles.",
            },
            bellman_ford,
        )
        .register(
            AlgorithmInfo {
                id: "astar",
                name: "A*",
                time: "O(E)",
                space: "O(V)",
                description: "Informed search toward the target guided by a distance heuristic.",
            },
            astar,
        )
        .register(
            AlgorithmInfo {
                id: "prim",
                name: "Prim's MST",
                time: "O((V+E)logV)",
                space: "O(V)",
                description: "Grows a spanning tree from the source by the cheapest edge.",
            },
            prim,
        )
        .register(
            AlgorithmInfo {
                id: "kruskal",
                name: "Kruskal's MST",
                time: "O(ElogE)",
                space: "O(V)",
                description: "Adds edges in weight order unless they would close a cycle.",
            },
            kruskal,
        );
    registry
}

/// Returns false (and logs) when the input's source node is missing
fn has_source(input: &GraphInput) -> bool {
    let present = input.graph.contains(input.source);
    if !present {
        warn!(source = %input.source, "source node not in graph");
    }
    present
}

pub fn bfs(input: &GraphInput) -> Vec<GraphStep> {
    let mut steps = Vec::new();
    if !has_source(input) {
        return steps;
    }
    let (graph, source) = (&input.graph, input.source);
    let mut visited = FxHashSet::default();
    let mut queue = std::collections::VecDeque::from([source]);
    visited.insert(source);
    steps.push(GraphStep::Source { node: source });
    steps.push(GraphStep::Visit { node: source });

    while let Some(node) = queue.pop_front() {
        steps.push(GraphStep::Visited { node });
        for (neighbor, _) in graph.neighbors(node) {
            steps.push(GraphStep::Consider {
                from: node,
                to: neighbor,
            });
            if visited.insert(neighbor) {
                queue.push_back(neighbor);
                steps.push(GraphStep::Enqueue { node: neighbor });
                steps.push(GraphStep::Relax {
                    from: node,
                    to: neighbor,
                    distance: None,
                });
            }
        }
    }
    steps
}

pub fn dfs(input: &GraphInput) -> Vec<GraphStep> {
    let mut steps = Vec::new();
    if !has_source(input) {
        return steps;
    }
    steps.push(GraphStep::Source { node: input.source });
    let mut visited = FxHashSet::default();
    dfs_visit(&input.graph, input.source, &mut visited, &mut steps);
    steps
}

fn dfs_visit(
    graph: &Graph,
    node: NodeId,
    visited: &mut FxHashSet<NodeId>,
    steps: &mut Vec<GraphStep>,
) {
    visited.insert(node);
    steps.push(GraphStep::Visit { node });
    for (neighbor, _) in graph.neighbors(node) {
        steps.push(GraphStep::Consider {
            from: node,
            to: neighbor,
        });
        if !visited.contains(&neighbor) {
            steps.push(GraphStep::Relax {
                from: node,
                to: neighbor,
                distance: None,
            });
            dfs_visit(graph, neighbor, visited, steps);
        }
    }
    steps.push(GraphStep::Visited { node });
}

pub fn dijkstra(input: &GraphInput) -> Vec<GraphStep> {
    let mut steps = Vec::new();
    if !has_source(input) {
        return steps;
    }
    let (graph, source, target) = (&input.graph, input.source, input.target);
    let mut dist: FxHashMap<NodeId, i64> = FxHashMap::default();
    let mut prev: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut visited = FxHashSet::default();
    // Ties on distance pop in insertion order
    let mut seq = 0u64;
    let mut heap = BinaryHeap::new();

    dist.insert(source, 0);
    heap.push(Reverse((0i64, seq, source)));
    steps.push(GraphStep::Source { node: source });
    steps.push(GraphStep::Distance {
        node: source,
        distance: 0,
    });

    while let Some(Reverse((_, _, u))) = heap.pop() {
        if !visited.insert(u) {
            continue;
        }
        steps.push(GraphStep::Visit { node: u });
        if target == Some(u) {
            reconstruct_path(&mut steps, &prev, source, u, graph.node_count());
            return steps;
        }

        let du = dist[&u];
        for (v, weight) in graph.neighbors(u) {
            if visited.contains(&v) {
                continue;
            }
            let alt = du + weight;
            steps.push(GraphStep::Consider { from: u, to: v });
            if dist.get(&v).map_or(true, |&d| alt < d) {
                dist.insert(v, alt);
                prev.insert(v, u);
                seq += 1;
                heap.push(Reverse((alt, seq, v)));
                steps.push(GraphStep::Relax {
                    from: u,
                    to: v,
                    distance: Some(alt),
                });
                steps.push(GraphStep::Distance {
                    node: v,
                    distance: alt,
                });
            }
        }
        steps.push(GraphStep::Visited { node: u });
    }

    if let Some(target) = target {
        reconstruct_path(&mut steps, &prev, source, target, graph.node_count());
    }
    steps
}

pub fn bellman_ford(input: &GraphInput) -> Vec<GraphStep> {
    let mut steps = Vec::new();
    if !has_source(input) {
        return steps;
    }
    let (graph, source) = (&input.graph, input.source);
    let mut dist: FxHashMap<NodeId, i64> = FxHashMap::default();
    let mut prev: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    dist.insert(source, 0);
    steps.push(GraphStep::Source { node: source });
    steps.push(GraphStep::Distance {
        node: source,
        distance: 0,
    });

    for _ in 1..graph.node_count() {
        for edge in graph.edges() {
            for (u, v) in graph.directions(edge) {
                let Some(&du) = dist.get(&u) else { continue };
                steps.push(GraphStep::Consider { from: u, to: v });
                let alt = du + edge.weight;
                if dist.get(&v).map_or(true, |&d| alt < d) {
                    dist.insert(v, alt);
                    prev.insert(v, u);
                    steps.push(GraphStep::Relax {
                        from: u,
                        to: v,
                        distance: Some(alt),
                    });
                    steps.push(GraphStep::Distance {
                        node: v,
                        distance: alt,
                    });
                    steps.push(GraphStep::Visit { node: v });
                }
            }
        }
    }

    for node in graph.node_ids() {
        steps.push(GraphStep::Visited { node });
    }

    for edge in graph.edges() {
        for (u, v) in graph.directions(edge) {
            let (Some(&du), Some(&dv)) = (dist.get(&u), dist.get(&v)) else {
                continue;
            };
            if du + edge.weight < dv {
                steps.push(GraphStep::NegativeCycle { from: u, to: v });
                return steps;
            }
        }
    }

    if let Some(target) = input.target {
        reconstruct_path(&mut steps, &prev, source, target, graph.node_count());
    }
    steps
}

pub fn astar(input: &GraphInput) -> Vec<GraphStep> {
    let mut steps = Vec::new();
    let graph = &input.graph;
    let Some(target) = input.target else {
        return steps;
    };
    let Some(goal) = graph.node(target) else {
        return steps;
    };
    if !has_source(input) {
        return steps;
    }
    let source = input.source;
    let heuristic = |id: NodeId| -> f64 {
        graph.node(id).map_or(0.0, |n| {
            let (dx, dy) = (n.x - goal.x, n.y - goal.y);
            (dx * dx + dy * dy).sqrt() / 50.0
        })
    };

    let mut g_score: FxHashMap<NodeId, i64> = FxHashMap::default();
    let mut f_score: FxHashMap<NodeId, f64> = FxHashMap::default();
    let mut prev: FxHashMap<NodeId, NodeId> = FxHashMap::default();
    let mut open: IndexSet<NodeId> = IndexSet::new();
    let mut closed = FxHashSet::default();

    g_score.insert(source, 0);
    f_score.insert(source, heuristic(source));
    open.insert(source);
    steps.push(GraphStep::Source { node: source });
    steps.push(GraphStep::Target { node: target });
    steps.push(GraphStep::Distance {
        node: source,
        distance: 0,
    });

    // Lowest f-score wins; ties go to the earliest opened node
    let best = |open: &IndexSet<NodeId>, f_score: &FxHashMap<NodeId, f64>| {
        let mut best: Option<(NodeId, f64)> = None;
        for &n in open {
            let f = f_score.get(&n).copied().unwrap_or(f64::INFINITY);
            if best.map_or(true, |(_, bf)| f < bf) {
                best = Some((n, f));
            }
        }
        best.map(|(n, _)| n)
    };

    while let Some(current) = best(&open, &f_score) {
        if current == target {
            reconstruct_path(&mut steps, &prev, source, target, graph.node_count());
            return steps;
        }
        open.shift_remove(&current);
        closed.insert(current);
        steps.push(GraphStep::Visit { node: current });

        let g_current = g_score.get(&current).copied().unwrap_or(0);
        for (neighbor, weight) in graph.neighbors(current) {
            if closed.contains(&neighbor) {
                continue;
            }
            steps.push(GraphStep::Consider {
                from: current,
                to: neighbor,
            });
            let tentative = g_current + weight;
            if g_score.get(&neighbor).map_or(true, |&g| tentative < g) {
                prev.insert(neighbor, current);
                g_score.insert(neighbor, tentative);
                f_score.insert(neighbor, tentative as f64 + heuristic(neighbor));
                steps.push(GraphStep::Relax {
                    from: current,
                    to: neighbor,
                    distance: Some(tentative),
                });
                steps.push(GraphStep::Distance {
                    node: neighbor,
                    distance: tentative,
                });
                open.insert(neighbor);
                steps.push(GraphStep::Enqueue { node: neighbor });
            }
        }
        steps.push(GraphStep::Visited { node: current });
    }
    steps
}

pub fn prim(input: &GraphInput) -> Vec<GraphStep> {
    let mut steps = Vec::new();
    if !has_source(input) {
        return steps;
    }
    let (graph, source) = (&input.graph, input.source);
    let mut in_tree = FxHashSet::default();
    let mut heap = BinaryHeap::new();
    let mut seq = 0u64;
    let mut total_weight = 0;

    in_tree.insert(source);
    steps.push(GraphStep::Source { node: source });
    steps.push(GraphStep::Visit { node: source });
    for (neighbor, weight) in graph.neighbors(source) {
        seq += 1;
        heap.push(Reverse((weight, seq, source, neighbor)));
    }

    while in_tree.len() < graph.node_count() {
        let Some(Reverse((weight, _, from, to))) = heap.pop() else {
            break;
        };
        if in_tree.contains(&to) {
            continue;
        }
        steps.push(GraphStep::Consider { from, to });
        in_tree.insert(to);
        total_weight += weight;
        steps.push(GraphStep::MstAdd {
            from,
            to,
            weight,
            total_weight,
        });
        steps.push(GraphStep::Visit { node: to });

        for (neighbor, w) in graph.neighbors(to) {
            if !in_tree.contains(&neighbor) {
                seq += 1;
                heap.push(Reverse((w, seq, to, neighbor)));
            }
        }
    }
    steps
}

/// Union-find with path compression and union by rank
struct DisjointSet {
    parent: FxHashMap<NodeId, NodeId>,
    rank: FxHashMap<NodeId, u32>,
}

impl DisjointSet {
    fn new(nodes: impl Iterator<Item = NodeId>) -> Self {
        let mut parent = FxHashMap::default();
        let mut rank = FxHashMap::default();
        for n in nodes {
            parent.insert(n, n);
            rank.insert(n, 0);
        }
        DisjointSet { parent, rank }
    }

    fn find(&mut self, x: NodeId) -> NodeId {
        let p = *self.parent.entry(x).or_insert(x);
        if p == x {
            return x;
        }
        let root = self.find(p);
        self.parent.insert(x, root);
        root
    }

    /// Merge the sets of `x` and `y`; false if they were already joined
    fn union(&mut self, x: NodeId, y: NodeId) -> bool {
        let (px, py) = (self.find(x), self.find(y));
        if px == py {
            return false;
        }
        let rx = self.rank.get(&px).copied().unwrap_or(0);
        let ry = self.rank.get(&py).copied().unwrap_or(0);
        if rx < ry {
            self.parent.insert(px, py);
        } else if rx > ry {
            self.parent.insert(py, px);
        } else {
            self.parent.insert(py, px);
            self.rank.insert(px, rx + 1);
        }
        true
    }
}

pub fn kruskal(input: &GraphInput) -> Vec<GraphStep> {
    let mut steps = Vec::new();
    let graph = &input.graph;
    let mut sets = DisjointSet::new(graph.node_ids());
    let mut sorted = graph.edges().to_vec();
    // Stable, so equal weights keep edge order
    sorted.sort_by_key(|e| e.weight);
    let mut total_weight = 0;

    for edge in sorted {
        steps.push(GraphStep::Consider {
            from: edge.from,
            to: edge.to,
        });
        if sets.union(edge.from, edge.to) {
            total_weight += edge.weight;
            steps.push(GraphStep::MstAdd {
                from: edge.from,
                to: edge.to,
                weight: edge.weight,
                total_weight,
            });
        }
    }
    steps
}

/// Walk `prev` back from `target` and emit a `Path` step if it reaches
/// `source`. `limit` bounds the walk when `prev` contains a cycle.
fn reconstruct_path(
    steps: &mut Vec<GraphStep>,
    prev: &FxHashMap<NodeId, NodeId>,
    source: NodeId,
    target: NodeId,
    limit: usize,
) {
    let mut nodes = vec![target];
    let mut edges = Vec::new();
    let mut current = target;
    while current != source && nodes.len() <= limit {
        let Some(&p) = prev.get(&current) else { break };
        edges.push((p, current));
        nodes.push(p);
        current = p;
    }
    if current != source {
        return;
    }
    nodes.reverse();
    edges.reverse();
    steps.push(GraphStep::Path { nodes, edges });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(source: u32, target: Option<u32>) -> GraphInput {
        GraphInput::new(Graph::sample(), NodeId(source), target.map(NodeId))
    }

    fn path(steps: &[GraphStep]) -> Option<Vec<u32>> {
        steps.iter().rev().find_map(|s| match s {
            GraphStep::Path { nodes, .. } => Some(nodes.iter().map(|n| n.0).collect()),
            _ => None,
        })
    }

    fn final_mst_weight(steps: &[GraphStep]) -> Option<i64> {
        steps.iter().rev().find_map(|s| match s {
            GraphStep::MstAdd { total_weight, .. } => Some(*total_weight),
            _ => None,
        })
    }

    #[test]
    fn test_sample_graph_shape() {
        let g = Graph::sample();
        assert_eq!(g.node_count(), 8);
        assert_eq!(g.edge_count(), 11);
        assert!(!g.is_directed());
        assert_eq!(
            g.neighbors(NodeId(0)),
            vec![(NodeId(1), 4), (NodeId(3), 2)]
        );
        assert_eq!(g.node(NodeId(4)).map(|n| n.label.as_str()), Some("4"));
    }

    #[test]
    fn test_add_edge_rejects_duplicates_and_self_loops() {
        let mut g = Graph::new(false);
        let a = g.add_node(0.0, 0.0, None);
        let b = g.add_node(1.0, 0.0, Some("b".to_string()));
        assert!(g.add_edge(a, b, 3));
        assert!(!g.add_edge(b, a, 5));
        assert!(!g.add_edge(a, a, 1));
        assert_eq!(g.edge_count(), 1);

        let mut d = Graph::new(true);
        let a = d.add_node(0.0, 0.0, None);
        let b = d.add_node(1.0, 0.0, None);
        assert!(d.add_edge(a, b, 1));
        assert!(d.add_edge(b, a, 1));
        assert_eq!(d.neighbors(a), vec![(b, 1)]);
    }

    #[test]
    fn test_traversals_reach_every_node() {
        for producer in [bfs as fn(&GraphInput) -> Vec<GraphStep>, dfs] {
            let steps = producer(&input(0, None));
            let visited: FxHashSet<_> = steps
                .iter()
                .filter_map(|s| match s {
                    GraphStep::Visited { node } => Some(*node),
                    _ => None,
                })
                .collect();
            assert_eq!(visited.len(), 8);
            assert_eq!(steps[0], GraphStep::Source { node: NodeId(0) });
        }
    }

    #[test]
    fn test_bfs_order() {
        let order: Vec<u32> = bfs(&input(0, None))
            .iter()
            .filter_map(|s| match s {
                GraphStep::Visited { node } => Some(node.0),
                _ => None,
            })
            .collect();
        assert_eq!(order, vec![0, 1, 3, 2, 4, 6, 5, 7]);
    }

    #[test]
    fn test_shortest_paths_agree() {
        for producer in [
            dijkstra as fn(&GraphInput) -> Vec<GraphStep>,
            bellman_ford,
            astar,
        ] {
            let steps = producer(&input(0, Some(7)));
            assert_eq!(path(&steps), Some(vec![0, 3, 4, 7]));
        }
    }

    #[test]
    fn test_dijkstra_final_distances() {
        let steps = dijkstra(&input(0, None));
        let mut dist = FxHashMap::default();
        for s in &steps {
            if let GraphStep::Distance { node, distance } = s {
                dist.insert(node.0, *distance);
            }
        }
        assert_eq!(dist[&7], 10);
        assert_eq!(dist[&5], 12);
        assert_eq!(dist[&2], 9);
        assert_eq!(path(&steps), None);
    }

    #[test]
    fn test_spanning_trees_have_equal_weight() {
        let prim_steps = prim(&input(0, None));
        let kruskal_steps = kruskal(&input(0, None));
        assert_eq!(final_mst_weight(&prim_steps), Some(23));
        assert_eq!(final_mst_weight(&kruskal_steps), Some(23));
        let added = |steps: &[GraphStep]| {
            steps
                .iter()
                .filter(|s| matches!(s, GraphStep::MstAdd { .. }))
                .count()
        };
        assert_eq!(added(&prim_steps), 7);
        assert_eq!(added(&kruskal_steps), 7);
    }

    #[test]
    fn test_bellman_ford_detects_negative_cycle() {
        let mut g = Graph::new(true);
        let a = g.add_node(0.0, 0.0, None);
        let b = g.add_node(1.0, 0.0, None);
        let c = g.add_node(2.0, 0.0, None);
        g.add_edge(a, b, 1);
        g.add_edge(b, c, -2);
        g.add_edge(c, b, 1);
        let steps = bellman_ford(&GraphInput::new(g, a, Some(c)));
        assert!(matches!(steps.last(), Some(GraphStep::NegativeCycle { .. })));
        assert_eq!(path(&steps), None);
    }

    #[test]
    fn test_unreachable_target_has_no_path() {
        let mut g = Graph::sample();
        let island = g.add_node(700.0, 700.0, None);
        for producer in [
            dijkstra as fn(&GraphInput) -> Vec<GraphStep>,
            bellman_ford,
            astar,
        ] {
            let steps = producer(&GraphInput::new(g.clone(), NodeId(0), Some(island)));
            assert_eq!(path(&steps), None);
        }
    }

    #[test]
    fn test_missing_source_yields_empty_trace() {
        let registry = registry();
        for id in ["bfs", "dfs", "dijkstra", "bellman-ford", "astar", "prim"] {
            let steps = registry.run(id, &input(42, Some(7))).unwrap();
            assert!(steps.is_empty(), "{}", id);
        }
    }

    #[test]
    fn test_astar_without_target_is_empty() {
        assert!(astar(&input(0, None)).is_empty());
    }
}
