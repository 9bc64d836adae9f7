//! Graph canvas

use super::pane_block;
use crate::trace::graph::{GraphInput, NodeId};
use crate::ui::scene::Visual;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::graph::{EdgeState, GraphView, NodeState};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::canvas::{Canvas, Line as CanvasLine},
    Frame,
};

/// Padding around the node bounding box, in graph units
const MARGIN: f64 = 40.0;

fn node_color(state: Option<NodeState>) -> Color {
    match state {
        None => DEFAULT_THEME.fg,
        Some(NodeState::Source) => DEFAULT_THEME.success,
        Some(NodeState::Target) => DEFAULT_THEME.error,
        Some(NodeState::Visiting) => DEFAULT_THEME.visiting,
        Some(NodeState::Visited) => DEFAULT_THEME.visited,
        Some(NodeState::Path) => DEFAULT_THEME.path,
    }
}

fn edge_color(state: Option<EdgeState>) -> Color {
    match state {
        None => DEFAULT_THEME.border_normal,
        Some(EdgeState::Relaxed) => DEFAULT_THEME.relaxed,
        Some(EdgeState::Mst) => DEFAULT_THEME.success,
        Some(EdgeState::Path) => DEFAULT_THEME.path,
    }
}

/// `[min, max]` ranges of node coordinates, widened by the margin
fn bounds(input: &GraphInput) -> ([f64; 2], [f64; 2]) {
    let (mut x, mut y) = ([f64::MAX, f64::MIN], [f64::MAX, f64::MIN]);
    for (_, node) in input.graph.nodes() {
        x = [x[0].min(node.x), x[1].max(node.x)];
        y = [y[0].min(node.y), y[1].max(node.y)];
    }
    if x[0] > x[1] {
        return ([0.0, 1.0], [0.0, 1.0]);
    }
    (
        [x[0] - MARGIN, x[1] + MARGIN],
        [y[0] - MARGIN, y[1] + MARGIN],
    )
}

impl Visual<GraphInput> for GraphView {
    fn for_input(input: &GraphInput) -> Self {
        GraphView::new(input.graph.is_directed())
    }

    fn render(&self, input: &GraphInput, frame: &mut Frame, area: Rect, is_focused: bool) {
        let graph = &input.graph;
        let (x_bounds, y_bounds) = bounds(input);
        // Graph coordinates grow downwards, the canvas grows upwards
        let flip = |y: f64| y_bounds[1] - (y - y_bounds[0]);
        let title = format!(
            "Graph ({} nodes, {} edges{})",
            graph.node_count(),
            graph.edge_count(),
            if graph.is_directed() { ", directed" } else { "" }
        );

        let canvas = Canvas::default()
            .block(pane_block(title, is_focused))
            .marker(Marker::Braille)
            .background_color(DEFAULT_THEME.bg)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                for edge in graph.edges() {
                    let (Some(a), Some(b)) = (graph.node(edge.from), graph.node(edge.to)) else {
                        continue;
                    };
                    let considering = self.considering.is_some_and(|(f, t)| {
                        (f, t) == (edge.from, edge.to)
                            || (!graph.is_directed() && (t, f) == (edge.from, edge.to))
                    });
                    let color = if considering {
                        DEFAULT_THEME.compare
                    } else {
                        edge_color(self.edge(edge.from, edge.to))
                    };
                    ctx.draw(&CanvasLine::new(a.x, flip(a.y), b.x, flip(b.y), color));
                }
                ctx.layer();

                for edge in graph.edges() {
                    let (Some(a), Some(b)) = (graph.node(edge.from), graph.node(edge.to)) else {
                        continue;
                    };
                    ctx.print(
                        (a.x + b.x) / 2.0,
                        flip((a.y + b.y) / 2.0),
                        Span::styled(
                            edge.weight.to_string(),
                            Style::default().fg(DEFAULT_THEME.comment),
                        ),
                    );
                }
                for (id, node) in graph.nodes() {
                    ctx.print(node.x, flip(node.y), node_label(self, id, &node.label));
                }
            });
        frame.render_widget(canvas, area);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        let mut stats = Vec::new();
        if !self.distances.is_empty() {
            let mut distances: Vec<_> = self.distances.iter().collect();
            distances.sort_by_key(|(id, _)| **id);
            let text = distances
                .iter()
                .map(|(id, d)| format!("{}:{}", id, d))
                .collect::<Vec<_>>()
                .join(" ");
            stats.push(("Distances", text));
        }
        if let Some(weight) = self.mst_weight {
            stats.push(("MST weight", weight.to_string()));
        }
        if let Some((from, to)) = self.negative_cycle {
            stats.push(("Negative cycle", format!("via {} -> {}", from, to)));
        }
        let visited = self
            .nodes
            .values()
            .filter(|s| matches!(s, NodeState::Visited | NodeState::Path))
            .count();
        stats.push(("Visited", visited.to_string()));
        stats
    }
}

fn node_label(view: &GraphView, id: NodeId, label: &str) -> Span<'static> {
    let text = match view.distance(id) {
        Some(d) => format!("({}) {}", label, d),
        None => format!("({})", label),
    };
    Span::styled(
        text,
        Style::default()
            .fg(node_color(view.node(id)))
            .add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::graph::Graph;

    #[test]
    fn test_bounds_cover_sample_nodes() {
        let input = GraphInput::new(Graph::sample(), NodeId(0), None);
        let (x, y) = bounds(&input);
        assert_eq!(x, [100.0 - MARGIN, 550.0 + MARGIN]);
        assert_eq!(y, [80.0 - MARGIN, 450.0 + MARGIN]);
    }

    #[test]
    fn test_bounds_of_empty_graph() {
        let input = GraphInput::new(Graph::new(false), NodeId(0), None);
        assert_eq!(bounds(&input), ([0.0, 1.0], [0.0, 1.0]));
    }
}
