//! Data structure layouts
//!
//! Each structure draws its current state as text lines, with the node(s)
//! touched by the latest step highlighted and earlier visits dimmed.

use super::{badge, pane_block};
use crate::trace::structures::bst::{BstNode, TreeStep};
use crate::trace::structures::hash_table::HashStep;
use crate::trace::structures::heap::HeapStep;
use crate::trace::structures::linked_list::ListStep;
use crate::trace::structures::stack_queue::LinearStep;
use crate::trace::structures::trie::{TrieNode, TrieStep};
use crate::trace::structures::{Bst, HashTable, Heap, HeapKind, LinkedList, Queue, Stack, Trie};
use crate::trace::TraceStep;
use crate::ui::scene::Visual;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::StructureView;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn plain() -> Style {
    Style::default().fg(DEFAULT_THEME.fg)
}

fn dim() -> Style {
    Style::default().fg(DEFAULT_THEME.comment)
}

fn visited() -> Style {
    Style::default().fg(DEFAULT_THEME.visited)
}

fn draw(frame: &mut Frame, area: Rect, title: String, lines: Vec<Line<'static>>, is_focused: bool) {
    frame.render_widget(Paragraph::new(lines).block(pane_block(title, is_focused)), area);
}

fn last_kind<S: TraceStep>(trail: &[S]) -> String {
    trail.last().map_or("-", |s| s.kind()).to_string()
}

// ========== Linked list ==========

fn list_focus(step: &ListStep) -> Option<(usize, Color)> {
    match *step {
        ListStep::Highlight { index }
        | ListStep::Traverse { index }
        | ListStep::Compare { index, .. } => Some((index, DEFAULT_THEME.compare)),
        ListStep::Found { index } | ListStep::Insert { index, .. } => {
            Some((index, DEFAULT_THEME.success))
        }
        ListStep::Delete { index } => Some((index, DEFAULT_THEME.error)),
        ListStep::NotFound | ListStep::Reverse { .. } | ListStep::Done { .. } => None,
    }
}

impl Visual<LinkedList> for StructureView<LinkedList> {
    fn for_input(input: &LinkedList) -> Self {
        StructureView::new(input.clone())
    }

    fn render(&self, _input: &LinkedList, frame: &mut Frame, area: Rect, is_focused: bool) {
        let focus = self.last().and_then(list_focus);
        let mut spans = vec![Span::styled("head → ", dim())];
        for (i, value) in self.current.nodes.iter().enumerate() {
            let style = match focus {
                Some((f, color)) if f == i => badge(color),
                _ => plain(),
            };
            spans.push(Span::styled(format!("[{}]", value), style));
            spans.push(Span::styled(" → ", dim()));
        }
        spans.push(Span::styled("null", dim()));

        let mut lines = vec![Line::from(spans)];
        if let Some(ListStep::NotFound) = self.last() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(" Not found ", badge(DEFAULT_THEME.error))));
        }
        draw(frame, area, "Linked List".to_string(), lines, is_focused);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Length", self.current.len().to_string()),
            ("Last step", last_kind(&self.trail)),
        ]
    }
}

// ========== Stack and queue ==========

fn linear_focus(step: &LinearStep) -> Option<(usize, Color)> {
    match *step {
        LinearStep::Push { index, .. } | LinearStep::Enqueue { index, .. } => {
            Some((index, DEFAULT_THEME.success))
        }
        LinearStep::Highlight { index } => Some((index, DEFAULT_THEME.error)),
        LinearStep::Peek { index } => Some((index, DEFAULT_THEME.compare)),
        _ => None,
    }
}

/// Value that just left the structure, if any
fn departed(step: Option<&LinearStep>) -> Option<i64> {
    match step {
        Some(LinearStep::Pop { value, .. }) | Some(LinearStep::Dequeue { value, .. }) => {
            Some(*value)
        }
        _ => None,
    }
}

fn departed_line(step: Option<&LinearStep>) -> Option<Line<'static>> {
    departed(step).map(|v| {
        Line::from(vec![
            Span::styled("removed ", dim()),
            Span::styled(format!(" {} ", v), badge(DEFAULT_THEME.error)),
        ])
    })
}

impl Visual<Stack> for StructureView<Stack> {
    fn for_input(input: &Stack) -> Self {
        StructureView::new(input.clone())
    }

    fn render(&self, _input: &Stack, frame: &mut Frame, area: Rect, is_focused: bool) {
        let focus = self.last().and_then(linear_focus);
        let items = &self.current.items;
        let mut lines: Vec<Line> = items
            .iter()
            .enumerate()
            .rev()
            .map(|(i, v)| {
                let style = match focus {
                    Some((f, color)) if f == i => badge(color),
                    _ => plain(),
                };
                let marker = if i + 1 == items.len() { " ← top" } else { "" };
                Line::from(vec![
                    Span::styled(format!("│ {:^6} │", v), style),
                    Span::styled(marker, dim()),
                ])
            })
            .collect();
        lines.push(Line::styled("└────────┘", dim()));
        if items.is_empty() {
            lines.insert(0, Line::styled("(empty)", dim()));
        }
        lines.extend(departed_line(self.last()));
        draw(frame, area, "Stack".to_string(), lines, is_focused);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Size", self.current.items.len().to_string()),
            ("Last step", last_kind(&self.trail)),
        ]
    }
}

impl Visual<Queue> for StructureView<Queue> {
    fn for_input(input: &Queue) -> Self {
        StructureView::new(input.clone())
    }

    fn render(&self, _input: &Queue, frame: &mut Frame, area: Rect, is_focused: bool) {
        let focus = self.last().and_then(linear_focus);
        let mut spans = vec![Span::styled("front ", dim())];
        for (i, v) in self.current.items.iter().enumerate() {
            let style = match focus {
                Some((f, color)) if f == i => badge(color),
                _ => plain(),
            };
            spans.push(Span::styled(format!("[{}]", v), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled("rear", dim()));
        let mut lines = vec![Line::from(spans)];
        lines.extend(departed_line(self.last()));
        draw(frame, area, "Queue".to_string(), lines, is_focused);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Size", self.current.items.len().to_string()),
            ("Last step", last_kind(&self.trail)),
        ]
    }
}

// ========== Binary search tree ==========

impl StructureView<Bst> {
    fn tree_style(&self, value: i64) -> Style {
        let current = match self.last() {
            Some(TreeStep::Visit { value: v }) if *v == value => Some(DEFAULT_THEME.compare),
            Some(TreeStep::Found { value: v }) | Some(TreeStep::InsertDone { value: v })
                if *v == value =>
            {
                Some(DEFAULT_THEME.success)
            }
            _ => None,
        };
        if let Some(color) = current {
            return badge(color);
        }
        let seen = self
            .trail
            .iter()
            .any(|s| matches!(s, TreeStep::Visit { value: v } if *v == value));
        if seen {
            visited()
        } else {
            plain()
        }
    }

    fn tree_lines(&self, node: &BstNode, prefix: &str, side: &str, lines: &mut Vec<Line<'static>>) {
        lines.push(Line::from(vec![
            Span::styled(format!("{}{}", prefix, side), dim()),
            Span::styled(format!(" {} ", node.value), self.tree_style(node.value)),
        ]));
        let child_prefix = match side {
            "├─L " => format!("{}│   ", prefix),
            "└─R " | "└─L " => format!("{}    ", prefix),
            _ => prefix.to_string(),
        };
        match (node.left.as_deref(), node.right.as_deref()) {
            (Some(l), Some(r)) => {
                self.tree_lines(l, &child_prefix, "├─L ", lines);
                self.tree_lines(r, &child_prefix, "└─R ", lines);
            }
            (Some(l), None) => self.tree_lines(l, &child_prefix, "└─L ", lines),
            (None, Some(r)) => self.tree_lines(r, &child_prefix, "└─R ", lines),
            (None, None) => {}
        }
    }
}

impl Visual<Bst> for StructureView<Bst> {
    fn for_input(input: &Bst) -> Self {
        StructureView::new(input.clone())
    }

    fn render(&self, _input: &Bst, frame: &mut Frame, area: Rect, is_focused: bool) {
        let mut lines = Vec::new();
        match self.current.root.as_deref() {
            Some(root) => self.tree_lines(root, "", "", &mut lines),
            None => lines.push(Line::styled("(empty tree)", dim())),
        }
        if let Some(TreeStep::NotFound) = self.last() {
            lines.push(Line::from(Span::styled(" Not found ", badge(DEFAULT_THEME.error))));
        }
        if let Some(TreeStep::DeleteDone { value }) = self.last() {
            lines.push(Line::from(Span::styled(
                format!(" Deleted {} ", value),
                badge(DEFAULT_THEME.error),
            )));
        }
        let order = self
            .trail
            .iter()
            .filter_map(|s| match s {
                TreeStep::Visit { value } => Some(value.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>();
        if !order.is_empty() {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("visited ", dim()),
                Span::styled(order.join(" → "), visited()),
            ]));
        }
        draw(frame, area, "Binary Search Tree".to_string(), lines, is_focused);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Nodes", self.current.inorder().len().to_string()),
            ("Last step", last_kind(&self.trail)),
        ]
    }
}

// ========== Heap ==========

fn heap_focus(step: &HeapStep) -> (Vec<usize>, Color) {
    match step {
        HeapStep::Insert { index, .. } => (vec![*index], DEFAULT_THEME.success),
        HeapStep::Compare { indices, .. } => (indices.to_vec(), DEFAULT_THEME.compare),
        HeapStep::Swap { indices, .. } => (indices.to_vec(), DEFAULT_THEME.swap),
        HeapStep::Highlight { indices, .. } => (indices.clone(), DEFAULT_THEME.partition),
        HeapStep::Extract { .. } | HeapStep::Done { .. } => (Vec::new(), DEFAULT_THEME.fg),
    }
}

impl Visual<Heap> for StructureView<Heap> {
    fn for_input(input: &Heap) -> Self {
        StructureView::new(input.clone())
    }

    fn render(&self, _input: &Heap, frame: &mut Frame, area: Rect, is_focused: bool) {
        let (focus, color) = self.last().map_or((Vec::new(), DEFAULT_THEME.fg), heap_focus);
        let items = &self.current.items;
        let style_of = |i: usize| {
            if focus.contains(&i) {
                badge(color)
            } else {
                plain()
            }
        };

        let mut lines = vec![Line::from(
            items
                .iter()
                .enumerate()
                .flat_map(|(i, v)| [Span::styled(format!("{:^4}", v), style_of(i)), Span::raw(" ")])
                .collect::<Vec<_>>(),
        )];
        lines.push(Line::styled(
            (0..items.len()).map(|i| format!("{:^4} ", i)).collect::<String>(),
            dim(),
        ));
        lines.push(Line::default());

        // One line per tree level
        let mut start = 0;
        let mut width = 1;
        while start < items.len() {
            let end = (start + width).min(items.len());
            let spans = (start..end)
                .map(|i| Span::styled(format!(" {} ", items[i]), style_of(i)))
                .collect::<Vec<_>>();
            lines.push(Line::from(spans).centered());
            start = end;
            width *= 2;
        }

        if let Some(HeapStep::Extract { value, .. }) = self.last() {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled("extracted ", dim()),
                Span::styled(format!(" {} ", value), badge(DEFAULT_THEME.error)),
            ]));
        }
        let title = match self.current.kind {
            HeapKind::Min => "Min Heap",
            HeapKind::Max => "Max Heap",
        };
        draw(frame, area, title.to_string(), lines, is_focused);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        let top = self
            .current
            .peek()
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        vec![
            ("Size", self.current.items.len().to_string()),
            ("Top", top),
            ("Last step", last_kind(&self.trail)),
        ]
    }
}

// ========== Hash table ==========

/// `(bucket, slot)` touched by a step; the slot is absent for bucket-wide steps
fn hash_focus(step: &HashStep) -> Option<(usize, Option<usize>, Color)> {
    match *step {
        HashStep::Hash { bucket, .. } | HashStep::ProbeBucket { bucket } => {
            Some((bucket, None, DEFAULT_THEME.compare))
        }
        HashStep::ChainTraverse { bucket, slot } => {
            Some((bucket, Some(slot), DEFAULT_THEME.compare))
        }
        HashStep::Found { bucket, slot } | HashStep::Update { bucket, slot, .. } => {
            Some((bucket, Some(slot), DEFAULT_THEME.success))
        }
        HashStep::InsertDone { bucket, .. } => Some((bucket, None, DEFAULT_THEME.success)),
        HashStep::DeleteDone { bucket, .. } => Some((bucket, None, DEFAULT_THEME.error)),
        HashStep::NotFound { .. } | HashStep::Done { .. } => None,
    }
}

impl Visual<HashTable> for StructureView<HashTable> {
    fn for_input(input: &HashTable) -> Self {
        StructureView::new(input.clone())
    }

    fn render(&self, _input: &HashTable, frame: &mut Frame, area: Rect, is_focused: bool) {
        let focus = self.last().and_then(hash_focus);
        let mut lines = Vec::new();
        for (b, chain) in self.current.buckets.iter().enumerate() {
            let bucket_style = match focus {
                Some((fb, None, color)) if fb == b => badge(color),
                Some((fb, Some(_), _)) if fb == b => Style::default().fg(DEFAULT_THEME.compare),
                _ => dim(),
            };
            let mut spans = vec![Span::styled(format!(" {:>2} ", b), bucket_style), Span::raw(" │ ")];
            for (s, entry) in chain.iter().enumerate() {
                let style = match focus {
                    Some((fb, Some(fs), color)) if fb == b && fs == s => badge(color),
                    _ => plain(),
                };
                if s > 0 {
                    spans.push(Span::styled(" → ", dim()));
                }
                spans.push(Span::styled(format!("{}={}", entry.key, entry.value), style));
            }
            lines.push(Line::from(spans));
        }
        if let Some(HashStep::Hash { key, bucket }) = self.last() {
            lines.push(Line::default());
            lines.push(Line::from(vec![
                Span::styled(format!("hash(\"{}\") % {} = ", key, self.current.buckets.len()), dim()),
                Span::styled(format!(" {} ", bucket), badge(DEFAULT_THEME.compare)),
            ]));
        }
        if let Some(HashStep::NotFound { key }) = self.last() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                format!(" '{}' not found ", key),
                badge(DEFAULT_THEME.error),
            )));
        }
        draw(frame, area, "Hash Table".to_string(), lines, is_focused);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        let longest = self.current.buckets.iter().map(Vec::len).max().unwrap_or(0);
        vec![
            ("Entries", self.current.len().to_string()),
            ("Buckets", self.current.buckets.len().to_string()),
            ("Longest chain", longest.to_string()),
            ("Last step", last_kind(&self.trail)),
        ]
    }
}

// ========== Trie ==========

impl StructureView<Trie> {
    fn trie_style(&self, path: &str) -> Style {
        if let Some(step) = self.last() {
            if step.path() == Some(path) {
                let color = match step {
                    TrieStep::Found { .. }
                    | TrieStep::PrefixFound { .. }
                    | TrieStep::CreateNode { .. }
                    | TrieStep::MarkEnd { .. } => DEFAULT_THEME.success,
                    TrieStep::NotFound { .. }
                    | TrieStep::PrefixOnly { .. }
                    | TrieStep::DeleteWord { .. } => DEFAULT_THEME.error,
                    TrieStep::VisitNode { .. } | TrieStep::Done => DEFAULT_THEME.compare,
                };
                return badge(color);
            }
        }
        if self.trail.iter().any(|s| s.path() == Some(path)) {
            visited()
        } else {
            plain()
        }
    }

    fn trie_lines(&self, node: &TrieNode, path: &mut String, depth: usize, lines: &mut Vec<Line<'static>>) {
        for (ch, child) in &node.children {
            path.push(*ch);
            let end = if child.is_end { "•" } else { "" };
            lines.push(Line::from(vec![
                Span::styled("  ".repeat(depth), dim()),
                Span::styled(format!(" {} ", ch), self.trie_style(path)),
                Span::styled(end, Style::default().fg(DEFAULT_THEME.success)),
            ]));
            self.trie_lines(child, path, depth + 1, lines);
            path.pop();
        }
    }
}

impl Visual<Trie> for StructureView<Trie> {
    fn for_input(input: &Trie) -> Self {
        StructureView::new(input.clone())
    }

    fn render(&self, _input: &Trie, frame: &mut Frame, area: Rect, is_focused: bool) {
        let mut lines = vec![Line::styled("(root)", dim())];
        self.trie_lines(&self.current.root, &mut String::new(), 1, &mut lines);
        draw(frame, area, "Trie".to_string(), lines, is_focused);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Words", self.current.words().len().to_string()),
            ("Nodes", self.current.root.count().to_string()),
            ("Last step", last_kind(&self.trail)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::structures::bst::BstOp;
    use crate::trace::structures::Structure;
    use crate::view::reduce;

    #[test]
    fn test_bst_lines_cover_every_node() {
        let view = StructureView::new(Bst::sample());
        let mut lines = Vec::new();
        if let Some(root) = view.current.root.as_deref() {
            view.tree_lines(root, "", "", &mut lines);
        }
        assert_eq!(lines.len(), 11);
    }

    #[test]
    fn test_bst_search_highlights_found_node() {
        let before = Bst::sample();
        let outcome = before.run(&BstOp::Search(35));
        let mut view = StructureView::new(before);
        reduce(&mut view, &outcome.steps);
        assert_eq!(view.tree_style(35), badge(DEFAULT_THEME.success));
        assert_eq!(view.tree_style(30), visited());
        assert_eq!(view.tree_style(80), plain());
    }

    #[test]
    fn test_trie_lines_cover_every_node() {
        let view = StructureView::new(Trie::sample());
        let mut lines = Vec::new();
        view.trie_lines(&view.current.root, &mut String::new(), 1, &mut lines);
        // every node except the root
        assert_eq!(lines.len(), view.current.root.count() - 1);
    }

    #[test]
    fn test_linear_focus() {
        let push = LinearStep::Push {
            value: 3,
            index: 2,
            items: vec![1, 2, 3],
        };
        assert_eq!(linear_focus(&push), Some((2, DEFAULT_THEME.success)));
        let pop = LinearStep::Pop {
            value: 3,
            items: vec![1, 2],
        };
        assert_eq!(linear_focus(&pop), None);
        assert_eq!(departed(Some(&pop)), Some(3));
    }
}
