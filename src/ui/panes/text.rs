//! Text and sliding pattern

use super::{badge, pane_block};
use crate::trace::strings::MatchInput;
use crate::ui::scene::Visual;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::strings::{CharState, StringView};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn char_span(c: char, style: Style) -> Span<'static> {
    Span::styled(format!("{} ", c), style)
}

fn state_style(state: CharState) -> Style {
    match state {
        CharState::Comparing => badge(DEFAULT_THEME.compare),
        CharState::Matched => badge(DEFAULT_THEME.success),
        CharState::Mismatched => badge(DEFAULT_THEME.error),
    }
}

impl StringView {
    fn text_line(&self) -> Line<'static> {
        let spans = self
            .text
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let style = match self.focus {
                    Some((f, state)) if f == i => state_style(state),
                    _ if self.in_match(i) => Style::default()
                        .fg(DEFAULT_THEME.success)
                        .add_modifier(Modifier::UNDERLINED),
                    _ => Style::default().fg(DEFAULT_THEME.fg),
                };
                char_span(c, style)
            })
            .collect::<Vec<_>>();
        Line::from(spans)
    }

    /// The pattern shifted under its current text offset
    fn pattern_line(&self) -> Line<'static> {
        let mut spans = vec![Span::raw("  ".repeat(self.offset))];
        for (j, &c) in self.pattern.iter().enumerate() {
            let style = match (self.pattern_focus, self.focus) {
                (Some(p), Some((_, state))) if p == j => state_style(state),
                _ => Style::default().fg(DEFAULT_THEME.secondary),
            };
            spans.push(char_span(c, style));
        }
        Line::from(spans)
    }

    fn index_line(&self) -> Line<'static> {
        let digits = (0..self.text.len())
            .map(|i| format!("{} ", i % 10))
            .collect::<String>();
        Line::styled(digits, Style::default().fg(DEFAULT_THEME.comment))
    }
}

impl Visual<MatchInput> for StringView {
    fn for_input(input: &MatchInput) -> Self {
        StringView::new(&input.text, &input.pattern)
    }

    fn render(&self, _input: &MatchInput, frame: &mut Frame, area: Rect, is_focused: bool) {
        let label = Style::default().fg(DEFAULT_THEME.comment);
        let mut lines = vec![
            self.index_line(),
            self.text_line(),
            self.pattern_line(),
            Line::default(),
        ];

        if !self.failure_table.is_empty() {
            let table = self
                .failure_table
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            lines.push(Line::from(vec![
                Span::styled("failure  ", label),
                Span::raw(table),
            ]));
        }
        if let Some((pattern_hash, text_hash)) = self.hashes {
            let verdict = if pattern_hash == text_hash {
                Span::styled(" = ", badge(DEFAULT_THEME.success))
            } else {
                Span::styled(" ≠ ", badge(DEFAULT_THEME.error))
            };
            lines.push(Line::from(vec![
                Span::styled("hash     ", label),
                Span::raw(format!("{} ", pattern_hash)),
                verdict,
                Span::raw(format!(" {}", text_hash)),
            ]));
        }
        if self.done {
            let summary = if self.found.is_empty() {
                Span::styled(" No match ", badge(DEFAULT_THEME.error))
            } else {
                Span::styled(
                    format!(" {} match(es) ", self.found.len()),
                    badge(DEFAULT_THEME.success),
                )
            };
            lines.push(Line::from(summary));
        }

        let paragraph = Paragraph::new(lines).block(pane_block("Text / Pattern".to_string(), is_focused));
        frame.render_widget(paragraph, area);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        let found = if self.found.is_empty() {
            "-".to_string()
        } else {
            self.found
                .iter()
                .map(|o| o.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        vec![
            ("Offset", self.offset.to_string()),
            ("Comparisons", self.comparisons.to_string()),
            ("Found at", found),
        ]
    }
}
