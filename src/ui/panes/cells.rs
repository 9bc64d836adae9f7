//! Searching cell row

use super::{badge, pane_block};
use crate::trace::searching::SearchInput;
use crate::ui::scene::Visual;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::searching::{CellState, SearchOutcome, SearchView};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Columns taken by one cell, including its separator
const CELL_WIDTH: usize = 5;

fn cell_style(state: Option<CellState>) -> Style {
    match state {
        None => Style::default().fg(DEFAULT_THEME.fg),
        Some(CellState::Checking) => badge(DEFAULT_THEME.compare),
        Some(CellState::Found) => badge(DEFAULT_THEME.success),
        Some(CellState::Eliminated) => Style::default().fg(DEFAULT_THEME.eliminated),
        Some(CellState::Jumped) => Style::default().fg(DEFAULT_THEME.partition),
    }
}

/// Pointer row under a cell row: `L`, `M` and `H` for the bounds
fn pointer_line(view: &SearchView, start: usize, end: usize) -> Line<'static> {
    let Some(bounds) = view.bounds else {
        return Line::default();
    };
    let spans = (start..end)
        .map(|i| {
            let mut marks = String::new();
            if i == bounds.lo {
                marks.push('L');
            }
            if Some(i) == bounds.mid {
                marks.push('M');
            }
            if i == bounds.hi {
                marks.push('H');
            }
            Span::styled(
                format!("{:^width$}", marks, width = CELL_WIDTH),
                Style::default().fg(DEFAULT_THEME.secondary),
            )
        })
        .collect::<Vec<_>>();
    Line::from(spans)
}

impl Visual<SearchInput> for SearchView {
    fn for_input(input: &SearchInput) -> Self {
        SearchView::new(input.values.clone(), input.target)
    }

    fn render(&self, _input: &SearchInput, frame: &mut Frame, area: Rect, is_focused: bool) {
        let block = pane_block(format!("Searching for {}", self.target), is_focused);
        let per_row = (area.width.saturating_sub(2) as usize / CELL_WIDTH).max(1);

        let mut lines = Vec::new();
        for start in (0..self.values.len()).step_by(per_row) {
            let end = (start + per_row).min(self.values.len());
            let index_spans = (start..end)
                .map(|i| {
                    Span::styled(
                        format!("{:^width$}", i, width = CELL_WIDTH),
                        Style::default().fg(DEFAULT_THEME.comment),
                    )
                })
                .collect::<Vec<_>>();
            let value_spans = (start..end)
                .flat_map(|i| {
                    [
                        Span::styled(format!("{:^4}", self.values[i]), cell_style(self.cell(i))),
                        Span::raw(" "),
                    ]
                })
                .collect::<Vec<_>>();
            lines.push(Line::from(index_spans));
            lines.push(Line::from(value_spans));
            lines.push(pointer_line(self, start, end));
        }

        let outcome = match self.outcome {
            Some(SearchOutcome::Found(i)) => {
                Span::styled(format!(" Found at index {} ", i), badge(DEFAULT_THEME.success))
            }
            Some(SearchOutcome::NotFound) => {
                Span::styled(" Not found ", badge(DEFAULT_THEME.error))
            }
            None => Span::styled("searching...", Style::default().fg(DEFAULT_THEME.comment)),
        };
        lines.push(Line::default());
        lines.push(Line::from(outcome));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        let mut stats = vec![
            ("Target", self.target.to_string()),
            ("Probes", self.probes.to_string()),
        ];
        if let Some(b) = self.bounds {
            let mid = b.mid.map_or_else(|| "-".to_string(), |m| m.to_string());
            stats.push(("Window", format!("{}..={} (mid {})", b.lo, b.hi, mid)));
        }
        stats
    }
}
