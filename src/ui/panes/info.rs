//! Algorithm details, live counters and the step log

use super::pane_block;
use crate::ui::scene::Scene;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

fn field_line(key: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<12}", key), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

/// Render the info pane: title, details, counters and a progress gauge
pub fn render_info_pane(frame: &mut Frame, area: Rect, scene: &dyn Scene, is_focused: bool) {
    let block = pane_block(scene.family().to_string(), is_focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let mut lines = vec![
        Line::styled(
            scene.title(),
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Line::default(),
    ];
    lines.extend(scene.details().into_iter().map(|(k, v)| field_line(k, v)));
    lines.push(Line::default());
    lines.extend(scene.stats().into_iter().map(|(k, v)| field_line(k, v)));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), rows[0]);

    let state = scene.state();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(DEFAULT_THEME.primary).bg(DEFAULT_THEME.current_line_bg))
        .ratio(state.progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", state.progress * 100.0));
    frame.render_widget(gauge, rows[1]);
}

/// First row of a `height`-row window that keeps `cursor` visible, or
/// starts at `scroll` when the user has scrolled away
pub fn log_window(cursor: Option<usize>, total: usize, height: usize, scroll: Option<usize>) -> usize {
    let max_start = total.saturating_sub(height);
    match scroll {
        Some(s) => s.min(max_start),
        None => cursor
            .map_or(0, |c| c.saturating_sub(height / 2))
            .min(max_start),
    }
}

/// Render the step log around the cursor
pub fn render_steps_pane(
    frame: &mut Frame,
    area: Rect,
    scene: &dyn Scene,
    is_focused: bool,
    scroll: Option<usize>,
) {
    let state = scene.state();
    let cursor = usize::try_from(state.cursor).ok();
    let height = area.height.saturating_sub(2) as usize;
    let start = log_window(cursor, state.total_steps, height, scroll);
    let end = (start + height).min(state.total_steps);

    let items: Vec<ListItem> = (start..end)
        .filter_map(|i| {
            let label = scene.step_label(i)?;
            let is_current = Some(i) == cursor;
            let style = if is_current {
                Style::default()
                    .bg(DEFAULT_THEME.current_line_bg)
                    .fg(DEFAULT_THEME.border_focused)
                    .add_modifier(Modifier::BOLD)
            } else if cursor.is_some_and(|c| i < c) {
                Style::default().fg(DEFAULT_THEME.fg)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            let marker = if is_current { "▶" } else { " " };
            Some(ListItem::new(Line::from(vec![
                Span::styled(format!("{} {:>4} ", marker, i), style),
                Span::styled(label, style),
            ])))
        })
        .collect();

    let title = format!("Steps ({})", state.total_steps);
    let list = if items.is_empty() {
        List::new(vec![ListItem::new("(no steps)")
            .style(Style::default().fg(DEFAULT_THEME.comment))])
    } else {
        List::new(items)
    };
    frame.render_widget(list.block(pane_block(title, is_focused)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_window_follows_cursor() {
        assert_eq!(log_window(None, 100, 10, None), 0);
        assert_eq!(log_window(Some(3), 100, 10, None), 0);
        assert_eq!(log_window(Some(50), 100, 10, None), 45);
        assert_eq!(log_window(Some(99), 100, 10, None), 90);
        assert_eq!(log_window(Some(5), 4, 10, None), 0);
    }

    #[test]
    fn test_log_window_manual_scroll_is_clamped() {
        assert_eq!(log_window(Some(50), 100, 10, Some(7)), 7);
        assert_eq!(log_window(Some(50), 100, 10, Some(500)), 90);
    }
}
