//! Status bar rendering with keybindings and playback state

use crate::engine::{EngineState, Mode};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, state: &EngineState) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let step_text = format!(" Step {}/{} ", state.cursor + 1, state.total_steps);

    let left_spans = vec![
        Span::styled(
            step_text,
            Style::default()
                .bg(DEFAULT_THEME.primary)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}x ", state.speed),
            Style::default()
                .bg(DEFAULT_THEME.comment)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    for (key, desc) in [
        (" ←/→ ", " step "),
        (" ⎵ ", " play "),
        (" ↵ / ⌫ ", " end/stop "),
        (" +/- ", " speed "),
        (" a ", " next "),
        (" r ", " reseed "),
    ] {
        right_spans.push(Span::styled(key, key_style));
        right_spans.push(Span::styled(desc, desc_style));
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(" ", desc_style));
    }
    right_spans.push(Span::styled("q", key_style));
    right_spans.push(Span::styled(" quit ", desc_style));

    if let Some((label, color)) = badge(state) {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            label,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}

/// Mode indicator shown at the right end of the bar
fn badge(state: &EngineState) -> Option<(&'static str, Color)> {
    match state.mode {
        Mode::Playing => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        Mode::Paused => Some((" ‖ PAUSED ", DEFAULT_THEME.compare)),
        Mode::Completed => Some((" END ", DEFAULT_THEME.error)),
        Mode::Ready if state.total_steps > 0 => Some((" START ", DEFAULT_THEME.success)),
        Mode::Ready | Mode::Idle => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(mode: Mode, total_steps: usize) -> EngineState {
        EngineState {
            cursor: -1,
            total_steps,
            mode,
            speed: 1.0,
            progress: 0.0,
        }
    }

    #[test]
    fn test_badges() {
        assert_eq!(badge(&state(Mode::Playing, 5)).map(|b| b.0), Some(" ▶ PLAYING "));
        assert_eq!(badge(&state(Mode::Completed, 5)).map(|b| b.0), Some(" END "));
        assert_eq!(badge(&state(Mode::Ready, 5)).map(|b| b.0), Some(" START "));
        assert_eq!(badge(&state(Mode::Ready, 0)), None);
        assert_eq!(badge(&state(Mode::Idle, 0)), None);
    }
}
