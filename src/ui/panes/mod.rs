//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`bars`]: sorting bars coloured by the latest micro-operation
//! - [`cells`]: searching cell row with bounds pointers
//! - [`graph`]: node/edge canvas for graph traces
//! - [`text`]: text and sliding pattern for string matching
//! - [`structures`]: one layout per data structure
//! - [`info`]: algorithm metadata, live counters and the step log
//! - [`status`]: status bar with keybindings and playback state
//!
//! The visual panes implement [`Visual`](crate::ui::scene::Visual) for their
//! view model; `info` and `status` are plain render functions.

pub mod bars;
pub mod cells;
pub mod graph;
pub mod info;
pub mod status;
pub mod structures;
pub mod text;

pub use info::{render_info_pane, render_steps_pane};
pub use status::render_status_bar;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered pane block, highlighted when focused
pub fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Style for a highlighted cell: dark text on `bg`
fn badge(bg: ratatui::style::Color) -> Style {
    Style::default()
        .bg(bg)
        .fg(ratatui::style::Color::Black)
        .add_modifier(Modifier::BOLD)
}
