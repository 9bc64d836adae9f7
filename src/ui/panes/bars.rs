//! Sorting bars

use super::pane_block;
use crate::trace::sorting::SortInput;
use crate::ui::scene::Visual;
use crate::ui::theme::DEFAULT_THEME;
use crate::view::sorting::{BarState, SortView};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Bar, BarChart, BarGroup},
    Frame,
};

fn bar_color(state: Option<BarState>) -> Color {
    match state {
        None => DEFAULT_THEME.bar,
        Some(BarState::Compare) => DEFAULT_THEME.compare,
        Some(BarState::Swap) => DEFAULT_THEME.swap,
        Some(BarState::Overwrite) => DEFAULT_THEME.overwrite,
        Some(BarState::Partition) => DEFAULT_THEME.partition,
        Some(BarState::Bucket) => DEFAULT_THEME.bucket,
        Some(BarState::Sorted) => DEFAULT_THEME.sorted,
    }
}

/// Bar width and gap that fit `count` bars into `width` columns
fn bar_layout(count: usize, width: u16) -> (u16, u16) {
    if count == 0 {
        return (1, 0);
    }
    let per_bar = (width as usize / count).max(1) as u16;
    if per_bar >= 3 {
        (per_bar - 1, 1)
    } else {
        (per_bar, 0)
    }
}

impl Visual<SortInput> for SortView {
    fn for_input(input: &SortInput) -> Self {
        SortView::new(input.values.clone())
    }

    fn render(&self, _input: &SortInput, frame: &mut Frame, area: Rect, is_focused: bool) {
        let block = pane_block(format!("Array ({} elements)", self.array.len()), is_focused);
        let inner_width = area.width.saturating_sub(2);
        let (bar_width, bar_gap) = bar_layout(self.array.len(), inner_width);

        let bars: Vec<Bar> = self
            .array
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let bar = Bar::default()
                    .value(u64::from(v))
                    .style(Style::default().fg(bar_color(self.state(i))));
                // Values only fit on wide bars
                if bar_width < 3 {
                    bar.text_value(String::new())
                } else {
                    bar.value_style(Style::default().fg(Color::Black).bg(bar_color(self.state(i))))
                }
            })
            .collect();

        let max = self.array.iter().copied().max().unwrap_or(1);
        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(bar_gap)
            .max(u64::from(max));
        frame.render_widget(chart, area);
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Comparisons", self.comparisons.to_string()),
            ("Swaps", self.swaps.to_string()),
            ("Writes", self.writes.to_string()),
            (
                "Sorted",
                format!("{}/{}", self.sorted_count(), self.array.len()),
            ),
        ]
    }
}
