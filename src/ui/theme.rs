use ratatui::style::Color;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub bar: Color,
    pub compare: Color,   // Yellow
    pub swap: Color,      // Red
    pub overwrite: Color, // Pink
    pub partition: Color, // Mauve
    pub bucket: Color,    // Teal
    pub sorted: Color,    // Green
    pub visiting: Color,
    pub visited: Color,
    pub path: Color,
    pub relaxed: Color,
    pub eliminated: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),
    current_line_bg: Color::Rgb(50, 50, 70),
    bar: Color::Rgb(137, 180, 250),
    compare: Color::Rgb(249, 226, 175),
    swap: Color::Rgb(243, 139, 168),
    overwrite: Color::Rgb(245, 194, 231),
    partition: Color::Rgb(203, 166, 247),
    bucket: Color::Rgb(148, 226, 213),
    sorted: Color::Rgb(166, 227, 161),
    visiting: Color::Rgb(249, 226, 175),
    visited: Color::Rgb(148, 226, 213),
    path: Color::Rgb(243, 139, 168),
    relaxed: Color::Rgb(203, 166, 247),
    eliminated: Color::Rgb(69, 71, 90),
};
