//! Main TUI application state and logic

use super::panes;
use super::scene::Scene;
use crate::engine::Mode;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::debug;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Visual,
    Info,
    Steps,
}

impl FocusedPane {
    /// Move focus to the next pane (visual -> info -> steps)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Visual => FocusedPane::Info,
            FocusedPane::Info => FocusedPane::Steps,
            FocusedPane::Steps => FocusedPane::Visual,
        }
    }
}

/// The main application state
pub struct App {
    /// What is being played
    pub scene: Box<dyn Scene>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// First row of the step log; `None` follows the cursor
    pub steps_scroll: Option<usize>,

    /// How long to wait for a key before delivering the next frame
    pub frame_interval: Duration,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(scene: Box<dyn Scene>, frame_interval: Duration) -> Self {
        App {
            scene,
            focused_pane: FocusedPane::Visual,
            steps_scroll: None,
            frame_interval,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Poll with a timeout so playback keeps moving without input
            if event::poll(self.frame_interval)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }

            self.tick();
        }

        Ok(())
    }

    /// Deliver the engine's pending frame
    pub fn tick(&mut self) {
        let was_playing = self.scene.state().mode == Mode::Playing;
        self.scene.transport().tick();
        if was_playing && self.scene.state().mode == Mode::Completed {
            self.status_message = "Playback complete".to_string();
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(68), Constraint::Percentage(32)])
            .split(main_chunks[0]);

        // Right column: Info (top) | Steps (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[1]);

        let scene = self.scene.as_ref();
        scene.render(
            frame,
            columns[0],
            self.focused_pane == FocusedPane::Visual,
        );
        panes::render_info_pane(
            frame,
            right_rows[0],
            scene,
            self.focused_pane == FocusedPane::Info,
        );
        panes::render_steps_pane(
            frame,
            right_rows[1],
            scene,
            self.focused_pane == FocusedPane::Steps,
            self.steps_scroll,
        );
        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            &scene.state(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Char(' ') => {
                // Toggle playback (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_playback();
                }
            }
            KeyCode::Right => {
                self.steps_scroll = None;
                self.scene.transport().step_forward();
                self.status_message = "Stepped forward".to_string();
            }
            KeyCode::Left => {
                self.steps_scroll = None;
                self.scene.transport().step_backward();
                self.status_message = "Stepped backward".to_string();
            }
            KeyCode::Enter => {
                self.steps_scroll = None;
                self.scene.transport().seek(isize::MAX);
                self.status_message = "Jumped to end".to_string();
            }
            KeyCode::Backspace => {
                self.steps_scroll = None;
                self.scene.transport().stop();
                self.status_message = "Stopped".to_string();
            }
            // Digits seek to that tenth of the sequence
            KeyCode::Char(c @ '1'..='9') => {
                let tenth = c as usize - '0' as usize;
                let total = self.scene.state().total_steps;
                let target = (total * tenth / 10) as isize - 1;
                self.steps_scroll = None;
                self.scene.transport().seek(target);
                self.status_message = format!("Jumped to {}%", tenth * 10);
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.scale_speed(2.0),
            KeyCode::Char('-') | KeyCode::Char('_') => self.scale_speed(0.5),
            KeyCode::Char('a') | KeyCode::Char('A') => {
                self.steps_scroll = None;
                self.status_message = match self.scene.next_algorithm() {
                    Ok(message) => message,
                    Err(e) => format!("Error: {}", e),
                };
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.steps_scroll = None;
                self.status_message = match self.scene.reseed() {
                    Ok(message) => message,
                    Err(e) => format!("Error: {}", e),
                };
            }
            KeyCode::Up if self.focused_pane == FocusedPane::Steps => {
                let start = self.steps_scroll.unwrap_or_else(|| self.cursor_row());
                self.steps_scroll = Some(start.saturating_sub(1));
            }
            KeyCode::Down if self.focused_pane == FocusedPane::Steps => {
                let start = self.steps_scroll.unwrap_or_else(|| self.cursor_row());
                self.steps_scroll = Some(start.saturating_add(1));
            }
            _ => {}
        }
    }

    fn toggle_playback(&mut self) {
        self.steps_scroll = None;
        let transport = self.scene.transport();
        if transport.state().mode == Mode::Playing {
            transport.pause();
            self.status_message = "Paused".to_string();
        } else {
            transport.play();
            self.status_message = "Playing...".to_string();
        }
        debug!(mode = ?self.scene.state().mode, "toggled playback");
    }

    fn scale_speed(&mut self, factor: f64) {
        let transport = self.scene.transport();
        let speed = transport.state().speed;
        transport.set_speed(speed * factor);
        self.status_message = format!("Speed {}x", transport.state().speed);
    }

    /// Step-log row of the cursor, used as the starting point for manual scrolling
    fn cursor_row(&self) -> usize {
        usize::try_from(self.scene.state().cursor).unwrap_or(0)
    }
}
