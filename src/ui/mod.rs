//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus
//! - **[`scene`]**: the engine + view pairs the app drives, behind one trait
//! - **[`panes`]**: render functions for each visible pane (visuals, info,
//!   step log, status bar)
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a boxed
//! [`Scene`] and call [`App::run`] to start the event loop.
//!
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod scene;
pub mod theme;

pub use app::App;
pub use scene::{AlgorithmScene, Scene, StructureScene, Transport, Visual};
