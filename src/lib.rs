//! # Introduction
//!
//! algotrace visualizes classic algorithms and data structures by
//! recording every micro-operation they perform as an immutable step, then
//! replaying those steps through a deterministic playback engine. Because
//! the algorithm has already run to completion, playback can go forward at
//! any speed, single-step in either direction and seek anywhere while
//! always showing exactly the same state for the same position.
//!
//! ## Pipeline
//!
//! ```text
//! Input → Trace producer → Vec<Step> → Engine → Observer → View model → TUI
//! ```
//!
//! 1. [`trace`]: pure producers for sorting, searching, graph, string
//!    matching and data structure operations, looked up through explicit
//!    [`trace::Registry`] instances.
//! 2. [`engine`]: the [`engine::Engine`] state machine with its transport
//!    controls, frame tokens and [`engine::Observer`] contract.
//! 3. [`view`]: reducers that fold a step prefix into display state, plus
//!    the sorting race.
//! 4. [`inputs`] and [`config`]: input generation and runtime settings.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use algotrace::config::EngineConfig;
//! use algotrace::engine::Engine;
//! use algotrace::trace::sorting::{self, SortInput};
//! use algotrace::view::{Projector, SortView};
//!
//! let input = SortInput::new(vec![3, 1, 2]);
//! let steps = sorting::registry().run("bubble", &input).unwrap();
//! let view = Projector::new(SortView::new(input.values.clone()));
//! let mut engine = Engine::with_observer(EngineConfig::default(), view);
//! engine.load(steps);
//! engine.seek(isize::MAX);
//! assert_eq!(engine.observer().view().array, vec![1, 2, 3]);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod inputs;
pub mod trace;
pub mod ui;
pub mod view;
