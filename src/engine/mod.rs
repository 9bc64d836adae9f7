//! Deterministic step-replay engine
//!
//! This module provides the playback core:
//! - [`playback`]: the [`Engine`] state machine and its transport commands
//! - [`observer`]: the [`Observer`] contract and the closure-slot
//!   [`Callbacks`] observer
//! - [`clock`]: monotonic time sources
//!
//! # Execution Model
//!
//! A trace producer runs to completion first and hands the engine a full
//! step list. The engine then replays that list to its observer, either
//! one command at a time (step, seek) or on frames delivered by the host
//! loop while playing. It is single-threaded: ticking happens only when the
//! host calls [`Engine::tick`] or [`Engine::on_frame`].

pub mod clock;
pub mod observer;
pub mod playback;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use observer::{Callbacks, Notification, Observer, Recorder};
pub use playback::{Engine, EngineState, FrameToken, Mode};
