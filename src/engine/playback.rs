//! Playback state machine
//!
//! An [`Engine`] owns one immutable step sequence and a cursor into it. It
//! never runs algorithm code: every transport command is answered by
//! re-emitting already recorded steps to its [`Observer`].
//!
//! Backward steps and seeks always rebuild the observer's state from
//! scratch: one reset notification followed by every step from index 0 up
//! to the target. Steps may describe deltas, so this is the only way to
//! guarantee the observer ends up exactly where forward playback would
//! have left it.

use super::clock::{Clock, MonotonicClock};
use super::observer::{Callbacks, Observer};
use crate::config::EngineConfig;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Playback mode of an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// No sequence loaded
    Idle,
    /// Sequence loaded, cursor before the first step
    Ready,
    /// Cursor advancing on frames
    Playing,
    /// Cursor frozen somewhere inside the sequence
    Paused,
    /// Cursor on the last step
    Completed,
}

/// Snapshot of the transport state, for status bars and headless output
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EngineState {
    /// Index of the last applied step, `-1` before the first
    pub cursor: isize,
    pub total_steps: usize,
    pub mode: Mode,
    pub speed: f64,
    /// Fraction of the sequence applied, in `[0, 1]`
    pub progress: f64,
}

/// Handle for the single frame an engine is waiting on
///
/// Tokens are never reused. Delivering a token that is no longer pending
/// (because playback was paused, stopped or reloaded in between) does
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

/// Step-replay engine
pub struct Engine<S, O = Callbacks<S>> {
    steps: Arc<[S]>,
    cursor: Option<usize>,
    mode: Mode,
    speed: f64,
    config: EngineConfig,
    clock: Box<dyn Clock>,
    /// The one outstanding frame while playing
    pending: Option<FrameToken>,
    next_token: u64,
    last_emit: Duration,
    observer: O,
}

impl<S> Engine<S, Callbacks<S>> {
    /// Create an engine whose observer is a set of empty callback slots
    pub fn new(config: EngineConfig) -> Self {
        Self::with_observer(config, Callbacks::new())
    }

    /// Register the "step applied" callback
    pub fn on_step(&mut self, f: impl FnMut(&S, usize) + 'static) {
        self.observer.set_step(f);
    }

    /// Register the completion callback
    pub fn on_complete(&mut self, f: impl FnMut() + 'static) {
        self.observer.set_complete(f);
    }

    /// Register the reset callback
    pub fn on_reset(&mut self, f: impl FnMut() + 'static) {
        self.observer.set_reset(f);
    }
}

impl<S, O: Observer<S>> Engine<S, O> {
    /// Create an idle engine driving `observer`
    pub fn with_observer(config: EngineConfig, observer: O) -> Self {
        let speed = clamp_speed(&config, config.initial_speed).unwrap_or(1.0);
        Engine {
            steps: Arc::from(Vec::new()),
            cursor: None,
            mode: Mode::Idle,
            speed,
            config,
            clock: Box::new(MonotonicClock::new()),
            pending: None,
            next_token: 0,
            last_emit: Duration::ZERO,
            observer,
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ========== Session lifecycle ==========

    /// Start a new session with `steps`
    ///
    /// Any playback in flight is cancelled first. The observer is reset if
    /// the previous session had moved away from its reset state.
    pub fn load(&mut self, steps: impl Into<Arc<[S]>>) {
        let needs_reset = !self.is_at_reset();
        self.cancel_frame();
        self.steps = steps.into();
        self.cursor = None;
        self.mode = Mode::Ready;
        debug!(total = self.steps.len(), "loaded step sequence");
        if needs_reset {
            self.observer.on_reset();
        }
    }

    /// Drop the current session and go back to [`Mode::Idle`]
    pub fn unload(&mut self) {
        self.cancel_frame();
        self.steps = Arc::from(Vec::new());
        self.cursor = None;
        self.mode = Mode::Idle;
        debug!("unloaded step sequence");
    }

    // ========== Transport ==========

    /// Start or resume autoplay
    ///
    /// Playing from the last step rewinds to the start first.
    pub fn play(&mut self) {
        if self.steps.is_empty() || self.mode == Mode::Playing {
            return;
        }
        if self.cursor == self.last_index() {
            self.cursor = None;
            self.observer.on_reset();
        }
        self.mode = Mode::Playing;
        self.last_emit = self.clock.now();
        self.schedule_frame();
        debug!(cursor = self.cursor_value(), speed = self.speed, "play");
    }

    /// Freeze autoplay at the current cursor
    pub fn pause(&mut self) {
        if self.mode != Mode::Playing {
            return;
        }
        self.cancel_frame();
        self.settle();
        debug!(cursor = self.cursor_value(), "pause");
    }

    /// Rewind to before the first step
    ///
    /// Stopping an engine that is already at its reset state does nothing,
    /// so repeated stops produce a single reset notification.
    pub fn stop(&mut self) {
        self.cancel_frame();
        if self.is_at_reset() {
            return;
        }
        self.cursor = None;
        self.mode = Mode::Ready;
        self.observer.on_reset();
        debug!("stop");
    }

    /// Apply the next step. No-op on the last step.
    pub fn step_forward(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        self.cancel_frame();
        let next = self.cursor.map_or(0, |c| c + 1);
        if next < self.steps.len() {
            self.cursor = Some(next);
            self.emit(next);
        }
        self.settle();
    }

    /// Move back one step by replaying from the start
    pub fn step_backward(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        self.cancel_frame();
        match self.cursor {
            None | Some(0) => {
                self.cursor = None;
                self.observer.on_reset();
            }
            Some(c) => self.replay_to(c - 1),
        }
        self.settle();
    }

    /// Jump to `index`, clamped to the sequence bounds
    pub fn seek(&mut self, index: isize) {
        if self.steps.is_empty() {
            return;
        }
        self.cancel_frame();
        let last = self.steps.len() - 1;
        let target = index.clamp(0, last as isize) as usize;
        self.replay_to(target);
        self.settle();
        debug!(requested = index, target, "seek");
    }

    /// Set the playback multiplier, clamped to the configured range.
    /// NaN is ignored.
    pub fn set_speed(&mut self, multiplier: f64) {
        if let Some(speed) = clamp_speed(&self.config, multiplier) {
            self.speed = speed;
        }
    }

    // ========== Frames ==========

    /// The frame the host should deliver next, if playing
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Deliver a frame. Stale tokens are ignored.
    pub fn on_frame(&mut self, token: FrameToken) {
        if self.pending != Some(token) {
            trace!(?token, "ignoring stale frame");
            return;
        }
        self.pending = None;
        if self.mode != Mode::Playing {
            return;
        }

        let now = self.clock.now();
        if now.saturating_sub(self.last_emit) >= self.delay() {
            self.last_emit = now;
            let next = self.cursor.map_or(0, |c| c + 1);
            if next < self.steps.len() {
                self.cursor = Some(next);
                self.emit(next);
            }
            if self.cursor == self.last_index() {
                self.mode = Mode::Completed;
                debug!(total = self.steps.len(), "playback complete");
                self.observer.on_complete();
                return;
            }
        }
        self.schedule_frame();
    }

    /// Deliver the pending frame, if any
    pub fn tick(&mut self) {
        if let Some(token) = self.pending {
            self.on_frame(token);
        }
    }

    // ========== Accessors ==========

    pub fn state(&self) -> EngineState {
        let total = self.steps.len();
        let progress = if total == 0 {
            0.0
        } else {
            self.cursor.map_or(0, |c| c + 1) as f64 / total as f64
        };
        EngineState {
            cursor: self.cursor_value(),
            total_steps: total,
            mode: self.mode,
            speed: self.speed,
            progress,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    /// Time between steps at the current speed
    pub fn delay(&self) -> Duration {
        self.config.base_delay().div_f64(self.speed)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    // ========== Internals ==========

    fn emit(&mut self, index: usize) {
        trace!(index, "step");
        self.observer.on_step(&self.steps[index], index);
    }

    fn replay_to(&mut self, target: usize) {
        self.observer.on_reset();
        for (index, step) in self.steps[..=target].iter().enumerate() {
            self.observer.on_step(step, index);
        }
        self.cursor = Some(target);
    }

    /// Pick the resting mode for the current cursor after manual navigation
    fn settle(&mut self) {
        self.mode = match self.cursor {
            None => Mode::Ready,
            c if c == self.last_index() => Mode::Completed,
            Some(_) => Mode::Paused,
        };
    }

    fn is_at_reset(&self) -> bool {
        self.cursor.is_none() && matches!(self.mode, Mode::Idle | Mode::Ready)
    }

    fn schedule_frame(&mut self) {
        let token = FrameToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);
    }

    fn cancel_frame(&mut self) {
        if let Some(token) = self.pending.take() {
            trace!(?token, "cancelled frame");
        }
    }

    fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }

    fn cursor_value(&self) -> isize {
        self.cursor.map_or(-1, |c| c as isize)
    }
}

fn clamp_speed(config: &EngineConfig, multiplier: f64) -> Option<f64> {
    if multiplier.is_nan() {
        return None;
    }
    Some(multiplier.max(config.min_speed).min(config.max_speed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::ManualClock;
    use crate::engine::observer::{Notification, Recorder};

    fn engine(steps: Vec<u32>) -> (Engine<u32, Recorder<u32>>, ManualClock) {
        let clock = ManualClock::new();
        let mut engine =
            Engine::with_observer(EngineConfig::default(), Recorder::new()).with_clock(clock.clone());
        engine.load(steps);
        (engine, clock)
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine: Engine<u32> = Engine::new(EngineConfig::default());
        let state = engine.state();
        assert_eq!(state.mode, Mode::Idle);
        assert_eq!(state.cursor, -1);
        assert_eq!(state.total_steps, 0);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.speed, 1.0);
    }

    #[test]
    fn test_play_waits_for_delay_before_first_step() {
        let (mut engine, clock) = engine(vec![10, 20]);
        engine.play();

        clock.advance_ms(199);
        engine.tick();
        assert!(engine.observer().events.is_empty());
        assert_eq!(engine.mode(), Mode::Playing);

        clock.advance_ms(1);
        engine.tick();
        assert_eq!(engine.observer().events, vec![Notification::Step(0, 10)]);
    }

    #[test]
    fn test_late_frame_emits_a_single_step() {
        let (mut engine, clock) = engine(vec![1, 2, 3]);
        engine.play();
        clock.advance_ms(1000);
        engine.tick();
        assert_eq!(engine.cursor(), Some(0));
    }

    #[test]
    fn test_speed_shortens_delay() {
        let (mut engine, clock) = engine(vec![1, 2, 3]);
        engine.set_speed(4.0);
        assert_eq!(engine.delay(), Duration::from_millis(50));

        engine.play();
        clock.advance_ms(50);
        engine.tick();
        assert_eq!(engine.cursor(), Some(0));
    }

    #[test]
    fn test_nan_speed_is_ignored() {
        let (mut engine, _) = engine(vec![1]);
        engine.set_speed(2.0);
        engine.set_speed(f64::NAN);
        assert_eq!(engine.speed(), 2.0);
    }

    #[test]
    fn test_pause_cancels_pending_frame() {
        let (mut engine, clock) = engine(vec![1, 2, 3]);
        engine.play();
        let token = engine.pending_frame().unwrap();
        engine.pause();
        assert_eq!(engine.pending_frame(), None);

        clock.advance_ms(500);
        engine.on_frame(token);
        assert!(engine.observer().events.is_empty());
        assert_eq!(engine.mode(), Mode::Ready);
    }

    #[test]
    fn test_pause_mid_sequence_is_paused() {
        let (mut engine, clock) = engine(vec![1, 2, 3]);
        engine.play();
        clock.advance_ms(200);
        engine.tick();
        engine.pause();
        assert_eq!(engine.mode(), Mode::Paused);
        assert_eq!(engine.cursor(), Some(0));
    }

    #[test]
    fn test_step_forward_while_playing_pauses() {
        let (mut engine, _) = engine(vec![1, 2, 3]);
        engine.play();
        engine.step_forward();
        assert_eq!(engine.mode(), Mode::Paused);
        assert_eq!(engine.pending_frame(), None);
        assert_eq!(engine.cursor(), Some(0));
    }

    #[test]
    fn test_single_step_sequence_completes_on_first_frame() {
        let (mut engine, clock) = engine(vec![7]);
        engine.play();
        clock.advance_ms(200);
        engine.tick();
        assert_eq!(
            engine.observer().events,
            vec![Notification::Step(0, 7), Notification::Complete]
        );
        assert_eq!(engine.mode(), Mode::Completed);
        assert_eq!(engine.pending_frame(), None);
    }

    #[test]
    fn test_unload_returns_to_idle() {
        let (mut engine, _) = engine(vec![1, 2]);
        engine.play();
        engine.unload();
        assert_eq!(engine.mode(), Mode::Idle);
        assert_eq!(engine.pending_frame(), None);
        assert!(engine.is_empty());

        engine.play();
        assert_eq!(engine.mode(), Mode::Idle);
    }

    #[test]
    fn test_progress_tracks_cursor() {
        let (mut engine, _) = engine(vec![1, 2, 3, 4]);
        engine.seek(1);
        assert_eq!(engine.state().progress, 0.5);
        engine.seek(3);
        assert_eq!(engine.state().progress, 1.0);
        assert_eq!(engine.mode(), Mode::Completed);
    }

    #[test]
    fn test_callback_slots() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let log = Rc::new(RefCell::new(Vec::new()));
        let mut engine: Engine<char> = Engine::new(EngineConfig::default());

        let sink = Rc::clone(&log);
        engine.on_step(move |step, index| sink.borrow_mut().push(format!("{}:{}", index, step)));
        let sink = Rc::clone(&log);
        engine.on_reset(move || sink.borrow_mut().push("reset".to_string()));

        engine.load(vec!['a', 'b']);
        engine.seek(1);
        assert_eq!(*log.borrow(), vec!["reset", "0:a", "1:b"]);
    }
}
