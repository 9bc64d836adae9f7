// Integration tests for the playback engine

use algotrace::config::EngineConfig;
use algotrace::engine::{Engine, ManualClock, Mode, Notification, Recorder};
use algotrace::trace::sorting::{self, SortInput};
use algotrace::view::{Projector, SortView};
use proptest::prelude::*;

type Step = &'static str;

const FIVE: [Step; 5] = ["compare", "swap", "compare", "overwrite", "sorted"];

fn recording(steps: &[Step]) -> (Engine<Step, Recorder<Step>>, ManualClock) {
    let clock = ManualClock::new();
    let mut engine =
        Engine::with_observer(EngineConfig::default(), Recorder::new()).with_clock(clock.clone());
    engine.load(steps.to_vec());
    (engine, clock)
}

fn replayed(upto: usize) -> Vec<Notification<Step>> {
    let mut events = vec![Notification::Reset];
    events.extend((0..=upto).map(|i| Notification::Step(i, FIVE[i])));
    events
}

#[test]
fn test_five_step_scenario() {
    let (mut engine, clock) = recording(&FIVE);

    engine.seek(3);
    assert_eq!(engine.observer_mut().drain(), replayed(3));
    assert_eq!(engine.state().cursor, 3);

    engine.step_backward();
    assert_eq!(engine.observer_mut().drain(), replayed(2));
    assert_eq!(engine.state().cursor, 2);

    engine.play();
    for _ in 0..10 {
        clock.advance_ms(200);
        engine.tick();
    }
    assert_eq!(
        engine.observer_mut().drain(),
        vec![
            Notification::Step(3, "overwrite"),
            Notification::Step(4, "sorted"),
            Notification::Complete,
        ]
    );
    assert_eq!(engine.mode(), Mode::Completed);
}

#[test]
fn test_stop_twice_resets_once() {
    let (mut engine, _clock) = recording(&FIVE);
    engine.seek(2);
    engine.observer_mut().drain();

    engine.stop();
    engine.stop();
    assert_eq!(engine.observer().resets(), 1);
    assert_eq!(engine.state().cursor, -1);
    assert_eq!(engine.mode(), Mode::Ready);
}

#[test]
fn test_step_forward_at_end_is_a_no_op() {
    let (mut engine, _clock) = recording(&FIVE);
    engine.seek(4);
    engine.observer_mut().drain();

    engine.step_forward();
    assert!(engine.observer().events.is_empty());
    assert_eq!(engine.state().cursor, 4);
}

#[test]
fn test_step_backward_at_start_resets_once() {
    for start in [-1, 0] {
        let (mut engine, _clock) = recording(&FIVE);
        if start == 0 {
            engine.step_forward();
        }
        engine.observer_mut().drain();

        engine.step_backward();
        assert_eq!(engine.observer_mut().drain(), vec![Notification::Reset]);
        assert_eq!(engine.state().cursor, -1);
    }
}

#[test]
fn test_seek_clamps_both_ends() {
    let (mut engine, _clock) = recording(&FIVE);
    engine.seek(-7);
    assert_eq!(engine.state().cursor, 0);
    engine.seek(99);
    assert_eq!(engine.state().cursor, 4);
    assert_eq!(engine.mode(), Mode::Completed);
}

#[test]
fn test_speed_is_clamped() {
    let config = EngineConfig::default();
    let (mut engine, _clock) = recording(&FIVE);
    engine.set_speed(1000.0);
    assert_eq!(engine.speed(), config.max_speed);
    engine.set_speed(0.0);
    assert_eq!(engine.speed(), config.min_speed);
    engine.set_speed(-3.0);
    assert_eq!(engine.speed(), config.min_speed);
    engine.set_speed(f64::NAN);
    assert_eq!(engine.speed(), config.min_speed);
}

#[test]
fn test_stale_frame_after_reload_is_ignored() {
    let (mut engine, clock) = recording(&FIVE);
    engine.play();
    let stale = engine.pending_frame().unwrap();

    engine.load(vec!["a", "b"]);
    engine.observer_mut().drain();
    clock.advance_ms(1000);
    engine.on_frame(stale);

    assert!(engine.observer().events.is_empty());
    assert_eq!(engine.state().cursor, -1);
    assert_eq!(engine.mode(), Mode::Ready);
    assert_eq!(engine.pending_frame(), None);
}

#[test]
fn test_stale_frame_after_stop_is_ignored() {
    let (mut engine, clock) = recording(&FIVE);
    engine.play();
    clock.advance_ms(200);
    engine.tick();
    let stale = engine.pending_frame().unwrap();

    engine.stop();
    engine.observer_mut().drain();
    clock.advance_ms(1000);
    engine.on_frame(stale);

    assert!(engine.observer().events.is_empty());
    assert_eq!(engine.mode(), Mode::Ready);
    assert_eq!(engine.state().cursor, -1);
}

#[test]
fn test_play_from_completed_rewinds_once() {
    let (mut engine, clock) = recording(&["a", "b"]);
    engine.seek(1);
    assert_eq!(engine.mode(), Mode::Completed);
    engine.observer_mut().drain();

    engine.play();
    for _ in 0..5 {
        clock.advance_ms(200);
        engine.tick();
    }
    assert_eq!(
        engine.observer_mut().drain(),
        vec![
            Notification::Reset,
            Notification::Step(0, "a"),
            Notification::Step(1, "b"),
            Notification::Complete,
        ]
    );
}

#[test]
fn test_play_with_no_steps_does_nothing() {
    let (mut engine, clock) = recording(&[]);
    engine.play();
    clock.advance_ms(1000);
    engine.tick();
    assert!(engine.observer().events.is_empty());
    assert_eq!(engine.pending_frame(), None);
    assert_eq!(engine.mode(), Mode::Ready);
}

#[test]
fn test_stop_on_idle_engine_stays_idle() {
    let mut engine = Engine::<u32>::new(EngineConfig::default());
    engine.stop();
    assert_eq!(engine.mode(), Mode::Idle);
}

#[test]
fn test_faster_speed_plays_more_steps_per_second() {
    let (mut slow, slow_clock) = recording(&FIVE);
    let (mut fast, fast_clock) = recording(&FIVE);
    fast.set_speed(4.0);
    slow.play();
    fast.play();
    for _ in 0..8 {
        slow_clock.advance_ms(100);
        fast_clock.advance_ms(100);
        slow.tick();
        fast.tick();
    }
    assert_eq!(slow.state().cursor, 3);
    assert_eq!(fast.state().cursor, 4);
    assert_eq!(fast.mode(), Mode::Completed);
}

fn sorting_engine(values: Vec<u32>) -> Engine<sorting::SortStep, Projector<SortView>> {
    let input = SortInput::new(values);
    let steps = sorting::registry().run("insertion", &input).unwrap();
    let mut engine = Engine::with_observer(
        EngineConfig::default(),
        Projector::new(SortView::new(input.values.clone())),
    );
    engine.load(steps);
    engine
}

proptest! {
    #[test]
    fn prop_seek_matches_stepping(
        values in prop::collection::vec(1u32..50, 1..16),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut seeking = sorting_engine(values.clone());
        let mut stepping = sorting_engine(values);
        let k = pick.index(seeking.len());

        seeking.seek(k as isize);
        for _ in 0..=k {
            stepping.step_forward();
        }
        prop_assert_eq!(seeking.state(), stepping.state());
        prop_assert_eq!(seeking.observer().view(), stepping.observer().view());
    }

    #[test]
    fn prop_forward_then_back_restores_state(
        values in prop::collection::vec(1u32..50, 2..16),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut engine = sorting_engine(values);
        let c = pick.index(engine.len() - 1);
        engine.seek(c as isize);
        let before_state = engine.state();
        let before_view = engine.observer().view().clone();

        engine.step_forward();
        engine.step_backward();
        prop_assert_eq!(engine.state(), before_state);
        prop_assert_eq!(engine.observer().view(), &before_view);
    }
}
