//! Scenes: a playback engine, the view it feeds, and how to rebuild both
//!
//! The app only ever talks to a `dyn Scene`, so every family plugs into
//! the same event loop. Two implementations cover everything:
//! [`AlgorithmScene`] for registry-backed families (sorting, searching,
//! graph, strings) and [`StructureScene`] for data structure operations.

use crate::config::EngineConfig;
use crate::engine::{Engine, EngineState, Observer};
use crate::error::TraceError;
use crate::trace::structures::Structure;
use crate::trace::{AlgorithmInfo, Registry, TraceStep};
use crate::view::{Projector, StructureView, ViewModel};
use ratatui::{layout::Rect, Frame};
use serde_json::Value;
use std::str::FromStr;
use tracing::debug;

/// Transport controls of an engine, with the step type erased
pub trait Transport {
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn step_forward(&mut self);
    fn step_backward(&mut self);
    fn seek(&mut self, index: isize);
    fn set_speed(&mut self, multiplier: f64);
    fn tick(&mut self);
    fn state(&self) -> EngineState;
}

impl<S, O: Observer<S>> Transport for Engine<S, O> {
    fn play(&mut self) {
        Engine::play(self)
    }

    fn pause(&mut self) {
        Engine::pause(self)
    }

    fn stop(&mut self) {
        Engine::stop(self)
    }

    fn step_forward(&mut self) {
        Engine::step_forward(self)
    }

    fn step_backward(&mut self) {
        Engine::step_backward(self)
    }

    fn seek(&mut self, index: isize) {
        Engine::seek(self, index)
    }

    fn set_speed(&mut self, multiplier: f64) {
        Engine::set_speed(self, multiplier)
    }

    fn tick(&mut self) {
        Engine::tick(self)
    }

    fn state(&self) -> EngineState {
        Engine::state(self)
    }
}

/// A view that knows how to draw itself next to the input it came from
pub trait Visual<I> {
    /// Fresh view for `input`, before any step
    fn for_input(input: &I) -> Self;

    fn render(&self, input: &I, frame: &mut Frame, area: Rect, is_focused: bool);

    /// Counters shown in the info pane
    fn stats(&self) -> Vec<(&'static str, String)>;
}

pub trait Scene {
    /// Family label, e.g. `Sorting`
    fn family(&self) -> &'static str;

    /// What is currently playing, e.g. an algorithm or operation name
    fn title(&self) -> String;

    /// Static facts about the current algorithm
    fn details(&self) -> Vec<(&'static str, String)>;

    fn stats(&self) -> Vec<(&'static str, String)>;

    fn transport(&mut self) -> &mut dyn Transport;

    fn state(&self) -> EngineState;

    /// One-line description of step `index`
    fn step_label(&self, index: usize) -> Option<String>;

    fn render(&self, frame: &mut Frame, area: Rect, is_focused: bool);

    /// Switch to the next algorithm (or operation) and reload.
    /// Returns a status message.
    fn next_algorithm(&mut self) -> Result<String, TraceError>;

    /// Rebuild the input with a fresh seed and reload
    fn reseed(&mut self) -> Result<String, TraceError>;
}

/// Arrays longer than this are elided from step labels
const LABEL_ARRAY_LIMIT: usize = 8;

/// Compact JSON for the step log
fn label<S: TraceStep>(step: &S) -> String {
    match serde_json::to_value(step) {
        Ok(Value::Object(mut fields)) => {
            for value in fields.values_mut() {
                if value.as_array().is_some_and(|a| a.len() > LABEL_ARRAY_LIMIT) {
                    *value = Value::String("…".to_string());
                }
            }
            Value::Object(fields).to_string()
        }
        Ok(other) => other.to_string(),
        Err(_) => step.kind().to_string(),
    }
}

// ========== Registry-backed families ==========

pub struct AlgorithmScene<I, S, V> {
    family: &'static str,
    registry: Registry<I, S>,
    algorithm: &'static str,
    seed: u64,
    build_input: Box<dyn Fn(u64) -> I>,
    input: I,
    engine: Engine<S, Projector<V>>,
}

impl<I, S, V> AlgorithmScene<I, S, V>
where
    S: TraceStep,
    V: ViewModel<S> + Visual<I>,
{
    /// Build a scene playing `algorithm` (the registry's first entry when
    /// `None`) over the input built from `seed`
    pub fn new(
        family: &'static str,
        registry: Registry<I, S>,
        algorithm: Option<&str>,
        seed: u64,
        build_input: Box<dyn Fn(u64) -> I>,
        config: EngineConfig,
    ) -> Result<Self, TraceError> {
        let requested = algorithm.or(registry.first_id()).unwrap_or_default();
        let algorithm = registry
            .ids()
            .find(|id| *id == requested)
            .ok_or_else(|| TraceError::UnknownAlgorithm {
                id: requested.to_string(),
                available: registry.ids().collect::<Vec<_>>().join(", "),
            })?;
        let input = build_input(seed);
        let view = V::for_input(&input);
        let mut scene = AlgorithmScene {
            family,
            registry,
            algorithm,
            seed,
            build_input,
            input,
            engine: Engine::with_observer(config, Projector::new(view)),
        };
        scene.reload()?;
        Ok(scene)
    }

    pub fn view(&self) -> &V {
        self.engine.observer().view()
    }

    fn info(&self) -> Option<&AlgorithmInfo> {
        self.registry.info(self.algorithm)
    }

    /// Rerun the current algorithm over the current input
    fn reload(&mut self) -> Result<(), TraceError> {
        let steps = self.registry.run(self.algorithm, &self.input)?;
        *self.engine.observer_mut() = Projector::new(V::for_input(&self.input));
        self.engine.load(steps);
        Ok(())
    }
}

impl<I, S, V> Scene for AlgorithmScene<I, S, V>
where
    S: TraceStep,
    V: ViewModel<S> + Visual<I>,
{
    fn family(&self) -> &'static str {
        self.family
    }

    fn title(&self) -> String {
        self.info()
            .map_or(self.algorithm, |info| info.name)
            .to_string()
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut details = vec![("Seed", self.seed.to_string())];
        if let Some(info) = self.info() {
            details.push(("Time", info.time.to_string()));
            details.push(("Space", info.space.to_string()));
            details.push(("About", info.description.to_string()));
        }
        details
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        self.view().stats()
    }

    fn transport(&mut self) -> &mut dyn Transport {
        &mut self.engine
    }

    fn state(&self) -> EngineState {
        self.engine.state()
    }

    fn step_label(&self, index: usize) -> Option<String> {
        self.engine.steps().get(index).map(label)
    }

    fn render(&self, frame: &mut Frame, area: Rect, is_focused: bool) {
        self.view().render(&self.input, frame, area, is_focused);
    }

    fn next_algorithm(&mut self) -> Result<String, TraceError> {
        if let Some(next) = self.registry.next_id(self.algorithm) {
            self.algorithm = next;
        }
        self.reload()?;
        debug!(family = self.family, algorithm = self.algorithm, "switched algorithm");
        Ok(format!("Switched to {}", self.title()))
    }

    fn reseed(&mut self) -> Result<String, TraceError> {
        self.seed = self.seed.wrapping_add(1);
        self.input = (self.build_input)(self.seed);
        self.reload()?;
        Ok(format!("New input (seed {})", self.seed))
    }
}

// ========== Data structures ==========

pub struct StructureScene<T: Structure> {
    kind: &'static str,
    initial: T,
    /// Structure the current operation starts from
    before: T,
    after: T,
    ops: Vec<(String, T::Op)>,
    current: usize,
    engine: Engine<T::Step, Projector<StructureView<T>>>,
}

impl<T> StructureScene<T>
where
    T: Structure,
    StructureView<T>: Visual<T>,
{
    /// Scene cycling through `ops` (operation strings such as
    /// `insert:42`), each starting from where the previous one left off
    pub fn new(
        kind: &'static str,
        initial: T,
        ops: &[String],
        config: EngineConfig,
    ) -> Result<Self, TraceError> {
        let ops = ops
            .iter()
            .map(|s| T::Op::from_str(s).map(|op| (s.clone(), op)))
            .collect::<Result<Vec<_>, _>>()?;
        if ops.is_empty() {
            return Err(TraceError::InvalidOperation {
                input: String::new(),
                reason: format!("no operations given for {}", kind),
            });
        }
        let view = StructureView::for_input(&initial);
        let mut scene = StructureScene {
            kind,
            before: initial.clone(),
            after: initial.clone(),
            initial,
            ops,
            current: 0,
            engine: Engine::with_observer(config, Projector::new(view)),
        };
        scene.reload();
        Ok(scene)
    }

    pub fn view(&self) -> &StructureView<T> {
        self.engine.observer().view()
    }

    fn reload(&mut self) {
        let outcome = self.before.run(&self.ops[self.current].1);
        self.after = outcome.after;
        *self.engine.observer_mut() = Projector::new(StructureView::for_input(&self.before));
        self.engine.load(outcome.steps);
    }
}

impl<T> Scene for StructureScene<T>
where
    T: Structure,
    StructureView<T>: Visual<T>,
{
    fn family(&self) -> &'static str {
        "Structures"
    }

    fn title(&self) -> String {
        format!("{} · {}", self.kind, self.ops[self.current].0)
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let queue = self
            .ops
            .iter()
            .enumerate()
            .map(|(i, (s, _))| {
                if i == self.current {
                    format!("[{}]", s)
                } else {
                    s.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        vec![("Structure", self.kind.to_string()), ("Ops", queue)]
    }

    fn stats(&self) -> Vec<(&'static str, String)> {
        self.view().stats()
    }

    fn transport(&mut self) -> &mut dyn Transport {
        &mut self.engine
    }

    fn state(&self) -> EngineState {
        self.engine.state()
    }

    fn step_label(&self, index: usize) -> Option<String> {
        self.engine.steps().get(index).map(label)
    }

    fn render(&self, frame: &mut Frame, area: Rect, is_focused: bool) {
        self.view().render(&self.before, frame, area, is_focused);
    }

    fn next_algorithm(&mut self) -> Result<String, TraceError> {
        self.before = self.after.clone();
        self.current = (self.current + 1) % self.ops.len();
        self.reload();
        Ok(format!("Next operation: {}", self.ops[self.current].0))
    }

    fn reseed(&mut self) -> Result<String, TraceError> {
        self.before = self.initial.clone();
        self.current = 0;
        self.reload();
        Ok(format!("Restored the initial {}", self.kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Mode;
    use crate::inputs::InputSettings;
    use crate::trace::sorting;
    use crate::trace::structures::Stack;
    use crate::view::SortView;

    fn sorting_scene() -> AlgorithmScene<sorting::SortInput, sorting::SortStep, SortView> {
        let settings = InputSettings::default();
        AlgorithmScene::new(
            "Sorting",
            sorting::registry(),
            Some("insertion"),
            settings.seed,
            Box::new(move |seed| settings.sort_input(seed)),
            EngineConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_algorithm_scene_loads_trace() {
        let mut scene = sorting_scene();
        let total = scene.state().total_steps;
        assert!(total > 0);
        scene.transport().seek(total as isize);
        assert_eq!(scene.state().mode, Mode::Completed);
        assert!(scene.view().array.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_next_algorithm_cycles_and_resets() {
        let mut scene = sorting_scene();
        scene.transport().step_forward();
        scene.next_algorithm().unwrap();
        assert_eq!(scene.title(), "Merge Sort");
        assert_eq!(scene.state().cursor, -1);
        assert_eq!(scene.view().comparisons, 0);
    }

    #[test]
    fn test_reseed_changes_input() {
        let mut scene = sorting_scene();
        let before = scene.view().array.clone();
        scene.reseed().unwrap();
        assert_ne!(scene.view().array, before);
        assert_eq!(scene.details()[0], ("Seed", "43".to_string()));
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        let settings = InputSettings::default();
        let result = AlgorithmScene::<_, _, SortView>::new(
            "Sorting",
            sorting::registry(),
            Some("bogo"),
            0,
            Box::new(move |seed| settings.sort_input(seed)),
            EngineConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_structure_scene_chains_operations() {
        let ops = vec!["push:1".to_string(), "push:2".to_string(), "pop".to_string()];
        let mut scene =
            StructureScene::new("stack", Stack::default(), &ops, EngineConfig::default()).unwrap();
        scene.next_algorithm().unwrap();
        assert_eq!(scene.view().current.items, vec![1]);
        scene.next_algorithm().unwrap();
        let total = scene.state().total_steps as isize;
        scene.transport().seek(total);
        assert_eq!(scene.view().current.items, vec![1]);

        scene.reseed().unwrap();
        assert_eq!(scene.title(), "stack · push:1");
        assert!(scene.view().current.items.is_empty());
    }

    #[test]
    fn test_labels_elide_long_arrays() {
        let scene = sorting_scene();
        let first = scene.step_label(0).unwrap();
        assert!(first.contains("\"kind\":\"compare\""));
        assert!(first.contains("\"array\":\"…\""));
        assert_eq!(scene.step_label(usize::MAX), None);
    }

    #[test]
    fn test_structure_scene_rejects_bad_ops() {
        let ops = vec!["push:x".to_string()];
        let result = StructureScene::new("stack", Stack::default(), &ops, EngineConfig::default());
        assert!(matches!(result, Err(TraceError::InvalidOperation { .. })));
    }
}
