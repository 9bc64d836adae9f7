//! Sorting race: several algorithms replaying the same input side by side
//!
//! Every racer gets its own engine and [`SortView`], all driven by clones of
//! one clock at one speed, so the algorithm with the shortest trace crosses
//! the line first.

use super::{Projector, SortView};
use crate::config::EngineConfig;
use crate::engine::{Clock, Engine, Mode};
use crate::error::TraceError;
use crate::trace::sorting::{SortInput, SortKind, SortStep};
use crate::trace::Registry;
use serde::Serialize;
use tracing::debug;

pub struct Racer {
    pub id: &'static str,
    pub name: &'static str,
    pub engine: Engine<SortStep, Projector<SortView>>,
    place: Option<usize>,
}

impl Racer {
    pub fn view(&self) -> &SortView {
        self.engine.observer().view()
    }

    pub fn place(&self) -> Option<usize> {
        self.place
    }
}

/// Final (or current) standing of one racer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceResult {
    pub id: &'static str,
    pub name: &'static str,
    pub steps: usize,
    pub comparisons: usize,
    pub swaps: usize,
    /// 1-based finishing position, `None` while still running
    pub place: Option<usize>,
}

pub struct Race {
    racers: Vec<Racer>,
    finished: usize,
}

impl Race {
    /// Prepare one racer per id, each with its own clone of `clock`
    pub fn new<C: Clock + Clone + 'static>(
        registry: &Registry<SortInput, SortStep>,
        ids: &[&str],
        input: &SortInput,
        config: &EngineConfig,
        clock: C,
    ) -> Result<Self, TraceError> {
        let mut racers = Vec::with_capacity(ids.len());
        for &id in ids {
            let steps = registry.run(id, input)?;
            let Some(info) = registry.info(id).copied() else {
                continue;
            };
            let view = SortView::new(input.values.clone());
            let mut engine = Engine::with_observer(config.clone(), Projector::new(view))
                .with_clock(clock.clone());
            engine.load(steps);
            racers.push(Racer {
                id: info.id,
                name: info.name,
                engine,
                place: None,
            });
        }
        Ok(Race {
            racers,
            finished: 0,
        })
    }

    pub fn racers(&self) -> &[Racer] {
        &self.racers
    }

    /// Start (or restart) every racer from the beginning
    pub fn start(&mut self) {
        self.finished = 0;
        for racer in &mut self.racers {
            racer.place = None;
            racer.engine.stop();
            racer.engine.play();
        }
        debug!(racers = self.racers.len(), "race started");
    }

    /// Deliver one frame to every racer and record new finishers
    pub fn tick(&mut self) {
        for racer in &mut self.racers {
            racer.engine.tick();
            if racer.place.is_none() && racer.engine.mode() == Mode::Completed {
                self.finished += 1;
                racer.place = Some(self.finished);
                debug!(racer = racer.id, place = self.finished, "racer finished");
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        !self.racers.is_empty() && self.finished == self.racers.len()
    }

    /// Standings: finishers by place, then the rest in racer order
    pub fn results(&self) -> Vec<RaceResult> {
        let mut results: Vec<RaceResult> = self.racers.iter().map(result).collect();
        results.sort_by_key(|r| r.place.unwrap_or(usize::MAX));
        results
    }
}

fn result(racer: &Racer) -> RaceResult {
    let view = racer.view();
    RaceResult {
        id: racer.id,
        name: racer.name,
        steps: racer.engine.len(),
        comparisons: view.comparisons,
        swaps: view.swaps,
        place: racer.place,
    }
}

/// Finishing order without running the clock: at equal speed the racer
/// with fewer steps always finishes first, ties going to the earlier id
pub fn standings(
    registry: &Registry<SortInput, SortStep>,
    ids: &[&str],
    input: &SortInput,
) -> Result<Vec<RaceResult>, TraceError> {
    let mut results = Vec::with_capacity(ids.len());
    for &id in ids {
        let steps = registry.run(id, input)?;
        let Some(info) = registry.info(id) else {
            continue;
        };
        let count = |kind: SortKind| steps.iter().filter(|s| s.kind == kind).count();
        results.push(RaceResult {
            id: info.id,
            name: info.name,
            steps: steps.len(),
            comparisons: count(SortKind::Compare),
            swaps: count(SortKind::Swap),
            place: None,
        });
    }
    results.sort_by_key(|r| r.steps);
    for (i, r) in results.iter_mut().enumerate() {
        r.place = Some(i + 1);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ManualClock;
    use crate::trace::sorting::{self, generate, Shape};

    fn input() -> SortInput {
        SortInput::new(generate(Shape::Random, 24, 99, 7))
    }

    #[test]
    fn test_race_places_follow_step_counts() {
        let registry = sorting::registry();
        let ids = ["bubble", "merge", "insertion"];
        let clock = ManualClock::new();
        let config = EngineConfig::default();
        let mut race = Race::new(&registry, &ids, &input(), &config, clock.clone()).unwrap();
        race.start();

        let mut guard = 0;
        while !race.is_finished() {
            clock.advance(config.base_delay());
            race.tick();
            guard += 1;
            assert!(guard < 100_000, "race never finished");
        }

        let live: Vec<&str> = race.results().iter().map(|r| r.id).collect();
        let offline: Vec<&str> = standings(&registry, &ids, &input())
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(live, offline);
        assert!(race.results().iter().all(|r| r.place.is_some()));
    }

    #[test]
    fn test_finished_views_are_sorted() {
        let registry = sorting::registry();
        let clock = ManualClock::new();
        let config = EngineConfig::default();
        let mut race =
            Race::new(&registry, &["heap", "shell"], &input(), &config, clock.clone()).unwrap();
        race.start();
        while !race.is_finished() {
            clock.advance(config.base_delay());
            race.tick();
        }
        for racer in race.racers() {
            assert!(racer.view().array.windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_unknown_racer_is_an_error() {
        let registry = sorting::registry();
        let result = Race::new(
            &registry,
            &["bogo"],
            &input(),
            &EngineConfig::default(),
            ManualClock::new(),
        );
        assert!(matches!(result, Err(TraceError::UnknownAlgorithm { .. })));
    }

    #[test]
    fn test_restart_clears_places() {
        let registry = sorting::registry();
        let clock = ManualClock::new();
        let config = EngineConfig::default();
        let mut race = Race::new(&registry, &["bubble"], &input(), &config, clock.clone()).unwrap();
        race.start();
        while !race.is_finished() {
            clock.advance(config.base_delay());
            race.tick();
        }
        race.start();
        assert!(!race.is_finished());
        assert_eq!(race.results()[0].place, None);
        assert_eq!(race.racers()[0].view().comparisons, 0);
    }
}
