// Integration tests for trace producers and the views built from them

use algotrace::config::EngineConfig;
use algotrace::engine::Engine;
use algotrace::inputs::InputSettings;
use algotrace::trace::sorting::{self, Shape, SortInput};
use algotrace::trace::structures::{
    Bst, HashTable, Heap, HeapKind, LinkedList, Queue, Stack, Structure, Trie,
};
use algotrace::trace::{graph, searching, strings, Registry};
use algotrace::view::{
    reduce, GraphView, Projector, SearchView, SortView, StringView, StructureView, ViewModel,
};
use proptest::prelude::*;
use std::fmt::Debug;
use std::str::FromStr;

fn assert_deterministic<I, S: PartialEq + Debug>(registry: &Registry<I, S>, input: &I) {
    for id in registry.ids() {
        let first = registry.run(id, input).unwrap();
        let second = registry.run(id, input).unwrap();
        assert!(!first.is_empty(), "{} produced no steps", id);
        assert_eq!(first, second, "{} is not deterministic", id);
    }
}

#[test]
fn test_every_producer_is_deterministic() {
    let settings = InputSettings::default();
    let seed = settings.seed;
    assert_deterministic(&sorting::registry(), &settings.sort_input(seed));
    assert_deterministic(&searching::registry(), &settings.search_input(seed));
    assert_deterministic(&graph::registry(), &settings.graph_input(seed));
    assert_deterministic(&strings::registry(), &settings.match_input());
}

/// Final view after autoplay equals the reduced view of the whole trace
fn assert_seek_end_matches_reduce<S, V>(steps: Vec<S>, view: V)
where
    S: Clone,
    V: ViewModel<S> + Clone + PartialEq + Debug,
{
    let mut reduced = view.clone();
    reduce(&mut reduced, &steps);

    let mut engine = Engine::with_observer(EngineConfig::default(), Projector::new(view));
    engine.load(steps);
    engine.seek(isize::MAX);
    assert_eq!(engine.observer().view(), &reduced);
}

#[test]
fn test_engine_views_match_reducers() {
    let settings = InputSettings::default();
    let seed = settings.seed;

    let input = settings.sort_input(seed);
    let steps = sorting::registry().run("quick", &input).unwrap();
    assert_seek_end_matches_reduce(steps, SortView::new(input.values.clone()));

    let input = settings.search_input(seed);
    let steps = searching::registry().run("binary", &input).unwrap();
    assert_seek_end_matches_reduce(steps, SearchView::new(input.values.clone(), input.target));

    let input = settings.graph_input(seed);
    let steps = graph::registry().run("dijkstra", &input).unwrap();
    assert_seek_end_matches_reduce(steps, GraphView::new(input.graph.is_directed()));

    let input = settings.match_input();
    let steps = strings::registry().run("kmp", &input).unwrap();
    assert_seek_end_matches_reduce(steps, StringView::new(&input.text, &input.pattern));
}

#[test]
fn test_sorted_view_after_every_algorithm() {
    let settings = InputSettings {
        shape: Shape::FewUnique,
        size: 20,
        ..InputSettings::default()
    };
    let input = settings.sort_input(settings.seed);
    let mut expected = input.values.clone();
    expected.sort_unstable();

    let registry = sorting::registry();
    for id in registry.ids() {
        let steps = registry.run(id, &input).unwrap();
        let mut view = SortView::new(input.values.clone());
        reduce(&mut view, &steps);
        assert_eq!(view.array, expected, "{}", id);
    }
}

/// Chain `ops` from `initial`, checking each replay lands on the outcome
fn chain<T: Structure>(initial: T, ops: &[&str]) -> T {
    let mut current = initial;
    for text in ops {
        let op = T::Op::from_str(text).unwrap();
        let outcome = current.run(&op);
        let mut view = StructureView::new(current.clone());
        reduce(&mut view, &outcome.steps);
        assert_eq!(view.current, outcome.after, "replaying {}", text);
        current = outcome.after;
    }
    current
}

#[test]
fn test_structure_operations_replay_to_outcome() {
    let list = chain(
        LinkedList::new(vec![1, 2, 3]),
        &["insert-head:0", "insert-at:2:9", "delete-tail", "reverse", "search:9"],
    );
    assert_eq!(list.len(), 4);

    let stack = chain(Stack::default(), &["push:1", "push:2", "pop", "peek", "push:3"]);
    assert_eq!(stack.items, vec![1, 3]);

    let queue = chain(Queue::default(), &["enqueue:1", "enqueue:2", "dequeue", "enqueue:3"]);
    assert_eq!(queue.items, vec![2, 3]);

    let tree = chain(Bst::sample(), &["insert:33", "delete:30", "delete:50", "inorder"]);
    assert!(!tree.contains(30));
    assert!(!tree.contains(50));
    assert!(tree.contains(33));

    for kind in [HeapKind::Min, HeapKind::Max] {
        let heap = chain(Heap::sample(kind), &["insert:1", "extract", "insert:99", "extract"]);
        assert!(heap.is_valid());
    }

    let table = chain(
        HashTable::sample(),
        &["insert:kiwi:4", "insert:apple:6", "remove:fig", "get:kiwi"],
    );
    assert_eq!(table.get("apple"), Some(6));
    assert_eq!(table.get("fig"), None);

    let trie = chain(Trie::sample(), &["insert:cars", "delete:card", "starts-with:ca"]);
    assert!(trie.contains("cars"));
    assert!(!trie.contains("card"));
    assert!(trie.contains("car"));
}

proptest! {
    #[test]
    fn prop_sorting_is_deterministic_per_seed(
        values in prop::collection::vec(0u32..100, 0..24),
        seed in any::<u64>(),
    ) {
        let registry = sorting::registry();
        let input = SortInput { values, seed };
        for id in registry.ids() {
            prop_assert_eq!(registry.run(id, &input).unwrap(), registry.run(id, &input).unwrap());
        }
    }

    #[test]
    fn prop_sort_indices_in_bounds(values in prop::collection::vec(0u32..100, 0..24)) {
        let registry = sorting::registry();
        let input = SortInput::new(values);
        for id in registry.ids() {
            for step in registry.run(id, &input).unwrap() {
                prop_assert_eq!(step.array.len(), input.values.len());
                prop_assert!(step.indices.iter().all(|&i| i < input.values.len()));
            }
        }
    }
}
