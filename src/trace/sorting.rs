//! Sorting traces
//!
//! Every step carries a full copy of the working array after the step's
//! effect, so a single step is enough to draw the bars. The highlight
//! semantics (which bars are being compared, which are final) still depend
//! on earlier steps and are derived by [`crate::view::SortView`].

use super::registry::{AlgorithmInfo, Registry};
use super::{seeded_rng, TraceStep};
use rand::Rng;
use serde::Serialize;
use tracing::warn;

/// Largest value counting sort will allocate a tally for
pub const COUNTING_SORT_LIMIT: u32 = 1 << 20;

/// Micro-operation performed on the array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKind {
    Compare,
    Swap,
    Overwrite,
    Sorted,
    /// Pivot selected for a partition
    Partition,
    /// Merge sort split of `[left, mid, right]`
    MergeSplit,
    /// Element tallied into a bucket (radix / counting)
    Bucket,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortStep {
    pub kind: SortKind,
    pub indices: Vec<usize>,
    pub array: Vec<u32>,
}

impl TraceStep for SortStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            SortKind::Compare => "compare",
            SortKind::Swap => "swap",
            SortKind::Overwrite => "overwrite",
            SortKind::Sorted => "sorted",
            SortKind::Partition => "partition",
            SortKind::MergeSplit => "merge-split",
            SortKind::Bucket => "bucket",
        }
    }
}

/// Input to every sorting producer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortInput {
    pub values: Vec<u32>,
    /// Only consulted by randomized variants
    pub seed: u64,
}

impl SortInput {
    pub fn new(values: Vec<u32>) -> Self {
        SortInput { values, seed: 0 }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Shape of a generated input array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Random,
    /// Ascending with roughly a tenth of the positions swapped
    Nearly,
    Reversed,
    /// Drawn from five distinct values
    FewUnique,
}

/// Build an input array of `size` elements in `[5, max_value]`
pub fn generate(shape: Shape, size: usize, max_value: u32, seed: u64) -> Vec<u32> {
    let mut rng = seeded_rng(seed);
    let low = 5.min(max_value);
    match shape {
        Shape::Random => (0..size).map(|_| rng.gen_range(low..=max_value)).collect(),
        Shape::Nearly => {
            let mut values: Vec<u32> = (1..=size as u32).collect();
            if size > 0 {
                for _ in 0..(size / 10).max(2) {
                    let a = rng.gen_range(0..size);
                    let b = rng.gen_range(0..size);
                    values.swap(a, b);
                }
            }
            values
        }
        Shape::Reversed => (1..=size as u32).rev().collect(),
        Shape::FewUnique => {
            const VALUES: [u32; 5] = [10, 30, 50, 70, 90];
            (0..size)
                .map(|_| VALUES[rng.gen_range(0..VALUES.len())])
                .collect()
        }
    }
}

/// Registry of every sorting algorithm
pub fn registry() -> Registry<SortInput, SortStep> {
    let mut registry = Registry::new("sorting");
    registry
        .register(
            AlgorithmInfo {
                id: "bubble",
                name: "Bubble Sort",
                time: "O(n²)",
                space: "O(1)",
                description: "Repeatedly swaps adjacent elements if they are in the wrong order.",
            },
            bubble,
        )
        .register(
            AlgorithmInfo {
                id: "selection",
                name: "Selection Sort",
                time: "O(n²)",
                space: "O(1)",
                description: "Finds the minimum element and places it at the beginning.",
            },
            selection,
        )
        .register(
            AlgorithmInfo {
                id: "insertion",
                name: "Insertion Sort",
                time: "O(n²)",
                space: "O(1)",
                description: "Builds the sorted prefix one element at a time.",
            },
            insertion,
        )
        .register(
            AlgorithmInfo {
                id: "merge",
                name: "Merge Sort",
                time: "O(n log n)",
                space: "O(n)",
                description: "Divides the array in half, sorts each half, then merges them.",
            },
            merge,
        )
        .register(
            AlgorithmInfo {
                id: "quick",
                name: "Quick Sort",
                time: "O(n log n)",
                space: "O(log n)",
                description: "Partitions around the last element, then sorts each side.",
            },
            quick,
        )
        .register(
            AlgorithmInfo {
                id: "quick-random",
                name: "Randomized Quick Sort",
                time: "O(n log n)",
                space: "O(log n)",
                description: "Quick sort with a seeded random pivot per partition.",
            },
            quick_random,
        )
        .register(
            AlgorithmInfo {
                id: "heap",
                name: "Heap Sort",
                time: "O(n log n)",
                space: "O(1)",
                description: "Builds a max heap then repeatedly extracts the maximum.",
            },
            heap,
        )
        .register(
            AlgorithmInfo {
                id: "radix",
                name: "Radix Sort",
                time: "O(nk)",
                space: "O(n+k)",
                description: "Sorts digit by digit from least to most significant.",
            },
            radix,
        )
        .register(
            AlgorithmInfo {
                id: "counting",
                name: "Counting Sort",
                time: "O(n+k)",
                space: "O(k)",
                description: "Counts occurrences of each value and rebuilds the array.",
            },
            counting,
        )
        .register(
            AlgorithmInfo {
                id: "shell",
                name: "Shell Sort",
                time: "O(n log²n)",
                space: "O(1)",
                description: "Insertion sort over shrinking gaps.",
            },
            shell,
        );
    registry
}

/// Working copy plus the trace being recorded
struct Tracer {
    a: Vec<u32>,
    steps: Vec<SortStep>,
}

impl Tracer {
    fn new(values: &[u32]) -> Self {
        Tracer {
            a: values.to_vec(),
            steps: Vec::new(),
        }
    }

    fn push(&mut self, kind: SortKind, indices: &[usize]) {
        self.steps.push(SortStep {
            kind,
            indices: indices.to_vec(),
            array: self.a.clone(),
        });
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.a.swap(i, j);
        self.push(SortKind::Swap, &[i, j]);
    }

    fn write(&mut self, k: usize, value: u32) {
        self.a[k] = value;
        self.push(SortKind::Overwrite, &[k]);
    }

    /// Close the trace with a sorted marker on every index
    fn finish(mut self) -> Vec<SortStep> {
        for i in 0..self.a.len() {
            self.push(SortKind::Sorted, &[i]);
        }
        self.steps
    }
}

pub fn bubble(input: &SortInput) -> Vec<SortStep> {
    let mut t = Tracer::new(&input.values);
    let n = t.a.len();
    for i in 0..n.saturating_sub(1) {
        for j in 0..n - i - 1 {
            t.push(SortKind::Compare, &[j, j + 1]);
            if t.a[j] > t.a[j + 1] {
                t.swap(j, j + 1);
            }
        }
        t.push(SortKind::Sorted, &[n - i - 1]);
    }
    t.finish()
}

pub fn selection(input: &SortInput) -> Vec<SortStep> {
    let mut t = Tracer::new(&input.values);
    let n = t.a.len();
    for i in 0..n.saturating_sub(1) {
        let mut m = i;
        for j in i + 1..n {
            t.push(SortKind::Compare, &[m, j]);
            if t.a[j] < t.a[m] {
                m = j;
            }
        }
        if m != i {
            t.swap(i, m);
        }
        t.push(SortKind::Sorted, &[i]);
    }
    t.finish()
}

pub fn insertion(input: &SortInput) -> Vec<SortStep> {
    let mut t = Tracer::new(&input.values);
    for i in 1..t.a.len() {
        let key = t.a[i];
        t.push(SortKind::Compare, &[i]);
        // j is one past the slot being examined
        let mut j = i;
        while j > 0 && t.a[j - 1] > key {
            t.push(SortKind::Compare, &[j - 1, j]);
            let shifted = t.a[j - 1];
            t.write(j, shifted);
            j -= 1;
        }
        t.write(j, key);
    }
    t.finish()
}

pub fn merge(input: &SortInput) -> Vec<SortStep> {
    let mut t = Tracer::new(&input.values);
    if !t.a.is_empty() {
        let last = t.a.len() - 1;
        merge_sort(&mut t, 0, last);
    }
    t.finish()
}

fn merge_sort(t: &mut Tracer, l: usize, r: usize) {
    if l >= r {
        return;
    }
    let m = (l + r) / 2;
    t.push(SortKind::MergeSplit, &[l, m, r]);
    merge_sort(t, l, m);
    merge_sort(t, m + 1, r);
    merge_halves(t, l, m, r);
}

fn merge_halves(t: &mut Tracer, l: usize, m: usize, r: usize) {
    let left = t.a[l..=m].to_vec();
    let right = t.a[m + 1..=r].to_vec();
    let (mut i, mut j, mut k) = (0, 0, l);
    while i < left.len() && j < right.len() {
        t.push(SortKind::Compare, &[l + i, m + 1 + j]);
        let value = if left[i] <= right[j] {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        t.write(k, value);
        k += 1;
    }
    for &value in left[i..].iter().chain(&right[j..]) {
        t.write(k, value);
        k += 1;
    }
}

pub fn quick(input: &SortInput) -> Vec<SortStep> {
    let mut t = Tracer::new(&input.values);
    let n = t.a.len() as isize;
    quick_sort(&mut t, 0, n - 1, &mut |_: &mut Tracer, _: usize, hi: usize| hi);
    t.finish()
}

/// Quick sort whose pivot is drawn from a generator seeded by the input
pub fn quick_random(input: &SortInput) -> Vec<SortStep> {
    let mut t = Tracer::new(&input.values);
    let n = t.a.len() as isize;
    let mut rng = seeded_rng(input.seed);
    quick_sort(&mut t, 0, n - 1, &mut |t: &mut Tracer, lo: usize, hi: usize| {
        let pick = rng.gen_range(lo..=hi);
        if pick != hi {
            t.swap(pick, hi);
        }
        hi
    });
    t.finish()
}

/// `choose` moves the pivot to `hi` and returns `hi`
fn quick_sort(
    t: &mut Tracer,
    lo: isize,
    hi: isize,
    choose: &mut dyn FnMut(&mut Tracer, usize, usize) -> usize,
) {
    if lo < hi {
        let p = partition(t, lo as usize, hi as usize, choose);
        t.push(SortKind::Sorted, &[p]);
        quick_sort(t, lo, p as isize - 1, choose);
        quick_sort(t, p as isize + 1, hi, choose);
    } else if lo == hi {
        t.push(SortKind::Sorted, &[lo as usize]);
    }
}

fn partition(
    t: &mut Tracer,
    lo: usize,
    hi: usize,
    choose: &mut dyn FnMut(&mut Tracer, usize, usize) -> usize,
) -> usize {
    let hi = choose(t, lo, hi);
    let pivot = t.a[hi];
    t.push(SortKind::Partition, &[hi]);
    // Next slot for an element smaller than the pivot
    let mut store = lo;
    for j in lo..hi {
        t.push(SortKind::Compare, &[j, hi]);
        if t.a[j] < pivot {
            t.swap(store, j);
            store += 1;
        }
    }
    t.swap(store, hi);
    store
}

pub fn heap(input: &SortInput) -> Vec<SortStep> {
    let mut t = Tracer::new(&input.values);
    let n = t.a.len();
    for i in (0..n / 2).rev() {
        heapify(&mut t, n, i);
    }
    for i in (1..n).rev() {
        t.swap(0, i);
        t.push(SortKind::Sorted, &[i]);
        heapify(&mut t, i, 0);
    }
    t.finish()
}

fn heapify(t: &mut Tracer, n: usize, i: usize) {
    let mut largest = i;
    let (l, r) = (2 * i + 1, 2 * i + 2);
    if l < n {
        t.push(SortKind::Compare, &[l, largest]);
        if t.a[l] > t.a[largest] {
            largest = l;
        }
    }
    if r < n {
        t.push(SortKind::Compare, &[r, largest]);
        if t.a[r] > t.a[largest] {
            largest = r;
        }
    }
    if largest != i {
        t.swap(i, largest);
        heapify(t, n, largest);
    }
}

pub fn radix(input: &SortInput) -> Vec<SortStep> {
    let mut t = Tracer::new(&input.values);
    let max = t.a.iter().copied().max().unwrap_or(0) as u64;
    let mut exp: u64 = 1;
    while max / exp > 0 {
        count_by_digit(&mut t, exp);
        exp *= 10;
    }
    t.finish()
}

fn count_by_digit(t: &mut Tracer, exp: u64) {
    let n = t.a.len();
    let digit = |v: u32| ((v as u64 / exp) % 10) as usize;
    let mut count = [0usize; 10];
    for i in 0..n {
        count[digit(t.a[i])] += 1;
        t.push(SortKind::Bucket, &[i]);
    }
    for d in 1..10 {
        count[d] += count[d - 1];
    }
    let mut out = vec![0; n];
    for &v in t.a.iter().rev() {
        let d = digit(v);
        out[count[d] - 1] = v;
        count[d] -= 1;
    }
    for (i, v) in out.into_iter().enumerate() {
        t.write(i, v);
    }
}

pub fn counting(input: &SortInput) -> Vec<SortStep> {
    let mut t = Tracer::new(&input.values);
    let max = t.a.iter().copied().max().unwrap_or(0);
    if max > COUNTING_SORT_LIMIT {
        warn!(max, limit = COUNTING_SORT_LIMIT, "counting sort input out of range");
        return Vec::new();
    }
    let n = t.a.len();
    if n == 0 {
        return t.finish();
    }
    let mut count = vec![0usize; max as usize + 1];
    for i in 0..n {
        count[t.a[i] as usize] += 1;
        t.push(SortKind::Bucket, &[i]);
    }
    for v in 1..count.len() {
        count[v] += count[v - 1];
    }
    let mut out = vec![0; n];
    for &v in t.a.iter().rev() {
        out[count[v as usize] - 1] = v;
        count[v as usize] -= 1;
    }
    for (i, v) in out.into_iter().enumerate() {
        t.write(i, v);
    }
    t.finish()
}

pub fn shell(input: &SortInput) -> Vec<SortStep> {
    let mut t = Tracer::new(&input.values);
    let n = t.a.len();
    let mut gap = n / 2;
    while gap > 0 {
        for i in gap..n {
            let held = t.a[i];
            let mut j = i;
            while j >= gap {
                t.push(SortKind::Compare, &[j - gap, j]);
                if t.a[j - gap] <= held {
                    break;
                }
                let shifted = t.a[j - gap];
                t.write(j, shifted);
                j -= gap;
            }
            t.write(j, held);
        }
        gap /= 2;
    }
    t.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u32; 9] = [38, 27, 43, 3, 9, 82, 10, 27, 5];

    fn final_array(steps: &[SortStep]) -> Vec<u32> {
        steps.last().map(|s| s.array.clone()).unwrap_or_default()
    }

    #[test]
    fn test_every_algorithm_sorts() {
        let registry = registry();
        let mut expected = SAMPLE.to_vec();
        expected.sort_unstable();
        let input = SortInput::new(SAMPLE.to_vec()).with_seed(11);

        for id in registry.ids() {
            let steps = registry.run(id, &input).unwrap();
            assert_eq!(final_array(&steps), expected, "{} did not sort", id);
        }
    }

    #[test]
    fn test_indices_stay_in_bounds() {
        let registry = registry();
        let input = SortInput::new(SAMPLE.to_vec()).with_seed(3);
        for id in registry.ids() {
            for step in registry.run(id, &input).unwrap() {
                assert_eq!(step.array.len(), SAMPLE.len(), "{} changed length", id);
                for &i in &step.indices {
                    assert!(i < SAMPLE.len(), "{} emitted index {} at {:?}", id, i, step.kind);
                }
            }
        }
    }

    #[test]
    fn test_trace_ends_with_sorted_sweep() {
        let steps = bubble(&SortInput::new(vec![3, 1, 2]));
        let tail: Vec<_> = steps[steps.len() - 3..]
            .iter()
            .map(|s| (s.kind, s.indices.clone()))
            .collect();
        assert_eq!(
            tail,
            vec![
                (SortKind::Sorted, vec![0]),
                (SortKind::Sorted, vec![1]),
                (SortKind::Sorted, vec![2]),
            ]
        );
    }

    #[test]
    fn test_bubble_trace_for_two_elements() {
        let steps = bubble(&SortInput::new(vec![2, 1]));
        let kinds: Vec<_> = steps.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SortKind::Compare,
                SortKind::Swap,
                SortKind::Sorted,
                SortKind::Sorted,
                SortKind::Sorted,
            ]
        );
        assert_eq!(steps[0].array, vec![2, 1]);
        assert_eq!(steps[1].array, vec![1, 2]);
    }

    #[test]
    fn test_empty_and_single_inputs() {
        let registry = registry();
        for id in registry.ids() {
            assert!(registry.run(id, &SortInput::new(vec![])).unwrap().is_empty(), "{}", id);
            let single = registry.run(id, &SortInput::new(vec![4])).unwrap();
            assert_eq!(final_array(&single), vec![4], "{}", id);
        }
    }

    #[test]
    fn test_quick_random_depends_only_on_seed() {
        let input = SortInput::new(SAMPLE.to_vec()).with_seed(99);
        assert_eq!(quick_random(&input), quick_random(&input));

        let other = SortInput::new(SAMPLE.to_vec()).with_seed(100);
        let mut expected = SAMPLE.to_vec();
        expected.sort_unstable();
        assert_eq!(final_array(&quick_random(&other)), expected);
    }

    #[test]
    fn test_counting_sort_declines_huge_values() {
        let steps = counting(&SortInput::new(vec![1, COUNTING_SORT_LIMIT + 1]));
        assert!(steps.is_empty());
    }

    #[test]
    fn test_merge_split_marks_ranges() {
        let steps = merge(&SortInput::new(vec![4, 3, 2, 1]));
        assert_eq!(steps[0].kind, SortKind::MergeSplit);
        assert_eq!(steps[0].indices, vec![0, 1, 3]);
    }

    #[test]
    fn test_generate_shapes() {
        assert_eq!(generate(Shape::Reversed, 4, 99, 0), vec![4, 3, 2, 1]);

        let random = generate(Shape::Random, 50, 99, 7);
        assert_eq!(random.len(), 50);
        assert!(random.iter().all(|v| (5..=99).contains(v)));
        assert_eq!(random, generate(Shape::Random, 50, 99, 7));

        let few = generate(Shape::FewUnique, 20, 99, 1);
        assert!(few.iter().all(|v| [10, 30, 50, 70, 90].contains(v)));

        let mut nearly = generate(Shape::Nearly, 30, 99, 2);
        nearly.sort_unstable();
        assert_eq!(nearly, (1..=30).collect::<Vec<_>>());
    }
}
