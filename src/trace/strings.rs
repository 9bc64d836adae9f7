//! Pattern matching traces
//!
//! Text and pattern are compared by `char`, so offsets are character
//! positions rather than byte positions.

use super::registry::{AlgorithmInfo, Registry};
use super::TraceStep;
use serde::Serialize;

const RK_BASE: i64 = 256;
const RK_MOD: i64 = 101;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MatchStep {
    /// Align the pattern's first character with text position `offset`
    ShiftPattern { offset: usize },
    CompareChar {
        text_index: usize,
        pattern_index: usize,
        offset: usize,
    },
    MatchChar {
        text_index: usize,
        pattern_index: usize,
        offset: usize,
    },
    Mismatch {
        text_index: usize,
        pattern_index: usize,
        offset: usize,
    },
    PatternFound { offset: usize, length: usize },
    /// KMP failure table
    BuildTable { table: Vec<usize> },
    HashCompute {
        pattern_hash: i64,
        text_hash: i64,
        offset: usize,
    },
    HashCompare {
        pattern_hash: i64,
        text_hash: i64,
        offset: usize,
    },
    Done,
}

impl TraceStep for MatchStep {
    fn kind(&self) -> &'static str {
        match self {
            MatchStep::ShiftPattern { .. } => "shift-pattern",
            MatchStep::CompareChar { .. } => "compare-char",
            MatchStep::MatchChar { .. } => "match-char",
            MatchStep::Mismatch { .. } => "mismatch",
            MatchStep::PatternFound { .. } => "pattern-found",
            MatchStep::BuildTable { .. } => "build-table",
            MatchStep::HashCompute { .. } => "hash-compute",
            MatchStep::HashCompare { .. } => "hash-compare",
            MatchStep::Done => "done",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchInput {
    pub text: String,
    pub pattern: String,
}

impl MatchInput {
    pub fn new(text: impl Into<String>, pattern: impl Into<String>) -> Self {
        MatchInput {
            text: text.into(),
            pattern: pattern.into(),
        }
    }

    fn chars(&self) -> (Vec<char>, Vec<char>) {
        (self.text.chars().collect(), self.pattern.chars().collect())
    }
}

pub fn registry() -> Registry<MatchInput, MatchStep> {
    let mut registry = Registry::new("strings");
    registry
        .register(
            AlgorithmInfo {
                id: "naive",
                name: "Naive Search",
                time: "O(n×m)",
                space: "O(1)",
                description: "Checks every position in the text for a pattern match.",
            },
            naive,
        )
        .register(
            AlgorithmInfo {
                id: "kmp",
                name: "KMP Algorithm",
                time: "O(n+m)",
                space: "O(m)",
                description: "Uses a failure function to skip redundant comparisons.",
            },
            kmp,
        )
        .register(
            AlgorithmInfo {
                id: "rabin-karp",
                name: "Rabin-Karp",
                time: "O(n+m) avg",
                space: "O(1)",
                description: "Uses a rolling hash to quickly rule out non-matching windows.",
            },
            rabin_karp,
        );
    registry
}

/// Compare `pattern` against `text` at `offset`, left to right, stopping at
/// the first mismatch. Returns whether every character matched.
fn verify(text: &[char], pattern: &[char], offset: usize, steps: &mut Vec<MatchStep>) -> bool {
    for (j, &p) in pattern.iter().enumerate() {
        let i = offset + j;
        steps.push(MatchStep::CompareChar {
            text_index: i,
            pattern_index: j,
            offset,
        });
        if text[i] == p {
            steps.push(MatchStep::MatchChar {
                text_index: i,
                pattern_index: j,
                offset,
            });
        } else {
            steps.push(MatchStep::Mismatch {
                text_index: i,
                pattern_index: j,
                offset,
            });
            return false;
        }
    }
    true
}

pub fn naive(input: &MatchInput) -> Vec<MatchStep> {
    let mut steps = Vec::new();
    let (text, pattern) = input.chars();
    let (n, m) = (text.len(), pattern.len());
    if m == 0 || n < m {
        return steps;
    }
    for offset in 0..=n - m {
        steps.push(MatchStep::ShiftPattern { offset });
        if verify(&text, &pattern, offset, &mut steps) {
            steps.push(MatchStep::PatternFound { offset, length: m });
        }
    }
    steps.push(MatchStep::Done);
    steps
}

/// Longest proper prefix of `pattern[..=i]` that is also a suffix, for each `i`
pub fn failure_table(pattern: &[char]) -> Vec<usize> {
    let mut fail = vec![0; pattern.len()];
    let mut k = 0;
    for i in 1..pattern.len() {
        while k > 0 && pattern[k] != pattern[i] {
            k = fail[k - 1];
        }
        if pattern[k] == pattern[i] {
            k += 1;
        }
        fail[i] = k;
    }
    fail
}

pub fn kmp(input: &MatchInput) -> Vec<MatchStep> {
    let mut steps = Vec::new();
    let (text, pattern) = input.chars();
    let (n, m) = (text.len(), pattern.len());
    if m == 0 || n < m {
        return steps;
    }
    let fail = failure_table(&pattern);
    steps.push(MatchStep::BuildTable {
        table: fail.clone(),
    });

    let (mut i, mut j) = (0, 0);
    while i < n {
        let offset = i - j;
        steps.push(MatchStep::ShiftPattern { offset });
        steps.push(MatchStep::CompareChar {
            text_index: i,
            pattern_index: j,
            offset,
        });
        if text[i] == pattern[j] {
            steps.push(MatchStep::MatchChar {
                text_index: i,
                pattern_index: j,
                offset,
            });
            j += 1;
            if j == m {
                steps.push(MatchStep::PatternFound {
                    offset: i + 1 - m,
                    length: m,
                });
                j = fail[j - 1];
            }
            i += 1;
        } else {
            steps.push(MatchStep::Mismatch {
                text_index: i,
                pattern_index: j,
                offset,
            });
            if j > 0 {
                // Fall back and re-check the same text character
                j = fail[j - 1];
            } else {
                i += 1;
            }
        }
    }
    steps.push(MatchStep::Done);
    steps
}

pub fn rabin_karp(input: &MatchInput) -> Vec<MatchStep> {
    let mut steps = Vec::new();
    let (text, pattern) = input.chars();
    let (n, m) = (text.len(), pattern.len());
    if m == 0 || n < m {
        return steps;
    }
    let code = |c: char| c as i64;

    // RK_BASE^(m-1) mod RK_MOD, weight of the character leaving the window
    let mut h = 1;
    for _ in 0..m - 1 {
        h = (h * RK_BASE) % RK_MOD;
    }
    let (mut pattern_hash, mut text_hash) = (0, 0);
    for k in 0..m {
        pattern_hash = (RK_BASE * pattern_hash + code(pattern[k])) % RK_MOD;
        text_hash = (RK_BASE * text_hash + code(text[k])) % RK_MOD;
    }
    steps.push(MatchStep::HashCompute {
        pattern_hash,
        text_hash,
        offset: 0,
    });

    for offset in 0..=n - m {
        steps.push(MatchStep::ShiftPattern { offset });
        steps.push(MatchStep::HashCompare {
            pattern_hash,
            text_hash,
            offset,
        });
        if pattern_hash == text_hash && verify(&text, &pattern, offset, &mut steps) {
            steps.push(MatchStep::PatternFound { offset, length: m });
        }
        if offset < n - m {
            text_hash = (RK_BASE * (text_hash - code(text[offset]) * h) + code(text[offset + m]))
                .rem_euclid(RK_MOD);
        }
    }
    steps.push(MatchStep::Done);
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(steps: &[MatchStep]) -> Vec<usize> {
        steps
            .iter()
            .filter_map(|s| match s {
                MatchStep::PatternFound { offset, .. } => Some(*offset),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_all_algorithms_agree_on_matches() {
        let registry = registry();
        let cases = [
            ("ABABDABACDABABCABAB", "ABABCABAB", vec![10]),
            ("AABAACAADAABAABA", "AABA", vec![0, 9, 12]),
            ("aaaaa", "aa", vec![0, 1, 2, 3]),
            ("hello world", "xyz", vec![]),
            ("abc", "abc", vec![0]),
        ];
        for id in registry.ids() {
            for (text, pattern, expected) in &cases {
                let steps = registry.run(id, &MatchInput::new(*text, *pattern)).unwrap();
                assert_eq!(&found(&steps), expected, "{} on {:?}/{:?}", id, text, pattern);
                assert_eq!(steps.last(), Some(&MatchStep::Done));
            }
        }
    }

    #[test]
    fn test_failure_table() {
        let p: Vec<char> = "ABABCABAB".chars().collect();
        assert_eq!(failure_table(&p), vec![0, 0, 1, 2, 0, 1, 2, 3, 4]);
        let p: Vec<char> = "AAAA".chars().collect();
        assert_eq!(failure_table(&p), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_kmp_starts_with_table() {
        let steps = kmp(&MatchInput::new("abcabd", "abd"));
        assert_eq!(steps[0], MatchStep::BuildTable { table: vec![0, 0, 0] });
    }

    #[test]
    fn test_kmp_rechecks_after_fallback() {
        // "aab" in "aaab": mismatch at text 2 against pattern 2 falls back
        // to pattern 1 and compares text 2 again
        let steps = kmp(&MatchInput::new("aaab", "aab"));
        let compares: Vec<(usize, usize)> = steps
            .iter()
            .filter_map(|s| match s {
                MatchStep::CompareChar {
                    text_index,
                    pattern_index,
                    ..
                } => Some((*text_index, *pattern_index)),
                _ => None,
            })
            .collect();
        assert_eq!(compares, vec![(0, 0), (1, 1), (2, 2), (2, 1), (3, 2)]);
        assert_eq!(found(&steps), vec![1]);
    }

    #[test]
    fn test_rabin_karp_hashes_stay_in_range() {
        let steps = rabin_karp(&MatchInput::new("the quick brown fox", "fox"));
        for s in &steps {
            if let MatchStep::HashCompare {
                pattern_hash,
                text_hash,
                ..
            } = s
            {
                assert!((0..RK_MOD).contains(pattern_hash));
                assert!((0..RK_MOD).contains(text_hash));
            }
        }
        assert_eq!(found(&steps), vec![16]);
    }

    #[test]
    fn test_empty_pattern_or_short_text_is_empty() {
        let registry = registry();
        for id in registry.ids() {
            assert!(registry.run(id, &MatchInput::new("abc", "")).unwrap().is_empty());
            assert!(registry.run(id, &MatchInput::new("ab", "abc")).unwrap().is_empty());
        }
    }

    #[test]
    fn test_offsets_are_character_positions() {
        let steps = naive(&MatchInput::new("héllo", "llo"));
        assert_eq!(found(&steps), vec![2]);
    }
}
