//! Text / pattern alignment state for matching traces

use super::ViewModel;
use crate::trace::strings::MatchStep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharState {
    Comparing,
    Matched,
    Mismatched,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringView {
    pub text: Vec<char>,
    pub pattern: Vec<char>,
    /// Text position under the pattern's first character
    pub offset: usize,
    /// Highlighted text position, if any
    pub focus: Option<(usize, CharState)>,
    /// Highlighted pattern position
    pub pattern_focus: Option<usize>,
    /// Offsets of every match found so far
    pub found: Vec<usize>,
    pub failure_table: Vec<usize>,
    /// `(pattern, window)` hashes from the latest hash step
    pub hashes: Option<(i64, i64)>,
    pub comparisons: usize,
    pub done: bool,
}

impl StringView {
    pub fn new(text: &str, pattern: &str) -> Self {
        StringView {
            text: text.chars().collect(),
            pattern: pattern.chars().collect(),
            offset: 0,
            focus: None,
            pattern_focus: None,
            found: Vec::new(),
            failure_table: Vec::new(),
            hashes: None,
            comparisons: 0,
            done: false,
        }
    }

    /// Whether text position `i` lies inside a match found so far
    pub fn in_match(&self, i: usize) -> bool {
        let m = self.pattern.len();
        self.found.iter().any(|&o| (o..o + m).contains(&i))
    }
}

impl ViewModel<MatchStep> for StringView {
    fn reset(&mut self) {
        self.offset = 0;
        self.focus = None;
        self.pattern_focus = None;
        self.found.clear();
        self.failure_table.clear();
        self.hashes = None;
        self.comparisons = 0;
        self.done = false;
    }

    fn apply(&mut self, step: &MatchStep, _index: usize) {
        self.focus = None;
        self.pattern_focus = None;
        self.hashes = None;
        match step {
            MatchStep::ShiftPattern { offset } => self.offset = *offset,
            MatchStep::CompareChar {
                text_index,
                pattern_index,
                offset,
            } => {
                self.offset = *offset;
                self.focus = Some((*text_index, CharState::Comparing));
                self.pattern_focus = Some(*pattern_index);
                self.comparisons += 1;
            }
            MatchStep::MatchChar {
                text_index,
                pattern_index,
                offset,
            } => {
                self.offset = *offset;
                self.focus = Some((*text_index, CharState::Matched));
                self.pattern_focus = Some(*pattern_index);
            }
            MatchStep::Mismatch {
                text_index,
                pattern_index,
                offset,
            } => {
                self.offset = *offset;
                self.focus = Some((*text_index, CharState::Mismatched));
                self.pattern_focus = Some(*pattern_index);
            }
            MatchStep::PatternFound { offset, .. } => {
                self.offset = *offset;
                self.found.push(*offset);
            }
            MatchStep::BuildTable { table } => self.failure_table.clone_from(table),
            MatchStep::HashCompute {
                pattern_hash,
                text_hash,
                offset,
            }
            | MatchStep::HashCompare {
                pattern_hash,
                text_hash,
                offset,
            } => {
                self.offset = *offset;
                self.hashes = Some((*pattern_hash, *text_hash));
            }
            MatchStep::Done => self.done = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::strings::{kmp, rabin_karp, MatchInput};
    use crate::view::reduce;

    #[test]
    fn test_found_positions_accumulate() {
        let input = MatchInput::new("abababa", "aba");
        let mut view = StringView::new(&input.text, &input.pattern);
        reduce(&mut view, &kmp(&input));
        assert_eq!(view.found, vec![0, 2, 4]);
        assert_eq!(view.failure_table, vec![0, 0, 1]);
        assert!(view.done);
        assert!(view.in_match(6));
    }

    #[test]
    fn test_hash_info_is_transient() {
        let input = MatchInput::new("abcd", "cd");
        let steps = rabin_karp(&input);
        let mut view = StringView::new(&input.text, &input.pattern);
        view.apply(&steps[0], 0);
        assert!(view.hashes.is_some());
        reduce(&mut view, &steps);
        assert_eq!(view.hashes, None);
        assert_eq!(view.found, vec![2]);
    }
}
