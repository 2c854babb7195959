//! Repeat search between the current window and historical windows.
//!
//! The corpus is always scanned oldest-to-newest and the first match wins, so
//! the earliest historical occurrence is the one reported. The follow-up that
//! counts for prediction is the symbol right after the historical match.

use crate::structure::encode;
use crate::symbol::Symbol;
use crate::window::{Occurrence, occurrences};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Symbol-by-symbol equality.
    Literal,
    /// Same structure code.
    Structural,
    /// Hamming distance within the configured bound.
    Near,
}

/// Which historical windows are compared against the current one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    #[default]
    Whole,
    /// Only windows starting at the same offset within their block.
    Block,
}

/// The last `window_length` symbols, if the sequence is long enough.
pub fn tail_window(sequence: &[Symbol], window_length: usize) -> Option<&[Symbol]> {
    if window_length == 0 || sequence.len() < window_length {
        return None;
    }
    Some(&sequence[sequence.len() - window_length..])
}

/// Historical windows that have a follow-up, oldest first.
///
/// `block_size` is only consulted for [`SearchScope::Block`].
pub fn corpus_for(
    sequence: &[Symbol],
    window_length: usize,
    scope: SearchScope,
    block_size: usize,
) -> Vec<Occurrence<'_>> {
    let all = occurrences(sequence, window_length);
    let Some(tail_offset) = sequence.len().checked_sub(window_length) else {
        return Vec::new();
    };

    all.into_iter()
        .filter(|occ| occ.following.is_some())
        .filter(|occ| match scope {
            SearchScope::Whole => true,
            SearchScope::Block => {
                assert!(block_size > 0, "block size must be positive");
                occ.offset % block_size == tail_offset % block_size
            }
        })
        .collect()
}

fn hamming(a: &[Symbol], b: &[Symbol]) -> Option<usize> {
    strsim::generic_hamming(a, b).ok()
}

struct Matcher<'c> {
    current: &'c [Symbol],
    mode: MatchMode,
    max_distance: usize,
    code: Option<crate::structure::StructureCode>,
}

impl<'c> Matcher<'c> {
    fn new(current: &'c [Symbol], mode: MatchMode, max_distance: usize) -> Self {
        let code = (mode == MatchMode::Structural).then(|| encode(current));
        Self {
            current,
            mode,
            max_distance,
            code,
        }
    }

    fn matches(&self, window: &[Symbol]) -> bool {
        if window.len() != self.current.len() {
            return false;
        }
        match self.mode {
            MatchMode::Literal => window == self.current,
            MatchMode::Structural => self.code.as_ref() == Some(&encode(window)),
            MatchMode::Near => {
                hamming(self.current, window).is_some_and(|d| d <= self.max_distance)
            }
        }
    }
}

/// First corpus entry matching `current` under `mode`.
pub fn find_repeat<'a>(
    current: &[Symbol],
    corpus: &[Occurrence<'a>],
    mode: MatchMode,
    max_distance: usize,
) -> Option<Occurrence<'a>> {
    let matcher = Matcher::new(current, mode, max_distance);
    corpus.iter().find(|occ| matcher.matches(occ.window)).copied()
}

/// Every corpus entry matching `current`, in corpus order.
pub fn find_all<'a>(
    current: &[Symbol],
    corpus: &[Occurrence<'a>],
    mode: MatchMode,
    max_distance: usize,
) -> Vec<Occurrence<'a>> {
    let matcher = Matcher::new(current, mode, max_distance);
    corpus
        .iter()
        .filter(|occ| matcher.matches(occ.window))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(ids: &[u16]) -> Vec<Symbol> {
        ids.iter().map(|i| Symbol(*i)).collect()
    }

    #[test]
    fn test_empty_corpus() {
        let current = syms(&[0, 1, 2]);
        assert!(find_repeat(&current, &[], MatchMode::Literal, 0).is_none());
    }

    #[test]
    fn test_near_match_bound() {
        let seq = syms(&[0, 1, 2, 1, 0, 1, 1]);
        let corpus = corpus_for(&seq, 3, SearchScope::Whole, 27);
        let current = syms(&[0, 1, 1]);

        let exact = find_repeat(&current, &corpus, MatchMode::Literal, 0);
        assert!(exact.is_none());

        let near = find_repeat(&current, &corpus, MatchMode::Near, 1).unwrap();
        assert_eq!(near.offset, 0);
        assert_eq!(near.following, Some(Symbol(1)));
    }

    #[test]
    fn test_structural_match_ignores_identity() {
        let seq = syms(&[2, 1, 2, 0, 0, 1, 0]);
        let corpus = corpus_for(&seq, 3, SearchScope::Whole, 27);
        let current = tail_window(&seq, 3).unwrap();
        let found = find_repeat(current, &corpus, MatchMode::Structural, 0).unwrap();
        assert_eq!(found.offset, 0);
        assert_eq!(found.following, Some(Symbol(0)));
    }

    #[test]
    fn test_block_scope_keeps_aligned_windows() {
        let seq: Vec<Symbol> = (0..12).map(|i| Symbol(i % 3)).collect();
        // tail window starts at 9, block size 4 -> offsets 1 and 5
        let corpus = corpus_for(&seq, 3, SearchScope::Block, 4);
        let offsets: Vec<usize> = corpus.iter().map(|o| o.offset).collect();
        assert_eq!(offsets, vec![1, 5]);
    }

    #[test]
    fn test_corpus_excludes_tail() {
        let seq = syms(&[0, 1, 2, 0]);
        let corpus = corpus_for(&seq, 2, SearchScope::Whole, 27);
        assert_eq!(corpus.len(), 2);
        assert!(corpus.iter().all(|o| o.following.is_some()));
    }
}
