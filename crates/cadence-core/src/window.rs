use crate::structure::{StructureCode, encode};
use crate::symbol::Symbol;
use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// A window of the history together with what came right after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occurrence<'a> {
    pub offset: usize,
    pub window: &'a [Symbol],
    /// `None` when the window ends at the tail of the sequence.
    pub following: Option<Symbol>,
}

/// Every window of length `window_length`, oldest first.
///
/// Windows overlap with stride 1. Panics on a zero window length.
pub fn occurrences(sequence: &[Symbol], window_length: usize) -> Vec<Occurrence<'_>> {
    assert!(window_length > 0, "window length must be positive");
    if sequence.len() < window_length {
        return Vec::new();
    }
    (0..=sequence.len() - window_length)
        .map(|offset| Occurrence {
            offset,
            window: &sequence[offset..offset + window_length],
            following: sequence.get(offset + window_length).copied(),
        })
        .collect()
}

/// Key -> follow-up symbols, in the order their windows appear.
#[derive(Debug, Clone)]
pub struct PatternIndex<K> {
    entries: HashMap<K, Vec<Symbol>>,
}

impl<K: Eq + Hash> Default for PatternIndex<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> PatternIndex<K> {
    fn record(&mut self, key: K, following: Symbol) {
        self.entries.entry(key).or_default().push(following);
    }

    pub fn followers(&self, key: &K) -> &[Symbol] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of recorded follow-ups across all keys.
    pub fn total(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// Literal and structural indexes over one window length.
#[derive(Debug, Clone)]
pub struct WindowIndex {
    pub window_length: usize,
    pub literal: PatternIndex<Vec<Symbol>>,
    pub structural: PatternIndex<StructureCode>,
}

impl WindowIndex {
    /// Rebuild both indexes from scratch.
    ///
    /// A sequence of length `n` yields exactly `n - window_length` follow-ups
    /// per index (zero when `n <= window_length`).
    pub fn build(sequence: &[Symbol], window_length: usize) -> Self {
        let mut literal = PatternIndex::default();
        let mut structural = PatternIndex::default();

        for occ in occurrences(sequence, window_length) {
            if let Some(next) = occ.following {
                literal.record(occ.window.to_vec(), next);
                structural.record(encode(occ.window), next);
            }
        }

        tracing::trace!(
            window_length,
            literal_keys = literal.len(),
            structural_keys = structural.len(),
            "window index built"
        );

        Self {
            window_length,
            literal,
            structural,
        }
    }

    pub fn literal_followers(&self, window: &[Symbol]) -> &[Symbol] {
        self.literal.followers(&window.to_vec())
    }

    pub fn structural_followers(&self, window: &[Symbol]) -> &[Symbol] {
        self.structural.followers(&encode(window))
    }
}
