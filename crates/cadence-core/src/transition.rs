//! Row-boundary transitions.
//!
//! Rows of `row_size` are aligned at the start of the history. The most
//! recent complete row is the reference; its last `tail` symbols are looked
//! up at the end of every earlier complete row, and the first `lead` symbols
//! of the row that followed each match are collected.

use crate::analysis::Analysis;
use crate::config::AnalysisConfig;
use crate::symbol::Symbol;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowMatch {
    /// Index of the earlier row whose tail matched.
    pub row: usize,
    /// Opening symbols of the row after it.
    pub lead: Vec<Symbol>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowTransition {
    pub row_size: usize,
    pub reference_row: usize,
    pub tail: Vec<Symbol>,
    pub matches: Vec<RowMatch>,
    /// Symbol counts across every collected lead.
    pub counts: Vec<(Symbol, usize)>,
    pub symbol: Symbol,
    /// `counts[symbol] / (matches * lead length)`.
    pub confidence: f64,
}

fn dominant(counts: &BTreeMap<Symbol, usize>) -> Option<(Symbol, usize)> {
    counts
        .iter()
        .fold(None, |best: Option<(Symbol, usize)>, (s, c)| match best {
            Some((_, bc)) if bc >= *c => best,
            _ => Some((*s, *c)),
        })
}

impl RowTransition {
    /// Most common symbol at lead position `index` across matches, with its
    /// count and the number of matches that reach that position.
    pub fn at_lead(&self, index: usize) -> Option<(Symbol, usize, usize)> {
        let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
        for m in &self.matches {
            if let Some(s) = m.lead.get(index) {
                *counts.entry(*s).or_default() += 1;
            }
        }
        let total = counts.values().sum();
        let (symbol, count) = dominant(&counts)?;
        Some((symbol, count, total))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowTransitionAnalyzer {
    pub row_size: usize,
    pub tail: usize,
    pub lead: usize,
}

impl Default for RowTransitionAnalyzer {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl RowTransitionAnalyzer {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            row_size: config.row_size,
            tail: config.row_tail,
            lead: config.row_lead,
        }
    }

    fn row_tail<'a>(&self, sequence: &'a [Symbol], row: usize) -> &'a [Symbol] {
        let end = (row + 1) * self.row_size;
        &sequence[end - self.tail..end]
    }

    pub fn analyze(&self, sequence: &[Symbol]) -> Analysis<RowTransition> {
        assert!(self.row_size > 0, "row size must be positive");
        assert!(
            self.tail > 0 && self.tail + self.lead <= self.row_size,
            "row tail and lead must fit in a row"
        );

        let complete = sequence.len() / self.row_size;
        if complete < 2 {
            return Analysis::Insufficient {
                required: 2 * self.row_size,
                available: sequence.len(),
            };
        }

        let reference_row = complete - 1;
        let tail = self.row_tail(sequence, reference_row);

        let matches: Vec<RowMatch> = (0..reference_row)
            .filter(|row| self.row_tail(sequence, *row) == tail)
            .map(|row| {
                let start = (row + 1) * self.row_size;
                RowMatch {
                    row,
                    lead: sequence[start..start + self.lead].to_vec(),
                }
            })
            .collect();

        if matches.is_empty() {
            return Analysis::NoPattern;
        }

        let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
        for symbol in matches.iter().flat_map(|m| m.lead.iter()) {
            *counts.entry(*symbol).or_default() += 1;
        }
        let Some((symbol, top)) = dominant(&counts) else {
            return Analysis::NoPattern;
        };
        let confidence = top as f64 / (matches.len() * self.lead) as f64;

        tracing::debug!(
            reference_row,
            matches = matches.len(),
            confidence,
            "row transition found"
        );

        Analysis::Found(RowTransition {
            row_size: self.row_size,
            reference_row,
            tail: tail.to_vec(),
            matches,
            counts: counts.into_iter().collect(),
            symbol,
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(ids: &[u16]) -> Vec<Symbol> {
        ids.iter().map(|i| Symbol(*i)).collect()
    }

    fn analyzer() -> RowTransitionAnalyzer {
        RowTransitionAnalyzer {
            row_size: 4,
            tail: 2,
            lead: 2,
        }
    }

    #[test]
    fn test_needs_two_complete_rows() {
        let result = analyzer().analyze(&syms(&[0, 1, 2, 0, 1, 2, 0]));
        assert_eq!(
            result,
            Analysis::Insufficient {
                required: 8,
                available: 7
            }
        );
    }

    #[test]
    fn test_no_earlier_row_with_same_tail() {
        let result = analyzer().analyze(&syms(&[0, 0, 1, 1, 2, 2, 0, 2]));
        assert_eq!(result, Analysis::NoPattern);
    }

    #[test]
    fn test_collects_leads_after_matching_rows() {
        // rows: [2 2 0 1] [1 1 2 2] [0 0 0 1] [2 0 0 1]
        let seq = syms(&[2, 2, 0, 1, 1, 1, 2, 2, 0, 0, 0, 1, 2, 0, 0, 1]);
        let found = analyzer().analyze(&seq).found().unwrap();

        assert_eq!(found.reference_row, 3);
        assert_eq!(found.tail, syms(&[0, 1]));
        assert_eq!(found.matches.len(), 2);
        assert_eq!(found.matches[0].lead, syms(&[1, 1]));
        assert_eq!(found.matches[1].lead, syms(&[2, 0]));
        // leads: 1 1 2 0 -> V wins with 2 of 4
        assert_eq!(found.symbol, Symbol(1));
        assert_eq!(found.confidence, 0.5);
        assert_eq!(found.at_lead(0), Some((Symbol(1), 1, 2)));
        assert_eq!(found.at_lead(1), Some((Symbol(0), 1, 2)));
    }
}
