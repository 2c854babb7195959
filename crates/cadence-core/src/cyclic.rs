//! Positional statistics over fixed-length cycles.
//!
//! The history is cut into cycles of `cycle_length`; offset `i` belongs to
//! position `i % cycle_length`. A position is reported when one symbol
//! dominates it both by share and by a chi-square test against a uniform
//! spread over the symbols seen there.

use crate::analysis::Analysis;
use crate::config::AnalysisConfig;
use crate::stats::chi_square_uniform;
use crate::symbol::Symbol;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CyclePositionStat {
    pub cycle_length: usize,
    pub position: usize,
    /// Dominant symbol at this position.
    pub symbol: Symbol,
    /// Share of samples equal to `symbol`.
    pub frequency: f64,
    pub samples: usize,
    pub counts: Vec<(Symbol, usize)>,
    pub chi_square: Option<f64>,
    /// `None` for a unanimous position, where the test is undefined.
    pub p_value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclicAnalyzer {
    pub min_samples: usize,
    pub significance: f64,
    pub dominance_threshold: f64,
}

impl Default for CyclicAnalyzer {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl CyclicAnalyzer {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            min_samples: config.min_samples,
            significance: config.significance,
            dominance_threshold: config.dominance_threshold,
        }
    }

    /// Smallest history for which position 0 can reach `min_samples`.
    pub fn required_length(&self, cycle_length: usize) -> usize {
        self.min_samples.saturating_sub(1) * cycle_length + 1
    }

    /// Significant positions, ascending.
    pub fn analyze(&self, sequence: &[Symbol], cycle_length: usize) -> Vec<CyclePositionStat> {
        assert!(cycle_length > 0, "cycle length must be positive");
        let stats: Vec<CyclePositionStat> = (0..cycle_length.min(sequence.len()))
            .filter_map(|position| self.position_stat(sequence, cycle_length, position))
            .collect();

        tracing::debug!(
            cycle_length,
            history = sequence.len(),
            significant = stats.len(),
            "cyclic analysis"
        );
        stats
    }

    /// Like [`analyze`](Self::analyze) but tells "too early" apart from
    /// "nothing significant".
    pub fn assess(
        &self,
        sequence: &[Symbol],
        cycle_length: usize,
    ) -> Analysis<Vec<CyclePositionStat>> {
        let required = self.required_length(cycle_length);
        if sequence.len() < required {
            return Analysis::Insufficient {
                required,
                available: sequence.len(),
            };
        }
        Analysis::from_list(self.analyze(sequence, cycle_length))
    }

    /// Stat for one position if it passes every gate.
    pub fn position_stat(
        &self,
        sequence: &[Symbol],
        cycle_length: usize,
        position: usize,
    ) -> Option<CyclePositionStat> {
        let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
        for symbol in sequence.iter().skip(position).step_by(cycle_length) {
            *counts.entry(*symbol).or_default() += 1;
        }
        let samples: usize = counts.values().sum();

        if samples < self.min_samples {
            tracing::trace!(position, samples, "position skipped: sample below minimum");
            return None;
        }

        let (symbol, top) = counts
            .iter()
            .fold(None, |best: Option<(Symbol, usize)>, (s, c)| match best {
                Some((_, bc)) if bc >= *c => best,
                _ => Some((*s, *c)),
            })?;
        let frequency = top as f64 / samples as f64;

        let (chi_square, p_value) = if counts.len() < 2 {
            // Unanimous: the goodness-of-fit test is undefined, the share is 1.
            (None, None)
        } else {
            let observed: Vec<usize> = counts.values().copied().collect();
            let test = chi_square_uniform(&observed)?;
            if test.p_value >= self.significance {
                tracing::trace!(position, p_value = test.p_value, "position not significant");
                return None;
            }
            (Some(test.statistic), Some(test.p_value))
        };

        if frequency <= self.dominance_threshold {
            tracing::trace!(position, frequency, "position below dominance threshold");
            return None;
        }

        Some(CyclePositionStat {
            cycle_length,
            position,
            symbol,
            frequency,
            samples,
            counts: counts.into_iter().collect(),
            chi_square,
            p_value,
        })
    }

    /// The significant stat for the position the next symbol will land on.
    pub fn next_position(
        &self,
        sequence: &[Symbol],
        cycle_length: usize,
    ) -> Option<CyclePositionStat> {
        assert!(cycle_length > 0, "cycle length must be positive");
        self.position_stat(sequence, cycle_length, sequence.len() % cycle_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_length() {
        let analyzer = CyclicAnalyzer::default();
        assert_eq!(analyzer.required_length(27), 109);
        assert_eq!(analyzer.required_length(3), 13);
    }

    #[test]
    fn test_assess_insufficient() {
        let analyzer = CyclicAnalyzer::default();
        let seq = vec![Symbol(0); 10];
        assert_eq!(
            analyzer.assess(&seq, 3),
            Analysis::Insufficient {
                required: 13,
                available: 10
            }
        );
    }

    #[test]
    fn test_unanimous_position_has_no_p_value() {
        let analyzer = CyclicAnalyzer::default();
        let seq: Vec<Symbol> = [0, 1, 0, 2, 0, 1, 0, 2, 0, 1]
            .iter()
            .map(|i| Symbol(*i))
            .collect();
        let stat = analyzer.position_stat(&seq, 2, 0).unwrap();
        assert_eq!(stat.symbol, Symbol(0));
        assert_eq!(stat.frequency, 1.0);
        assert_eq!(stat.p_value, None);
    }

    #[test]
    fn test_position_below_min_samples_is_skipped() {
        let analyzer = CyclicAnalyzer::default();
        let seq = vec![Symbol(1); 8];
        // position 0 of a 2-cycle sees 4 samples
        assert!(analyzer.position_stat(&seq, 2, 0).is_none());
    }

    #[test]
    fn test_next_position_wraps() {
        let analyzer = CyclicAnalyzer {
            min_samples: 2,
            ..Default::default()
        };
        let seq: Vec<Symbol> = [0, 1, 0, 1, 0, 1].iter().map(|i| Symbol(*i)).collect();
        let stat = analyzer.next_position(&seq, 2).unwrap();
        assert_eq!(stat.position, 0);
        assert_eq!(stat.symbol, Symbol(0));
    }
}
