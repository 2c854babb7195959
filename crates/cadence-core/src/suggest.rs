//! Candidate generation and ranking.
//!
//! Candidates are produced in a fixed precedence (streak, cyclic, literal,
//! structural, near-match, row transition) and then stably sorted by
//! confidence and support. The global-frequency fallback is only produced
//! when nothing else qualifies.

use crate::config::AnalysisConfig;
use crate::cyclic::CyclicAnalyzer;
use crate::repeat::{MatchMode, SearchScope, corpus_for, find_all, find_repeat, tail_window};
use crate::sequence::tail_run;
use crate::structure::encode;
use crate::symbol::{Alphabet, Symbol};
use crate::transition::RowTransitionAnalyzer;
use crate::window::WindowIndex;
use serde::Serialize;
use std::collections::BTreeMap;

pub const STREAK_MIN: usize = 3;
const STREAK_CONFIDENCE: f64 = 0.7;
const LONG_STREAK_CONFIDENCE: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Streak,
    Cyclic,
    Literal,
    Structural,
    NearMatch,
    RowTransition,
    GlobalFrequency,
}

impl SourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceKind::Streak => "streak",
            SourceKind::Cyclic => "cyclic",
            SourceKind::Literal => "literal",
            SourceKind::Structural => "structural",
            SourceKind::NearMatch => "near-match",
            SourceKind::RowTransition => "row-transition",
            SourceKind::GlobalFrequency => "global-frequency",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub source: SourceKind,
    pub symbol: Symbol,
    pub confidence: f64,
    /// Number of historical observations backing the candidate.
    pub occurrences: usize,
    pub rationale: String,
}

/// Most frequent symbol, lowest symbol first on ties.
fn modal(symbols: impl IntoIterator<Item = Symbol>) -> Option<(Symbol, usize, usize)> {
    let mut counts: BTreeMap<Symbol, usize> = BTreeMap::new();
    for s in symbols {
        *counts.entry(s).or_default() += 1;
    }
    let total = counts.values().sum();
    let (symbol, count) = counts
        .iter()
        .fold(None, |best: Option<(Symbol, usize)>, (s, c)| match best {
            Some((_, bc)) if bc >= *c => best,
            _ => Some((*s, *c)),
        })?;
    Some((symbol, count, total))
}

fn percent(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

pub struct SuggestionAggregator<'a> {
    alphabet: &'a Alphabet,
    config: &'a AnalysisConfig,
}

impl<'a> SuggestionAggregator<'a> {
    pub fn new(alphabet: &'a Alphabet, config: &'a AnalysisConfig) -> Self {
        Self { alphabet, config }
    }

    /// Ranked suggestions for the symbol after `sequence`, best first.
    pub fn suggest(&self, sequence: &[Symbol]) -> Vec<Suggestion> {
        if sequence.is_empty() {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        candidates.extend(self.streak(sequence));
        candidates.extend(self.cyclic(sequence));
        candidates.extend(self.repeats(sequence));
        candidates.extend(self.row_transition(sequence));

        if candidates.is_empty() {
            candidates.extend(self.global_frequency(sequence));
        }

        rank(&mut candidates);
        tracing::debug!(
            history = sequence.len(),
            candidates = candidates.len(),
            "suggestions ranked"
        );
        candidates
    }

    fn streak(&self, sequence: &[Symbol]) -> Option<Suggestion> {
        let (symbol, run) = tail_run(sequence)?;
        if run < STREAK_MIN {
            return None;
        }

        // Break the streak toward the most common other symbol.
        let target = modal(sequence.iter().copied().filter(|s| *s != symbol))
            .map(|(s, _, _)| s)
            .or_else(|| self.alphabet.symbols().find(|s| *s != symbol))?;
        let confidence = if run > STREAK_MIN {
            LONG_STREAK_CONFIDENCE
        } else {
            STREAK_CONFIDENCE
        };

        Some(Suggestion {
            source: SourceKind::Streak,
            symbol: target,
            confidence,
            occurrences: run,
            rationale: format!(
                "{} in a row of {}; expecting a break toward {}",
                run,
                self.alphabet.label(symbol),
                self.alphabet.label(target)
            ),
        })
    }

    fn cyclic(&self, sequence: &[Symbol]) -> Option<Suggestion> {
        let analyzer = CyclicAnalyzer::from_config(self.config);
        let stat = analyzer.next_position(sequence, self.config.cycle_length)?;
        let p = stat
            .p_value
            .map(|p| format!("p={:.4}", p))
            .unwrap_or_else(|| "unanimous".to_string());

        Some(Suggestion {
            source: SourceKind::Cyclic,
            symbol: stat.symbol,
            confidence: stat.frequency,
            occurrences: stat.samples,
            rationale: format!(
                "position {} of the {}-cycle shows {} in {} of {} cycles ({})",
                stat.position + 1,
                stat.cycle_length,
                self.alphabet.label(stat.symbol),
                percent(stat.frequency),
                stat.samples,
                p
            ),
        })
    }

    fn repeats(&self, sequence: &[Symbol]) -> Vec<Suggestion> {
        let w = self.config.window_length;
        let Some(current) = tail_window(sequence, w) else {
            return Vec::new();
        };
        if sequence.len() <= w {
            return Vec::new();
        }

        let corpus = corpus_for(sequence, w, self.config.scope, self.config.cycle_length);
        let index =
            (self.config.scope == SearchScope::Whole).then(|| WindowIndex::build(sequence, w));

        [MatchMode::Literal, MatchMode::Structural, MatchMode::Near]
            .into_iter()
            .filter_map(|mode| {
                let followers: Vec<Symbol> = match (&index, mode) {
                    (Some(index), MatchMode::Literal) => index.literal_followers(current).to_vec(),
                    (Some(index), MatchMode::Structural) => {
                        index.structural_followers(current).to_vec()
                    }
                    _ => find_all(current, &corpus, mode, self.config.max_edit_distance)
                        .iter()
                        .filter_map(|occ| occ.following)
                        .collect(),
                };
                if followers.len() < self.config.min_occurrences {
                    return None;
                }

                let (symbol, count, total) = modal(followers)?;
                let first = find_repeat(current, &corpus, mode, self.config.max_edit_distance)?;
                let confidence = count as f64 / total as f64;
                let (source, shape) = match mode {
                    MatchMode::Literal => (SourceKind::Literal, self.alphabet.render(current)),
                    MatchMode::Structural => (SourceKind::Structural, encode(current).to_string()),
                    MatchMode::Near => (
                        SourceKind::NearMatch,
                        format!(
                            "{} (within {})",
                            self.alphabet.render(current),
                            self.config.max_edit_distance
                        ),
                    ),
                };

                Some(Suggestion {
                    source,
                    symbol,
                    confidence,
                    occurrences: total,
                    rationale: format!(
                        "{} pattern {} seen {} times, first at #{}; followed by {} {} of {} times",
                        source.as_str(),
                        shape,
                        total,
                        first.offset + 1,
                        self.alphabet.label(symbol),
                        count,
                        total
                    ),
                })
            })
            .collect()
    }

    fn row_transition(&self, sequence: &[Symbol]) -> Option<Suggestion> {
        let analyzer = RowTransitionAnalyzer::from_config(self.config);
        let lead_index = sequence.len() % analyzer.row_size;
        if lead_index >= analyzer.lead {
            return None;
        }

        let transition = analyzer.analyze(sequence).found()?;
        let (symbol, count, total) = transition.at_lead(lead_index)?;

        // One extra pseudo-observation keeps thin support below certainty.
        let confidence = count as f64 / (total + 1) as f64;

        Some(Suggestion {
            source: SourceKind::RowTransition,
            symbol,
            confidence,
            occurrences: total,
            rationale: format!(
                "rows ending in {} were followed by {} at row position {} in {} of {} cases",
                self.alphabet.render(&transition.tail),
                self.alphabet.label(symbol),
                lead_index + 1,
                count,
                total
            ),
        })
    }

    fn global_frequency(&self, sequence: &[Symbol]) -> Option<Suggestion> {
        let (symbol, count, total) = modal(sequence.iter().copied())?;
        let confidence = count as f64 / total as f64;

        Some(Suggestion {
            source: SourceKind::GlobalFrequency,
            symbol,
            confidence,
            occurrences: count,
            rationale: format!(
                "no pattern qualified; {} is the most frequent symbol ({} of {})",
                self.alphabet.label(symbol),
                count,
                total
            ),
        })
    }
}

/// Sort by confidence, then support, both descending. Stable, so full ties
/// keep their generation order.
pub fn rank(candidates: &mut [Suggestion]) {
    candidates.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| b.occurrences.cmp(&a.occurrences))
    });
}

pub fn suggest(
    sequence: &[Symbol],
    alphabet: &Alphabet,
    config: &AnalysisConfig,
) -> Vec<Suggestion> {
    SuggestionAggregator::new(alphabet, config).suggest(sequence)
}
