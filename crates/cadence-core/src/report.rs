use crate::analysis::Analysis;
use crate::config::CadenceConfig;
use crate::cyclic::{CyclePositionStat, CyclicAnalyzer};
use crate::repeat::tail_window;
use crate::structure::encode;
use crate::suggest::{Suggestion, SuggestionAggregator};
use crate::symbol::Symbol;
use crate::transition::{RowTransition, RowTransitionAnalyzer};
use serde::Serialize;

/// Everything a presentation layer renders after one user action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub length: usize,
    /// Structure code of the current tail window.
    pub tail_structure: Option<String>,
    pub suggestions: Vec<Suggestion>,
    pub cycles: Analysis<Vec<CyclePositionStat>>,
    pub transition: Analysis<RowTransition>,
}

impl Report {
    pub fn build(sequence: &[Symbol], config: &CadenceConfig) -> Self {
        let analysis = &config.analysis;
        let suggestions = SuggestionAggregator::new(&config.alphabet, analysis).suggest(sequence);
        let cycles =
            CyclicAnalyzer::from_config(analysis).assess(sequence, analysis.cycle_length);
        let transition = RowTransitionAnalyzer::from_config(analysis).analyze(sequence);

        Self {
            length: sequence.len(),
            tail_structure: tail_window(sequence, analysis.window_length)
                .map(|w| encode(w).to_string()),
            suggestions,
            cycles,
            transition,
        }
    }

    pub fn best(&self) -> Option<&Suggestion> {
        self.suggestions.first()
    }
}
