//! A caller-owned analysis session: one history plus the settings it is
//! analyzed with.

use cadence_core::{
    Analysis, Block, CadenceConfig, CyclePositionStat, CyclicAnalyzer, Report, RowTransition,
    RowTransitionAnalyzer, Sequence, SequenceError, SequenceStore, Suggestion, Symbol,
    chunk_oriented, suggest,
};

#[derive(Debug, Clone)]
pub struct Session {
    store: SequenceStore,
    config: CadenceConfig,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(CadenceConfig::default())
    }
}

impl Session {
    pub fn new(config: CadenceConfig) -> Self {
        Self {
            store: SequenceStore::new(config.alphabet.clone()),
            config,
        }
    }

    pub fn config(&self) -> &CadenceConfig {
        &self.config
    }

    pub fn store(&self) -> &SequenceStore {
        &self.store
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Append every code in order. Either all codes are appended or, when one
    /// is not part of the alphabet, none are.
    pub fn append_codes<S: AsRef<str>>(
        &mut self,
        codes: &[S],
    ) -> Result<Vec<Symbol>, SequenceError> {
        let alphabet = self.store.alphabet();
        let symbols = codes
            .iter()
            .map(|code| {
                let code = code.as_ref();
                alphabet
                    .parse(code)
                    .ok_or_else(|| SequenceError::InvalidSymbol(code.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        for symbol in &symbols {
            self.store.append(*symbol)?;
        }
        tracing::debug!(
            added = symbols.len(),
            total = self.store.len(),
            "symbols appended"
        );
        Ok(symbols)
    }

    pub fn undo(&mut self) -> Option<Symbol> {
        self.store.undo()
    }

    /// Drop the whole history, returning how many symbols were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.store.len();
        self.store.clear();
        removed
    }

    pub fn snapshot(&self) -> Sequence {
        self.store.snapshot()
    }

    pub fn blocks(&self) -> Vec<Block> {
        let display = &self.config.display;
        chunk_oriented(
            &self.snapshot(),
            display.orientation,
            display.block_size,
            display.row_size,
        )
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        suggest(&self.snapshot(), &self.config.alphabet, &self.config.analysis)
    }

    pub fn cycles(&self) -> Analysis<Vec<CyclePositionStat>> {
        let analysis = &self.config.analysis;
        CyclicAnalyzer::from_config(analysis).assess(&self.snapshot(), analysis.cycle_length)
    }

    pub fn transition(&self) -> Analysis<RowTransition> {
        RowTransitionAnalyzer::from_config(&self.config.analysis).analyze(&self.snapshot())
    }

    pub fn report(&self) -> Report {
        Report::build(&self.snapshot(), &self.config)
    }
}
