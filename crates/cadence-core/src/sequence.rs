use crate::symbol::{Alphabet, Symbol};
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    #[error("Invalid symbol: '{0}' is not part of the alphabet")]
    InvalidSymbol(String),
}

/// Chronological (oldest-first) record of observed symbols.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence(Vec<Symbol>);

impl Sequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Symbol> {
        self.0
    }

    /// Symbols in display order. Newest-first only reverses a copy.
    pub fn oriented(&self, orientation: Orientation) -> Vec<Symbol> {
        match orientation {
            Orientation::OldestFirst => self.0.clone(),
            Orientation::NewestFirst => self.0.iter().rev().copied().collect(),
        }
    }

    pub fn tail_run(&self) -> Option<(Symbol, usize)> {
        tail_run(&self.0)
    }
}

/// Symbol and length of the run of identical symbols ending at the tail.
pub fn tail_run(symbols: &[Symbol]) -> Option<(Symbol, usize)> {
    let last = *symbols.last()?;
    let len = symbols.iter().rev().take_while(|s| **s == last).count();
    Some((last, len))
}

impl Deref for Sequence {
    type Target = [Symbol];

    fn deref(&self) -> &[Symbol] {
        &self.0
    }
}

impl From<Vec<Symbol>> for Sequence {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }
}

impl FromIterator<Symbol> for Sequence {
    fn from_iter<T: IntoIterator<Item = Symbol>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Presentation order for a sequence. Analysis always runs oldest-first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    OldestFirst,
    NewestFirst,
}

/// Owner of a session's history.
///
/// Mutations only happen at the tail. Every analysis works on a
/// [`Sequence`] obtained from [`SequenceStore::snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
    alphabet: Alphabet,
    symbols: Vec<Symbol>,
}

impl SequenceStore {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            symbols: Vec::new(),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn append(&mut self, symbol: Symbol) -> Result<(), SequenceError> {
        if !self.alphabet.contains(symbol) {
            return Err(SequenceError::InvalidSymbol(symbol.to_string()));
        }
        self.symbols.push(symbol);
        Ok(())
    }

    pub fn append_code(&mut self, code: &str) -> Result<Symbol, SequenceError> {
        let symbol = self
            .alphabet
            .parse(code)
            .ok_or_else(|| SequenceError::InvalidSymbol(code.to_string()))?;
        self.symbols.push(symbol);
        Ok(symbol)
    }

    /// Remove the most recent symbol. Does nothing on an empty store.
    pub fn undo(&mut self) -> Option<Symbol> {
        self.symbols.pop()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn snapshot(&self) -> Sequence {
        Sequence(self.symbols.clone())
    }
}
