use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// One outcome of the configured alphabet.
///
/// A symbol is the index of its code in the [`Alphabet`]; the index is the
/// stable identifier presentation layers key their glyphs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub u16);

impl Symbol {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlphabetError {
    #[error("alphabet needs at least 2 symbols, got {0}")]
    TooSmall(usize),
    #[error("alphabet code at position {0} is empty")]
    EmptyCode(usize),
    #[error("alphabet code '{0}' contains whitespace")]
    Whitespace(String),
    #[error("alphabet code '{0}' appears more than once")]
    Duplicate(String),
    #[error("alphabet has {0} codes, more than a symbol index can address")]
    TooLarge(usize),
}

/// Ordered set of symbol codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Alphabet {
    codes: Vec<String>,
}

impl Alphabet {
    pub fn new<I, S>(codes: I) -> Result<Self, AlphabetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        if codes.len() < 2 {
            return Err(AlphabetError::TooSmall(codes.len()));
        }
        if codes.len() > u16::MAX as usize {
            return Err(AlphabetError::TooLarge(codes.len()));
        }
        for (i, code) in codes.iter().enumerate() {
            if code.trim().is_empty() {
                return Err(AlphabetError::EmptyCode(i));
            }
            if code.chars().any(char::is_whitespace) {
                return Err(AlphabetError::Whitespace(code.clone()));
            }
            if codes[..i].contains(code) {
                return Err(AlphabetError::Duplicate(code.clone()));
            }
        }
        Ok(Self { codes })
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        symbol.index() < self.codes.len()
    }

    /// Look up a symbol by its code. Matching is case-sensitive.
    pub fn parse(&self, code: &str) -> Option<Symbol> {
        self.codes
            .iter()
            .position(|c| c == code)
            .map(|i| Symbol(i as u16))
    }

    pub fn code(&self, symbol: Symbol) -> Option<&str> {
        self.codes.get(symbol.index()).map(String::as_str)
    }

    /// Code for display; falls back to the raw index for foreign symbols.
    pub fn label(&self, symbol: Symbol) -> String {
        self.code(symbol)
            .map(str::to_string)
            .unwrap_or_else(|| symbol.to_string())
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        (0..self.codes.len()).map(|i| Symbol(i as u16))
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Render a run of symbols as space-separated codes.
    pub fn render(&self, symbols: &[Symbol]) -> String {
        symbols
            .iter()
            .map(|s| self.label(*s))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for Alphabet {
    /// Home / away / draw.
    fn default() -> Self {
        Self {
            codes: vec!["C".to_string(), "V".to_string(), "E".to_string()],
        }
    }
}

impl TryFrom<Vec<String>> for Alphabet {
    type Error = AlphabetError;

    fn try_from(codes: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(codes)
    }
}

impl From<Alphabet> for Vec<String> {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.codes
    }
}
