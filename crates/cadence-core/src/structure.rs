//! Structure codes: a window relabeled by first occurrence.
//!
//! `C V C` and `V E V` both encode to `ABA`. Only the repetition shape
//! survives, never the concrete symbols.

use crate::symbol::Symbol;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StructureCode(Vec<u32>);

impl StructureCode {
    /// One label per window position.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn labels(&self) -> &[u32] {
        &self.0
    }

    pub fn distinct(&self) -> usize {
        self.0.iter().max().map_or(0, |m| *m as usize + 1)
    }
}

/// Bijective base-26 label: 0 -> A, 25 -> Z, 26 -> AA.
pub fn label_name(label: u32) -> String {
    let mut n = label as u64 + 1;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

impl fmt::Display for StructureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.0.iter().map(|l| label_name(*l)).collect();
        if self.0.iter().all(|l| *l < 26) {
            write!(f, "{}", names.concat())
        } else {
            write!(f, "{}", names.join("-"))
        }
    }
}

impl Serialize for StructureCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn encode(window: &[Symbol]) -> StructureCode {
    let mut seen: HashMap<Symbol, u32> = HashMap::new();
    let labels = window
        .iter()
        .map(|symbol| {
            let next = seen.len() as u32;
            *seen.entry(*symbol).or_insert(next)
        })
        .collect();
    StructureCode(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syms(ids: &[u16]) -> Vec<Symbol> {
        ids.iter().map(|i| Symbol(*i)).collect()
    }

    #[test]
    fn test_relabeling() {
        assert_eq!(encode(&syms(&[0, 1, 0])).to_string(), "ABA");
        assert_eq!(encode(&syms(&[1, 2, 1])), encode(&syms(&[0, 1, 0])));
        assert_eq!(encode(&syms(&[2, 2, 1, 0])).to_string(), "AABC");
    }

    #[test]
    fn test_empty_window() {
        let code = encode(&[]);
        assert!(code.is_empty());
        assert_eq!(code.to_string(), "");
    }

    #[test]
    fn test_label_names_extend_past_z() {
        assert_eq!(label_name(0), "A");
        assert_eq!(label_name(25), "Z");
        assert_eq!(label_name(26), "AA");
        assert_eq!(label_name(27), "AB");
        assert_eq!(label_name(26 + 26 * 26), "AAA");
    }

    #[test]
    fn test_large_alphabet_code() {
        let window: Vec<Symbol> = (0..28).map(Symbol).collect();
        let code = encode(&window);
        assert_eq!(code.len(), 28);
        assert_eq!(code.distinct(), 28);
        assert!(code.to_string().ends_with("Z-AA-AB"));
    }
}
