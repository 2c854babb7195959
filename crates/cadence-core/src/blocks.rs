use crate::sequence::{Orientation, Sequence};
use crate::symbol::Symbol;
use serde::Serialize;

/// One display block: consecutive rows, the last of which may be partial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Block {
    pub index: usize,
    pub rows: Vec<Vec<Symbol>>,
}

impl Block {
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }
}

/// Reshape symbols into blocks of `block_size`, each split into rows of
/// `row_size`. Panics on zero sizes.
pub fn chunk(symbols: &[Symbol], block_size: usize, row_size: usize) -> Vec<Block> {
    assert!(block_size > 0, "block size must be positive");
    assert!(row_size > 0, "row size must be positive");

    symbols
        .chunks(block_size)
        .enumerate()
        .map(|(index, block)| Block {
            index,
            rows: block.chunks(row_size).map(<[Symbol]>::to_vec).collect(),
        })
        .collect()
}

/// [`chunk`] after applying the presentation orientation.
pub fn chunk_oriented(
    sequence: &Sequence,
    orientation: Orientation,
    block_size: usize,
    row_size: usize,
) -> Vec<Block> {
    chunk(&sequence.oriented(orientation), block_size, row_size)
}
