//! Pattern detection and next-symbol suggestion over a growing outcome
//! sequence.

pub mod analysis;
pub mod blocks;
pub mod config;
pub mod cyclic;
pub mod repeat;
pub mod report;
pub mod sequence;
pub mod stats;
pub mod structure;
pub mod suggest;
pub mod symbol;
pub mod transition;
pub mod window;

pub use analysis::Analysis;
pub use blocks::{Block, chunk, chunk_oriented};
pub use config::{AnalysisConfig, CadenceConfig, DisplayConfig};
pub use cyclic::{CyclePositionStat, CyclicAnalyzer};
pub use repeat::{MatchMode, SearchScope, find_repeat};
pub use report::Report;
pub use sequence::{Orientation, Sequence, SequenceError, SequenceStore};
pub use structure::{StructureCode, encode};
pub use suggest::{SourceKind, Suggestion, SuggestionAggregator, suggest};
pub use symbol::{Alphabet, Symbol};
pub use transition::{RowTransition, RowTransitionAnalyzer};
pub use window::{Occurrence, PatternIndex, WindowIndex};
