pub mod schema;

pub use schema::{AnalysisConfig, CadenceConfig, DisplayConfig, ValidationError};
