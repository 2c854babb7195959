pub mod loader;

pub use cadence_core::config::schema::{AnalysisConfig, CadenceConfig, DisplayConfig};
pub use loader::{ConfigError, ConfigLoader};
