use crate::repeat::SearchScope;
use crate::sequence::Orientation;
use crate::symbol::Alphabet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CadenceConfig {
    #[serde(default)]
    pub alphabet: Alphabet,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{field} must be within (0, 1], got {value}")]
    Probability { field: &'static str, value: f64 },
    #[error("row_tail + row_lead ({sum}) cannot exceed row_size ({row_size})")]
    RowSplit { sum: usize, row_size: usize },
}

impl CadenceConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.analysis.validate()?;
        self.display.validate()
    }
}

/// Parameters of the analysis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_window_length")]
    pub window_length: usize,
    #[serde(default = "default_min_occurrences")]
    pub min_occurrences: usize,
    #[serde(default = "default_max_edit_distance")]
    pub max_edit_distance: usize,
    #[serde(default)]
    pub scope: SearchScope,
    #[serde(default = "default_cycle_length")]
    pub cycle_length: usize,
    #[serde(default = "default_min_samples")]
    pub min_samples: usize,
    #[serde(default = "default_significance")]
    pub significance: f64,
    #[serde(default = "default_dominance_threshold")]
    pub dominance_threshold: f64,
    #[serde(default = "default_row_size")]
    pub row_size: usize,
    #[serde(default = "default_row_tail")]
    pub row_tail: usize,
    #[serde(default = "default_row_lead")]
    pub row_lead: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_length: default_window_length(),
            min_occurrences: default_min_occurrences(),
            max_edit_distance: default_max_edit_distance(),
            scope: SearchScope::default(),
            cycle_length: default_cycle_length(),
            min_samples: default_min_samples(),
            significance: default_significance(),
            dominance_threshold: default_dominance_threshold(),
            row_size: default_row_size(),
            row_tail: default_row_tail(),
            row_lead: default_row_lead(),
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("window_length", self.window_length),
            ("min_occurrences", self.min_occurrences),
            ("cycle_length", self.cycle_length),
            ("min_samples", self.min_samples),
            ("row_size", self.row_size),
            ("row_tail", self.row_tail),
            ("row_lead", self.row_lead),
        ] {
            if value == 0 {
                return Err(ValidationError::Zero(field));
            }
        }
        for (field, value) in [
            ("significance", self.significance),
            ("dominance_threshold", self.dominance_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ValidationError::Probability { field, value });
            }
        }
        let sum = self.row_tail + self.row_lead;
        if sum > self.row_size {
            return Err(ValidationError::RowSplit {
                sum,
                row_size: self.row_size,
            });
        }
        Ok(())
    }
}

fn default_window_length() -> usize {
    3
}

fn default_min_occurrences() -> usize {
    3
}

fn default_max_edit_distance() -> usize {
    1
}

fn default_cycle_length() -> usize {
    27
}

fn default_min_samples() -> usize {
    5
}

fn default_significance() -> f64 {
    0.05
}

fn default_dominance_threshold() -> f64 {
    0.6
}

fn default_row_size() -> usize {
    9
}

fn default_row_tail() -> usize {
    3
}

fn default_row_lead() -> usize {
    3
}

/// Shaping options for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    #[serde(default = "default_row_size")]
    pub row_size: usize,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            row_size: default_row_size(),
            orientation: Orientation::default(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

impl DisplayConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.block_size == 0 {
            return Err(ValidationError::Zero("block_size"));
        }
        if self.row_size == 0 {
            return Err(ValidationError::Zero("display.row_size"));
        }
        Ok(())
    }
}

fn default_block_size() -> usize {
    27
}

fn default_max_suggestions() -> usize {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = CadenceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.cycle_length, 27);
        assert_eq!(config.display.row_size, 9);
    }

    #[test]
    fn test_rejects_zero_window() {
        let analysis = AnalysisConfig {
            window_length: 0,
            ..Default::default()
        };
        assert_eq!(
            analysis.validate(),
            Err(ValidationError::Zero("window_length"))
        );
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let analysis = AnalysisConfig {
            dominance_threshold: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            analysis.validate(),
            Err(ValidationError::Probability {
                field: "dominance_threshold",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_row_split_wider_than_row() {
        let analysis = AnalysisConfig {
            row_size: 4,
            row_tail: 3,
            row_lead: 3,
            ..Default::default()
        };
        assert!(matches!(
            analysis.validate(),
            Err(ValidationError::RowSplit { sum: 6, row_size: 4 })
        ));
    }
}
