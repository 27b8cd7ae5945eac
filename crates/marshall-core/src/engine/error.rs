use super::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum EngineError {
    #[error("Specimen table is empty; at least one specimen is required")]
    EmptySpecimenTable,

    #[error("Specimen count {requested} is outside the allowed range {min}..={max}")]
    RowCountOutOfRange {
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("Specimen index {index} is out of range for a table of {len} row(s)")]
    SpecimenIndexOutOfRange { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
