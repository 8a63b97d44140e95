//! FILENAME: persistence/src/error.rs

use engine::SpreadsheetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected '{expected}', found '{found}'")]
    VersionMismatch { expected: String, found: String },

    #[error("Invalid file format: no \"Cells\" entry")]
    MissingCells,

    #[error("Cell {name} could not be loaded: {source}")]
    Sheet {
        name: String,
        #[source]
        source: SpreadsheetError,
    },
}
