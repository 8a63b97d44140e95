//! FILENAME: engine/src/error.rs

use crate::recalc::CycleError;
use formula::FormulaFormatError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpreadsheetError {
    #[error("Invalid cell name: '{0}'")]
    InvalidName(String),

    #[error(transparent)]
    Format(#[from] FormulaFormatError),

    #[error(transparent)]
    Circular(#[from] CycleError),
}

pub type SheetResult<T> = Result<T, SpreadsheetError>;
