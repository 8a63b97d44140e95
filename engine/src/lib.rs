//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the spreadsheet engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod cell;
pub mod dependency_graph;
pub mod error;
pub mod options;
pub mod recalc;
pub mod spreadsheet;

// Re-export commonly used types at the crate root
pub use cell::{Cell, CellContents, CellValue};
pub use dependency_graph::DependencyGraph;
pub use error::{SheetResult, SpreadsheetError};
pub use options::{Normalizer, SheetOptions, Validator, DEFAULT_VERSION};
pub use recalc::{recalc_order, CycleError};
pub use spreadsheet::Spreadsheet;

pub use formula::{Formula, FormulaError, FormulaFormatError};
