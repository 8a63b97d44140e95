//! FILENAME: persistence/src/lib.rs
//! Spreadsheet Persistence Module
//!
//! Handles saving and loading spreadsheets as JSON documents of the form
//! `{"Cells": {"A1": {"StringForm": "=B1*2"}}, "Version": "1.0"}`.

mod error;
mod json_reader;
mod json_writer;

pub use error::PersistenceError;
pub use json_reader::{from_json, load_sheet};
pub use json_writer::{save_sheet, to_json};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// SAVED SHEET
// ============================================================================

/// The on-disk shape of a spreadsheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedSheet {
    /// Non-empty cells keyed by name. Absent only in malformed input.
    #[serde(rename = "Cells", default)]
    pub cells: Option<BTreeMap<String, SavedCell>>,

    #[serde(rename = "Version", default)]
    pub version: String,
}

/// One saved cell: the text that reproduces its contents when set again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCell {
    #[serde(rename = "StringForm")]
    pub string_form: String,
}

impl SavedSheet {
    /// Captures every non-empty cell of `sheet`.
    pub fn from_sheet(sheet: &engine::Spreadsheet) -> Self {
        let cells = sheet
            .names_of_nonempty_cells()
            .into_iter()
            .filter_map(|name| {
                let string_form = sheet.cell_contents(&name).ok()?.string_form();
                Some((name, SavedCell { string_form }))
            })
            .collect();

        SavedSheet {
            cells: Some(cells),
            version: sheet.version().to_string(),
        }
    }
}
