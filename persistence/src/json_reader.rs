//! FILENAME: persistence/src/json_reader.rs

use crate::{PersistenceError, SavedSheet};
use engine::{SheetOptions, Spreadsheet};
use std::fs;
use std::path::Path;

/// Rebuilds a spreadsheet from its JSON form.
///
/// The saved version must equal `options.version`. Each saved cell is replayed
/// through `set_contents_of_cell`, so formulas are re-parsed under the given
/// rules. Any failure discards the partially built sheet.
pub fn from_json(json: &str, options: SheetOptions) -> Result<Spreadsheet, PersistenceError> {
    let saved: SavedSheet = serde_json::from_str(json)?;

    if saved.version != options.version {
        return Err(PersistenceError::VersionMismatch {
            expected: options.version,
            found: saved.version,
        });
    }
    let cells = saved.cells.ok_or(PersistenceError::MissingCells)?;

    let mut sheet = Spreadsheet::with_options(options);
    for (name, cell) in cells {
        sheet
            .set_contents_of_cell(&name, &cell.string_form)
            .map_err(|source| PersistenceError::Sheet { name, source })?;
    }

    sheet.mark_saved();
    Ok(sheet)
}

/// Reads the spreadsheet stored at `path`.
pub fn load_sheet(path: &Path, options: SheetOptions) -> Result<Spreadsheet, PersistenceError> {
    let result = fs::read_to_string(path)
        .map_err(PersistenceError::from)
        .and_then(|json| from_json(&json, options));

    match &result {
        Ok(sheet) => log::info!(
            "loaded {} cell(s) from {}",
            sheet.names_of_nonempty_cells().len(),
            path.display()
        ),
        Err(e) => log::warn!("failed to load spreadsheet from {}: {}", path.display(), e),
    }
    result
}
