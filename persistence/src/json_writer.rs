//! FILENAME: persistence/src/json_writer.rs

use crate::{PersistenceError, SavedSheet};
use engine::Spreadsheet;
use std::fs;
use std::path::Path;

/// Serializes every non-empty cell of `sheet` together with its version.
pub fn to_json(sheet: &Spreadsheet) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(&SavedSheet::from_sheet(sheet))?)
}

/// Writes `sheet` to `path` and marks it as saved.
///
/// If the write fails the sheet keeps its contents and its `changed` flag.
pub fn save_sheet(sheet: &mut Spreadsheet, path: &Path) -> Result<(), PersistenceError> {
    let json = to_json(sheet)?;

    if let Err(e) = fs::write(path, json) {
        log::warn!("failed to save spreadsheet to {}: {}", path.display(), e);
        return Err(e.into());
    }

    sheet.mark_saved();
    log::info!(
        "saved {} cell(s) to {}",
        sheet.names_of_nonempty_cells().len(),
        path.display()
    );
    Ok(())
}
