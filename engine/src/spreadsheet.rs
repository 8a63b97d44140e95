//! FILENAME: engine/src/spreadsheet.rs
//! PURPOSE: The spreadsheet: a sparse table of named cells kept consistent
//! with their formulas.
//! CONTEXT: This module owns the cell table and the dependency graph. Every
//! content change goes through `set_contents_of_cell`, which
//!   1. normalizes and validates the cell name,
//!   2. classifies the content as number, formula ("=...") or text,
//!   3. installs the new contents and the cell's dependee edges,
//!   4. computes the recalculation order, rolling everything back on a cycle,
//!   5. re-evaluates each formula cell in that order.
//! Queries never observe a half-applied change.

use crate::cell::{Cell, CellContents, CellValue};
use crate::dependency_graph::DependencyGraph;
use crate::error::{SheetResult, SpreadsheetError};
use crate::options::SheetOptions;
use crate::recalc;
use formula::{is_variable_name, Formula};
use std::collections::HashMap;

static EMPTY_CONTENTS: CellContents = CellContents::empty();
static EMPTY_VALUE: CellValue = CellValue::empty();

#[derive(Debug, Default)]
pub struct Spreadsheet {
    /// Sparse storage keyed by normalized name. Only assigned cells exist.
    cells: HashMap<String, Cell>,
    graph: DependencyGraph,
    options: SheetOptions,
    /// Set by every committed change, cleared by save/load.
    changed: bool,
}

impl Spreadsheet {
    /// An empty sheet: every name valid, identity normalization, version "default".
    pub fn new() -> Self {
        Self::with_options(SheetOptions::default())
    }

    pub fn with_options(options: SheetOptions) -> Self {
        Spreadsheet {
            cells: HashMap::new(),
            graph: DependencyGraph::new(),
            options,
            changed: false,
        }
    }

    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    pub fn version(&self) -> &str {
        &self.options.version
    }

    /// True if the sheet was modified since it was created, saved or loaded.
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Records that the current state has been persisted.
    pub fn mark_saved(&mut self) {
        self.changed = false;
    }

    /// The contents of `name`; unassigned cells are empty text.
    pub fn cell_contents(&self, name: &str) -> SheetResult<&CellContents> {
        let name = self.normalize_name(name)?;
        Ok(self
            .cells
            .get(&name)
            .map_or(&EMPTY_CONTENTS, |cell| &cell.contents))
    }

    /// The value of `name`: text, a number, or the error its formula produced.
    pub fn cell_value(&self, name: &str) -> SheetResult<&CellValue> {
        let name = self.normalize_name(name)?;
        Ok(self.cells.get(&name).map_or(&EMPTY_VALUE, |cell| &cell.value))
    }

    /// Names of all cells with non-empty contents, sorted.
    pub fn names_of_nonempty_cells(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .cells
            .iter()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort_unstable();
        names
    }

    /// Cells whose formulas reference `name` directly, sorted.
    pub fn direct_dependents(&self, name: &str) -> SheetResult<Vec<String>> {
        let name = self.normalize_name(name)?;
        let mut dependents: Vec<String> =
            self.graph.dependents(&name).map(str::to_string).collect();
        dependents.sort_unstable();
        Ok(dependents)
    }

    /// Sets the contents of `name` and recomputes everything that depends on it.
    ///
    /// `content` is a number if it parses as a finite float, a formula if it
    /// starts with "=", and text otherwise ("" empties the cell).
    ///
    /// # Returns
    /// `name` followed by every cell that transitively depends on it, each
    /// after all of its inputs.
    ///
    /// # Errors
    /// - `InvalidName` if `name` is not a legal cell name.
    /// - `Format` if the formula does not parse.
    /// - `Circular` if the formula would close a cycle; the sheet is left
    ///   exactly as it was.
    pub fn set_contents_of_cell(&mut self, name: &str, content: &str) -> SheetResult<Vec<String>> {
        let name = self.normalize_name(name)?;
        let contents = self.parse_contents(content)?;
        let references = contents.references();

        let previous_cell = self.cells.get(&name).cloned();
        let previous_dependees: Vec<String> =
            self.graph.dependees(&name).map(str::to_string).collect();

        self.cells.insert(name.clone(), Cell::new(contents));
        self.graph.replace_dependees(&name, references);

        let order = match recalc::recalc_order(&self.graph, &name) {
            Ok(order) => order,
            Err(cycle) => {
                match previous_cell {
                    Some(cell) => self.cells.insert(name.clone(), cell),
                    None => self.cells.remove(&name),
                };
                self.graph.replace_dependees(&name, previous_dependees);
                log::warn!("rejected change to {}: {}", name, cycle);
                return Err(cycle.into());
            }
        };

        self.recompute(&order);
        self.changed = true;
        log::debug!("set {}; {} cell(s) recomputed", name, order.len());

        Ok(order)
    }

    /// Normalizes `name` and checks it against the name rule and the
    /// caller's validator.
    fn normalize_name(&self, name: &str) -> SheetResult<String> {
        let normalized = (self.options.normalize)(name);
        if is_variable_name(&normalized) && (self.options.is_valid)(&normalized) {
            Ok(normalized)
        } else {
            Err(SpreadsheetError::InvalidName(name.to_string()))
        }
    }

    fn parse_contents(&self, content: &str) -> SheetResult<CellContents> {
        if let Ok(n) = content.trim().parse::<f64>() {
            if n.is_finite() {
                return Ok(CellContents::Number(n));
            }
        }

        if let Some(expression) = content.strip_prefix('=') {
            let formula = Formula::with_rules(
                expression,
                |v| (self.options.normalize)(v),
                |v| (self.options.is_valid)(v),
            )?;
            return Ok(CellContents::Formula(formula));
        }

        Ok(CellContents::Text(content.to_string()))
    }

    /// Re-evaluates the formula cells in `order`; literal cells already hold
    /// their value.
    fn recompute(&mut self, order: &[String]) {
        for name in order {
            let value = match self.cells.get(name).map(|cell| &cell.contents) {
                Some(CellContents::Formula(f)) => match f.evaluate(|v| self.lookup(v)) {
                    Ok(n) => CellValue::Number(n),
                    Err(e) => CellValue::Error(e),
                },
                _ => continue,
            };
            log::trace!("recomputed {} = {:?}", name, value);
            if let Some(cell) = self.cells.get_mut(name) {
                cell.value = value;
            }
        }
    }

    /// Reads the current value of another cell for formula evaluation.
    fn lookup(&self, name: &str) -> Result<f64, String> {
        let value = self.cells.get(name).map_or(&EMPTY_VALUE, |cell| &cell.value);
        if let Some(n) = value.as_number() {
            return Ok(n);
        }
        match value {
            CellValue::Error(e) => Err(format!("{} holds an error ({})", name, e)),
            CellValue::Text(s) if !s.is_empty() => Err(format!("{} holds text, not a number", name)),
            _ => Err(format!("{} is empty", name)),
        }
    }
}
