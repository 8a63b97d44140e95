//! FILENAME: engine/src/cell.rs
//! PURPOSE: Defines the fundamental data structures for a single spreadsheet cell.
//! CONTEXT: This file contains the `Cell` struct with its `CellContents` and
//! `CellValue` enums. It separates what the user entered (contents) from the
//! computed result (value).

use formula::{Formula, FormulaError};

/// What the user put in a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContents {
    Text(String),
    Number(f64),
    Formula(Formula),
}

impl CellContents {
    /// The contents of a cell nobody has filled in.
    pub const fn empty() -> Self {
        CellContents::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellContents::Text(s) if s.is_empty())
    }

    /// The text form used when saving: the literal for text and numbers,
    /// "=" followed by the canonical formula for formulas.
    pub fn string_form(&self) -> String {
        match self {
            CellContents::Text(s) => s.clone(),
            CellContents::Number(n) => n.to_string(),
            CellContents::Formula(f) => format!("={}", f),
        }
    }

    /// The formula's variables, or nothing for literal contents.
    pub fn references(&self) -> Vec<String> {
        match self {
            CellContents::Formula(f) => f.variables(),
            CellContents::Text(_) | CellContents::Number(_) => Vec::new(),
        }
    }
}

impl Default for CellContents {
    fn default() -> Self {
        Self::empty()
    }
}

/// The computed result of a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Error(FormulaError),
}

impl CellValue {
    pub const fn empty() -> Self {
        CellValue::Text(String::new())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) | CellValue::Error(_) => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CellValue::Error(_))
    }

    /// Returns the display value of the cell as a String.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Error(e) => format!("#ERROR: {}", e.reason()),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::empty()
    }
}

/// The atomic unit of the spreadsheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub contents: CellContents,
    pub value: CellValue,
}

impl Cell {
    /// A cell whose value follows directly from literal contents. Formula
    /// cells start with an empty value until the spreadsheet evaluates them.
    pub fn new(contents: CellContents) -> Self {
        let value = match &contents {
            CellContents::Text(s) => CellValue::Text(s.clone()),
            CellContents::Number(n) => CellValue::Number(*n),
            CellContents::Formula(_) => CellValue::empty(),
        };
        Cell { contents, value }
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_contents() {
        assert!(CellContents::empty().is_empty());
        assert!(Cell::default().is_empty());
        assert!(!CellContents::Text(" ".to_string()).is_empty());
        assert!(!CellContents::Number(0.0).is_empty());
    }

    #[test]
    fn test_string_form() {
        assert_eq!(CellContents::Text("hello".to_string()).string_form(), "hello");
        assert_eq!(CellContents::Number(5.0).string_form(), "5");
        assert_eq!(CellContents::Number(2.5).string_form(), "2.5");

        let f = Formula::new("1 + A1").unwrap();
        assert_eq!(CellContents::Formula(f).string_form(), "=1+A1");
    }

    #[test]
    fn test_literal_cells_have_literal_values() {
        assert_eq!(Cell::new(CellContents::Number(3.0)).value, CellValue::Number(3.0));
        assert_eq!(
            Cell::new(CellContents::Text("x".to_string())).value,
            CellValue::Text("x".to_string())
        );
    }

    #[test]
    fn test_references() {
        let f = Formula::new("A1 * B2 + A1").unwrap();
        assert_eq!(CellContents::Formula(f).references(), vec!["A1", "B2"]);
        assert!(CellContents::Number(1.0).references().is_empty());
    }

    #[test]
    fn test_as_number() {
        assert_eq!(CellValue::Number(2.5).as_number(), Some(2.5));
        assert_eq!(CellValue::empty().as_number(), None);
        assert_eq!(CellValue::Error(FormulaError::DivisionByZero).as_number(), None);
    }

    #[test]
    fn test_display_value() {
        assert_eq!(CellValue::Number(9.0).display_value(), "9");
        assert!(CellValue::Error(FormulaError::DivisionByZero)
            .display_value()
            .starts_with("#ERROR"));
    }
}
