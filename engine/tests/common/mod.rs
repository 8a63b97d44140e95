//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for spreadsheet engine integration tests.

#![allow(dead_code)]

use engine::{CellContents, CellValue, SheetOptions, Spreadsheet};

/// Test harness wrapping a spreadsheet with assertion helpers.
pub struct TestHarness {
    pub sheet: Spreadsheet,
}

impl TestHarness {
    /// Create a new test harness with an empty, permissive sheet.
    pub fn new() -> Self {
        TestHarness {
            sheet: Spreadsheet::new(),
        }
    }

    /// Create a harness whose names are upper-cased and must look like
    /// one letter followed by digits.
    pub fn with_a1_names() -> Self {
        TestHarness {
            sheet: Spreadsheet::with_options(a1_options()),
        }
    }

    /// Create a harness with formula test data:
    /// A1 = 3, B1 = A1 * 2, C1 = B1 + A1.
    pub fn with_formula_data() -> Self {
        let mut harness = Self::new();
        harness.set("A1", "3");
        harness.set("B1", "=A1 * 2");
        harness.set("C1", "=B1 + A1");
        harness
    }

    /// Set a cell, failing the test if the sheet rejects it.
    pub fn set(&mut self, name: &str, content: &str) -> Vec<String> {
        match self.sheet.set_contents_of_cell(name, content) {
            Ok(order) => order,
            Err(e) => panic!("setting {} to {:?} failed: {}", name, content, e),
        }
    }

    pub fn contents(&self, name: &str) -> CellContents {
        self.sheet.cell_contents(name).unwrap().clone()
    }

    pub fn value(&self, name: &str) -> CellValue {
        self.sheet.cell_value(name).unwrap().clone()
    }

    /// The numeric value of a cell, failing the test if it is not a number.
    pub fn number(&self, name: &str) -> f64 {
        match self.value(name) {
            CellValue::Number(n) => n,
            other => panic!("expected {} to be a number, got {:?}", name, other),
        }
    }

    pub fn assert_number(&self, name: &str, expected: f64) {
        let actual = self.number(name);
        assert!(
            (actual - expected).abs() < 1e-9,
            "{}: expected {}, got {}",
            name,
            expected,
            actual
        );
    }

    pub fn assert_error(&self, name: &str) {
        assert!(
            self.value(name).is_error(),
            "expected {} to hold an error, got {:?}",
            name,
            self.value(name)
        );
    }
}

pub fn a1_options() -> SheetOptions {
    SheetOptions::new()
        .with_normalizer(|name| name.to_uppercase())
        .with_validator(|name| {
            let mut chars = name.chars();
            matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
                && chars.clone().next().is_some()
                && chars.all(|c| c.is_ascii_digit())
        })
}
