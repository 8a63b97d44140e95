//! FILENAME: engine/src/options.rs
//! PURPOSE: Construction options for a spreadsheet.
//! CONTEXT: The caller decides which cell names are legal, how names are
//! canonicalized, and which version tag the sheet carries through save/load.

use std::fmt;

/// Version tag used when the caller does not supply one.
pub const DEFAULT_VERSION: &str = "default";

pub type Validator = Box<dyn Fn(&str) -> bool>;
pub type Normalizer = Box<dyn Fn(&str) -> String>;

/// Caller-supplied rules for a spreadsheet.
pub struct SheetOptions {
    /// Applied to normalized names; must return true for legal names.
    pub is_valid: Validator,
    /// Applied to every name before storage and lookup.
    pub normalize: Normalizer,
    /// Opaque tag written on save and checked on load.
    pub version: String,
}

impl SheetOptions {
    pub fn new() -> Self {
        SheetOptions {
            is_valid: Box::new(|_| true),
            normalize: Box::new(|name| name.to_string()),
            version: DEFAULT_VERSION.to_string(),
        }
    }

    pub fn with_validator(mut self, is_valid: impl Fn(&str) -> bool + 'static) -> Self {
        self.is_valid = Box::new(is_valid);
        self
    }

    pub fn with_normalizer(mut self, normalize: impl Fn(&str) -> String + 'static) -> Self {
        self.normalize = Box::new(normalize);
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SheetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetOptions")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}
