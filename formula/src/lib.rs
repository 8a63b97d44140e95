//! FILENAME: formula/src/lib.rs
//! PURPOSE: Library root for the formula language.
//! CONTEXT: This crate turns formula text into validated `Formula` values
//! and evaluates them against a caller-supplied variable lookup. It knows
//! nothing about cells; the engine crate supplies names and values.
//!
//! PIPELINE: Formula String --> Lexer --> Tokens --> Validator --> Formula --> Evaluator
//!
//! SUPPORTED FEATURES:
//! - Arithmetic: +, -, *, / with the usual precedence
//! - Parentheses for grouping
//! - Floating-point literals, including exponents: 2.5, .5, 1e-3
//! - Variables: letter or underscore, then letters, digits, underscores
//! - Caller-supplied normalization and validity rules for variables

pub mod evaluator;
pub mod formula;
pub mod lexer;
pub mod parser;
pub mod token;


// Re-export commonly used types for convenience
pub use evaluator::{EvalResult, FormulaError};
pub use formula::Formula;
pub use lexer::{is_variable_name, tokenize, Lexer};
pub use parser::{validate, FormatResult, FormulaFormatError};
pub use token::Token;
