//! FILENAME: formula/src/formula.rs
//! PURPOSE: The immutable, validated `Formula` value type.
//! CONTEXT: A Formula is built once from text (tokenize + validate +
//! normalize) and afterwards only read: evaluated, asked for its variables,
//! printed, compared and hashed.

use crate::evaluator::{self, EvalResult};
use crate::parser::{self, FormulaFormatError};
use crate::token::Token;
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A syntactically valid infix arithmetic expression over numbers and variables.
#[derive(Debug, Clone)]
pub struct Formula {
    tokens: Vec<Token>,
}

impl Formula {
    /// Parses `input` with identity normalization, accepting every
    /// syntactically legal variable.
    pub fn new(input: &str) -> Result<Self, FormulaFormatError> {
        Self::with_rules(input, |name| name.to_string(), |_| true)
    }

    /// Parses `input`, normalizing each variable with `normalize` and
    /// requiring `is_valid` to accept the normalized name.
    pub fn with_rules<N, V>(input: &str, normalize: N, is_valid: V) -> Result<Self, FormulaFormatError>
    where
        N: Fn(&str) -> String,
        V: Fn(&str) -> bool,
    {
        let tokens = parser::validate(input, normalize, is_valid)?;
        Ok(Formula { tokens })
    }

    /// Distinct normalized variables, in order of first appearance.
    pub fn variables(&self) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut variables = Vec::new();
        for token in &self.tokens {
            if let Token::Variable(name) = token {
                if seen.insert(name.as_str()) {
                    variables.push(name.clone());
                }
            }
        }
        variables
    }

    /// Evaluates the formula. `lookup` maps a normalized variable name to its
    /// value or to an error that becomes the reason of a `FormulaError::Lookup`.
    pub fn evaluate<F, E>(&self, lookup: F) -> EvalResult
    where
        F: FnMut(&str) -> Result<f64, E>,
        E: Display,
    {
        evaluator::evaluate(&self.tokens, lookup)
    }
}

impl std::fmt::Display for Formula {
    /// Canonical form: tokens concatenated without whitespace.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

impl FromStr for Formula {
    type Err = FormulaFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::new(s)
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        // Token's derived PartialEq compares numbers by value and everything
        // else by exact text.
        self.tokens == other.tokens
    }
}

// Numbers in a validated formula come from digit strings, so they are never NaN.
impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tokens.len().hash(state);
        for token in &self.tokens {
            std::mem::discriminant(token).hash(state);
            match token {
                // 0.0 == -0.0, so both must hash alike.
                Token::Number(n) => {
                    let n = if *n == 0.0 { 0.0 } else { *n };
                    n.to_bits().hash(state);
                }
                Token::Variable(name) | Token::Illegal(name) => name.hash(state),
                _ => {}
            }
        }
    }
}
