//! FILENAME: formula/src/evaluator.rs
//! PURPOSE: Evaluates a validated token list to a number.
//! CONTEXT: Classic two-stack infix evaluation without a parse tree.
//! "*" and "/" are resolved eagerly against the operand that follows them;
//! "+" and "-" are deferred until the next "+"/"-", a ")" or the end of input.
//! Failures are returned as `FormulaError` values, never panics.

use crate::token::Token;
use std::fmt::Display;
use thiserror::Error;

/// The reason a syntactically valid formula could not produce a number.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("lookup of '{variable}' failed: {reason}")]
    Lookup { variable: String, reason: String },
}

impl FormulaError {
    /// Human-readable reason, suitable for display in a cell.
    pub fn reason(&self) -> String {
        self.to_string()
    }
}

pub type EvalResult = Result<f64, FormulaError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
    Open,
}

impl Op {
    fn is_additive(self) -> bool {
        matches!(self, Op::Add | Op::Subtract)
    }

    fn is_multiplicative(self) -> bool {
        matches!(self, Op::Multiply | Op::Divide)
    }
}

/// Operand and operator stacks for one evaluation.
///
/// The token list was validated when the formula was built, so every pop
/// below is matched by an earlier push; the defaults are never observed.
#[derive(Default)]
struct Stacks {
    operands: Vec<f64>,
    operators: Vec<Op>,
}

impl Stacks {
    fn top_is(&self, pred: fn(Op) -> bool) -> bool {
        self.operators.last().is_some_and(|op| pred(*op))
    }

    fn pop_operand(&mut self) -> f64 {
        self.operands.pop().unwrap_or_default()
    }

    fn pop_operator(&mut self) -> Op {
        self.operators.pop().unwrap_or(Op::Open)
    }

    /// Pops a pending "+"/"-" and applies it to the two topmost operands.
    fn resolve_additive(&mut self) {
        if !self.top_is(Op::is_additive) {
            return;
        }
        let op = self.pop_operator();
        let right = self.pop_operand();
        let left = self.pop_operand();
        self.operands.push(if op == Op::Add { left + right } else { left - right });
    }

    /// Applies a pending "*"/"/" to the top operand and `value`, or pushes
    /// `value` when no multiplicative operator is waiting.
    fn apply_operand(&mut self, value: f64) -> Result<(), FormulaError> {
        if !self.top_is(Op::is_multiplicative) {
            self.operands.push(value);
            return Ok(());
        }
        let op = self.pop_operator();
        let left = self.pop_operand();
        let result = if op == Op::Multiply {
            left * value
        } else if value == 0.0 {
            return Err(FormulaError::DivisionByZero);
        } else {
            left / value
        };
        self.operands.push(result);
        Ok(())
    }
}

/// Evaluates `tokens`, resolving variables through `lookup`.
pub fn evaluate<F, E>(tokens: &[Token], mut lookup: F) -> EvalResult
where
    F: FnMut(&str) -> Result<f64, E>,
    E: Display,
{
    let mut stacks = Stacks::default();

    for token in tokens {
        match token {
            Token::Plus | Token::Minus => {
                stacks.resolve_additive();
                stacks
                    .operators
                    .push(if *token == Token::Plus { Op::Add } else { Op::Subtract });
            }
            Token::Asterisk => stacks.operators.push(Op::Multiply),
            Token::Slash => stacks.operators.push(Op::Divide),
            Token::LParen => stacks.operators.push(Op::Open),
            Token::RParen => {
                stacks.resolve_additive();
                stacks.pop_operator();
                if stacks.top_is(Op::is_multiplicative) {
                    let inner = stacks.pop_operand();
                    stacks.apply_operand(inner)?;
                }
            }
            Token::Number(n) => stacks.apply_operand(*n)?,
            Token::Variable(name) => {
                let value = lookup(name).map_err(|e| FormulaError::Lookup {
                    variable: name.clone(),
                    reason: e.to_string(),
                })?;
                stacks.apply_operand(value)?;
            }
            // Rejected during validation.
            Token::Illegal(_) => {}
        }
    }

    stacks.resolve_additive();
    Ok(stacks.pop_operand())
}
