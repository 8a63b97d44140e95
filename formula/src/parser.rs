//! FILENAME: formula/src/parser.rs
//! PURPOSE: Validates a token stream against the formula grammar.
//! CONTEXT: This is the second stage of the formula pipeline. It does not
//! build a tree; it checks that the flat token sequence is a well-formed
//! infix expression and normalizes every variable, so that evaluation can
//! never fail on malformed input.
//!
//! RULES:
//! - At least one token.
//! - Starts with a number, a variable or "(".
//! - Ends with a number, a variable or ")".
//! - After an operator or "(": a number, a variable or "(".
//! - After a number, a variable or ")": an operator or ")".
//! - Parentheses balance, and ")" never outruns "(" while scanning.
//! - A variable is legal only if its normalized form is still a variable
//!   name and is accepted by the caller's validity predicate.

use crate::lexer::{is_variable_name, Lexer};
use crate::token::Token;
use thiserror::Error;

/// Syntax errors raised while constructing a formula.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormulaFormatError {
    #[error("formula is empty")]
    Empty,

    #[error("formula must start with a number, a variable or '(', found '{0}'")]
    InvalidStart(String),

    #[error("formula must end with a number, a variable or ')', found '{0}'")]
    InvalidEnd(String),

    #[error("'{found}' cannot follow '{previous}'; expected a number, a variable or '('")]
    UnexpectedAfterOpening { previous: String, found: String },

    #[error("'{found}' cannot follow '{previous}'; expected an operator or ')'")]
    UnexpectedAfterClosing { previous: String, found: String },

    #[error("more ')' than '(' at token {0}")]
    UnbalancedRightParen(usize),

    #[error("{0} '(' left unclosed")]
    UnbalancedLeftParen(usize),

    #[error("'{0}' is not a valid variable")]
    InvalidVariable(String),

    #[error("unrecognized token '{0}'")]
    UnrecognizedToken(String),
}

pub type FormatResult<T> = Result<T, FormulaFormatError>;

/// Grammatical role of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Operand,
    Operator,
    Open,
    Close,
}

impl Role {
    /// A number, a variable or "(" may come next.
    fn expects_operand(self) -> bool {
        matches!(self, Role::Operator | Role::Open)
    }

    fn can_start(self) -> bool {
        matches!(self, Role::Operand | Role::Open)
    }

    fn can_end(self) -> bool {
        matches!(self, Role::Operand | Role::Close)
    }
}

/// Tokenizes and validates `input`, returning the normalized token list.
pub fn validate<N, V>(input: &str, normalize: N, is_valid: V) -> FormatResult<Vec<Token>>
where
    N: Fn(&str) -> String,
    V: Fn(&str) -> bool,
{
    let raw: Vec<Token> = Lexer::new(input).collect();

    let (Some(first), Some(last)) = (raw.first(), raw.last()) else {
        return Err(FormulaFormatError::Empty);
    };

    let classify = |token: &Token| -> FormatResult<(Role, Token)> {
        match token {
            Token::Number(_) => Ok((Role::Operand, token.clone())),
            Token::Variable(name) => {
                let normalized = normalize(name);
                if is_variable_name(&normalized) && is_valid(&normalized) {
                    Ok((Role::Operand, Token::Variable(normalized)))
                } else {
                    Err(FormulaFormatError::InvalidVariable(name.clone()))
                }
            }
            Token::Plus | Token::Minus | Token::Asterisk | Token::Slash => {
                Ok((Role::Operator, token.clone()))
            }
            Token::LParen => Ok((Role::Open, Token::LParen)),
            Token::RParen => Ok((Role::Close, Token::RParen)),
            Token::Illegal(fragment) => {
                Err(FormulaFormatError::UnrecognizedToken(fragment.clone()))
            }
        }
    };

    match classify(first) {
        Ok((role, _)) if role.can_start() => {}
        Err(e @ FormulaFormatError::InvalidVariable(_)) => return Err(e),
        _ => return Err(FormulaFormatError::InvalidStart(first.to_string())),
    }
    match classify(last) {
        Ok((role, _)) if role.can_end() => {}
        Err(e @ FormulaFormatError::InvalidVariable(_)) => return Err(e),
        _ => return Err(FormulaFormatError::InvalidEnd(last.to_string())),
    }

    let mut tokens = Vec::with_capacity(raw.len());
    let mut previous: Option<(Role, &Token)> = None;
    let mut open = 0usize;

    for token in &raw {
        let (role, normalized) = classify(token)?;

        if let Some((prev_role, prev_token)) = previous {
            if prev_role.expects_operand() {
                if !matches!(role, Role::Operand | Role::Open) {
                    return Err(FormulaFormatError::UnexpectedAfterOpening {
                        previous: prev_token.to_string(),
                        found: token.to_string(),
                    });
                }
            } else if !matches!(role, Role::Operator | Role::Close) {
                return Err(FormulaFormatError::UnexpectedAfterClosing {
                    previous: prev_token.to_string(),
                    found: token.to_string(),
                });
            }
        }

        match role {
            Role::Open => open += 1,
            Role::Close => {
                if open == 0 {
                    return Err(FormulaFormatError::UnbalancedRightParen(tokens.len() + 1));
                }
                open -= 1;
            }
            _ => {}
        }

        tokens.push(normalized);
        previous = Some((role, token));
    }

    if open > 0 {
        return Err(FormulaFormatError::UnbalancedLeftParen(open));
    }

    Ok(tokens)
}
