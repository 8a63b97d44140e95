//! FILENAME: formula/src/lexer.rs
//! PURPOSE: Scans a raw formula string and produces a stream of Tokens.
//! CONTEXT: This is the first stage of the formula pipeline. It handles
//! whitespace skipping, number parsing (including exponents), variable names
//! and the single-character operators. Anything it does not recognize is
//! returned as an `Illegal` fragment so the validator can report it.
//!
//! LEXICAL GRAMMAR:
//! - Operators: + - * /
//! - Parentheses: ( )
//! - Variable: [A-Za-z_][A-Za-z_0-9]*
//! - Number: (\d+\.\d* | \d*\.\d+ | \d+) ([eE][+-]?\d+)?

use crate::token::Token;
use std::iter::Peekable;
use std::str::Chars;

pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input: input.chars().peekable(),
        }
    }

    /// Advances the lexer and returns the next token, or None at end of input.
    pub fn next_token(&mut self) -> Option<Token> {
        self.skip_whitespace();

        let ch = *self.input.peek()?;
        let token = match ch {
            '+' | '-' | '*' | '/' | '(' | ')' => {
                self.input.next();
                match ch {
                    '+' => Token::Plus,
                    '-' => Token::Minus,
                    '*' => Token::Asterisk,
                    '/' => Token::Slash,
                    '(' => Token::LParen,
                    _ => Token::RParen,
                }
            }
            c if is_name_start(c) => self.read_variable(),
            _ if self.at_number_start() => self.read_number(),
            _ => self.read_illegal(),
        };
        Some(token)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&ch) = self.input.peek() {
            if !ch.is_whitespace() {
                break;
            }
            self.input.next();
        }
    }

    /// A number starts with a digit, or with '.' immediately followed by a digit.
    fn at_number_start(&self) -> bool {
        let mut ahead = self.input.clone();
        match ahead.next() {
            Some(ch) if ch.is_ascii_digit() => true,
            Some('.') => matches!(ahead.next(), Some(ch) if ch.is_ascii_digit()),
            _ => false,
        }
    }

    fn at_token_start(&mut self) -> bool {
        match self.input.peek() {
            Some(&ch) => {
                matches!(ch, '+' | '-' | '*' | '/' | '(' | ')')
                    || is_name_start(ch)
                    || ch.is_whitespace()
                    || self.at_number_start()
            }
            None => true,
        }
    }

    fn read_number(&mut self) -> Token {
        let mut number_str = String::new();
        let mut has_dot = false;

        while let Some(&ch) = self.input.peek() {
            if ch.is_ascii_digit() {
                number_str.push(ch);
                self.input.next();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                number_str.push(ch);
                self.input.next();
            } else {
                break;
            }
        }

        if let Some(exponent) = self.read_exponent() {
            number_str.push_str(&exponent);
        }

        // Overflowing literals have no finite value to print back.
        match number_str.parse::<f64>() {
            Ok(n) if n.is_finite() => Token::Number(n),
            _ => Token::Illegal(number_str),
        }
    }

    /// Consumes `e[+-]?digits` only when at least one digit follows; otherwise
    /// leaves the input alone so the 'e' lexes as the start of a variable.
    fn read_exponent(&mut self) -> Option<String> {
        let mut ahead = self.input.clone();
        let marker = ahead.next().filter(|c| *c == 'e' || *c == 'E')?;

        let mut exponent = String::from(marker);
        if let Some(&sign) = ahead.peek() {
            if sign == '+' || sign == '-' {
                exponent.push(sign);
                ahead.next();
            }
        }

        let mut has_digit = false;
        while let Some(&ch) = ahead.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            exponent.push(ch);
            ahead.next();
            has_digit = true;
        }

        if !has_digit {
            return None;
        }
        self.input = ahead;
        Some(exponent)
    }

    fn read_variable(&mut self) -> Token {
        let mut ident = String::new();
        while let Some(&ch) = self.input.peek() {
            if is_name_char(ch) {
                ident.push(ch);
                self.input.next();
            } else {
                break;
            }
        }
        Token::Variable(ident)
    }

    fn read_illegal(&mut self) -> Token {
        let mut fragment = String::new();
        if let Some(ch) = self.input.next() {
            fragment.push(ch);
        }
        while !self.at_token_start() {
            match self.input.next() {
                Some(ch) => fragment.push(ch),
                None => break,
            }
        }
        Token::Illegal(fragment)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}

/// Tokenizes the whole input.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).collect()
}

/// Returns true if `name` is a syntactically legal variable (and cell) name:
/// a letter or underscore followed by letters, digits or underscores.
pub fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
