//! Budget expression evaluation
//!
//! Budget inputs accept free-text arithmetic ("120+45.50*2"), so a small
//! recursive-descent evaluator over `+ - * / ( )` and decimal literals
//! lives here. Callers treat evaluation failure as "keep the previous
//! value"; this module only reports the failure.

use std::fmt;

use crate::models::Money;

/// Error type for expression evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum ExprError {
    UnexpectedChar(char),
    UnexpectedEnd,
    TrailingInput(usize),
    DivisionByZero,
}

impl fmt::Display for ExprError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExprError::UnexpectedChar(c) => write!(f, "Unexpected character: {:?}", c),
            ExprError::UnexpectedEnd => write!(f, "Unexpected end of expression"),
            ExprError::TrailingInput(pos) => write!(f, "Trailing input at position {}", pos),
            ExprError::DivisionByZero => write!(f, "Division by zero"),
        }
    }
}

impl std::error::Error for ExprError {}

/// Evaluate an arithmetic expression to a float
pub fn evaluate(input: &str) -> Result<f64, ExprError> {
    let mut parser = Parser {
        bytes: input.as_bytes(),
        pos: 0,
    };
    let value = parser.expression()?;
    parser.skip_spaces();
    if parser.pos < parser.bytes.len() {
        return Err(ExprError::TrailingInput(parser.pos));
    }
    Ok(value)
}

/// Evaluate an arithmetic expression to whole cents
pub fn evaluate_money(input: &str) -> Result<Money, ExprError> {
    evaluate(input).map(Money::from_f64)
}

struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Parser<'_> {
    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, ExprError> {
        let mut value = self.term()?;
        loop {
            self.skip_spaces();
            if self.eat(b'+') {
                value += self.term()?;
            } else if self.eat(b'-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, ExprError> {
        let mut value = self.factor()?;
        loop {
            self.skip_spaces();
            if self.eat(b'*') {
                value *= self.factor()?;
            } else if self.eat(b'/') {
                let divisor = self.factor()?;
                if divisor == 0.0 {
                    return Err(ExprError::DivisionByZero);
                }
                value /= divisor;
            } else {
                return Ok(value);
            }
        }
    }

    // factor := '-' factor | '(' expression ')' | number
    fn factor(&mut self) -> Result<f64, ExprError> {
        self.skip_spaces();
        if self.eat(b'-') {
            return Ok(-self.factor()?);
        }
        if self.eat(b'(') {
            let value = self.expression()?;
            self.skip_spaces();
            if !self.eat(b')') {
                return match self.peek() {
                    Some(b) => Err(ExprError::UnexpectedChar(b as char)),
                    None => Err(ExprError::UnexpectedEnd),
                };
            }
            return Ok(value);
        }
        self.number()
    }

    fn number(&mut self) -> Result<f64, ExprError> {
        let start = self.pos;
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.eat(b'.') {
            while self.peek().is_some_and(|b| b.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        if self.pos == start {
            return match self.peek() {
                Some(b) => Err(ExprError::UnexpectedChar(b as char)),
                None => Err(ExprError::UnexpectedEnd),
            };
        }
        let text = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| ExprError::TrailingInput(start))?;
        text.parse()
            .map_err(|_| ExprError::TrailingInput(start))
    }
}
