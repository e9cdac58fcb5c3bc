//! Equation parsing and solving.
//!
//! A run of board characters is a winning equation for a variable when it
//! has exactly one `=`, mentions the variable but not the opponent's, parses
//! on both sides as integer arithmetic over `+ - * /`, and has an integer
//! solution.
//!
//! ```text
//! expr   := term (('+' | '-') term)*
//! term   := factor (('*' | '/') factor)*
//! factor := ('+' | '-') factor | number | variable
//! ```
//!
//! Both sides are reduced to an exact normal form (see [`crate::poly`]) so
//! comparing sides and solving need no floating tolerance.

use num::{BigInt, Zero};
use thiserror::Error;
use tracing::trace;

use crate::normalize::normalize;
use crate::poly::Laurent;
use crate::MIN_EQ_LEN;

/// Why a run is not a winning equation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("too short to be an equation")]
    TooShort,

    #[error("expected exactly one '=', found {0}")]
    EqualsCount(usize),

    #[error("variable '{0}' does not appear")]
    MissingVariable(char),

    #[error("opponent variable '{0}' appears")]
    OpponentVariable(char),

    /// After normalization no `+ - * /` is left, e.g. `x=123`.
    #[error("no arithmetic operator")]
    NoOperator,

    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Both sides are the same number, e.g. `5=5`.
    #[error("both sides are the same number")]
    Trivial,

    /// Both sides are the same expression in the variable, e.g. `x=x`.
    #[error("both sides are the same expression")]
    Identity,

    #[error("the variable cancels out")]
    VariableVanishes,

    #[error("every value is a solution")]
    Infinite,

    #[error("no integer solution")]
    NoIntegerSolution,
}

/// Malformed side of an equation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected {0}")]
    Unexpected(String),

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("division by zero")]
    DivisionByZero,

    #[error("divisor is not a single term")]
    UnsupportedDivisor,
}

/// Check a raw run of characters as a winning equation for `variable`.
///
/// Returns the integer solution, or `None` when the run is not a winning
/// equation. Never fails otherwise.
///
/// ```
/// use eqline_core::validate;
/// use num::BigInt;
///
/// assert_eq!(validate("x+1=3", 'x', 'y'), Some(BigInt::from(2)));
/// assert_eq!(validate("x=x", 'x', 'y'), None);
/// ```
pub fn validate(raw: &str, variable: char, opponent: char) -> Option<BigInt> {
    match solve_equation(raw, variable, opponent) {
        Ok(solution) => Some(solution),
        Err(reason) => {
            trace!(raw, %reason, "not a winning equation");
            None
        }
    }
}

/// Like [`validate`], but reports why a run was rejected.
pub fn solve_equation(raw: &str, variable: char, opponent: char) -> Result<BigInt, Rejection> {
    if raw.chars().count() < MIN_EQ_LEN {
        return Err(Rejection::TooShort);
    }
    let equals = raw.matches('=').count();
    if equals != 1 {
        return Err(Rejection::EqualsCount(equals));
    }
    if !raw.contains(variable) {
        return Err(Rejection::MissingVariable(variable));
    }
    if opponent != variable && raw.contains(opponent) {
        return Err(Rejection::OpponentVariable(opponent));
    }

    let processed = normalize(raw, variable);
    if !processed.contains(&['+', '-', '*', '/'][..]) {
        return Err(Rejection::NoOperator);
    }
    let (lhs_text, rhs_text) = processed
        .split_once('=')
        .ok_or(Rejection::EqualsCount(0))?;
    let lhs = parse_side(lhs_text, variable)?.reduce()?;
    let rhs = parse_side(rhs_text, variable)?.reduce()?;

    if lhs == rhs {
        return Err(if lhs.has_variable() {
            Rejection::Identity
        } else {
            Rejection::Trivial
        });
    }
    if !lhs.has_variable() && !rhs.has_variable() {
        return Err(Rejection::VariableVanishes);
    }

    // Zero is outside the domain when either side divides by the variable.
    let zero_excluded = lhs.has_negative_power() || rhs.has_negative_power();
    let roots = (lhs - rhs).integer_roots().ok_or(Rejection::Infinite)?;
    roots
        .into_iter()
        .find(|r| !(zero_excluded && r.is_zero()))
        .ok_or(Rejection::NoIntegerSolution)
}

#[derive(Clone, PartialEq, Eq, Debug)]
enum Token {
    Num(BigInt),
    Var,
    Op(char),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Num(n) => write!(f, "number {}", n),
            Token::Var => write!(f, "variable"),
            Token::Op(op) => write!(f, "'{}'", op),
        }
    }
}

fn tokenize(text: &str, variable: char) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        if ch.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }
            let digits: String = chars[start..i].iter().collect();
            // `0` alone is a number; `05` or `00` is not
            if digits.len() > 1 && digits.starts_with('0') {
                return Err(ParseError::Unexpected(format!("number {digits}")));
            }
            let value = digits
                .parse::<BigInt>()
                .map_err(|_| ParseError::Unexpected(digits.clone()))?;
            tokens.push(Token::Num(value));
            continue;
        }
        match ch {
            '+' | '-' | '*' | '/' => tokens.push(Token::Op(ch)),
            _ if ch == variable => tokens.push(Token::Var),
            _ => return Err(ParseError::Unexpected(format!("'{}'", ch))),
        }
        i += 1;
    }
    Ok(tokens)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, PartialEq, Eq, Debug)]
enum Expr {
    Num(BigInt),
    Var,
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn reduce(&self) -> Result<Laurent, ParseError> {
        Ok(match self {
            Expr::Num(n) => Laurent::integer(n.clone()),
            Expr::Var => Laurent::variable(),
            Expr::Neg(inner) => -inner.reduce()?,
            Expr::Binary(op, lhs, rhs) => {
                let (a, b) = (lhs.reduce()?, rhs.reduce()?);
                match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => {
                        if b.is_zero() {
                            return Err(ParseError::DivisionByZero);
                        }
                        a.checked_div(&b).ok_or(ParseError::UnsupportedDivisor)?
                    }
                }
            }
        })
    }
}

/// An empty side reads as `0`.
fn parse_side(text: &str, variable: char) -> Result<Expr, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Expr::Num(BigInt::zero()));
    }
    let tokens = tokenize(text, variable)?;
    let mut parser = Parser { tokens: &tokens, pos: 0 };
    let expr = parser.expr()?;
    match parser.peek() {
        None => Ok(expr),
        Some(tok) => Err(ParseError::Unexpected(tok.to_string())),
    }
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<&'t Token> {
        let tok = self.tokens.get(self.pos);
        self.pos += 1;
        tok
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            let op = if *op == '+' { BinOp::Add } else { BinOp::Sub };
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.factor()?;
        while let Some(Token::Op(op @ ('*' | '/'))) = self.peek() {
            self.pos += 1;
            let rhs = self.factor()?;
            let op = if *op == '*' { BinOp::Mul } else { BinOp::Div };
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        match self.bump() {
            Some(Token::Op('+')) => self.factor(),
            Some(Token::Op('-')) => Ok(Expr::Neg(Box::new(self.factor()?))),
            Some(Token::Num(n)) => Ok(Expr::Num(n.clone())),
            Some(Token::Var) => match self.peek() {
                // `xx` is not a product; normalization never joins two variables.
                Some(Token::Var) => Err(ParseError::Unexpected(Token::Var.to_string())),
                _ => Ok(Expr::Var),
            },
            Some(tok) => Err(ParseError::Unexpected(tok.to_string())),
            None => Err(ParseError::UnexpectedEnd),
        }
    }
}
