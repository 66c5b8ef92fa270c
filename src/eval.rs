use crate::error::Error;
use crate::token::{serialize, Op, Token};
use crate::util::round_significant;
use log::trace;
use std::mem;

/// Default number of significant digits kept in results
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 12;

/// Evaluation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Number of significant digits results are rounded to, or `None` to
    /// keep the raw floating point value. Clamped to `1..=17`.
    pub significant_digits: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            significant_digits: Some(DEFAULT_SIGNIFICANT_DIGITS),
        }
    }
}

impl Config {
    /// Set the rounding precision, `None` disables rounding
    #[must_use]
    pub fn with_significant_digits(mut self, digits: Option<usize>) -> Self {
        self.significant_digits = digits;
        self
    }

    fn round(&self, value: f64) -> f64 {
        match self.significant_digits {
            Some(digits) => round_significant(value, digits),
            None if value == 0.0 => 0.0,
            None => value,
        }
    }
}

/// Evaluate a token sequence with the default [`Config`].
///
/// Brackets are expected to be balanced; see [`Evaluator::evaluate`].
///
/// # Example
///
/// ```
/// # use reckoner::{evaluate, tokenize, Error};
/// assert_eq!(evaluate(tokenize("(2+3)×(4-1)").unwrap()), Ok(15.0));
/// assert_eq!(evaluate(tokenize("5/0").unwrap()), Err(Error::DivisionByZero));
/// ```
pub fn evaluate(tokens: Vec<Token>) -> Result<f64, Error> {
    Evaluator::default().evaluate(tokens)
}

/// Evaluate a bracket-free token sequence with the default [`Config`].
///
/// # Example
///
/// ```
/// # use reckoner::{evaluate_flat, tokenize};
/// assert_eq!(evaluate_flat(tokenize("2×3^2").unwrap()), Ok(18.0));
/// ```
pub fn evaluate_flat(tokens: Vec<Token>) -> Result<f64, Error> {
    Evaluator::default().evaluate_flat(tokens)
}

/// Reduces token sequences to a single value.
///
/// An evaluator only holds its [`Config`]: every call owns and consumes its
/// own token sequence, so the same evaluator can be shared freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Evaluator {
    config: Config,
}

impl Evaluator {
    /// Create an evaluator using `config`
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration of this evaluator
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Evaluate `tokens`, resolving brackets innermost first.
    ///
    /// The innermost-rightmost pair (the last `(` and the first `)` after
    /// it) is reduced to a single number, then the next one, until no
    /// bracket is left and the remaining flat sequence can be reduced.
    /// Walking the tokens from the right, every `(` met closes the segment
    /// opened by the nearest pending `)`, which is exactly that pair, so a
    /// single pass resolves all of them in that order.
    ///
    /// Bracket results are kept at full precision; only the final value is
    /// rounded according to the [`Config`].
    ///
    /// Balanced brackets are a precondition. Unbalanced input is not
    /// diagnosed precisely, but always ends in
    /// [`Error::InvalidExpression`].
    pub fn evaluate(&self, tokens: Vec<Token>) -> Result<f64, Error> {
        // Segments are collected back to front
        let mut current: Vec<Token> = Vec::new();
        let mut pending: Vec<Vec<Token>> = Vec::new();

        for token in tokens.into_iter().rev() {
            match token {
                Token::RParen => pending.push(mem::take(&mut current)),
                Token::LParen => {
                    let outer = pending
                        .pop()
                        .ok_or_else(|| Error::invalid("unmatched opening bracket"))?;
                    let mut inner = mem::replace(&mut current, outer);
                    inner.reverse();
                    let value = reduce(inner)?;
                    trace!("bracket resolved to {}", value);
                    current.push(Token::Number(value));
                }
                other => current.push(other),
            }
        }
        if !pending.is_empty() {
            return Err(Error::invalid("unmatched closing bracket"));
        }

        current.reverse();
        reduce(current).map(|value| self.config.round(value))
    }

    /// Evaluate a bracket-free sequence by precedence-ordered reduction.
    ///
    /// Operators are folded group by group, `^` and `√` first, then `×` and
    /// `÷`, then `+` and `-`. Inside a group the fold goes left to right,
    /// each step replacing an operator and its operands by their result.
    /// The final value is rounded according to the [`Config`].
    pub fn evaluate_flat(&self, tokens: Vec<Token>) -> Result<f64, Error> {
        if tokens.iter().any(|token| token.is_bracket()) {
            return Err(Error::invalid("unmatched closing bracket"));
        }
        reduce(tokens).map(|value| self.config.round(value))
    }
}

/// Reduce a flat sequence to its unrounded value.
fn reduce(mut tokens: Vec<Token>) -> Result<f64, Error> {
    for precedence in (1..=Op::MAX_PRECEDENCE).rev() {
        let mut index = 0;
        while index < tokens.len() {
            match tokens[index] {
                Token::Op(Op::Sqrt) if precedence == Op::Sqrt.precedence() => {
                    operand(&mut tokens, index)?;
                }
                Token::Op(op) if op.precedence() == precedence => {
                    index = reduce_binary(&mut tokens, index, op)?;
                    continue;
                }
                _ => {}
            }
            index += 1;
        }
    }

    match *tokens.as_slice() {
        [Token::Number(value)] if value.is_finite() => Ok(value),
        [Token::Number(value)] => Err(Error::invalid(format!(
            "{} is not a finite number",
            value
        ))),
        [] => Err(Error::invalid("empty expression")),
        _ => Err(Error::invalid(format!(
            "missing operator in {}",
            serialize(&tokens)
        ))),
    }
}

/// Fold the binary operator `op` found at `index` with its two operands.
/// Returns the index to resume scanning from.
fn reduce_binary(tokens: &mut Vec<Token>, index: usize, op: Op) -> Result<usize, Error> {
    let left = index
        .checked_sub(1)
        .and_then(|left| tokens[left].number())
        .ok_or_else(|| Error::invalid(format!("missing operand before {}", op)))?;
    let right = operand(tokens, index + 1)?;

    let value = apply(op, left, right)?;
    trace!("{} {} {} = {}", left, op, right, value);
    tokens.drain(index..=index + 1);
    tokens[index - 1] = Token::Number(value);
    Ok(index - 1)
}

/// Get the number at `index`. A chain of roots starting there is reduced
/// first, innermost root first.
fn operand(tokens: &mut Vec<Token>, index: usize) -> Result<f64, Error> {
    let roots = tokens
        .iter()
        .skip(index)
        .take_while(|token| **token == Token::Op(Op::Sqrt))
        .count();
    let mut value = match tokens.get(index + roots) {
        Some(&Token::Number(value)) => value,
        Some(other) => {
            return Err(Error::invalid(format!("expected a number, found {}", other)));
        }
        None => return Err(Error::invalid("missing operand at end of expression")),
    };

    for _ in 0..roots {
        if value < 0.0 {
            return Err(Error::invalid(format!(
                "square root of negative number {}",
                value
            )));
        }
        let root = libm::sqrt(value);
        if !root.is_finite() {
            return Err(Error::invalid(format!("√{} has no finite result", value)));
        }
        trace!("√{} = {}", value, root);
        value = root;
    }
    if roots > 0 {
        tokens.drain(index + 1..=index + roots);
        tokens[index] = Token::Number(value);
    }
    Ok(value)
}

fn apply(op: Op, left: f64, right: f64) -> Result<f64, Error> {
    let value = match op {
        Op::Add => left + right,
        Op::Sub => left - right,
        Op::Mul => left * right,
        Op::Div if right == 0.0 => return Err(Error::DivisionByZero),
        Op::Div => left / right,
        Op::Pow => libm::pow(left, right),
        Op::Sqrt => return Err(Error::invalid("square root is not a binary operator")),
    };
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid(format!(
            "{} {} {} has no finite result",
            left, op, right
        )))
    }
}
