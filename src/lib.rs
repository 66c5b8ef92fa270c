#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::non_ascii_literal,
    clippy::missing_errors_doc,
    clippy::float_cmp
)]

//! Reckoner, the arithmetic core of a pocket calculator.
//!
//! This crate evaluates infix expressions made of numbers, the binary
//! operators `+ - × ÷ ^`, the prefix square root `√` and brackets. The
//! easiest way to use this crate is with the [`eval`](fn.eval.html)
//! function:
//!
//! ```
//! assert_eq!(reckoner::eval("3 + 5 × 2"), Ok(13.0));
//! ```
//!
//! Failures are reported as an [`Error`](enum.Error.html), never as a
//! `NaN` or an infinity:
//!
//! ```
//! use reckoner::Error;
//!
//! assert_eq!(reckoner::eval("5 / 0"), Err(Error::DivisionByZero));
//! assert!(reckoner::eval("√-4").is_err());
//! ```
//!
//! The pipeline can also be driven one step at a time, which is what an
//! interactive front end does: tokenize the current input, check it with
//! [`validate`](fn.validate.html) before enabling the `=` key, then
//! evaluate it.
//!
//! ```
//! use reckoner::{brackets_balanced, evaluate, tokenize, validate};
//!
//! let tokens = tokenize("(2)(3 + 1)").unwrap();
//! assert!(validate(&tokens) && brackets_balanced(&tokens));
//! assert_eq!(evaluate(tokens), Ok(8.0));
//! ```
//!
//! # Language definition
//!
//! - number literals: `3`, `3.5`, `.5`. A `-` at the start of the input,
//!   after an operator or after `(` is part of the following number;
//! - brackets `(` and `)`. A multiplication is implied between `)` and a
//!   following `(`, number or `√`, and between a number and a following
//!   `(` or `√`: `(2)(3)`, `2(3)` and `2√9` all evaluate to `6`;
//! - binary operators: `+`, `-` (or `−`), `×` (or `*`), `÷` (or `/`), `^`;
//! - the prefix operator `√`, applied to the operand on its right.
//!
//! Any other symbol, whitespace aside, is forbidden in the input.
//!
//! `^` and `√` bind tightest, then `×` and `÷`, then `+` and `-`. Operators
//! of the same level are applied from left to right, so `2^3^2` is `64`.
//!
//! # Technical details
//!
//! The evaluator does not build a syntax tree. It reduces the innermost,
//! rightmost bracket pair to a number until no bracket is left, then folds
//! the remaining flat sequence one precedence level at a time. Results are
//! rounded to 12 significant digits by default (see
//! [`Config`](struct.Config.html)), so that `0.1 + 0.2` is `0.3`.
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade: `debug`
//! for tokenization and rejected input, `trace` for every reduction step.

#[macro_use]
extern crate lazy_static;

mod error;
mod eval;
mod expr;
mod lexer;
mod token;
mod util;
mod validate;

pub use error::Error;
pub use eval::{evaluate, evaluate_flat, Config, Evaluator, DEFAULT_SIGNIFICANT_DIGITS};
pub use expr::{eval, Expr};
pub use lexer::{tokenize, Lexer};
pub use token::{serialize, Op, Token};
pub use util::round_significant;
pub use validate::{brackets_balanced, validate};
