use crate::token::Token;
use log::debug;

/// Check that `tokens` has the shape of an evaluable expression.
///
/// This is a best-effort heuristic, not a grammar: it rejects empty input,
/// dangling or leading binary operators, consecutive operators and
/// sequences with too many operators for their operands. Passing it does
/// not guarantee that evaluation succeeds. Brackets are not checked, see
/// [`brackets_balanced`].
///
/// # Examples
///
/// ```
/// # use reckoner::{tokenize, validate};
/// assert!(validate(&tokenize("√9+1").unwrap()));
/// assert!(!validate(&tokenize("3+").unwrap()));
/// assert!(!validate(&tokenize("3++4").unwrap()));
/// ```
#[must_use]
pub fn validate(tokens: &[Token]) -> bool {
    let (first, last) = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            debug!("rejected empty token sequence");
            return false;
        }
    };
    if first.is_binary_op() {
        debug!("rejected leading operator {}", first);
        return false;
    }
    // A trailing root has no operand either
    if let Token::Op(op) = last {
        debug!("rejected trailing operator {}", op);
        return false;
    }
    if let Some(pair) = tokens
        .windows(2)
        .find(|pair| matches!(pair[0], Token::Op(_)) && pair[1].is_binary_op())
    {
        debug!("rejected consecutive operators {}{}", pair[0], pair[1]);
        return false;
    }

    let operators = tokens.iter().filter(|token| token.is_binary_op()).count();
    let operands = tokens.iter().filter(|token| token.number().is_some()).count();
    let accepted = operators + 1 == operands || operators < operands;
    if !accepted {
        debug!(
            "rejected {} operators for {} operands",
            operators, operands
        );
    }
    accepted
}

/// Check that every `)` closes an earlier `(` and that every `(` is closed.
///
/// # Examples
///
/// ```
/// # use reckoner::{brackets_balanced, tokenize};
/// assert!(brackets_balanced(&tokenize("(1+(2))").unwrap()));
/// assert!(!brackets_balanced(&tokenize("(1+2").unwrap()));
/// assert!(!brackets_balanced(&tokenize(")1+2(").unwrap()));
/// ```
#[must_use]
pub fn brackets_balanced(tokens: &[Token]) -> bool {
    let mut depth: usize = 0;
    for token in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => match depth.checked_sub(1) {
                Some(next) => depth = next,
                None => return false,
            },
            _ => {}
        }
    }
    depth == 0
}
