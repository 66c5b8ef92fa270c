use crate::error::Error;
use crate::token::{Op, Token};
use crate::util::SYMBOLS;
use log::debug;
use std::iter::Peekable;
use std::str::Chars;

/// Split `input` into tokens, ready for validation and evaluation.
///
/// Unary minus signs are folded into the following number, and implicit
/// multiplications (`(2)(3)`, `2(3)`, `(2)3`, `2√9`) are made explicit.
///
/// # Examples
///
/// ```
/// # use reckoner::{tokenize, Op, Token};
/// assert_eq!(
///     tokenize("-3×(2)"),
///     Ok(vec![
///         Token::Number(-3.0),
///         Token::Op(Op::Mul),
///         Token::LParen,
///         Token::Number(2.0),
///         Token::RParen,
///     ])
/// );
/// assert!(tokenize("3 % 2").is_err());
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, Error> {
    let tokens = normalize(Lexer::new(input).lex()?);
    debug!("tokenized {:?} into {} tokens", input, tokens.len());
    Ok(tokens)
}

/// An helper struct for lexing the input
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer reading `string`
    pub fn new(string: &'a str) -> Self {
        Lexer {
            input: string.chars().peekable(),
        }
    }

    /// Get the raw tokens, without unary minus folding or implicit
    /// multiplication
    pub fn lex(&mut self) -> Result<Vec<Token>, Error> {
        let mut output = Vec::new();
        while let Some(token) = self.next_token()? {
            output.push(token);
        }
        if output.is_empty() {
            return Err(Error::invalid("empty expression"));
        }
        Ok(output)
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        while let Some(c) = self.input.next() {
            let token = match c {
                c if c.is_whitespace() => continue,
                c if is_number_part(c) => self.number(c)?,
                c => match SYMBOLS.get(&c) {
                    Some(&token) => token,
                    None => {
                        return Err(Error::invalid(format!(
                            "unexpected character in input: {}",
                            c
                        )));
                    }
                },
            };
            return Ok(Some(token));
        }
        Ok(None)
    }

    fn number(&mut self, first: char) -> Result<Token, Error> {
        let mut literal = String::new();
        literal.push(first);
        let mut seen_point = first == '.';
        'literal: while let Some(&c) = self.input.peek() {
            if c.is_ascii_digit() {
                literal.push(c);
            } else if c == '.' && !seen_point {
                seen_point = true;
                literal.push(c);
            } else {
                break 'literal;
            }
            self.input.next();
        }
        // At least one digit is needed after the decimal point
        if literal.ends_with('.') {
            return Err(Error::invalid(format!("invalid number {}", literal)));
        }
        let value: f64 = literal
            .parse()
            .map_err(|_| Error::invalid(format!("invalid number {}", literal)))?;
        if !value.is_finite() {
            return Err(Error::invalid(format!("number too large: {}", literal)));
        }
        Ok(Token::Number(value))
    }
}

/// Fold unary minus signs into number literals and insert implicit
/// multiplications.
fn normalize(raw: Vec<Token>) -> Vec<Token> {
    let mut output: Vec<Token> = Vec::with_capacity(raw.len());
    let mut tokens = raw.into_iter().peekable();

    while let Some(token) = tokens.next() {
        if token == Token::Op(Op::Sub) && starts_operand(output.last()) {
            if let Some(&Token::Number(value)) = tokens.peek() {
                tokens.next();
                output.push(Token::Number(-value));
                continue;
            }
        }
        if implicit_multiplication(output.last(), token) {
            output.push(Token::Op(Op::Mul));
        }
        output.push(token);
    }
    output
}

/// Check if a token following `previous` must be the start of an operand,
/// making a `-` there a sign rather than a subtraction
fn starts_operand(previous: Option<&Token>) -> bool {
    matches!(previous, None | Some(Token::Op(_)) | Some(Token::LParen))
}

/// Check if a multiplication is implied between `previous` and `next`
fn implicit_multiplication(previous: Option<&Token>, next: Token) -> bool {
    let next_is_operand = matches!(next, Token::LParen | Token::Op(Op::Sqrt));
    match previous {
        Some(Token::RParen) => next_is_operand || matches!(next, Token::Number(_)),
        Some(Token::Number(_)) => next_is_operand,
        _ => false,
    }
}

/// Check if `c` can appear in a number literal
fn is_number_part(c: char) -> bool {
    c == '.' || c.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Op, Token};
    use test_case::test_case;

    fn num(value: f64) -> Token {
        Token::Number(value)
    }

    fn op(op: Op) -> Token {
        Token::Op(op)
    }

    #[test_case("2 + 2" => Ok(vec![num(2.0), op(Op::Add), num(2.0)]) ; "addition is lexed properly")]
    #[test_case("2+2" => Ok(vec![num(2.0), op(Op::Add), num(2.0)]) ; "spaces are optional")]
    #[test_case("3*4/2" => Ok(vec![num(3.0), op(Op::Mul), num(4.0), op(Op::Div), num(2.0)]) ; "ascii operators")]
    #[test_case("3×4÷2" => Ok(vec![num(3.0), op(Op::Mul), num(4.0), op(Op::Div), num(2.0)]) ; "unicode operators")]
    #[test_case(".5^2" => Ok(vec![num(0.5), op(Op::Pow), num(2.0)]) ; "leading decimal point")]
    #[test_case("√9" => Ok(vec![op(Op::Sqrt), num(9.0)]) ; "square root prefix")]
    #[test_case("" => Err(Error::invalid("empty expression")) ; "empty input")]
    #[test_case("  \t" => Err(Error::invalid("empty expression")) ; "blank input")]
    #[test_case("3 % 2" => Err(Error::invalid("unexpected character in input: %")) ; "unknown character")]
    #[test_case("3." => Err(Error::invalid("invalid number 3.")) ; "dangling decimal point")]
    #[test_case("." => Err(Error::invalid("invalid number .")) ; "lone decimal point")]
    fn lex(input: &str) -> Result<Vec<Token>, Error> {
        Lexer::new(input).lex()
    }

    #[test]
    fn literal_out_of_range() {
        let huge = "9".repeat(400);
        assert_eq!(
            tokenize(&huge),
            Err(Error::invalid(format!("number too large: {}", huge)))
        );
        assert!(tokenize(&format!("√{}", huge)).is_err());
        // The largest finite values still lex
        assert!(tokenize(&"9".repeat(300)).is_ok());
    }

    #[test]
    fn two_decimal_points_split_the_literal() {
        assert_eq!(
            Lexer::new("1.2.3").lex(),
            Ok(vec![num(1.2), num(0.3)])
        );
    }

    #[test_case("-3+5" => Ok(vec![num(-3.0), op(Op::Add), num(5.0)]) ; "leading minus")]
    #[test_case("3×-2" => Ok(vec![num(3.0), op(Op::Mul), num(-2.0)]) ; "minus after operator")]
    #[test_case("3--2" => Ok(vec![num(3.0), op(Op::Sub), num(-2.0)]) ; "double minus")]
    #[test_case("(-2)" => Ok(vec![Token::LParen, num(-2.0), Token::RParen]) ; "minus after open bracket")]
    #[test_case("√-4" => Ok(vec![op(Op::Sqrt), num(-4.0)]) ; "minus after root")]
    #[test_case("5-3" => Ok(vec![num(5.0), op(Op::Sub), num(3.0)]) ; "binary minus is kept")]
    #[test_case("(1)-3" => Ok(vec![Token::LParen, num(1.0), Token::RParen, op(Op::Sub), num(3.0)]) ; "minus after close bracket")]
    #[test_case("-(1)" => Ok(vec![op(Op::Sub), Token::LParen, num(1.0), Token::RParen]) ; "minus before bracket is not folded")]
    fn unary_minus(input: &str) -> Result<Vec<Token>, Error> {
        tokenize(input)
    }

    #[test_case("(2)(3)" => Ok(vec![Token::LParen, num(2.0), Token::RParen, op(Op::Mul), Token::LParen, num(3.0), Token::RParen]) ; "between brackets")]
    #[test_case("(2)3" => Ok(vec![Token::LParen, num(2.0), Token::RParen, op(Op::Mul), num(3.0)]) ; "bracket then number")]
    #[test_case("2(3)" => Ok(vec![num(2.0), op(Op::Mul), Token::LParen, num(3.0), Token::RParen]) ; "number then bracket")]
    #[test_case("2√9" => Ok(vec![num(2.0), op(Op::Mul), op(Op::Sqrt), num(9.0)]) ; "number then root")]
    #[test_case("2+(3)" => Ok(vec![num(2.0), op(Op::Add), Token::LParen, num(3.0), Token::RParen]) ; "no insertion after operator")]
    fn implicit(input: &str) -> Result<Vec<Token>, Error> {
        tokenize(input)
    }

    #[test]
    fn numbers() {
        let number_parts = ['0', '5', '9', '.'];
        for c in &number_parts {
            assert!(is_number_part(*c));
        }

        let non_number_parts = ['a', '-', '+', '(', '√', 'e'];
        for c in &non_number_parts {
            assert!(!is_number_part(*c));
        }
    }
}
