use crate::eval::{Config, Evaluator};
use crate::lexer::tokenize;
use crate::token::{serialize, Token};
use crate::validate::{brackets_balanced, validate};
use crate::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Evaluate a single expression from `input`.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed.
///
/// # Example
///
/// ```
/// # use reckoner::{eval, Error};
///
/// assert_eq!(eval("45 - 2^3"), Ok(37.0));
/// assert_eq!(eval("3 × -5"), Ok(-15.0));
/// assert_eq!(eval("1 ÷ (3 - 3)"), Err(Error::DivisionByZero));
/// ```
pub fn eval(input: &str) -> Result<f64, Error> {
    Expr::parse(input).and_then(|expr| expr.eval())
}

/// A tokenized and checked mathematical expression.
///
/// # Examples
/// ```
/// # use reckoner::{Expr};
/// let expr = Expr::parse("3 + 5 * 2").unwrap();
/// assert_eq!(expr.eval(), Ok(13.0));
///
/// let expr = Expr::parse("(2)(√9)").unwrap();
/// assert_eq!(expr.to_string(), "(2)×(√9)");
/// assert_eq!(expr.eval(), Ok(6.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    tokens: Vec<Token>,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`.
    ///
    /// The expression is tokenized, then rejected if its shape is not
    /// plausible or if its brackets are unbalanced.
    ///
    /// # Examples
    /// ```
    /// # use reckoner::Expr;
    /// // A valid expression
    /// assert!(Expr::parse("3 + 5 * 2").is_ok());
    /// // invalid expressions
    /// assert!(Expr::parse("3 + * 2").is_err());
    /// assert!(Expr::parse("(3 + 2").is_err());
    /// ```
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let tokens = tokenize(expression)?;
        if !validate(&tokens) {
            return Err(Error::invalid(format!(
                "malformed expression {}",
                expression.trim()
            )));
        }
        if !brackets_balanced(&tokens) {
            return Err(Error::invalid(format!(
                "unbalanced brackets in {}",
                expression.trim()
            )));
        }
        Ok(Self { tokens })
    }

    /// Evaluate the expression, rounding to the default precision.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reckoner::{Expr};
    /// let expr = Expr::parse("0.1 + 0.2").unwrap();
    /// assert_eq!(expr.eval(), Ok(0.3));
    /// ```
    pub fn eval(&self) -> Result<f64, Error> {
        self.eval_with(&Config::default())
    }

    /// Evaluate the expression with an explicit `config`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use reckoner::{Config, Expr};
    /// let expr = Expr::parse("2 / 3").unwrap();
    /// let config = Config::default().with_significant_digits(Some(2));
    /// assert_eq!(expr.eval_with(&config), Ok(0.67));
    /// ```
    pub fn eval_with(&self, config: &Config) -> Result<f64, Error> {
        Evaluator::new(*config).evaluate(self.tokens.clone())
    }

    /// Get the tokens of this expression
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl FromStr for Expr {
    type Err = Error;

    fn from_str(expression: &str) -> Result<Self, Error> {
        Self::parse(expression)
    }
}

impl Display for Expr {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", serialize(&self.tokens))
    }
}

#[cfg(test)]
mod tests {
    use super::Expr;
    use crate::Error;
    use test_case::test_case;

    #[test]
    fn parse() {
        let valid_expressions = [
            "3 + -5",
            "(3 + -5)*45",
            "(3.0 + 5.0)*\t\n45",
            "(3 + 5^.5)×45",
            "√34.0 ^ √28.0",
            "(2)(3)",
            "2(3)",
            "√9",
        ];
        for expr in &valid_expressions {
            assert!(Expr::parse(expr).is_ok(), "{} should parse", expr);
        }
    }

    #[test]
    fn parse_errors() {
        let invalid_expressions = [
            "",
            "3+",
            "+3",
            "3++4",
            "3 ** 4",
            "(3+4",
            "3+4)",
            "2 % 3",
            "-(2)",
            "√",
        ];
        for expr in &invalid_expressions {
            assert!(Expr::parse(expr).is_err(), "{} should not parse", expr);
        }
    }

    #[test_case("3+4-2" => Ok(5.0) ; "accumulation")]
    #[test_case("2 + 3 * 4" => Ok(14.0) ; "precedence")]
    #[test_case("2 × 3 ^ 2" => Ok(18.0) ; "power")]
    #[test_case("√9 + 1" => Ok(4.0) ; "root")]
    #[test_case("(2+3)×(4-1)" => Ok(15.0) ; "brackets")]
    #[test_case("10/2" => Ok(5.0) ; "integer division")]
    #[test_case("5/0" => Err(Error::DivisionByZero) ; "division by zero")]
    #[test_case("3+" => Err(Error::invalid("malformed expression 3+")) ; "malformed")]
    #[test_case(" (1+2 " => Err(Error::invalid("unbalanced brackets in (1+2")) ; "unbalanced")]
    #[test_case("1 2" => Err(Error::invalid("missing operator in 1 2")) ; "validation is only a heuristic")]
    fn evaluation(input: &str) -> Result<f64, Error> {
        crate::expr::eval(input)
    }

    #[test]
    fn error_messages() {
        let result = crate::expr::eval("4 / (2 - 2)");
        assert_eq!(
            result.err().unwrap().to_string(),
            "DivisionByZero: division by zero"
        );
        let result = crate::expr::eval("√(2 - 6)");
        assert_eq!(
            result.err().unwrap().to_string(),
            "InvalidExpression: square root of negative number -4"
        );
    }

    #[test]
    fn reuse() {
        let expr: Expr = "(1 + 2) × 3".parse().unwrap();
        assert_eq!(expr.eval(), Ok(9.0));
        assert_eq!(expr.eval(), Ok(9.0));
        assert_eq!(expr.tokens().len(), 7);
    }

    #[test_case("3+4×2" => "3+4×2" ; "canonical input is unchanged")]
    #[test_case("3 * 4 / 2" => "3×4÷2" ; "ascii operators become canonical")]
    #[test_case("-1.50 - .5" => "-1.5-0.5" ; "literals are normalized")]
    #[test_case("(1)(2)" => "(1)×(2)" ; "implicit multiplication is spelled out")]
    fn display(input: &str) -> String {
        Expr::parse(input).unwrap().to_string()
    }
}
