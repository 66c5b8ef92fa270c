use std::fmt::{self, Display, Formatter};

/// Possible tokens to find in the input string
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    /// A numeric literal, possibly negative after unary minus folding
    Number(f64),
    /// An operator
    Op(Op),
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
}

/// Allowed operators in the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `×`, also written `*`
    Mul,
    /// `÷`, also written `/`
    Div,
    /// `^`
    Pow,
    /// Prefix square root `√`
    Sqrt,
}

impl Op {
    /// Highest precedence level, used to walk the precedence groups from the
    /// top down.
    pub const MAX_PRECEDENCE: u8 = 3;

    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow | Self::Sqrt => 3,
        }
    }

    /// Check if the operator takes an operand on each side
    #[must_use]
    pub fn is_binary(self) -> bool {
        !matches!(self, Self::Sqrt)
    }

    /// Canonical symbol used when serializing tokens
    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '×',
            Self::Div => '÷',
            Self::Pow => '^',
            Self::Sqrt => '√',
        }
    }
}

impl Token {
    /// Get the value of a `Number` token
    #[must_use]
    pub fn number(self) -> Option<f64> {
        if let Self::Number(value) = self {
            Some(value)
        } else {
            None
        }
    }

    /// Check if the token is a binary operator
    #[must_use]
    pub fn is_binary_op(self) -> bool {
        matches!(self, Self::Op(op) if op.is_binary())
    }

    /// Check if the token is a bracket of either kind
    #[must_use]
    pub fn is_bracket(self) -> bool {
        matches!(self, Self::LParen | Self::RParen)
    }
}

impl Display for Op {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        write!(fmt, "{}", self.symbol())
    }
}

impl Display for Token {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Number(value) => write!(fmt, "{}", value),
            Self::Op(op) => write!(fmt, "{}", op),
            Self::LParen => write!(fmt, "("),
            Self::RParen => write!(fmt, ")"),
        }
    }
}

/// Write `tokens` back to text, using the canonical operator symbols.
///
/// Adjacent numbers are separated by a space. The output tokenizes back to
/// the same sequence, except when a negative number directly follows
/// another number: `[1, -2]` is written `1 -2`, which reads as a
/// subtraction.
///
/// # Examples
///
/// ```
/// # use reckoner::{serialize, tokenize};
/// let tokens = tokenize("3 * -2 + .5").unwrap();
/// assert_eq!(serialize(&tokens), "3×-2+0.5");
/// ```
#[must_use]
pub fn serialize(tokens: &[Token]) -> String {
    let mut text = String::new();
    for (index, token) in tokens.iter().enumerate() {
        let follows_number = index > 0 && tokens[index - 1].number().is_some();
        if follows_number && token.number().is_some() {
            text.push(' ');
        }
        text.push_str(&token.to_string());
    }
    text
}
