use crate::token::{Op, Token};
use hashbrown::HashMap;

lazy_static! {
    /// Single-character symbols accepted in the input. ASCII and Unicode
    /// spellings of the same operator map to the same token.
    pub static ref SYMBOLS: HashMap<char, Token> = {
        let mut map = HashMap::<char, Token>::new();
        map.insert('+', Token::Op(Op::Add));
        map.insert('-', Token::Op(Op::Sub));
        map.insert('−', Token::Op(Op::Sub));
        map.insert('*', Token::Op(Op::Mul));
        map.insert('×', Token::Op(Op::Mul));
        map.insert('/', Token::Op(Op::Div));
        map.insert('÷', Token::Op(Op::Div));
        map.insert('^', Token::Op(Op::Pow));
        map.insert('√', Token::Op(Op::Sqrt));
        map.insert('(', Token::LParen);
        map.insert(')', Token::RParen);
        map.shrink_to_fit();
        map
    };
}

/// Round `value` to `digits` significant digits, to hide floating point
/// noise such as `0.1 + 0.2 = 0.30000000000000004`.
///
/// `digits` is clamped to `1..=17`. Zero and non-finite values are returned
/// unchanged, except that `-0` becomes `0`.
///
/// # Examples
///
/// ```
/// # use reckoner::round_significant;
/// assert_eq!(round_significant(0.1 + 0.2, 12), 0.3);
/// assert_eq!(round_significant(123_456.0, 2), 120_000.0);
/// ```
#[must_use]
pub fn round_significant(value: f64, digits: usize) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    if !value.is_finite() {
        return value;
    }
    let digits = digits.clamp(1, 17);
    // Going through the decimal representation avoids the drift of
    // scaling by powers of ten.
    format!("{:.*e}", digits - 1, value)
        .parse()
        .unwrap_or(value)
}
