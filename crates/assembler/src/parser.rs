//! Binary literal parsing.

use crate::error::AsmError;

/// Parse a binary literal into a byte.
///
/// Accepts `0` and `1` digits with an optional `0b`/`0B` prefix and `_`
/// separators. Literals wider than eight bits keep their low eight bits.
pub(crate) fn parse_byte(text: &str, line: usize) -> Result<u8, AsmError> {
    let invalid = || AsmError::InvalidNumber {
        line,
        token: text.to_string(),
    };

    let digits = text
        .strip_prefix("0b")
        .or_else(|| text.strip_prefix("0B"))
        .unwrap_or(text);

    let mut value: u8 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let bit = match c {
            '0' => 0,
            '1' => 1,
            '_' if seen_digit => continue,
            _ => return Err(invalid()),
        };
        value = (value << 1) | bit;
        seen_digit = true;
    }

    if !seen_digit {
        return Err(invalid());
    }
    Ok(value)
}
