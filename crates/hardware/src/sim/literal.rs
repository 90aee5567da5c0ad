//! Numeric literal parsing for command-line addresses.
//!
//! Tokens are decimal unless they start with `0x`, in which case the rest is
//! hexadecimal. Leading whitespace is skipped.
//!
//! Two modes exist. [`LiteralMode::Strict`] requires the whole token to be a valid
//! number that fits an [`Addr`]. [`LiteralMode::Permissive`] converts the longest
//! run of digits and accepts whatever follows, so `0xZZ` parses as 0 and `12kb`
//! as 12; values too large saturate at [`Addr::MAX`]. Neither mode accepts a sign
//! or whitespace after the `0x` prefix: in permissive mode `-5` and `0x 5` parse as 0.

use serde::Deserialize;

use crate::common::{Addr, LiteralError};

/// How much of a token must be numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum LiteralMode {
    /// Every character after the prefix must be a digit, and the value must fit.
    #[default]
    Strict,
    /// Only the leading digits are converted; trailing text is ignored.
    Permissive,
}

/// Parses one command-line token into an address.
///
/// # Arguments
///
/// * `token` - The token as given on the command line.
/// * `mode` - Whether trailing non-digit text is an error.
///
/// # Returns
///
/// The parsed address.
///
/// # Errors
///
/// * [`LiteralError::Empty`] if the token is empty or only whitespace (both modes).
/// * [`LiteralError::InvalidDigit`] / [`LiteralError::Overflow`] in strict mode.
///
/// # Examples
///
/// ```
/// use plugsim_core::sim::literal::{LiteralMode, parse_literal};
///
/// assert_eq!(parse_literal("0x10", LiteralMode::Strict), Ok(16));
/// assert_eq!(parse_literal("  16", LiteralMode::Strict), Ok(16));
/// assert_eq!(parse_literal("0xZZ", LiteralMode::Permissive), Ok(0));
/// assert!(parse_literal("0xZZ", LiteralMode::Strict).is_err());
/// ```
pub fn parse_literal(token: &str, mode: LiteralMode) -> Result<Addr, LiteralError> {
    let trimmed = token.trim_start();
    if trimmed.is_empty() {
        return Err(LiteralError::Empty);
    }
    let skipped = token.len() - trimmed.len();

    let (digits, radix, start) = match trimmed.strip_prefix("0x") {
        Some(rest) => (rest, 16, skipped + 2),
        None => (trimmed, 10, skipped),
    };

    match mode {
        LiteralMode::Strict => parse_strict(digits, radix, start),
        LiteralMode::Permissive => Ok(parse_prefix(digits, radix)),
    }
}

fn parse_strict(digits: &str, radix: u32, start: usize) -> Result<Addr, LiteralError> {
    if digits.is_empty() {
        return Err(LiteralError::Empty);
    }
    let mut value: Addr = 0;
    for (i, c) in digits.char_indices() {
        let digit = c.to_digit(radix).ok_or(LiteralError::InvalidDigit {
            digit: c,
            position: start + i,
        })?;
        value = value
            .checked_mul(radix)
            .and_then(|v| v.checked_add(digit))
            .ok_or(LiteralError::Overflow)?;
    }
    Ok(value)
}

fn parse_prefix(digits: &str, radix: u32) -> Addr {
    digits
        .chars()
        .map_while(|c| c.to_digit(radix))
        .fold(0, |acc: Addr, digit| {
            acc.saturating_mul(radix).saturating_add(digit)
        })
}
