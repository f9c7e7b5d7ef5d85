//! Compact duration string parsing.
//!
//! Token lifetimes are configured as `<amount><unit>` strings such as
//! `"15m"` or `"7d"`, matching the reference deployment format.

use chrono::Duration;

use crate::error::AppError;

/// Parses a duration string of the form `<amount><unit>`.
///
/// The amount is one or more ASCII digits; the unit is a single character
/// from `m` (minutes), `h` (hours), or `d` (days), case-insensitive.
/// Returns `ErrorKind::InvalidFormat` when the string does not match the
/// pattern, and `ErrorKind::UnknownUnit` for a captured unit outside the
/// set (unreachable given the pattern, handled anyway).
pub fn parse_duration(input: &str) -> Result<Duration, AppError> {
    let (amount, unit) = split_pattern(input)
        .ok_or_else(|| AppError::invalid_format(format!("Invalid duration format: '{input}'")))?;

    // The checked constructors return None when the amount overflows
    // chrono's millisecond representation.
    match unit {
        'm' => Duration::try_minutes(amount),
        'h' => Duration::try_hours(amount),
        'd' => Duration::try_days(amount),
        other => {
            return Err(AppError::unknown_unit(format!(
                "Unknown duration unit: '{other}'"
            )));
        }
    }
    .ok_or_else(|| AppError::invalid_format(format!("Duration amount out of range: '{input}'")))
}

/// Splits the input into `(amount, unit)` if it matches `\d+[mhd]`
/// case-insensitively.
fn split_pattern(input: &str) -> Option<(i64, char)> {
    let digits_end = input.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }

    let mut rest = input[digits_end..].chars();
    let unit = rest.next()?.to_ascii_lowercase();
    if rest.next().is_some() || !matches!(unit, 'm' | 'h' | 'd') {
        return None;
    }

    let amount = input[..digits_end].parse::<i64>().ok()?;
    Some((amount, unit))
}
