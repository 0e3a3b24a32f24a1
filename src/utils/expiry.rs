//! Parsing of `expire_after` offsets such as `"30m"`, `"12h"`, `"2d"` or `"1w"`.
//!
//! A bare number is read as minutes.

use chrono::Duration;
use serde_json::json;

use crate::error::AppError;

/// Parses a positive duration offset.
///
/// Accepted units: `m` (minutes), `h` (hours), `d` (days), `w` (weeks).
///
/// # Errors
///
/// Returns [`AppError::Validation`] for empty input, unknown units, a zero
/// amount or an amount too large to represent.
pub fn parse_expire_after(input: &str) -> Result<Duration, AppError> {
    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split);

    let invalid = |reason: &str| {
        AppError::bad_request(
            "Invalid expiry format",
            json!({ "expire_after": input, "reason": reason }),
        )
    };

    let amount: i64 = digits
        .parse()
        .map_err(|_| invalid("expected a number followed by m, h, d or w"))?;
    if amount == 0 {
        return Err(invalid("expiry must be greater than zero"));
    }

    let duration = match unit {
        "" | "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        "w" => Duration::try_weeks(amount),
        _ => return Err(invalid("unknown unit, expected m, h, d or w")),
    };

    duration.ok_or_else(|| invalid("expiry is too large"))
}
