//! Duration-string parsing for configuration windows.
//!
//! Token and reset-token lifetimes are configured as compact duration
//! strings ("15m", "7d"). The accepted grammar is `^(\d+)([smhd])$`;
//! anything else falls back to the caller-supplied default instead of
//! failing the request.

/// Parse a duration string into seconds.
///
/// Units: `s` = seconds, `m` = minutes, `h` = hours, `d` = days.
/// Returns `default_secs` for any string outside the grammar.
///
/// # Examples
///
/// ```
/// use credo::duration::parse_duration;
///
/// assert_eq!(parse_duration("15m", 900), 900);
/// assert_eq!(parse_duration("7d", 900), 604_800);
/// assert_eq!(parse_duration("soon", 900), 900);
/// ```
pub fn parse_duration(value: &str, default_secs: u64) -> u64 {
    if value.len() < 2 || !value.is_ascii() {
        return default_secs;
    }

    let (amount, unit) = value.split_at(value.len() - 1);
    if !amount.bytes().all(|b| b.is_ascii_digit()) {
        return default_secs;
    }
    let Ok(amount) = amount.parse::<u64>() else {
        return default_secs;
    };

    match unit {
        "s" => amount,
        "m" => amount.saturating_mul(60),
        "h" => amount.saturating_mul(3600),
        "d" => amount.saturating_mul(86_400),
        _ => default_secs,
    }
}
