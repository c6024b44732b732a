//! Lenient parsing of numeric control text.
//!
//! Seed and case-count controls accept free text. Anything that is not a
//! non-negative number resolves to `0` instead of failing, so a stray keystroke
//! never reaches the store as an error.

/// Smallest accepted batch size.
pub const CASE_COUNT_MIN: u32 = 1;

/// Largest accepted batch size.
pub const CASE_COUNT_MAX: u32 = 10_000;

/// Batch size shown before the user edits the control.
pub const DEFAULT_CASE_COUNT: u32 = 100;

/// Parse seed text into a `u64`.
///
/// Integers in `[0, 2^64 - 1]` parse exactly. Non-negative decimals are
/// truncated and values beyond `u64::MAX` saturate. Everything else is `0`.
///
/// ```
/// use vis_model::parse_seed;
///
/// assert_eq!(parse_seed("42"), 42);
/// assert_eq!(parse_seed("18446744073709551615"), u64::MAX);
/// assert_eq!(parse_seed("abc"), 0);
/// ```
pub fn parse_seed(text: &str) -> u64 {
    parse_non_negative(text)
}

/// Parse case-count text into a `u32`.
///
/// Same coercion rules as [`parse_seed`]; range checking against
/// [`CASE_COUNT_MIN`]..=[`CASE_COUNT_MAX`] is left to the export.
pub fn parse_case_count(text: &str) -> u32 {
    u32::try_from(parse_non_negative(text)).unwrap_or(u32::MAX)
}

fn parse_non_negative(text: &str) -> u64 {
    let trimmed = text.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        // `as` saturates at u64::MAX
        Ok(value) if value.is_finite() && value >= 0.0 => value as u64,
        _ => 0,
    }
}
