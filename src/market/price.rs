//! Price token normalization.
//!
//! The store renders prices and quantities as short tokens like `"1 w"`,
//! `"50 m"`, or `"10.000"`. Everything is normalized to yang, the smallest
//! currency unit, before any arithmetic.

/// Yang per won, the site's large currency unit.
pub const YANG_PER_WON: i64 = 100_000_000;

/// Parses a price or quantity token into yang.
///
/// Strips `.` thousands separators and recognizes the suffixes `w`
/// (x100,000,000), `m` (x1,000,000), and `k` (x1,000), checked in that
/// priority order. Returns 0 for empty or unparsable input; a bad token is
/// a dropped signal, never an error.
pub fn parse_price_token(token: &str) -> i64 {
    if token.is_empty() {
        return 0;
    }

    let clean = token.to_lowercase().replace('.', "");
    let clean = clean.trim();

    let (multiplier, digits) = if clean.contains('w') {
        (YANG_PER_WON, clean.replace('w', ""))
    } else if clean.contains('m') {
        (1_000_000, clean.replace('m', ""))
    } else if clean.contains('k') {
        (1_000, clean.replace('k', ""))
    } else {
        (1, clean.to_string())
    };

    match digits.trim().parse::<f64>() {
        Ok(value) => (value * multiplier as f64) as i64,
        Err(_) => 0,
    }
}
