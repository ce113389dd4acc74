//! Lenient numeric parsing for user-entered quantities and prices.
//!
//! Both parsers read the longest numeric prefix of the input after leading
//! whitespace, so `"3 pcs"` yields 3 and `"12.5usd"` yields 12.5.

/// Parse a leading integer. Returns `None` when no digits are found.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }

    match s[..end].parse::<i64>() {
        Ok(v) => Some(v),
        // Overflow: saturate in the sign's direction.
        Err(_) if s.starts_with('-') => Some(i64::MIN),
        Err(_) => Some(i64::MAX),
    }
}

/// Parse a leading decimal number with optional fraction and exponent.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Coerce a quantity entry: anything unparseable or below 1 becomes 1.
pub fn coerce_quantity(raw: &str) -> u32 {
    match parse_int_prefix(raw) {
        Some(v) if v >= 1 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Coerce a price entry: anything unparseable, non-finite, or negative becomes 0.
pub fn coerce_price(raw: &str) -> f64 {
    match parse_float_prefix(raw) {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}
