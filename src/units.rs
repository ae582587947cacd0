//! Length handling: CSS length parsing and px to EMU conversion.
//!
//! All parsed geometry is normalized to px user units (96 DPI); the builder
//! converts px to EMU with a constant factor.

/// 1 px (at 96 DPI) in English Metric Units
pub const EMU_PER_PX: f64 = 9525.0;

/// Convert a px value to EMU, truncating toward zero
pub fn px_to_emu(value: f64) -> i64 {
    (value * EMU_PER_PX) as i64
}

/// Parse a CSS length like "120", "10.5px", "72pt", "25mm" into px.
///
/// Bare numbers and `%` are taken as px verbatim; unknown unit suffixes keep
/// the numeric value. Returns `None` when no leading number can be read.
pub fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let mut end = 0;
    let bytes = value.as_bytes();
    if bytes[0] == b'-' || bytes[0] == b'+' {
        end = 1;
    }
    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }

    let number: f64 = value[..end].parse().ok()?;
    let unit = value[end..].trim().to_ascii_lowercase();

    let px = match unit.as_str() {
        "" | "px" | "%" => number,
        "pt" => number * 1.3333,
        "cm" => number * 37.7953,
        "mm" => number * 3.77953,
        "in" => number * 96.0,
        _ => number,
    };
    Some(px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length_bare_and_px() {
        assert_eq!(parse_length("120"), Some(120.0));
        assert_eq!(parse_length("10.5px"), Some(10.5));
        assert_eq!(parse_length("-4"), Some(-4.0));
    }

    #[test]
    fn test_parse_length_units() {
        assert_eq!(parse_length("72pt"), Some(72.0 * 1.3333));
        assert_eq!(parse_length("1cm"), Some(37.7953));
        assert_eq!(parse_length("10mm"), Some(37.7953));
        assert_eq!(parse_length("2in"), Some(192.0));
        assert_eq!(parse_length("50%"), Some(50.0));
    }

    #[test]
    fn test_parse_length_invalid() {
        assert_eq!(parse_length(""), None);
        assert_eq!(parse_length("auto"), None);
        assert_eq!(parse_length("px"), None);
    }

    #[test]
    fn test_px_to_emu() {
        assert_eq!(px_to_emu(1.0), 9525);
        assert_eq!(px_to_emu(10.0), 95250);
        assert_eq!(px_to_emu(0.0), 0);
    }
}
