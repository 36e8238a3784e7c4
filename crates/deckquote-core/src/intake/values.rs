use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a numeric form value.
///
/// Accepts plain decimals ("12", "12.5") and exponent notation ("1.2e1").
/// Returns `None` for empty or unparseable input.
pub fn parse_number(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Parse a non-negative count, defaulting to 0. Fractions are truncated.
pub fn parse_count(s: &str) -> u8 {
    match parse_number(s) {
        Some(n) if n > Decimal::ZERO => n.trunc().to_u8().unwrap_or(u8::MAX),
        _ => 0,
    }
}

/// HTML checkboxes post "on" when ticked and nothing otherwise.
pub fn parse_checkbox(s: &str) -> bool {
    s == "on"
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("20"), Some(dec!(20)));
        assert_eq!(parse_number(" 12.5 "), Some(dec!(12.5)));
        assert_eq!(parse_number("1.2e1"), Some(dec!(12)));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("twelve"), None);
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("2"), 2);
        assert_eq!(parse_count("2.0"), 2);
        assert_eq!(parse_count("1.7"), 1);
        assert_eq!(parse_count("-1"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("1000"), u8::MAX);
    }

    #[test]
    fn test_parse_checkbox() {
        assert!(parse_checkbox("on"));
        assert!(!parse_checkbox(""));
        assert!(!parse_checkbox("true"));
    }
}
