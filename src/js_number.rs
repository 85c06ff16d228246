/// String-to-number conversion with JavaScript `ToNumber` semantics.
///
/// Surrounding whitespace is ignored, an empty string is `0`, `Infinity`
/// and `0x`/`0o`/`0b` prefixes are understood. Anything else that is not a
/// decimal literal yields `NaN`.
pub fn parse_js_number(src: &str) -> f64 {
    let trimmed = src.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if trimmed == "Infinity" || trimmed == "+Infinity" {
        return f64::INFINITY;
    }
    if trimmed == "-Infinity" {
        return f64::NEG_INFINITY;
    }

    if let Some(rest) = trimmed
        .strip_prefix('+')
        .or_else(|| trimmed.strip_prefix('-'))
    {
        if has_radix_prefix(rest) {
            return f64::NAN;
        }
    }

    if let Some(digits) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        return parse_prefixed_radix(digits, 16);
    }
    if let Some(digits) = trimmed
        .strip_prefix("0o")
        .or_else(|| trimmed.strip_prefix("0O"))
    {
        return parse_prefixed_radix(digits, 8);
    }
    if let Some(digits) = trimmed
        .strip_prefix("0b")
        .or_else(|| trimmed.strip_prefix("0B"))
    {
        return parse_prefixed_radix(digits, 2);
    }

    // Rust also accepts "inf", "nan" and "infinity" in any case.
    if !is_decimal_literal(trimmed) {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

fn has_radix_prefix(src: &str) -> bool {
    ["0x", "0X", "0o", "0O", "0b", "0B"]
        .iter()
        .any(|prefix| src.starts_with(prefix))
}

fn parse_prefixed_radix(src: &str, radix: u32) -> f64 {
    if src.is_empty() {
        return f64::NAN;
    }
    let mut out = 0.0f64;
    for ch in src.chars() {
        let Some(digit) = ch.to_digit(radix) else {
            return f64::NAN;
        };
        out = out * f64::from(radix) + f64::from(digit);
    }
    out
}

fn is_decimal_literal(src: &str) -> bool {
    let bytes = src.as_bytes();
    let mut i = 0usize;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0usize;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }
    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_and_exponent_literals() {
        assert_eq!(parse_js_number("123"), 123.0);
        assert_eq!(parse_js_number(" -12.5 "), -12.5);
        assert_eq!(parse_js_number("12e3"), 12_000.0);
        assert_eq!(parse_js_number(".5"), 0.5);
        assert_eq!(parse_js_number("5."), 5.0);
    }

    #[test]
    fn empty_string_is_zero() {
        assert_eq!(parse_js_number(""), 0.0);
        assert_eq!(parse_js_number("   "), 0.0);
    }

    #[test]
    fn radix_prefixes_and_infinity() {
        assert_eq!(parse_js_number("0x1F"), 31.0);
        assert_eq!(parse_js_number("0b101"), 5.0);
        assert_eq!(parse_js_number("0o17"), 15.0);
        assert!(parse_js_number("-0x1F").is_nan());
        assert_eq!(parse_js_number("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn rejects_rust_only_spellings_and_text() {
        for src in ["inf", "nan", "NaN", "infinity", "1_000", "12,5", "test", "1e", "e5", "."] {
            assert!(parse_js_number(src).is_nan(), "{src} should not be a number");
        }
    }
}
