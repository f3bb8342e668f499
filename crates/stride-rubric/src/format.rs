//! Textual forms of record values.
//!
//! Upstream records are produced by a JavaScript system and configurations
//! were written against its number formatting, so integral floats print
//! without a fraction and numeric parsing accepts a leading numeric prefix.

use serde_json::Value;

/// Format a number the way the capturing system displays it.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }
    let abs = n.abs();
    if !(1e-6..1e21).contains(&abs) {
        return exponential(n);
    }
    if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n}")
    }
}

/// Shortest round-trip mantissa with an explicitly signed exponent:
/// `1e+21`, `-2.5e+22`, `1.5e-7`.
fn exponential(n: f64) -> String {
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => text,
    }
}

/// String form of a resolved value. `Null` has none.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(if let Some(i) = n.as_i64() {
            i.to_string()
        } else if let Some(u) = n.as_u64() {
            u.to_string()
        } else {
            format_number(n.as_f64().unwrap_or(f64::NAN))
        }),
        Value::String(s) => Some(s.clone()),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).ok(),
    }
}

/// Parse the longest numeric prefix of `input`, after leading whitespace.
///
/// `"72"` → 72, `"72 bpm"` → 72, `"-.5e2x"` → -50, `"Infinity"` → ∞,
/// `"n/a"` → `None`.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits + (j - frac_start) > 0 {
            digits += j - frac_start;
            end = j;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut j = end + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            end = j;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_drop_fraction() {
        assert_eq!(format_number(72.0), "72");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(18.5), "18.5");
        assert_eq!(format_number(24.9), "24.9");
    }

    #[test]
    fn exponent_range_matches_capturing_system() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn leading_prefix_parse() {
        assert_eq!(parse_leading_float("72"), Some(72.0));
        assert_eq!(parse_leading_float("  72 bpm"), Some(72.0));
        assert_eq!(parse_leading_float("5."), Some(5.0));
        assert_eq!(parse_leading_float(".5"), Some(0.5));
        assert_eq!(parse_leading_float("-.5e2x"), Some(-50.0));
        assert_eq!(parse_leading_float("1e"), Some(1.0));
        assert_eq!(parse_leading_float("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_leading_float("n/a"), None);
        assert_eq!(parse_leading_float(""), None);
        assert_eq!(parse_leading_float("."), None);
        assert_eq!(parse_leading_float("-"), None);
    }
}
