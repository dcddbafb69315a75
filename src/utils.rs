//! String helpers shared by the serializer, the name generator and the CLI

use regex::{Captures, Regex};
use std::sync::OnceLock;

fn uppercase_regex() -> &'static Regex {
    static UPPERCASE: OnceLock<Regex> = OnceLock::new();
    UPPERCASE.get_or_init(|| Regex::new(r"[A-Z]").expect("static pattern"))
}

fn whitespace_regex() -> &'static Regex {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static pattern"))
}

/// Convert a camelCase property key to its hyphenated CSS name.
///
/// Every uppercase letter becomes `-` plus its lowercase form, so
/// `backgroundColor` becomes `background-color` and `WebkitTransition`
/// becomes `-webkit-transition`.
pub fn hyphenate(key: &str) -> String {
    uppercase_regex()
        .replace_all(key, |caps: &Captures| format!("-{}", caps[0].to_lowercase()))
        .into_owned()
}

/// Remove all whitespace, tabs and newlines from a string
pub fn trim_all(input: &str) -> String {
    whitespace_regex().replace_all(input, "").into_owned()
}

/// Render a number the way a style value is written.
///
/// Shortest round-trip digits, integral values without a fraction. Magnitudes
/// at or above `1e21` or below `1e-6` use exponent form with an explicit sign
/// (`1e+21`, `1.5e-7`).
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}Infinity", sign)
    } else if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        let formatted = format!("{:e}", value);
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => formatted,
        }
    } else {
        value.to_string()
    }
}

/// Render an unsigned integer in base 36 using `0-9a-z`
pub fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphenate() {
        assert_eq!(hyphenate("color"), "color");
        assert_eq!(hyphenate("backgroundColor"), "background-color");
        assert_eq!(hyphenate("borderTopLeftRadius"), "border-top-left-radius");
        assert_eq!(hyphenate("WebkitTransition"), "-webkit-transition");
        assert_eq!(hyphenate("--custom-var"), "--custom-var");
    }

    #[test]
    fn test_trim_all() {
        assert_eq!(trim_all("  .foo { color: red; }\n\t.bar {}\n"), ".foo{color:red;}.bar{}");
        assert_eq!(trim_all(""), "");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1.25), "1.25");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn test_format_number_exponent_thresholds() {
        assert_eq!(format_number(1e16), "10000000000000000");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(0.000001), "0.000001");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(99_162_322), "1n1e4y");
    }
}
