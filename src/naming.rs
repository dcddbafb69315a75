//! Stable class names derived from style content

use crate::types::{Scalar, StyleMap, StyleValue, CLASS_NAME_SEPARATOR};
use crate::utils::{format_number, to_base36};

/// Rolling 32-bit hash (`hash * 31 + unit` over UTF-16 code units,
/// wrapping at every step), rendered as the base-36 absolute value.
///
/// Not cryptographic; collisions are possible.
pub fn simple_hash(input: &str) -> String {
    let hash = input
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)));
    to_base36(u64::from(hash.unsigned_abs()))
}

/// Order-preserving compact JSON form of a style mapping.
///
/// Numbers are written with [`format_number`], so `1e16` stays
/// `10000000000000000` and `1e21` becomes `1e+21`. Non-finite numbers are
/// written as `null`.
pub fn canonical_string(styles: &StyleMap) -> String {
    let mut out = String::new();
    write_canonical(styles, &mut out);
    out
}

fn write_canonical(styles: &StyleMap, out: &mut String) {
    out.push('{');
    for (index, (key, value)) in styles.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        push_json_string(key, out);
        out.push(':');
        match value {
            StyleValue::Map(map) => write_canonical(map, out),
            StyleValue::Scalar(Scalar::Text(text)) => push_json_string(text, out),
            StyleValue::Scalar(Scalar::Number(number)) if number.is_finite() => {
                out.push_str(&format_number(*number))
            }
            StyleValue::Scalar(Scalar::Number(_)) => out.push_str("null"),
        }
    }
    out.push('}');
}

fn push_json_string(text: &str, out: &mut String) {
    // Serializing a str cannot fail
    out.push_str(&serde_json::to_string(text).unwrap_or_default());
}

/// Build `{prefix}-{component}-{hash}`, leaving out empty parts
pub fn generate_class_name(styles: &StyleMap, prefix: &str, component_name: Option<&str>) -> String {
    let hash = simple_hash(&canonical_string(styles));
    [prefix, component_name.unwrap_or(""), hash.as_str()]
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(CLASS_NAME_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_map;
    use crate::types::DEFAULT_CLASS_PREFIX;

    #[test]
    fn test_simple_hash() {
        assert_eq!(simple_hash("hello"), "1n1e4y");
        assert_eq!(simple_hash("world"), "1vgtci");
        assert_eq!(simple_hash("hello world"), "to5x38");
        assert_eq!(simple_hash(""), "0");
    }

    #[test]
    fn test_simple_hash_wraps_to_32_bits() {
        let long = "a".repeat(200);
        let hash = simple_hash(&long);
        assert!(u64::from_str_radix(&hash, 36).unwrap() <= 1u64 << 31);
        assert_eq!(hash, simple_hash(&long));
    }

    #[test]
    fn test_generate_class_name() {
        let red = style_map! { "color" => "red" };
        let blue = style_map! { "color" => "blue" };

        assert_eq!(generate_class_name(&red, DEFAULT_CLASS_PREFIX, None), "cky-wrg8o2");
        assert_eq!(generate_class_name(&blue, DEFAULT_CLASS_PREFIX, None), "cky-snxwu5");
        assert_eq!(
            generate_class_name(&red, DEFAULT_CLASS_PREFIX, Some("button")),
            "cky-button-wrg8o2"
        );
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        let red = style_map! { "color" => "red" };
        assert_eq!(generate_class_name(&red, "", Some("")), "wrg8o2");
        assert_eq!(generate_class_name(&red, "", Some("card")), "card-wrg8o2");
    }

    #[test]
    fn test_naming_is_order_sensitive() {
        let ab = style_map! { "a" => 1, "b" => 2 };
        let ba = style_map! { "b" => 2, "a" => 1 };

        assert_eq!(
            generate_class_name(&ab, DEFAULT_CLASS_PREFIX, None),
            generate_class_name(&ab.clone(), DEFAULT_CLASS_PREFIX, None)
        );
        assert_ne!(canonical_string(&ab), canonical_string(&ba));
        assert_ne!(
            generate_class_name(&ab, DEFAULT_CLASS_PREFIX, None),
            generate_class_name(&ba, DEFAULT_CLASS_PREFIX, None)
        );
    }

    #[test]
    fn test_canonical_string_nests() {
        let styles = style_map! { "color" => "red", "&:hover" => { "color" => "blue" } };
        assert_eq!(
            canonical_string(&styles),
            r#"{"color":"red","&:hover":{"color":"blue"}}"#
        );
    }

    #[test]
    fn test_canonical_string_numbers() {
        let mut styles = style_map! {
            "a" => 1e21,
            "b" => 1e16,
            "c" => 1e-7,
            "d" => 16,
            "e" => 0.5,
        };
        styles.insert("f", f64::NAN);
        assert_eq!(
            canonical_string(&styles),
            r#"{"a":1e+21,"b":10000000000000000,"c":1e-7,"d":16,"e":0.5,"f":null}"#
        );
    }

    #[test]
    fn test_canonical_string_escapes_text() {
        let styles = style_map! { "content" => "\"a\"\n" };
        assert_eq!(canonical_string(&styles), r#"{"content":"\"a\"\n"}"#);
    }
}
