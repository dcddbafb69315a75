//! Shorthand property expansion
//!
//! Leaf shorthands fan out to their canonical properties; nested scope keys
//! are passed through the key alias table.

use crate::registry::{KeyAliases, PropertyAliases};
use crate::types::{StyleMap, StyleValue};

/// Expand shorthand keys in `styles`, recursing into nested scopes.
///
/// Expanded properties take the shorthand's position, in the order the
/// alias lists them. The input is left untouched.
pub fn expand(styles: &StyleMap, properties: &PropertyAliases, keys: &KeyAliases) -> StyleMap {
    let mut expanded = StyleMap::with_capacity(styles.len());

    for (key, value) in styles.iter() {
        match value {
            StyleValue::Map(nested) => {
                let scope_key = keys.resolve(key);
                if scope_key != key {
                    log::trace!("aliased scope key {} -> {}", key, scope_key);
                }
                expanded.insert(scope_key, StyleValue::Map(expand(nested, properties, keys)));
            }
            StyleValue::Scalar(_) => match properties.get(key) {
                Some(targets) => {
                    log::trace!("expanded {} -> {:?}", key, targets);
                    for target in targets {
                        expanded.insert(target.clone(), value.clone());
                    }
                }
                None => expanded.insert(key.clone(), value.clone()),
            },
        }
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_map;

    #[test]
    fn test_expand_shorthands_in_place() {
        let styles = style_map! { "color" => "red", "mx" => 4, "display" => "flex" };
        let expanded = expand(&styles, &PropertyAliases::with_defaults(), &KeyAliases::new());

        let expected = style_map! {
            "color" => "red",
            "marginLeft" => 4,
            "marginRight" => 4,
            "display" => "flex",
        };
        assert_eq!(expanded, expected);
    }

    #[test]
    fn test_expand_recurses_and_aliases_scope_keys() {
        let mut keys = KeyAliases::new();
        keys.insert("@tablet", "@media (min-width: 768px)");
        // Key aliases only rename scopes, never leaves
        keys.insert("p", "should-not-apply");

        let styles = style_map! {
            "p" => "8px",
            "@tablet" => { "py" => "$medium" },
        };
        let expanded = expand(&styles, &PropertyAliases::with_defaults(), &keys);

        let expected = style_map! {
            "padding" => "8px",
            "@media (min-width: 768px)" => {
                "paddingTop" => "$medium",
                "paddingBottom" => "$medium",
            },
        };
        assert_eq!(expanded, expected);
    }

    #[test]
    fn test_scope_key_matching_shorthand_is_not_expanded() {
        let styles = style_map! { "m" => { "color" => "red" } };
        let expanded = expand(&styles, &PropertyAliases::with_defaults(), &KeyAliases::new());
        assert_eq!(expanded, styles);
    }

    #[test]
    fn test_empty_alias_list_drops_key() {
        let mut properties = PropertyAliases::new();
        properties.insert("noop", Vec::<String>::new());

        let styles = style_map! { "noop" => 1, "color" => "red" };
        let expanded = expand(&styles, &properties, &KeyAliases::new());
        assert_eq!(expanded, style_map! { "color" => "red" });
    }

    #[test]
    fn test_expand_is_idempotent_without_shorthands() {
        let properties = PropertyAliases::with_defaults();
        let keys = KeyAliases::new();
        let styles = style_map! {
            "margin" => 0,
            "&:hover" => { "padding" => "4px", "span" => { "color" => "red" } },
        };

        let once = expand(&styles, &properties, &keys);
        let twice = expand(&once, &properties, &keys);
        assert_eq!(once, twice);
        assert_eq!(once, styles);
    }

    #[test]
    fn test_expand_does_not_mutate_input() {
        let styles = style_map! { "px" => 2 };
        let snapshot = styles.clone();
        let _ = expand(&styles, &PropertyAliases::with_defaults(), &KeyAliases::new());
        assert_eq!(styles, snapshot);
    }
}
