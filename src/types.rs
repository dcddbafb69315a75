//! Core types and constants for the style compiler

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

// Key and value prefixes
pub const TOKEN_SIGIL: char = '$';
pub const AMPERSAND_PREFIX: char = '&';
pub const AT_RULE_PREFIX: char = '@';

// Class naming
pub const DEFAULT_CLASS_PREFIX: &str = "cky";
pub const CLASS_NAME_SEPARATOR: &str = "-";

// Emitted for token references that do not resolve
pub const UNRESOLVED_VALUE: &str = "undefined";

/// A declaration value: either text or a number
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
}

impl Scalar {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Number(_) => None,
        }
    }

    /// Text values starting with `$` are token references
    pub fn is_token_reference(&self) -> bool {
        self.as_text()
            .map_or(false, |text| text.starts_with(TOKEN_SIGIL))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => f.write_str(&crate::utils::format_number(*number)),
        }
    }
}

/// A value in a style mapping
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Scalar(Scalar),
    Map(StyleMap),
}

impl StyleValue {
    pub fn as_map(&self) -> Option<&StyleMap> {
        match self {
            Self::Map(map) => Some(map),
            Self::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            Self::Map(_) => None,
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Scalar(Scalar::Text(value.to_string()))
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Scalar(Scalar::Text(value))
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Scalar(Scalar::Number(value))
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        Self::Scalar(Scalar::Number(f64::from(value)))
    }
}

impl From<StyleMap> for StyleValue {
    fn from(value: StyleMap) -> Self {
        Self::Map(value)
    }
}

/// An ordered style mapping.
///
/// Keys are unique; insertion order decides both the order in which
/// declarations and rules are emitted and the generated class name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    entries: Vec<(String, StyleValue)>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<StyleValue> {
        let index = self.entries.iter().position(|(existing, _)| existing == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Layer `other` on top of this mapping: its values win, first positions are kept
    pub fn merge(&mut self, other: &StyleMap) {
        for (key, value) in other.iter() {
            self.insert(key.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<StyleValue>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Build a [`StyleMap`] from `key => value` pairs, nesting with inner braces.
///
/// ```
/// use stylec::style_map;
///
/// let styles = style_map! {
///     "color" => "red",
///     "&:hover" => { "color" => "blue" },
/// };
/// assert_eq!(styles.len(), 2);
/// ```
#[macro_export]
macro_rules! style_map {
    (@value { $($inner:tt)* }) => { $crate::StyleValue::Map($crate::style_map!($($inner)*)) };
    (@value $value:expr) => { $crate::StyleValue::from($value) };
    () => { $crate::StyleMap::new() };
    ($($key:expr => $value:tt),+ $(,)?) => {{
        let mut map = $crate::StyleMap::new();
        $( map.insert($key, $crate::style_map!(@value $value)); )+
        map
    }};
}

// Canonical serialization: a JSON object in insertion order
impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Number(number) => {
                if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
                    serializer.serialize_i64(*number as i64)
                } else {
                    serializer.serialize_f64(*number)
                }
            }
        }
    }
}

impl Serialize for StyleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for StyleMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct StyleValueVisitor;

impl<'de> Visitor<'de> for StyleValueVisitor {
    type Value = StyleValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, a number, or a nested style object")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<StyleValue, E> {
        Ok(StyleValue::from(value))
    }

    fn visit_string<E: de::Error>(self, value: String) -> std::result::Result<StyleValue, E> {
        Ok(StyleValue::from(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> std::result::Result<StyleValue, E> {
        Ok(StyleValue::Scalar(Scalar::Number(value as f64)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<StyleValue, E> {
        Ok(StyleValue::Scalar(Scalar::Number(value as f64)))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> std::result::Result<StyleValue, E> {
        Ok(StyleValue::Scalar(Scalar::Number(value)))
    }

    fn visit_map<A: MapAccess<'de>>(self, access: A) -> std::result::Result<StyleValue, A::Error> {
        StyleMapVisitor.visit_map(access).map(StyleValue::Map)
    }
}

struct StyleMapVisitor;

impl<'de> Visitor<'de> for StyleMapVisitor {
    type Value = StyleMap;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a style object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<StyleMap, A::Error> {
        let mut map = StyleMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, StyleValue>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de> Deserialize<'de> for StyleValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(StyleValueVisitor)
    }
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(StyleMapVisitor)
    }
}
