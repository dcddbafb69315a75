//! Design token tree and `$path.to.value` resolution

use crate::types::TOKEN_SIGIL;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A token is either a leaf value or a nested group of tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Value(String),
    Group(TokenTree),
}

impl TokenValue {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&TokenTree> {
        match self {
            Self::Group(group) => Some(group),
            Self::Value(_) => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(value: String) -> Self {
        Self::Value(value)
    }
}

impl From<TokenTree> for TokenValue {
    fn from(group: TokenTree) -> Self {
        Self::Group(group)
    }
}

/// Hierarchical token storage keyed by path segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenTree {
    entries: HashMap<String, TokenValue>,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a single segment
    pub fn with(mut self, segment: impl Into<String>, value: impl Into<TokenValue>) -> Self {
        self.entries.insert(segment.into(), value.into());
        self
    }

    pub fn get(&self, segment: &str) -> Option<&TokenValue> {
        self.entries.get(segment)
    }

    /// Set a top-level segment, replacing whatever was there
    pub fn set(&mut self, segment: impl Into<String>, value: impl Into<TokenValue>) {
        self.entries.insert(segment.into(), value.into());
    }

    /// Insert a leaf at a dotted path, creating intermediate groups.
    ///
    /// A leaf sitting where a group is needed is replaced by the group.
    pub fn insert(&mut self, path: &str, value: impl Into<String>) {
        let mut segments = path.split('.').peekable();
        let mut node = self;

        while let Some(segment) = segments.next() {
            if segments.peek().is_none() {
                node.entries
                    .insert(segment.to_string(), TokenValue::Value(value.into()));
                return;
            }

            let entry = node
                .entries
                .entry(segment.to_string())
                .or_insert_with(|| TokenValue::Group(TokenTree::new()));
            if !matches!(entry, TokenValue::Group(_)) {
                *entry = TokenValue::Group(TokenTree::new());
            }
            let TokenValue::Group(group) = entry else {
                return;
            };
            node = group;
        }
    }

    /// Deep-merge another tree into this one; leaves from `other` win
    pub fn merge(&mut self, other: &TokenTree) {
        for (segment, value) in &other.entries {
            match (self.entries.get_mut(segment), value) {
                (Some(TokenValue::Group(existing)), TokenValue::Group(incoming)) => {
                    existing.merge(incoming);
                }
                _ => {
                    self.entries.insert(segment.clone(), value.clone());
                }
            }
        }
    }

    pub fn remove(&mut self, segment: &str) -> Option<TokenValue> {
        self.entries.remove(segment)
    }

    /// Walk a dotted path. Every segment must name an entry of a group.
    pub fn lookup(&self, path: &str) -> Option<&TokenValue> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.entries.get(first)?;

        for segment in segments {
            current = current.as_group()?.entries.get(segment)?;
        }

        Some(current)
    }

    /// Empty the tree in place
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps a CSS property to the token group its references are rooted at
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenGroups {
    groups: HashMap<String, String>,
}

impl TokenGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// `color` resolves under `color`, `padding` and `margin` under `spacing`
    pub fn with_defaults() -> Self {
        let mut groups = Self::new();
        groups.insert("color", "color");
        groups.insert("padding", "spacing");
        groups.insert("margin", "spacing");
        groups
    }

    pub fn insert(&mut self, property: impl Into<String>, group: impl Into<String>) {
        self.groups.insert(property.into(), group.into());
    }

    pub fn extend<I, K, V>(&mut self, groups: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (property, group) in groups {
            self.insert(property, group);
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.groups.get(property).map(String::as_str)
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.groups.remove(property)
    }

    /// Empty the table in place
    pub fn clear(&mut self) {
        self.groups.clear();
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Build the lookup path for a token reference, or `None` when the sigil is missing
pub fn token_path(groups: &TokenGroups, property: &str, reference: &str) -> Option<String> {
    let path = reference.strip_prefix(TOKEN_SIGIL)?;
    Some(match groups.get(property) {
        Some(group) => format!("{}.{}", group, path),
        None => path.to_string(),
    })
}

/// Resolve `reference` for `property`.
///
/// Only references starting with `$` are resolved; the walk must end on a
/// leaf value. Nothing is cached.
pub fn resolve_token<'a>(
    tokens: &'a TokenTree,
    groups: &TokenGroups,
    property: &str,
    reference: &str,
) -> Option<&'a str> {
    let path = token_path(groups, property, reference)?;
    let resolved = tokens.lookup(&path).and_then(TokenValue::as_value);
    log::trace!("token {} for {} -> {:?}", reference, property, resolved);
    resolved
}
