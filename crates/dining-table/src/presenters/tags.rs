//! HTML tag attribute configuration.
//!
//! A [`TagsConfiguration`] holds one [`TagConfiguration`] per table tag.
//! Configurations are layered (presenter defaults, presenter options, table
//! callback, row callback, column options) with [`Merge::merge`], which
//! overlays keys without touching either input.
//!
//! ```rust
//! use dining_table::presenters::{Merge, TagsConfiguration};
//!
//! let mut defaults = TagsConfiguration::new();
//! defaults.table.set("class", "a");
//!
//! let mut table = TagsConfiguration::new();
//! table.table.set("id", "x");
//!
//! let mut column = TagsConfiguration::new();
//! column.table.set("class", "b");
//!
//! let merged = defaults.merge(&table).merge(&column);
//! assert_eq!(merged.table.get("class"), Some("b"));
//! assert_eq!(merged.table.get("id"), Some("x"));
//! ```

use super::Merge;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The tags a table is built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Table,
    Thead,
    Tbody,
    Tfoot,
    Tr,
    Th,
    Td,
}

impl Tag {
    /// All tags, in document order.
    pub const ALL: [Tag; 7] = [
        Tag::Table,
        Tag::Thead,
        Tag::Tbody,
        Tag::Tfoot,
        Tag::Tr,
        Tag::Th,
        Tag::Td,
    ];

    /// The element name.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Table => "table",
            Tag::Thead => "thead",
            Tag::Tbody => "tbody",
            Tag::Tfoot => "tfoot",
            Tag::Tr => "tr",
            Tag::Th => "th",
            Tag::Td => "td",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attributes for a single tag, in insertion order.
///
/// Setting an existing key replaces its value but keeps its position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TagConfiguration {
    attributes: IndexMap<String, String>,
}

impl TagConfiguration {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an attribute value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an attribute value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Removes an attribute, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.attributes.shift_remove(key)
    }

    /// Returns true if the attribute is present.
    pub fn contains(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    /// The `class` attribute.
    pub fn class(&self) -> Option<&str> {
        self.get("class")
    }

    /// Sets the `class` attribute.
    pub fn set_class(&mut self, class: impl Into<String>) -> &mut Self {
        self.set("class", class)
    }

    /// Appends a class name, separated by a space from any existing ones.
    pub fn add_class(&mut self, class: &str) -> &mut Self {
        let joined = match self.class() {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_class(joined)
    }

    /// Overlays `overrides` onto this configuration in place.
    pub fn merge_in(&mut self, overrides: &TagConfiguration) -> &mut Self {
        for (key, value) in &overrides.attributes {
            self.attributes.insert(key.clone(), value.clone());
        }
        self
    }

    /// Iterates over attributes in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Merge for TagConfiguration {
    fn merge(&self, overrides: &Self) -> Self {
        let mut merged = self.clone();
        merged.merge_in(overrides);
        merged
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TagConfiguration {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        TagConfiguration {
            attributes: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Attribute values accepted when deserializing.
///
/// Scalars are stringified and lists of class names are joined by a space.
#[derive(Deserialize)]
#[serde(untagged)]
enum AttributeValue {
    Text(String),
    Flag(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    List(Vec<String>),
}

impl From<AttributeValue> for String {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Text(s) => s,
            AttributeValue::Flag(b) => b.to_string(),
            AttributeValue::Integer(n) => n.to_string(),
            AttributeValue::Unsigned(n) => n.to_string(),
            AttributeValue::Float(n) => n.to_string(),
            AttributeValue::List(items) => items.join(" "),
        }
    }
}

impl<'de> Deserialize<'de> for TagConfiguration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Null values are skipped rather than rendered as empty attributes.
        let raw = IndexMap::<String, Option<AttributeValue>>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, String::from(v))))
            .collect())
    }
}

/// Attribute configuration for every table tag.
///
/// All seven slots always exist; an empty slot renders no attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagsConfiguration {
    pub table: TagConfiguration,
    pub thead: TagConfiguration,
    pub tbody: TagConfiguration,
    pub tfoot: TagConfiguration,
    pub tr: TagConfiguration,
    pub th: TagConfiguration,
    pub td: TagConfiguration,
}

impl TagsConfiguration {
    /// Creates a configuration with seven empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot for a tag.
    pub fn get(&self, tag: Tag) -> &TagConfiguration {
        match tag {
            Tag::Table => &self.table,
            Tag::Thead => &self.thead,
            Tag::Tbody => &self.tbody,
            Tag::Tfoot => &self.tfoot,
            Tag::Tr => &self.tr,
            Tag::Th => &self.th,
            Tag::Td => &self.td,
        }
    }

    /// Returns the slot for a tag, mutably.
    pub fn get_mut(&mut self, tag: Tag) -> &mut TagConfiguration {
        match tag {
            Tag::Table => &mut self.table,
            Tag::Thead => &mut self.thead,
            Tag::Tbody => &mut self.tbody,
            Tag::Tfoot => &mut self.tfoot,
            Tag::Tr => &mut self.tr,
            Tag::Th => &mut self.th,
            Tag::Td => &mut self.td,
        }
    }

    /// Overlays `overrides` onto every slot in place.
    pub fn merge_in(&mut self, overrides: &TagsConfiguration) -> &mut Self {
        for tag in Tag::ALL {
            self.get_mut(tag).merge_in(overrides.get(tag));
        }
        self
    }

    /// Returns true if no slot has any attribute.
    pub fn is_empty(&self) -> bool {
        Tag::ALL.iter().all(|tag| self.get(*tag).is_empty())
    }
}

impl Merge for TagsConfiguration {
    fn merge(&self, overrides: &Self) -> Self {
        let mut merged = self.clone();
        merged.merge_in(overrides);
        merged
    }
}
