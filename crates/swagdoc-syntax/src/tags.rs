//! Tag map: `@name value` occurrences collected from one comment block.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Value of one tag name: a single occurrence, or every occurrence in
/// annotation order once the tag is repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    Single(String),
    Multiple(Vec<String>),
}

impl TagValue {
    /// First occurrence.
    pub fn first(&self) -> &str {
        match self {
            TagValue::Single(value) => value,
            TagValue::Multiple(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// Every occurrence, in annotation order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let values: &[String] = match self {
            TagValue::Single(value) => std::slice::from_ref(value),
            TagValue::Multiple(values) => values,
        };
        values.iter().map(String::as_str)
    }

    /// Normalize to a sequence regardless of how many times the tag occurred.
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }

    fn push(&mut self, value: String) {
        if let TagValue::Single(first) = self {
            let first = std::mem::take(first);
            *self = TagValue::Multiple(vec![first]);
        }
        if let TagValue::Multiple(values) = self {
            values.push(value);
        }
    }
}

/// Mapping from tag name to its value(s).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    tags: BTreeMap<String, TagValue>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `name`. Repeats are appended in order.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        match self.tags.entry(name.into()) {
            Entry::Occupied(mut existing) => existing.get_mut().push(value),
            Entry::Vacant(slot) => {
                slot.insert(TagValue::Single(value));
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&TagValue> {
        self.tags.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// First value of `name`, if the tag is present.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(TagValue::first)
    }

    /// All values of `name` in order; empty when the tag is absent.
    pub fn values(&self, name: &str) -> Vec<&str> {
        self.tags
            .get(name)
            .map(|value| value.iter().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
