//! Database item records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;

use crate::slots::Slot;

/// A single database record: slot name to value
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item(Map<String, Value>);

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of a slot
    pub fn get(&self, slot: &str) -> Option<&Value> {
        self.0.get(slot)
    }

    pub fn contains(&self, slot: &str) -> bool {
        self.0.contains_key(slot)
    }

    /// Title of the item, if the record has one
    pub fn title(&self) -> Option<&Value> {
        self.get(Slot::Title.as_str())
    }

    /// Textual form of a slot value
    ///
    /// Strings are returned as-is, other scalars through their JSON rendering.
    /// `null` counts as absent.
    pub fn text(&self, slot: &str) -> Option<Cow<'_, str>> {
        match self.get(slot)? {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    pub fn insert(&mut self, slot: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(slot.into(), value.into());
    }

    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Item {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
