//! Constrainable information need (CIN) frame
//!
//! Owned and updated by the state tracker; the policy only reads it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Slot name to "is filled" mapping, iterated in slot-name order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frame(BTreeMap<String, bool>);

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `slot` is filled; `None` when the slot is not part of the CIN
    pub fn is_filled(&self, slot: &str) -> Option<bool> {
        self.0.get(slot).copied()
    }

    /// Unfilled slots, in key order
    pub fn unfilled(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, filled)| !**filled)
            .map(|(slot, _)| slot.as_str())
    }

    pub fn slots(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|k| k.as_str())
    }

    pub fn set(&mut self, slot: impl Into<String>, filled: bool) {
        self.0.insert(slot.into(), filled);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, bool)> for Frame {
    fn from_iter<T: IntoIterator<Item = (K, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfilled_in_key_order() {
        let frame: Frame = [("year", false), ("genres", false), ("actors", true)]
            .into_iter()
            .collect();
        assert_eq!(frame.unfilled().collect::<Vec<_>>(), vec!["genres", "year"]);
        assert_eq!(frame.is_filled("actors"), Some(true));
        assert_eq!(frame.is_filled("plot"), None);
    }
}
