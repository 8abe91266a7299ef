//! Dialogue context: what has been recommended so far in the session

use serde::{Deserialize, Serialize};

use crate::intents::UserIntent;

/// An item the agent already recommended, with the user's reaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedItem {
    pub title: String,
    /// How the user reacted, if they did
    #[serde(default)]
    pub feedback: Option<UserIntent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DialogueContext {
    #[serde(default)]
    pub recommended_items: Vec<RecommendedItem>,
}

impl DialogueContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a recommendation (no-op if already recorded)
    pub fn add_recommendation(&mut self, title: impl Into<String>) {
        let title = title.into();
        if !self.is_recommended(&title) {
            self.recommended_items.push(RecommendedItem {
                title,
                feedback: None,
            });
        }
    }

    /// Attach the user's reaction to a previous recommendation
    pub fn record_feedback(&mut self, title: &str, feedback: UserIntent) {
        if let Some(item) = self.recommended_items.iter_mut().find(|i| i.title == title) {
            item.feedback = Some(feedback);
        }
    }

    pub fn is_recommended(&self, title: &str) -> bool {
        self.recommended_items.iter().any(|i| i.title == title)
    }

    pub fn len(&self) -> usize {
        self.recommended_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommended_items.is_empty()
    }
}
