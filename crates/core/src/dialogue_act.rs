//! Dialogue acts
//!
//! A dialogue act is an intent tag plus an ordered list of constraints. A turn
//! may carry several acts; they are read as parallel statements and their
//! order is preserved end to end.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constraint::ItemConstraint;
use crate::intents::{AgentIntent, UserIntent};

/// A structured conversational move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueAct<I> {
    /// Intent tag
    pub intent: I,
    /// Constraints, in order
    #[serde(default)]
    pub params: Vec<ItemConstraint>,
}

/// Act produced by the NLU for a user turn
pub type UserDialogueAct = DialogueAct<UserIntent>;

/// Act produced by the policy for an agent turn
pub type AgentDialogueAct = DialogueAct<AgentIntent>;

impl<I> DialogueAct<I> {
    /// Create an act without parameters
    pub fn new(intent: I) -> Self {
        Self {
            intent,
            params: Vec::new(),
        }
    }

    /// Create an act with parameters
    pub fn with_params(intent: I, params: Vec<ItemConstraint>) -> Self {
        Self { intent, params }
    }

    /// Append a parameter
    pub fn push(&mut self, param: ItemConstraint) {
        self.params.push(param);
    }

    pub fn has_params(&self) -> bool {
        !self.params.is_empty()
    }

    /// First parameter constraining `slot`
    pub fn param(&self, slot: &str) -> Option<&ItemConstraint> {
        self.params.iter().find(|p| p.slot == slot)
    }
}

impl<I: PartialEq> DialogueAct<I> {
    pub fn is(&self, intent: I) -> bool {
        self.intent == intent
    }
}

impl<I: fmt::Display> fmt::Display for DialogueAct<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.intent)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str(")")
    }
}

/// Render a turn as `ACT1(...); ACT2(...)`
pub fn format_turn<I: fmt::Display>(acts: &[DialogueAct<I>]) -> String {
    acts.iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
