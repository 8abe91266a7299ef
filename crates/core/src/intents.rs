//! User and agent intent vocabularies

use serde::{Deserialize, Serialize};
use std::fmt;

/// Intents the NLU can attach to a user turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserIntent {
    Acknowledge,
    Deny,
    /// User reveals a preference
    Reveal,
    RemovePreference,
    /// User asks about the item in focus
    Inquire,
    Reject,
    /// User accepts the current recommendation
    Accept,
    ContinueRecommendation,
    Restart,
    Hi,
    Bye,
    /// Utterance could not be understood
    Unk,
}

impl UserIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserIntent::Acknowledge => "ACKNOWLEDGE",
            UserIntent::Deny => "DENY",
            UserIntent::Reveal => "REVEAL",
            UserIntent::RemovePreference => "REMOVE_PREFERENCE",
            UserIntent::Inquire => "INQUIRE",
            UserIntent::Reject => "REJECT",
            UserIntent::Accept => "ACCEPT",
            UserIntent::ContinueRecommendation => "CONTINUE_RECOMMENDATION",
            UserIntent::Restart => "RESTART",
            UserIntent::Hi => "HI",
            UserIntent::Bye => "BYE",
            UserIntent::Unk => "UNK",
        }
    }
}

impl fmt::Display for UserIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intents the agent can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgentIntent {
    Welcome,
    Restart,
    /// Ask the user to constrain a slot
    Elicit,
    /// Report how many items currently match
    CountResults,
    Recommend,
    NoResults,
    /// Answer a question about the item in focus
    Inform,
    ContinueRecommendation,
    Bye,
    /// Universal fallback
    CantHelp,
}

impl AgentIntent {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentIntent::Welcome => "WELCOME",
            AgentIntent::Restart => "RESTART",
            AgentIntent::Elicit => "ELICIT",
            AgentIntent::CountResults => "COUNT_RESULTS",
            AgentIntent::Recommend => "RECOMMEND",
            AgentIntent::NoResults => "NO_RESULTS",
            AgentIntent::Inform => "INFORM",
            AgentIntent::ContinueRecommendation => "CONTINUE_RECOMMENDATION",
            AgentIntent::Bye => "BYE",
            AgentIntent::CantHelp => "CANT_HELP",
        }
    }
}

impl fmt::Display for AgentIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
