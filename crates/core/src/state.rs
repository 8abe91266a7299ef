//! High-level state tags and the per-turn dialogue state snapshot

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dialogue_act::{AgentDialogueAct, UserDialogueAct};
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::item::Item;
use crate::traits::DialogueState;

/// Phase of the recommendation dialogue
///
/// Several tags can be active at once; the policy resolves them by a fixed
/// priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTag {
    /// Agent requirements are satisfied and it may elicit further preferences
    AgentReqFilled,
    /// Enough constraints to query the database
    AgentCanLookup,
    AgentMadePartialOffer,
    AgentShouldMakeOffer,
    AgentMadeOffer,
    AgentOfferNoResults,
    AtTerminalState,
}

impl StateTag {
    /// All tags in canonical order
    pub const ALL: [StateTag; 7] = [
        StateTag::AgentReqFilled,
        StateTag::AgentCanLookup,
        StateTag::AgentMadePartialOffer,
        StateTag::AgentShouldMakeOffer,
        StateTag::AgentMadeOffer,
        StateTag::AgentOfferNoResults,
        StateTag::AtTerminalState,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StateTag::AgentReqFilled => "agent_req_filled",
            StateTag::AgentCanLookup => "agent_can_lookup",
            StateTag::AgentMadePartialOffer => "agent_made_partial_offer",
            StateTag::AgentShouldMakeOffer => "agent_should_make_offer",
            StateTag::AgentMadeOffer => "agent_made_offer",
            StateTag::AgentOfferNoResults => "agent_offer_no_results",
            StateTag::AtTerminalState => "at_terminal_state",
        }
    }
}

impl fmt::Display for StateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StateTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StateTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| Error::UnknownStateTag(s.to_string()))
    }
}

/// Per-turn dialogue state as produced by the state tracker
///
/// One boolean per [`StateTag`]; `active_states` reports the set ones in
/// canonical order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueStateSnapshot {
    pub last_user_dacts: Vec<UserDialogueAct>,
    pub last_agent_dacts: Vec<AgentDialogueAct>,
    /// Slots the agent may elicit; index 0 opens every elicitation
    pub agent_requestable: Vec<String>,
    #[serde(rename = "frame_CIN", alias = "frame_cin")]
    pub frame_cin: Frame,
    /// Minimum number of unfilled CIN slots before the agent elicits more
    pub slot_left_unasked: usize,
    pub database_result: Vec<Item>,
    pub item_in_focus: Option<Item>,

    pub agent_req_filled: bool,
    pub agent_can_lookup: bool,
    pub agent_made_partial_offer: bool,
    pub agent_should_make_offer: bool,
    pub agent_made_offer: bool,
    pub agent_offer_no_results: bool,
    pub at_terminal_state: bool,
}

impl DialogueStateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a given tag is set
    pub fn flag(&self, tag: StateTag) -> bool {
        match tag {
            StateTag::AgentReqFilled => self.agent_req_filled,
            StateTag::AgentCanLookup => self.agent_can_lookup,
            StateTag::AgentMadePartialOffer => self.agent_made_partial_offer,
            StateTag::AgentShouldMakeOffer => self.agent_should_make_offer,
            StateTag::AgentMadeOffer => self.agent_made_offer,
            StateTag::AgentOfferNoResults => self.agent_offer_no_results,
            StateTag::AtTerminalState => self.at_terminal_state,
        }
    }

    pub fn set_flag(&mut self, tag: StateTag, value: bool) {
        let slot = match tag {
            StateTag::AgentReqFilled => &mut self.agent_req_filled,
            StateTag::AgentCanLookup => &mut self.agent_can_lookup,
            StateTag::AgentMadePartialOffer => &mut self.agent_made_partial_offer,
            StateTag::AgentShouldMakeOffer => &mut self.agent_should_make_offer,
            StateTag::AgentMadeOffer => &mut self.agent_made_offer,
            StateTag::AgentOfferNoResults => &mut self.agent_offer_no_results,
            StateTag::AtTerminalState => &mut self.at_terminal_state,
        };
        *slot = value;
    }

    /// Check the snapshot invariants the policy relies on
    pub fn validate(&self) -> Result<()> {
        if self.agent_requestable.is_empty() {
            return Err(Error::InvalidSnapshot(
                "agent_requestable must not be empty".to_string(),
            ));
        }
        if self.agent_should_make_offer && self.item_in_focus.is_none() {
            return Err(Error::InvalidSnapshot(
                "agent_should_make_offer is set but no item is in focus".to_string(),
            ));
        }
        if self.agent_made_offer && self.item_in_focus.is_none() {
            return Err(Error::InvalidSnapshot(
                "agent_made_offer is set but no item is in focus".to_string(),
            ));
        }
        Ok(())
    }
}

impl DialogueState for DialogueStateSnapshot {
    fn last_user_dacts(&self) -> &[UserDialogueAct] {
        &self.last_user_dacts
    }

    fn last_agent_dacts(&self) -> &[AgentDialogueAct] {
        &self.last_agent_dacts
    }

    fn agent_requestable(&self) -> &[String] {
        &self.agent_requestable
    }

    fn frame_cin(&self) -> &Frame {
        &self.frame_cin
    }

    fn slot_left_unasked(&self) -> usize {
        self.slot_left_unasked
    }

    fn database_result(&self) -> &[Item] {
        &self.database_result
    }

    fn item_in_focus(&self) -> Option<&Item> {
        self.item_in_focus.as_ref()
    }

    fn agent_req_filled(&self) -> bool {
        self.agent_req_filled
    }

    fn agent_should_make_offer(&self) -> bool {
        self.agent_should_make_offer
    }

    fn active_states(&self) -> Vec<StateTag> {
        StateTag::ALL
            .into_iter()
            .filter(|tag| self.flag(*tag))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_tag_round_trip_names() {
        for tag in StateTag::ALL {
            assert_eq!(tag.as_str().parse::<StateTag>().unwrap(), tag);
        }
        assert_eq!(
            "agent_is_confused".parse::<StateTag>(),
            Err(Error::UnknownStateTag("agent_is_confused".to_string()))
        );
    }

    #[test]
    fn test_active_states_in_canonical_order() {
        let mut snapshot = DialogueStateSnapshot::new();
        snapshot.at_terminal_state = true;
        snapshot.agent_req_filled = true;
        snapshot.set_flag(StateTag::AgentMadeOffer, true);

        assert_eq!(
            snapshot.active_states(),
            vec![
                StateTag::AgentReqFilled,
                StateTag::AgentMadeOffer,
                StateTag::AtTerminalState
            ]
        );
    }

    #[test]
    fn test_snapshot_from_yaml() {
        let yaml = r#"
last_user_dacts:
  - intent: REVEAL
    params:
      - slot: genres
        op: eq
        value: comedy
agent_requestable: [genres, actors]
frame_CIN:
  genres: true
  actors: false
  title: false
slot_left_unasked: 1
database_result:
  - title: Groundhog Day
    genres: comedy, fantasy
agent_req_filled: true
"#;
        let snapshot: DialogueStateSnapshot = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(snapshot.frame_cin().is_filled("genres"), Some(true));
        assert_eq!(snapshot.database_result().len(), 1);
        assert_eq!(snapshot.active_states(), vec![StateTag::AgentReqFilled]);
        assert!(snapshot.item_in_focus().is_none());
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_requestable() {
        let snapshot = DialogueStateSnapshot::new();
        assert!(matches!(snapshot.validate(), Err(Error::InvalidSnapshot(_))));
    }
}
