//! Read-only dialogue state contract
//!
//! The state tracker owns the state and rebuilds it every turn. The policy
//! only ever sees it through `&self` accessors, so it cannot write back into
//! the tracker's frame, results or requestable slots.

use crate::dialogue_act::{AgentDialogueAct, UserDialogueAct};
use crate::frame::Frame;
use crate::item::Item;
use crate::state::StateTag;

/// Per-turn view of the conversation consumed by the dialogue policy
pub trait DialogueState {
    /// Acts recognised in the last user turn
    fn last_user_dacts(&self) -> &[UserDialogueAct];

    /// Acts the agent produced in its previous turn
    fn last_agent_dacts(&self) -> &[AgentDialogueAct];

    /// Slots the agent may elicit, in preference order
    fn agent_requestable(&self) -> &[String];

    /// Constrainable information need
    fn frame_cin(&self) -> &Frame;

    /// Threshold of unfilled CIN slots below which the agent stops eliciting
    fn slot_left_unasked(&self) -> usize;

    /// Items matching the current constraints
    fn database_result(&self) -> &[Item];

    /// Item currently being discussed
    fn item_in_focus(&self) -> Option<&Item>;

    fn agent_req_filled(&self) -> bool;

    fn agent_should_make_offer(&self) -> bool;

    /// Active high-level state tags, in canonical order
    fn active_states(&self) -> Vec<StateTag>;
}
