//! Core traits for the dialogue manager
//!
//! ```text
//! Conversation:
//!   - DialogueState: read-only per-turn snapshot handed to the policy
//! ```

mod dialogue_state;

pub use dialogue_state::DialogueState;
