//! Core types for the movie recommendation dialogue manager
//!
//! This crate provides the values exchanged between the dialogue manager's
//! collaborators:
//! - Dialogue acts, item constraints and operators
//! - User and agent intent vocabularies
//! - Item records and the CIN frame
//! - High-level state tags and the per-turn state snapshot
//! - Error types

pub mod constraint;
pub mod context;
pub mod dialogue_act;
pub mod error;
pub mod frame;
pub mod intents;
pub mod item;
pub mod slots;
pub mod state;
pub mod traits;

pub use constraint::{ItemConstraint, Operator};
pub use context::{DialogueContext, RecommendedItem};
pub use dialogue_act::{format_turn, AgentDialogueAct, DialogueAct, UserDialogueAct};
pub use error::{Error, Result};
pub use frame::Frame;
pub use intents::{AgentIntent, UserIntent};
pub use item::Item;
pub use slots::Slot;
pub use state::{DialogueStateSnapshot, StateTag};
pub use traits::DialogueState;
