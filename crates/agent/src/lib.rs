//! Rule-based dialogue policy for the movie recommendation agent
//!
//! Features:
//! - Priority-ordered dispatch over high-level dialogue state tags
//! - Elicitation, recommendation, inform and closing handlers
//! - Example value aggregation for prompts
//! - Injectable random source for deterministic tests

pub mod actions;
pub mod example_values;
pub mod policy;
pub mod random;

pub use example_values::generate_examples;
pub use policy::{ActionHandler, DialoguePolicy, DEFAULT_EXAMPLE_LIMIT};
pub use random::{FixedOrder, RandomSource, StdRandom};

use thiserror::Error;

/// Policy errors
#[derive(Error, Debug)]
pub enum PolicyError {
    /// Policy or ontology set up so that no valid action exists
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The state tracker handed over a state that violates its contract
    #[error("Inconsistent dialogue state: {0}")]
    StateInconsistency(String),
}

impl From<moviebot_config::ConfigError> for PolicyError {
    fn from(err: moviebot_config::ConfigError) -> Self {
        PolicyError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PolicyError>;
