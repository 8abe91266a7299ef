//! Core error types

use thiserror::Error;

/// Errors raised while building or interpreting core dialogue types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown state tag: {0}")]
    UnknownStateTag(String),

    #[error("Invalid dialogue state snapshot: {0}")]
    InvalidSnapshot(String),
}

pub type Result<T> = std::result::Result<T, Error>;
