//! Error types for the skiplist engine.
//!
//! Per the engine's design, not-found and duplicate-key conditions are
//! not errors — they are conveyed as `Option`/`bool` at the call site.
//! What's left here is the handful of things that are genuinely
//! exceptional: a malformed configuration.

use thiserror::Error;

/// The error type for operations exposed by `skiplist-core` and
/// `skiplist-engine`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The supplied `ListConfig` cannot be used to build a list.
    #[error("invalid list configuration: {0}")]
    InvalidConfig(String),
}

/// A specialized `Result` for skiplist operations.
pub type Result<T> = std::result::Result<T, Error>;
