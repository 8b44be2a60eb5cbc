//! Error types for Stowage.

use thiserror::Error;

/// Result type alias for Stowage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a pack.
///
/// Ordinary "could not place" outcomes are not errors; they are reported
/// through boolean results and the unfitted item set.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid item provided (non-positive dimension, negative weight).
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Invalid bin model provided.
    #[error("Invalid bin: {0}")]
    InvalidBin(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}
