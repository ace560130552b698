//! Error types for the social graph core

use thiserror::Error;

/// Result type for social graph operations
pub type SocialResult<T> = Result<T, SocialError>;

/// Conditions the social graph core can detect.
///
/// The engine facade never surfaces these to its callers; it logs them
/// and degrades to "no effect" or an empty result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SocialError {
    /// Referenced username is not registered
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// Username already registered (case-insensitive)
    #[error("User already exists: {0}")]
    DuplicateUser(String),

    /// Friendship already recorded
    #[error("{0} and {1} are already friends")]
    DuplicateEdge(String, String),

    /// A user cannot befriend themselves
    #[error("Cannot add {0} as their own friend")]
    SelfEdge(String),

    /// No friendship path between two users
    #[error("No path between {0} and {1}")]
    NotFound(String, String),

    /// The post clock has issued its last timestamp
    #[error("Post clock exhausted")]
    ClockExhausted,
}
