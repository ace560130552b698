//! Type definitions for users, posts and query limits

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle for a registered user
///
/// Identities are dense indices handed out by the registry in creation
/// order and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub usize);

impl UserId {
    /// Get the underlying index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user#{}", self.0)
    }
}

impl From<usize> for UserId {
    fn from(index: usize) -> Self {
        UserId(index)
    }
}

/// Logical post timestamp issued by the shared counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How many posts a retrieval should return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostLimit {
    /// Every post in the store
    All,
    /// At most this many posts
    AtMost(usize),
}

impl PostLimit {
    /// Raw value that requests every post
    pub const UNBOUNDED: i64 = -1;

    /// Interpret a raw integer count.
    ///
    /// `-1` is unbounded; any other negative value yields nothing.
    pub fn from_raw(n: i64) -> Self {
        if n == Self::UNBOUNDED {
            PostLimit::All
        } else if n < 0 {
            PostLimit::AtMost(0)
        } else {
            PostLimit::AtMost(usize::try_from(n).unwrap_or(usize::MAX))
        }
    }

    /// Whether `taken` items already satisfy this limit
    pub fn is_satisfied(&self, taken: usize) -> bool {
        match self {
            PostLimit::All => false,
            PostLimit::AtMost(n) => taken >= *n,
        }
    }
}

impl From<usize> for PostLimit {
    fn from(n: usize) -> Self {
        PostLimit::AtMost(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_limit_from_raw() {
        assert_eq!(PostLimit::from_raw(-1), PostLimit::All);
        assert_eq!(PostLimit::from_raw(-7), PostLimit::AtMost(0));
        assert_eq!(PostLimit::from_raw(0), PostLimit::AtMost(0));
        assert_eq!(PostLimit::from_raw(3), PostLimit::AtMost(3));
    }

    #[test]
    fn test_post_limit_satisfied() {
        assert!(!PostLimit::All.is_satisfied(1_000));
        assert!(PostLimit::AtMost(0).is_satisfied(0));
        assert!(!PostLimit::AtMost(2).is_satisfied(1));
        assert!(PostLimit::AtMost(2).is_satisfied(2));
    }

    #[test]
    fn test_user_id_display() {
        assert_eq!(format!("{}", UserId(4)), "user#4");
        assert_eq!(UserId::from(9).index(), 9);
    }
}
