//! Logical clock that orders every post in the network

use super::types::Timestamp;

/// Monotonic counter shared by all users of one engine.
///
/// The counter is advanced before use, so a fresh clock issues `1` first.
#[derive(Debug, Clone, Default)]
pub struct TimestampCounter {
    last: u64,
}

impl TimestampCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a fixed value; the next timestamp is `last + 1`
    pub fn starting_at(last: u64) -> Self {
        Self { last }
    }

    /// Issue the next timestamp, or `None` once `u64::MAX` has been issued
    pub fn next(&mut self) -> Option<Timestamp> {
        self.last = self.last.checked_add(1)?;
        Some(Timestamp(self.last))
    }

    /// Most recently issued value (or the starting value)
    pub fn last(&self) -> u64 {
        self.last
    }
}
