//! Operation metrics for the social graph engine
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! every call is a no-op.

use ::metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Instant;

pub const USERS_CREATED: &str = "social.users.created";
pub const FRIENDSHIPS_CREATED: &str = "social.friendships.created";
pub const POSTS_CREATED: &str = "social.posts.created";
pub const COMMANDS_EXECUTED: &str = "social.commands.executed";
pub const COMMANDS_REJECTED: &str = "social.commands.rejected";
pub const SEARCH_VISITED: &str = "social.search.visited";
pub const SCRIPT_DURATION_MS: &str = "social.script.duration_ms";

/// Initialize metrics with descriptions
pub fn init_metrics() {
    describe_counter!(USERS_CREATED, "Number of users registered");
    describe_counter!(FRIENDSHIPS_CREATED, "Number of friendships added");
    describe_counter!(POSTS_CREATED, "Number of posts stored");
    describe_counter!(COMMANDS_EXECUTED, "Commands parsed and dispatched");
    describe_counter!(COMMANDS_REJECTED, "Command lines that failed to parse");
    describe_histogram!(SEARCH_VISITED, "Users visited per degrees-of-separation search");
    describe_histogram!(SCRIPT_DURATION_MS, "Script run duration in milliseconds");
}

/// Record a counter metric
pub fn record_counter(name: &'static str, value: u64) {
    counter!(name).increment(value);
}

/// Record a histogram metric
pub fn record_histogram(name: &'static str, value: f64) {
    histogram!(name).record(value);
}

/// Timer for measuring operation duration
pub struct Timer {
    name: &'static str,
    start: Instant,
}

impl Timer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Stop the timer and record the duration in milliseconds
    pub fn stop(self) {
        record_histogram(self.name, self.start.elapsed().as_secs_f64() * 1000.0);
    }
}
