//! Social graph engine: the facade over users, friendships and posts
//!
//! Every operation here is best effort. Unknown users, duplicate
//! friendships and the like are logged at `debug` and turn into "no effect"
//! or an empty result; nothing is reported as an error to the caller.

use super::clock::TimestampCounter;
use super::errors::SocialError;
use super::graph::FriendGraph;
use super::registry::UserRegistry;
use super::types::{PostLimit, Timestamp, UserId};
use crate::config::EngineConfig;
use crate::metrics::{self, FRIENDSHIPS_CREATED, POSTS_CREATED, SEARCH_VISITED, USERS_CREATED};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, trace, warn};

/// In-memory social network
#[derive(Debug, Clone, Default)]
pub struct SocialGraphEngine {
    registry: UserRegistry,
    graph: FriendGraph,
    clock: TimestampCounter,
}

impl SocialGraphEngine {
    /// Create an empty network whose first post gets timestamp 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty network using a specific post clock
    pub fn with_counter(clock: TimestampCounter) -> Self {
        Self {
            registry: UserRegistry::new(),
            graph: FriendGraph::new(),
            clock,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_counter(TimestampCounter::starting_at(config.initial_timestamp))
    }

    /// Register a user. Returns `false` if the name (case-insensitively) exists.
    pub fn create_user(&mut self, name: &str) -> bool {
        let Some(id) = self.registry.create_user(name) else {
            debug!(err = %SocialError::DuplicateUser(name.to_string()), "user ignored");
            return false;
        };
        let vertex = self.graph.add_vertex();
        debug_assert_eq!(id, vertex, "registry and graph identities diverged");

        metrics::record_counter(USERS_CREATED, 1);
        debug!(user = name, id = id.index(), "user created");
        true
    }

    /// Befriend two users. Returns `true` only when a new friendship was recorded.
    pub fn add_friend(&mut self, a: &str, b: &str) -> bool {
        let (Some(id_a), Some(id_b)) = (self.lookup(a), self.lookup(b)) else {
            return false;
        };

        if !self.graph.add_edge(id_a, id_b) {
            let err = if id_a == id_b {
                SocialError::SelfEdge(a.to_string())
            } else {
                SocialError::DuplicateEdge(a.to_string(), b.to_string())
            };
            debug!(%err, "friendship ignored");
            return false;
        }

        metrics::record_counter(FRIENDSHIPS_CREATED, 1);
        debug!(user_a = a, user_b = b, "friendship added");
        true
    }

    pub fn are_friends(&self, a: &str, b: &str) -> bool {
        match (self.lookup(a), self.lookup(b)) {
            (Some(id_a), Some(id_b)) => self.graph.are_friends(id_a, id_b),
            _ => false,
        }
    }

    /// Display names of the user's friends in alphabetical order
    pub fn list_friends(&self, name: &str) -> Vec<String> {
        let Some(id) = self.lookup(name) else {
            return Vec::new();
        };

        let mut friends: Vec<UserId> = self.graph.neighbors(id).collect();
        friends.sort_by(|x, y| self.name_order(*x, *y));
        friends
            .into_iter()
            .map(|friend| self.registry.display_name(friend).to_string())
            .collect()
    }

    /// Up to `n` friend-of-friend suggestions, most mutual friends first
    pub fn suggest_friends(&self, name: &str, n: usize) -> Vec<String> {
        if n == 0 {
            return Vec::new();
        }
        let Some(id) = self.lookup(name) else {
            return Vec::new();
        };

        let mut excluded: HashSet<UserId> = self.graph.neighbors(id).collect();
        excluded.insert(id);

        // One count per length-2 path through a direct friend
        let mut mutuals: HashMap<UserId, usize> = HashMap::new();
        for friend in self.graph.neighbors(id) {
            for candidate in self.graph.neighbors(friend) {
                if !excluded.contains(&candidate) {
                    *mutuals.entry(candidate).or_insert(0) += 1;
                }
            }
        }
        trace!(user = name, candidates = mutuals.len(), "ranking suggestions");

        // Ties break on the raw display name, byte-wise
        let mut ranked: Vec<(UserId, usize)> = mutuals.into_iter().collect();
        ranked.sort_by(|(x, count_x), (y, count_y)| {
            count_y.cmp(count_x).then_with(|| {
                self.registry
                    .display_name(*x)
                    .cmp(self.registry.display_name(*y))
            })
        });

        ranked
            .into_iter()
            .take(n)
            .map(|(candidate, _)| self.registry.display_name(candidate).to_string())
            .collect()
    }

    /// Length of the shortest friendship path, or `None` if either user is
    /// unknown or no path exists
    pub fn degrees_of_separation(&self, a: &str, b: &str) -> Option<usize> {
        let start = self.lookup(a)?;
        let target = self.lookup(b)?;
        if start == target {
            return Some(0);
        }

        let mut visited = HashSet::from([start]);
        let mut queue = VecDeque::from([(start, 0usize)]);

        while let Some((current, distance)) = queue.pop_front() {
            for friend in self.graph.neighbors(current) {
                if friend == target {
                    metrics::record_histogram(SEARCH_VISITED, visited.len() as f64);
                    return Some(distance + 1);
                }
                if visited.insert(friend) {
                    queue.push_back((friend, distance + 1));
                }
            }
        }

        metrics::record_histogram(SEARCH_VISITED, visited.len() as f64);
        debug!(err = %SocialError::NotFound(a.to_string(), b.to_string()), "search exhausted");
        None
    }

    /// Store a post for `name`, returning the timestamp it was filed under
    pub fn add_post(&mut self, name: &str, content: &str) -> Option<Timestamp> {
        let id = self.lookup(name)?;
        let Some(timestamp) = self.clock.next() else {
            warn!(err = %SocialError::ClockExhausted, user = name, "post dropped");
            return None;
        };
        self.registry.post_store_mut(id).insert(timestamp, content);

        metrics::record_counter(POSTS_CREATED, 1);
        trace!(user = name, %timestamp, "post stored");
        Some(timestamp)
    }

    /// Post contents for `name`, newest first
    pub fn output_posts(&self, name: &str, limit: PostLimit) -> Vec<String> {
        match self.lookup(name) {
            Some(id) => self.registry.post_store(id).most_recent(limit),
            None => Vec::new(),
        }
    }

    /// Number of posts `name` has written; `None` for unknown users
    pub fn post_count(&self, name: &str) -> Option<usize> {
        self.lookup(name)
            .map(|id| self.registry.post_store(id).len())
    }

    pub fn user_count(&self) -> usize {
        self.registry.len()
    }

    pub fn friendship_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn registry(&self) -> &UserRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &FriendGraph {
        &self.graph
    }

    /// Last timestamp the post clock issued
    pub fn last_timestamp(&self) -> u64 {
        self.clock.last()
    }

    fn lookup(&self, name: &str) -> Option<UserId> {
        match self.registry.resolve(name) {
            Ok(id) => Some(id),
            Err(err) => {
                debug!(%err, "lookup failed");
                None
            }
        }
    }

    /// Alphabetical ordering of users: case-folded name, then display name
    fn name_order(&self, x: UserId, y: UserId) -> Ordering {
        self.registry
            .canonical_name(x)
            .cmp(self.registry.canonical_name(y))
            .then_with(|| {
                self.registry
                    .display_name(x)
                    .cmp(self.registry.display_name(y))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network(users: &[&str], friendships: &[(&str, &str)]) -> SocialGraphEngine {
        let mut engine = SocialGraphEngine::new();
        for user in users {
            engine.create_user(user);
        }
        for (a, b) in friendships {
            engine.add_friend(a, b);
        }
        engine
    }

    #[test]
    fn test_create_user_idempotent() {
        let mut engine = SocialGraphEngine::new();
        assert!(engine.create_user("Alice"));
        assert!(!engine.create_user("alice"));
        assert_eq!(engine.user_count(), 1);
        assert_eq!(engine.registry().display_name(UserId(0)), "Alice");
    }

    #[test]
    fn test_add_friend_symmetric_and_idempotent() {
        let mut engine = network(&["A", "B"], &[]);
        assert!(engine.add_friend("a", "B"));
        assert!(!engine.add_friend("B", "A"));
        assert!(engine.are_friends("A", "B"));
        assert!(engine.are_friends("B", "A"));
        assert_eq!(engine.friendship_count(), 1);
    }

    #[test]
    fn test_add_friend_rejects_unknown_and_self() {
        let mut engine = network(&["A"], &[]);
        assert!(!engine.add_friend("A", "ghost"));
        assert!(!engine.add_friend("A", "a"));
        assert_eq!(engine.friendship_count(), 0);
    }

    #[test]
    fn test_list_friends_case_insensitive_order() {
        let engine = network(&["Me", "Bob", "amy", "Carl"], &[("Me", "Bob"), ("Me", "amy"), ("Me", "Carl")]);
        assert_eq!(engine.list_friends("me"), vec!["amy", "Bob", "Carl"]);
        assert!(engine.list_friends("nobody").is_empty());
    }

    #[test]
    fn test_suggest_friends_ranking() {
        let engine = network(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("B", "D")],
        );
        assert_eq!(engine.suggest_friends("A", 5), vec!["C", "D"]);
        assert_eq!(engine.suggest_friends("A", 1), vec!["C"]);
        assert!(engine.suggest_friends("A", 0).is_empty());
        assert!(engine.suggest_friends("ghost", 3).is_empty());
    }

    #[test]
    fn test_suggest_friends_counts_each_mutual_friend() {
        // E is reachable through both B and C, D only through B
        let engine = network(
            &["A", "B", "C", "D", "E"],
            &[("A", "B"), ("A", "C"), ("B", "D"), ("B", "E"), ("C", "E")],
        );
        assert_eq!(engine.suggest_friends("A", 10), vec!["E", "D"]);
    }

    #[test]
    fn test_suggest_friends_ties_use_display_name_bytes() {
        let engine = network(
            &["A", "B", "bob", "Carl"],
            &[("A", "B"), ("B", "bob"), ("B", "Carl")],
        );
        assert_eq!(engine.suggest_friends("A", 5), vec!["Carl", "bob"]);
    }

    #[test]
    fn test_add_post_after_clock_exhausted() {
        let mut engine = SocialGraphEngine::with_counter(TimestampCounter::starting_at(u64::MAX - 1));
        engine.create_user("A");
        assert_eq!(engine.add_post("A", "last"), Some(Timestamp(u64::MAX)));
        assert_eq!(engine.add_post("A", "overflow"), None);
        assert_eq!(engine.post_count("A"), Some(1));
        assert_eq!(engine.output_posts("A", PostLimit::All), vec!["last"]);
    }

    #[test]
    fn test_suggest_friends_excludes_self_and_friends() {
        let engine = network(
            &["A", "B", "C"],
            &[("A", "B"), ("A", "C"), ("B", "C")],
        );
        assert!(engine.suggest_friends("A", 10).is_empty());
    }

    #[test]
    fn test_degrees_of_separation_chain() {
        let engine = network(
            &["A", "B", "C", "D", "E"],
            &[("A", "B"), ("B", "C"), ("C", "D")],
        );
        assert_eq!(engine.degrees_of_separation("A", "D"), Some(3));
        assert_eq!(engine.degrees_of_separation("D", "A"), Some(3));
        assert_eq!(engine.degrees_of_separation("A", "A"), Some(0));
        assert_eq!(engine.degrees_of_separation("A", "E"), None);
        assert_eq!(engine.degrees_of_separation("A", "nonexistent"), None);
    }

    #[test]
    fn test_degrees_of_separation_takes_shortcut() {
        let engine = network(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "D"), ("A", "D")],
        );
        assert_eq!(engine.degrees_of_separation("A", "D"), Some(1));
        assert_eq!(engine.degrees_of_separation("B", "D"), Some(2));
    }

    #[test]
    fn test_posts_newest_first() {
        let mut engine = network(&["A"], &[]);
        engine.add_post("A", "first");
        engine.add_post("A", "second");
        engine.add_post("A", "third");
        assert_eq!(engine.output_posts("A", PostLimit::AtMost(2)), vec!["third", "second"]);
        assert_eq!(engine.output_posts("a", PostLimit::All).len(), 3);
        assert_eq!(engine.post_count("A"), Some(3));
    }

    #[test]
    fn test_timestamps_are_global() {
        let mut engine = network(&["A", "B"], &[]);
        assert_eq!(engine.add_post("A", "x"), Some(Timestamp(1)));
        assert_eq!(engine.add_post("B", "y"), Some(Timestamp(2)));
        assert_eq!(engine.add_post("ghost", "z"), None);
        assert_eq!(engine.last_timestamp(), 2);
    }

    #[test]
    fn test_from_config_starts_clock() {
        let mut engine = SocialGraphEngine::from_config(&EngineConfig {
            initial_timestamp: 41,
        });
        engine.create_user("A");
        assert_eq!(engine.add_post("A", "hello"), Some(Timestamp(42)));
    }

    #[test]
    fn test_unknown_user_posts() {
        let engine = SocialGraphEngine::new();
        assert!(engine.output_posts("ghost", PostLimit::All).is_empty());
        assert_eq!(engine.post_count("ghost"), None);
    }
}
