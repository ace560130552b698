//! Undirected friendship graph over user identities

use super::types::UserId;
use std::collections::HashSet;

/// Adjacency sets indexed by identity.
///
/// The graph only knows identities; names and posts stay in the registry.
#[derive(Debug, Clone, Default)]
pub struct FriendGraph {
    adjacency: Vec<HashSet<UserId>>,
    edges: usize,
}

impl FriendGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the next identity as an isolated vertex
    pub fn add_vertex(&mut self) -> UserId {
        self.adjacency.push(HashSet::new());
        UserId(self.adjacency.len() - 1)
    }

    pub fn contains(&self, id: UserId) -> bool {
        id.index() < self.adjacency.len()
    }

    /// Add a friendship in both directions.
    ///
    /// Returns `false` without changing anything when either vertex is
    /// unknown, when `a == b`, or when the edge already exists.
    pub fn add_edge(&mut self, a: UserId, b: UserId) -> bool {
        if a == b || !self.contains(a) || !self.contains(b) || self.are_friends(a, b) {
            return false;
        }
        self.adjacency[a.index()].insert(b);
        self.adjacency[b.index()].insert(a);
        self.edges += 1;
        true
    }

    /// Direct friends of `id`; empty for unknown vertices
    pub fn neighbors(&self, id: UserId) -> impl Iterator<Item = UserId> + '_ {
        self.adjacency
            .get(id.index())
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    pub fn are_friends(&self, a: UserId, b: UserId) -> bool {
        self.adjacency
            .get(a.index())
            .is_some_and(|set| set.contains(&b))
    }

    pub fn degree(&self, id: UserId) -> usize {
        self.adjacency.get(id.index()).map_or(0, HashSet::len)
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges
    }
}
