//! User registry: canonical names, display names and post ownership

use super::errors::{SocialError, SocialResult};
use super::post_store::PostStore;
use super::types::UserId;
use std::collections::HashMap;

/// Case-fold a username into its lookup key
pub fn canonicalize(name: &str) -> String {
    name.to_lowercase()
}

/// A registered user
#[derive(Debug, Clone)]
pub struct User {
    /// Lowercased lookup key
    pub canonical_name: String,

    /// Name as first registered, used for output
    pub display_name: String,

    /// Posts authored by this user
    pub posts: PostStore,
}

impl User {
    fn new(display_name: &str) -> Self {
        Self {
            canonical_name: canonicalize(display_name),
            display_name: display_name.to_string(),
            posts: PostStore::new(),
        }
    }
}

/// Owns every user record, indexed by identity
#[derive(Debug, Clone, Default)]
pub struct UserRegistry {
    users: Vec<User>,
    by_name: HashMap<String, UserId>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user.
    ///
    /// Returns the new identity, or `None` if the canonical name is taken.
    /// An existing user's display name is never overwritten.
    pub fn create_user(&mut self, display_name: &str) -> Option<UserId> {
        let canonical = canonicalize(display_name);
        if self.by_name.contains_key(&canonical) {
            return None;
        }

        let id = UserId(self.users.len());
        self.by_name.insert(canonical, id);
        self.users.push(User::new(display_name));
        Some(id)
    }

    /// Case-insensitive lookup
    pub fn resolve(&self, name: &str) -> SocialResult<UserId> {
        self.by_name
            .get(&canonicalize(name))
            .copied()
            .ok_or_else(|| SocialError::UnknownUser(name.to_string()))
    }

    /// Panics if `id` was not issued by this registry.
    pub fn user(&self, id: UserId) -> &User {
        &self.users[id.index()]
    }

    pub fn display_name(&self, id: UserId) -> &str {
        &self.user(id).display_name
    }

    pub fn canonical_name(&self, id: UserId) -> &str {
        &self.user(id).canonical_name
    }

    pub fn post_store(&self, id: UserId) -> &PostStore {
        &self.user(id).posts
    }

    pub fn post_store_mut(&mut self, id: UserId) -> &mut PostStore {
        &mut self.users[id.index()].posts
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
