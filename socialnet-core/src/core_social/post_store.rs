//! Per-user post storage
//!
//! Posts live in an AVL tree keyed by [`Timestamp`]. Because timestamps come
//! from a single monotonic counter, in-order traversal is chronological and
//! a reverse in-order walk yields the newest posts first.
//!
//! ## Balancing
//!
//! After each insertion the heights along the insertion path are recomputed
//! and any node whose subtrees differ in height by more than one is rotated.
//! The rotation case is picked by comparing the inserted key with the key of
//! the unbalanced node's child on the heavy side:
//!
//! - left heavy, key < left child: single right rotation (LL)
//! - left heavy, key > left child: left-right double rotation (LR)
//! - right heavy, key > right child: single left rotation (RR)
//! - right heavy, key < right child: right-left double rotation (RL)

use super::types::{PostLimit, Timestamp};
use std::cmp::Ordering;

type Link = Option<Box<Node>>;

#[derive(Debug, Clone)]
struct Node {
    key: Timestamp,
    content: String,
    height: usize,
    left: Link,
    right: Link,
}

impl Node {
    fn new(key: Timestamp, content: String) -> Self {
        Self {
            key,
            content,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

fn rotate_right(mut y: Box<Node>) -> Box<Node> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

fn rotate_left(mut x: Box<Node>) -> Box<Node> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

fn rebalance(mut node: Box<Node>, key: Timestamp) -> Box<Node> {
    let balance = node.balance_factor();

    if balance > 1 {
        let Some(left_key) = node.left.as_ref().map(|left| left.key) else {
            return node;
        };
        if key > left_key {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        let Some(right_key) = node.right.as_ref().map(|right| right.key) else {
            return node;
        };
        if key < right_key {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

fn insert_node(link: Link, key: Timestamp, content: String, inserted: &mut bool) -> Box<Node> {
    let mut node = match link {
        Some(node) => node,
        None => {
            *inserted = true;
            return Box::new(Node::new(key, content));
        }
    };

    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert_node(node.left.take(), key, content, inserted)),
        Ordering::Greater => {
            node.right = Some(insert_node(node.right.take(), key, content, inserted))
        }
        // Duplicate keys keep the existing post
        Ordering::Equal => return node,
    }

    node.update_height();
    rebalance(node, key)
}

/// Balanced, timestamp-ordered store of one user's posts
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    root: Link,
    len: usize,
}

impl PostStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a post.
    ///
    /// Returns `false` and leaves the store untouched if `timestamp` is
    /// already present.
    pub fn insert(&mut self, timestamp: Timestamp, content: impl Into<String>) -> bool {
        let mut inserted = false;
        self.root = Some(insert_node(
            self.root.take(),
            timestamp,
            content.into(),
            &mut inserted,
        ));
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Contents of the most recent posts, newest first
    pub fn most_recent(&self, limit: PostLimit) -> Vec<String> {
        let mut posts = Vec::new();
        for (_, content) in self.iter_newest_first() {
            if limit.is_satisfied(posts.len()) {
                break;
            }
            posts.push(content.to_string());
        }
        posts
    }

    /// Iterate posts oldest first
    pub fn iter(&self) -> Ascending<'_> {
        Ascending::new(&self.root)
    }

    /// Iterate posts newest first, walking only as much of the tree as is consumed
    pub fn iter_newest_first(&self) -> NewestFirst<'_> {
        NewestFirst::new(&self.root)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree (0 when empty)
    pub fn height(&self) -> usize {
        height(&self.root)
    }
}

/// In-order iterator over `(timestamp, content)`
pub struct Ascending<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Ascending<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for Ascending<'a> {
    type Item = (Timestamp, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((node.key, node.content.as_str()))
    }
}

/// Reverse in-order iterator over `(timestamp, content)`
pub struct NewestFirst<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> NewestFirst<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_right_spine(root.as_deref());
        iter
    }

    fn push_right_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.right.as_deref();
        }
    }
}

impl<'a> Iterator for NewestFirst<'a> {
    type Item = (Timestamp, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_right_spine(node.left.as_deref());
        Some((node.key, node.content.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns the subtree height if every node is AVL-balanced and correctly sized
    fn checked_height(link: &Link) -> Option<usize> {
        let Some(node) = link else {
            return Some(0);
        };
        let left = checked_height(&node.left)?;
        let right = checked_height(&node.right)?;
        if left.abs_diff(right) > 1 || node.height != 1 + left.max(right) {
            return None;
        }
        Some(node.height)
    }

    fn store_with(keys: &[u64]) -> PostStore {
        let mut store = PostStore::new();
        for &key in keys {
            store.insert(Timestamp(key), format!("post-{}", key));
        }
        store
    }

    #[test]
    fn test_empty_store() {
        let store = PostStore::new();
        assert!(store.is_empty());
        assert_eq!(store.height(), 0);
        assert!(store.most_recent(PostLimit::All).is_empty());
        assert!(store.most_recent(PostLimit::AtMost(5)).is_empty());
    }

    #[test]
    fn test_most_recent_newest_first() {
        let mut store = PostStore::new();
        store.insert(Timestamp(1), "first");
        store.insert(Timestamp(2), "second");
        store.insert(Timestamp(3), "third");

        assert_eq!(store.most_recent(PostLimit::AtMost(2)), vec!["third", "second"]);
        assert_eq!(
            store.most_recent(PostLimit::All),
            vec!["third", "second", "first"]
        );
        assert_eq!(store.most_recent(PostLimit::AtMost(10)).len(), 3);
        assert!(store.most_recent(PostLimit::AtMost(0)).is_empty());
    }

    #[test]
    fn test_duplicate_key_is_ignored() {
        let mut store = PostStore::new();
        assert!(store.insert(Timestamp(7), "original"));
        assert!(!store.insert(Timestamp(7), "replacement"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.most_recent(PostLimit::All), vec!["original"]);
    }

    #[test]
    fn test_empty_content_is_stored() {
        let mut store = PostStore::new();
        store.insert(Timestamp(1), "");
        assert_eq!(store.most_recent(PostLimit::All), vec![String::new()]);
    }

    #[test]
    fn test_ascending_inserts_stay_balanced() {
        // Monotonic keys are the engine's only insertion pattern
        let keys: Vec<u64> = (1..=1024).collect();
        let store = store_with(&keys);
        assert_eq!(store.len(), 1024);
        assert_eq!(store.height(), 11);
        assert!(checked_height(&store.root).is_some());
    }

    #[test]
    fn test_double_rotation_cases() {
        // Left-right: 30, 10, 20
        let lr = store_with(&[30, 10, 20]);
        assert_eq!(lr.root.as_ref().map(|n| n.key), Some(Timestamp(20)));
        assert_eq!(lr.height(), 2);

        // Right-left: 10, 30, 20
        let rl = store_with(&[10, 30, 20]);
        assert_eq!(rl.root.as_ref().map(|n| n.key), Some(Timestamp(20)));
        assert_eq!(rl.height(), 2);
    }

    #[test]
    fn test_most_recent_after_unordered_inserts() {
        let store = store_with(&[4, 9, 2]);
        assert_eq!(store.most_recent(PostLimit::AtMost(1)), vec!["post-9"]);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Property: the tree is balanced after every single insertion
            #[test]
            fn prop_balanced_after_each_insert(keys in prop::collection::vec(0..500u64, 0..200)) {
                let mut store = PostStore::new();
                for key in keys {
                    store.insert(Timestamp(key), key.to_string());
                    prop_assert!(checked_height(&store.root).is_some());
                }
            }

            // Property: ascending walk is strictly increasing, newest-first is its reverse
            #[test]
            fn prop_traversal_orders(keys in prop::collection::vec(0..1000u64, 0..200)) {
                let store = store_with(&keys);

                let ascending: Vec<Timestamp> = store.iter().map(|(ts, _)| ts).collect();
                prop_assert!(ascending.windows(2).all(|w| w[0] < w[1]));
                prop_assert_eq!(ascending.len(), store.len());

                let mut newest: Vec<Timestamp> = store.iter_newest_first().map(|(ts, _)| ts).collect();
                newest.reverse();
                prop_assert_eq!(newest, ascending);
            }

            // Property: most_recent(n) returns min(n, len) posts
            #[test]
            fn prop_most_recent_length(count in 0..100u64, n in 0..150usize) {
                let keys: Vec<u64> = (1..=count).collect();
                let store = store_with(&keys);
                let posts = store.most_recent(PostLimit::AtMost(n));
                prop_assert_eq!(posts.len(), n.min(count as usize));
            }
        }
    }
}
