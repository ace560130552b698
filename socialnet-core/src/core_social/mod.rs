//! Social graph core
//!
//! In-memory users, friendships and posts, plus the derived queries built
//! on top of them.
//!
//! ## Architecture
//!
//! - **PostStore**: AVL tree of one user's posts keyed by timestamp
//! - **UserRegistry**: case-insensitive name lookup, owns users and their posts
//! - **FriendGraph**: undirected adjacency sets over user identities
//! - **SocialGraphEngine**: facade combining the above with a shared post clock
//!
//! All state is single-threaded; mutating operations take `&mut self`.

pub mod clock;
pub mod engine;
pub mod errors;
pub mod graph;
pub mod post_store;
pub mod registry;
pub mod types;

pub use clock::TimestampCounter;
pub use engine::SocialGraphEngine;
pub use errors::{SocialError, SocialResult};
pub use graph::FriendGraph;
pub use post_store::PostStore;
pub use registry::{User, UserRegistry};
pub use types::{PostLimit, Timestamp, UserId};
