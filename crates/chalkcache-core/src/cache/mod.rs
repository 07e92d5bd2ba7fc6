//! Tagged query cache with mutation-driven invalidation.
//!
//! One [`CacheStore`](store::CacheStore) instance holds every query result
//! the dashboard has fetched, keyed by operation plus canonical arguments
//! and indexed by the [`Tag`]s each result provides. Mutations resolve their
//! declared tags through the index and mark the affected entries stale;
//! entries with active subscribers are refetched in the background while the
//! old data stays on screen.
//!
//! Stores are explicitly constructed (one per
//! [`QueryClient`](crate::client::QueryClient)), never ambient globals, so
//! tests can run isolated instances side by side.

pub mod entry;
pub mod key;
pub mod subscription;
pub mod tag;

pub(crate) mod store;

pub use entry::{EntryView, QueryStatus};
pub use key::CacheKey;
pub use store::CacheEvent;
pub use tag::{Tag, TagId, TagIndex, TagKind};
