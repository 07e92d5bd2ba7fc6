//! chalkcache-core - the data-synchronization engine behind the school
//! administration dashboard.
//!
//! Every page of the dashboard (teacher approval, leave requests,
//! attendance, salary, scheduling, students) binds a form or table to the
//! remote REST API through this crate:
//!
//! - [`endpoints`] declares each operation with the tags it provides or
//!   invalidates
//! - [`cache`] holds fetched results, indexes them by tag, and marks them
//!   stale when a mutation succeeds
//! - [`client`] is the consumer surface: subscribe to queries, fire
//!   mutations, read typed snapshots
//! - [`views`] derives the page-level shapes (status partitions, attendance
//!   rates, search results) from raw cached collections
//!
//! The engine is UI-agnostic and runs on a Tokio runtime. State transitions
//! are synchronous steps between await points; suspension only happens at
//! the transport boundary. Nothing persists across process restarts.
//!
//! ```no_run
//! use chalkcache_core::client::QueryClient;
//! use chalkcache_core::config::Config;
//! use chalkcache_core::endpoints::leave;
//! use chalkcache_core::models::LeaveRequestFilter;
//! use chalkcache_core::views::partition_by_status;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = QueryClient::http(&Config::from_env()?)?;
//! let mut requests = client.subscribe(&leave::GET_LEAVE_REQUESTS, LeaveRequestFilter::default())?;
//! let snapshot = requests.settled().await;
//! if let Some(list) = &snapshot.data {
//!     let counts = partition_by_status(&list.leave_requests).counts();
//!     println!("{} pending / {} total", counts.pending, counts.total);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod endpoints;
pub mod models;
pub mod utils;
pub mod views;

pub use api::{ApiError, HttpTransport, Transport};
pub use cache::{CacheKey, QueryStatus, Tag, TagKind};
pub use client::{QueryClient, QueryHandle, QuerySnapshot};
pub use config::Config;
