use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use super::key::CacheKey;
use super::tag::Tag;
use crate::api::ApiError;

/// Lifecycle state of a cache entry.
///
/// `Error` and `Stale` both keep any previously fetched data available:
/// stale-but-displayable beats a blank screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Created but never fetched.
    Idle,
    /// First fetch in progress, no data yet.
    Loading,
    /// Data reflects the latest successful fetch.
    Success,
    /// The latest fetch failed; `data` holds the last good response if any.
    Error,
    /// Known out of date and due for a refetch.
    Stale,
}

/// One cached query result. Owned exclusively by the store; every mutation
/// of these fields happens inside the store's lock.
#[derive(Debug)]
pub(crate) struct CacheEntry {
    pub key: CacheKey,
    pub data: Option<Arc<Value>>,
    pub tags: Vec<Tag>,
    pub status: QueryStatus,
    pub error: Option<ApiError>,
    pub last_fetched_at: Option<DateTime<Utc>>,
    /// Bumped on every observable change, so consumers can cheaply detect
    /// whether anything happened between two reads.
    pub version: u64,
    /// Bumped on every invalidation. A fetch that started before the latest
    /// invalidation completes into a still-stale entry.
    pub generation: u64,
    /// A fetch task for this key is currently running.
    pub in_flight: bool,
    /// Bumped each time the subscriber count drops to zero; lets a pending
    /// eviction timer detect that the entry was remounted in the meantime.
    pub idle_epoch: u64,
}

impl CacheEntry {
    pub fn new(key: CacheKey) -> Self {
        Self {
            key,
            data: None,
            tags: Vec::new(),
            status: QueryStatus::Idle,
            error: None,
            last_fetched_at: None,
            version: 0,
            generation: 0,
            in_flight: false,
            idle_epoch: 0,
        }
    }

    pub fn view(&self) -> EntryView {
        EntryView {
            key: self.key.clone(),
            data: self.data.clone(),
            status: self.status,
            error: self.error.clone(),
            last_fetched_at: self.last_fetched_at,
            is_fetching: self.in_flight,
            version: self.version,
        }
    }
}

/// Read-only snapshot of an entry handed out to consumers. Data is shared
/// via `Arc`, so taking a view never copies the payload.
#[derive(Debug, Clone)]
pub struct EntryView {
    pub key: CacheKey,
    pub data: Option<Arc<Value>>,
    pub status: QueryStatus,
    pub error: Option<ApiError>,
    pub last_fetched_at: Option<DateTime<Utc>>,
    pub is_fetching: bool,
    pub version: u64,
}
