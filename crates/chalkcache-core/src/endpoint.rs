//! Endpoint definition types backing the static registry.
//!
//! Each resource group declares its operations as `static` [`QueryDef`] and
//! [`MutationDef`] tables (see [`crate::endpoints`]). Definitions are plain
//! data plus function pointers, so the whole registry lives in the binary
//! with no runtime registration step.

use serde_json::Value;

use crate::api::{Address, Verb};
use crate::cache::Tag;

/// A named read operation: where to fetch, and which tags the result
/// provides once validated.
///
/// `provides` runs against the *typed* response, so a list endpoint can tag
/// every contained record individually in addition to the collection
/// sentinel.
pub struct QueryDef<Args, Data> {
    /// Stable operation identifier; the first component of the cache key.
    pub id: &'static str,
    /// Build the resource address from the call's arguments.
    pub address: fn(&Args) -> Address,
    /// Tags the result provides, evaluated per successful fetch.
    pub provides: fn(&Args, &Data) -> Vec<Tag>,
}

/// A named write operation: address, verb, optional JSON body, and the tags
/// a *successful* call invalidates.
///
/// `invalidates` sees both the arguments and the response, so it can target
/// ids the server allocated (e.g. the record just created). It is never
/// consulted for failed calls - invalidation is the signal that the write
/// succeeded.
pub struct MutationDef<Args, Data> {
    /// Stable operation identifier, used for logging.
    pub id: &'static str,
    pub verb: Verb,
    pub address: fn(&Args) -> Address,
    /// JSON body for the request, or `None` for body-less mutations.
    pub body: fn(&Args) -> Option<Value>,
    pub invalidates: fn(&Args, &Data) -> Vec<Tag>,
}
