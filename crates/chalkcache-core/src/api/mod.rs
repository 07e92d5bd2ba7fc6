//! Transport boundary to the dashboard's REST backend.
//!
//! This module holds the only point where the remote API is touched: the
//! [`Transport`] trait and its reqwest-backed [`HttpTransport`] implementation,
//! plus the [`ApiError`] taxonomy every fetch failure is mapped into.
//!
//! Authentication uses a JWT bearer token set on the transport after an
//! admin login; the cache layer itself never sees credentials.

pub mod error;
pub mod transport;

pub use error::ApiError;
pub use transport::{Address, HttpTransport, Transport, Verb};
