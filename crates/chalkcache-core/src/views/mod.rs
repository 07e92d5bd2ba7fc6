//! Derived views: pure projections from cached collections to the shapes
//! the pages render.
//!
//! Every function here is stateless and re-run in full whenever the
//! underlying cache entry changes - partitions and aggregates are never
//! patched incrementally.

pub mod partition;
pub mod search;

pub use partition::{
    attendance_summary, partition_by_status, AttendanceSummary, HasApprovalStatus,
    HasAttendanceStatus, StatusCounts, StatusPartition,
};
pub use search::{
    search_leave_requests, search_payments, search_records, search_students, sort_by_key,
};
