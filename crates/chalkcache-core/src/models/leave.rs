use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::ApprovalStatus;
use super::teacher::TeacherRef;

/// A leave request as returned by the backend, with the teacher reference
/// already populated server-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct LeaveRequest {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "teacherId", default)]
    pub teacher: Option<TeacherRef>,
    #[serde(rename = "leaveType", default)]
    pub leave_type: Option<String>,
    #[serde(rename = "fromDate")]
    pub from_date: DateTime<Utc>,
    #[serde(rename = "toDate")]
    pub to_date: DateTime<Utc>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(rename = "rejectionReason", default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(rename = "emergencyContact", default)]
    pub emergency_contact: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "processedAt", default)]
    pub processed_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Inclusive length of the leave in days; a same-day leave counts as 1.
    pub fn duration_days(&self) -> i64 {
        (self.to_date.date_naive() - self.from_date.date_naive()).num_days() + 1
    }

    pub fn teacher_name(&self) -> &str {
        self.teacher
            .as_ref()
            .map(TeacherRef::display_name)
            .unwrap_or("Unknown Teacher")
    }
}

/// Paged list wrapper for `/getLeaveRequests`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct LeaveRequestList {
    #[serde(rename = "leaveRequests")]
    pub leave_requests: Vec<LeaveRequest>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}

/// Query filters for the leave request list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeaveRequestFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<ApprovalStatus>,
}

/// Arguments for approving or rejecting a request. The rejection reason is
/// forwarded when present; whether it is mandatory is the caller's rule.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessLeaveArgs {
    pub id: String,
    pub status: ApprovalStatus,
    pub rejection_reason: Option<String>,
}

/// Response of the process mutation; the updated record is echoed back.
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessLeaveResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "leaveRequest", default)]
    pub leave_request: Option<LeaveRequest>,
}
