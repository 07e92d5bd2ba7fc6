use serde::{Deserialize, Serialize};

use super::status::ApprovalStatus;

/// Denormalized teacher reference embedded in other records (leave
/// requests, attendance, salary, schedules). The backend populates the
/// foreign id into this shape before responding; the cache layer never
/// joins across separately cached collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct TeacherRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
}

impl TeacherRef {
    /// Display name with the fallback the pages use for missing joins.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown Teacher")
    }
}

/// A teacher record from the approval/roster endpoints.
///
/// The backend reports the workflow state redundantly (`isApproved`,
/// `isRejected`, and a `status` string); `workflow_status` reconciles them
/// into one value so every page partitions identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Teacher {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub qualification: Option<String>,
    #[serde(default)]
    pub status: Option<ApprovalStatus>,
    #[serde(rename = "isApproved", default)]
    pub is_approved: bool,
    #[serde(rename = "isRejected", default)]
    pub is_rejected: bool,
    #[serde(rename = "rejectionReason", default)]
    pub rejection_reason: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Teacher {
    /// Reconciled workflow state. Rejection flags win over approval flags,
    /// matching how the approval page categorizes its lists.
    pub fn workflow_status(&self) -> ApprovalStatus {
        if self.is_rejected || self.status == Some(ApprovalStatus::Rejected) {
            ApprovalStatus::Rejected
        } else if self.is_approved || self.status == Some(ApprovalStatus::Approved) {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Pending
        }
    }
}

/// Arguments for the reject mutation; the reason is forwarded verbatim and
/// validated caller-side, not here.
#[derive(Debug, Clone, Serialize)]
pub struct RejectTeacherArgs {
    pub id: String,
    pub reason: Option<String>,
}

/// Response of the approve/reject mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct TeacherMutationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub teacher: Option<Teacher>,
}
