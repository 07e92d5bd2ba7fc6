use serde::{Deserialize, Serialize};

/// Workflow status shared by approval-style records (teacher applications
/// and leave requests).
///
/// The only legal transitions are `Pending -> Approved` and
/// `Pending -> Rejected`; both targets are terminal. Re-submission is a new
/// record, not a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum ApprovalStatus {
    #[default]
    #[serde(alias = "Pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "Approved", alias = "APPROVED")]
    Approved,
    #[serde(alias = "Rejected", alias = "REJECTED")]
    Rejected,
}

impl ApprovalStatus {
    /// Whether the workflow permits moving from `self` to `next`.
    pub fn can_transition_to(&self, next: ApprovalStatus) -> bool {
        matches!(
            (self, next),
            (
                ApprovalStatus::Pending,
                ApprovalStatus::Approved | ApprovalStatus::Rejected
            )
        )
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, ApprovalStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Daily attendance status. A plain enumeration with no transition rules;
/// corrections overwrite the day's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub enum AttendanceStatus {
    #[serde(alias = "Present", alias = "PRESENT")]
    Present,
    #[serde(alias = "Absent", alias = "ABSENT")]
    Absent,
    #[serde(alias = "Leave", alias = "LEAVE")]
    Leave,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Leave => "leave",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
