use serde::{Deserialize, Serialize};

/// Today's attendance counters on the overview page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct DashboardAttendance {
    #[serde(default)]
    pub present: u64,
    #[serde(default)]
    pub absent: u64,
}

/// Aggregate counters for the dashboard overview, computed backend-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct DashboardStats {
    #[serde(rename = "totalTeachers", default)]
    pub total_teachers: u64,
    #[serde(rename = "pendingSalaries", default)]
    pub pending_salaries: u64,
    #[serde(rename = "pendingLeaves", default)]
    pub pending_leaves: u64,
    #[serde(default)]
    pub attendance: Option<DashboardAttendance>,
}

/// Response wrapper for `/getDashboardStats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct DashboardStatsResponse {
    pub data: DashboardStats,
}
