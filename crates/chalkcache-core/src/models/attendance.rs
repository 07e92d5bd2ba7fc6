use serde::{Deserialize, Serialize};

use super::status::AttendanceStatus;
use super::teacher::TeacherRef;

/// One teacher-day attendance record. Dates travel as `YYYY-MM-DD` strings
/// end to end; formatting for display is a presentation concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct AttendanceRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "teacherId", default)]
    pub teacher: Option<TeacherRef>,
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(rename = "checkIn", default)]
    pub check_in: Option<String>,
    #[serde(rename = "checkOut", default)]
    pub check_out: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

impl AttendanceRecord {
    pub fn teacher_name(&self) -> &str {
        self.teacher
            .as_ref()
            .map(TeacherRef::display_name)
            .unwrap_or("Unknown Teacher")
    }
}

/// List wrapper for `/getAttendances`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct AttendanceList {
    pub attendances: Vec<AttendanceRecord>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Query filters for the attendance list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AttendanceFilter {
    pub date: Option<String>,
    pub status: Option<AttendanceStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Body of the mark-attendance mutation.
#[derive(Debug, Clone, Serialize)]
pub struct MarkAttendanceArgs {
    #[serde(rename = "teacherId")]
    pub teacher_id: String,
    pub date: String,
    pub status: AttendanceStatus,
    #[serde(rename = "checkIn", skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(rename = "checkOut", skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Response of the mark-attendance mutation; the created or updated record
/// is echoed back so invalidation can target its id.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkAttendanceResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub attendance: Option<AttendanceRecord>,
}
