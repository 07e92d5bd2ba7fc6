use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::teacher::TeacherRef;

/// A scheduled class session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct ScheduleEntry {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "teacherId", default)]
    pub teacher: Option<TeacherRef>,
    pub subject: String,
    #[serde(rename = "batchName", default)]
    pub batch_name: Option<String>,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

impl ScheduleEntry {
    pub fn teacher_name(&self) -> &str {
        self.teacher
            .as_ref()
            .map(TeacherRef::display_name)
            .unwrap_or("Unknown Teacher")
    }
}

/// List wrapper for `/getSchedules` and `/getTodaysSchedules`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct ScheduleList {
    pub schedules: Vec<ScheduleEntry>,
}

/// Body of the create-schedule mutation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateScheduleArgs {
    #[serde(rename = "teacherId")]
    pub teacher_id: String,
    pub subject: String,
    #[serde(rename = "batchName", skip_serializing_if = "Option::is_none")]
    pub batch_name: Option<String>,
    #[serde(rename = "startTime")]
    pub start_time: DateTime<Utc>,
    #[serde(rename = "endTime")]
    pub end_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// Partial update applied to an existing schedule entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScheduleChanges {
    #[serde(rename = "teacherId", skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(rename = "batchName", skip_serializing_if = "Option::is_none")]
    pub batch_name: Option<String>,
    #[serde(rename = "startTime", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(rename = "endTime", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

/// Arguments for the update mutation: target id plus the changed fields.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateScheduleArgs {
    pub id: String,
    pub changes: ScheduleChanges,
}

/// Response of the schedule mutations.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleMutationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub schedule: Option<ScheduleEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_schedule_list() {
        let json = r#"{
            "schedules": [{
                "_id": "s1",
                "teacherId": {"_id": "t1", "name": "Asha Verma"},
                "subject": "Physics",
                "batchName": "Grade 10A",
                "startTime": "2024-01-10T09:00:00Z",
                "endTime": "2024-01-10T10:00:00Z",
                "mode": "offline",
                "room": "204"
            }]
        }"#;
        let list: ScheduleList = serde_json::from_str(json).unwrap();
        let entry = &list.schedules[0];
        assert_eq!(entry.subject, "Physics");
        assert_eq!(entry.teacher_name(), "Asha Verma");
        assert!(entry.end_time > entry.start_time);
    }

    #[test]
    fn test_update_changes_serialize_sparsely() {
        let changes = ScheduleChanges {
            room: Some("301".to_string()),
            ..ScheduleChanges::default()
        };
        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            serde_json::json!({"room": "301"})
        );
    }
}
