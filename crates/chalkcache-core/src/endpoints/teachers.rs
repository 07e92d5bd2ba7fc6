//! Teacher approval endpoints (`/api/v1/approveReject`).
//!
//! Pending applications and the approved roster are tagged as separate
//! kinds: approving or rejecting an application must stale the request
//! queue without touching unrelated teacher detail views.

use crate::api::{Address, Verb};
use crate::cache::{Tag, TagKind};
use crate::endpoint::{MutationDef, QueryDef};
use crate::models::{RejectTeacherArgs, Teacher, TeacherMutationResponse};

use super::teacher_list_tags;

const BASE: &str = "/api/v1/approveReject";

pub static GET_PENDING_TEACHERS: QueryDef<(), Vec<Teacher>> = QueryDef {
    id: "getPendingTeachers",
    address: |_| Address::new(format!("{}/teacher-requests", BASE)),
    provides: |_, teachers| teacher_list_tags(TagKind::TeacherRequest, teachers),
};

pub static GET_REJECTED_TEACHERS: QueryDef<(), Vec<Teacher>> = QueryDef {
    id: "getRejectedTeachers",
    address: |_| Address::new(format!("{}/rejected", BASE)),
    provides: |_, teachers| teacher_list_tags(TagKind::TeacherRequest, teachers),
};

pub static GET_ALL_TEACHERS: QueryDef<(), Vec<Teacher>> = QueryDef {
    id: "getAllTeachers",
    address: |_| Address::new(format!("{}/getAllTeachers", BASE)),
    provides: |_, teachers| teacher_list_tags(TagKind::Teacher, teachers),
};

pub static GET_TEACHER_DETAILS: QueryDef<String, Teacher> = QueryDef {
    id: "getTeacherDetails",
    address: |id| Address::new(format!("{}/teacher-details/{}", BASE, id)),
    provides: |id, _| vec![Tag::id(TagKind::Teacher, id.as_str())],
};

pub static APPROVE_TEACHER: MutationDef<String, TeacherMutationResponse> = MutationDef {
    id: "approveTeacher",
    verb: Verb::Put,
    address: |id| Address::new(format!("{}/teacherApprove/{}", BASE, id)),
    body: |_| None,
    invalidates: |id, _| {
        vec![
            Tag::list(TagKind::TeacherRequest),
            Tag::id(TagKind::TeacherRequest, id.as_str()),
            Tag::list(TagKind::Teacher),
            Tag::id(TagKind::Teacher, id.as_str()),
            Tag::list(TagKind::Dashboard),
        ]
    },
};

pub static REJECT_TEACHER: MutationDef<RejectTeacherArgs, TeacherMutationResponse> = MutationDef {
    id: "rejectTeacher",
    verb: Verb::Put,
    address: |args| Address::new(format!("{}/teacherReject/{}", BASE, args.id)),
    body: |args| {
        let mut map = serde_json::Map::new();
        if let Some(reason) = &args.reason {
            map.insert(
                "reason".to_string(),
                serde_json::Value::String(reason.clone()),
            );
        }
        Some(serde_json::Value::Object(map))
    },
    invalidates: |args, _| {
        vec![
            Tag::list(TagKind::TeacherRequest),
            Tag::id(TagKind::TeacherRequest, args.id.as_str()),
            Tag::list(TagKind::Dashboard),
        ]
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_teacher(id: &str) -> Teacher {
        serde_json::from_value(serde_json::json!({"_id": id, "name": "T"})).unwrap()
    }

    #[test]
    fn test_list_provides_sentinel_plus_item_tags() {
        let teachers = vec![sample_teacher("t1"), sample_teacher("t2")];
        let tags = (GET_PENDING_TEACHERS.provides)(&(), &teachers);
        assert_eq!(
            tags,
            vec![
                Tag::list(TagKind::TeacherRequest),
                Tag::id(TagKind::TeacherRequest, "t1"),
                Tag::id(TagKind::TeacherRequest, "t2"),
            ]
        );
    }

    #[test]
    fn test_details_provides_single_item_tag() {
        let id = "t1".to_string();
        let tags = (GET_TEACHER_DETAILS.provides)(&id, &sample_teacher("t1"));
        assert_eq!(tags, vec![Tag::id(TagKind::Teacher, "t1")]);
    }

    #[test]
    fn test_approve_invalidates_both_kinds() {
        let id = "t1".to_string();
        let response = TeacherMutationResponse {
            message: None,
            teacher: None,
        };
        let tags = (APPROVE_TEACHER.invalidates)(&id, &response);
        assert!(tags.contains(&Tag::list(TagKind::TeacherRequest)));
        assert!(tags.contains(&Tag::id(TagKind::Teacher, "t1")));
        assert!(tags.contains(&Tag::list(TagKind::Dashboard)));
    }

    #[test]
    fn test_reject_leaves_roster_alone() {
        let args = RejectTeacherArgs {
            id: "t1".to_string(),
            reason: Some("Incomplete documents".to_string()),
        };
        let response = TeacherMutationResponse {
            message: None,
            teacher: None,
        };
        let tags = (REJECT_TEACHER.invalidates)(&args, &response);
        assert!(tags.contains(&Tag::list(TagKind::TeacherRequest)));
        assert!(!tags.contains(&Tag::list(TagKind::Teacher)));
    }

    #[test]
    fn test_reject_body_carries_reason() {
        let args = RejectTeacherArgs {
            id: "t1".to_string(),
            reason: Some("Incomplete documents".to_string()),
        };
        let body = (REJECT_TEACHER.body)(&args).unwrap();
        assert_eq!(body["reason"], "Incomplete documents");
    }
}
