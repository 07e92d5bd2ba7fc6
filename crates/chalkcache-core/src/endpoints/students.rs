//! Student endpoints (`/student`). Read-only from the admin dashboard.

use crate::api::Address;
use crate::cache::{Tag, TagKind};
use crate::endpoint::QueryDef;
use crate::models::{FeeSummaryResponse, Student, StudentList};

const BASE: &str = "/student";

pub static GET_ALL_STUDENTS: QueryDef<(), StudentList> = QueryDef {
    id: "getAllStudents",
    address: |_| Address::new(format!("{}/getAllStudents", BASE)),
    provides: |_, list| {
        let mut tags = Vec::with_capacity(list.data.len() + 1);
        tags.push(Tag::list(TagKind::Student));
        tags.extend(
            list.data
                .iter()
                .map(|student| Tag::id(TagKind::Student, student.id.as_str())),
        );
        tags
    },
};

pub static GET_STUDENT_BY_ID: QueryDef<String, Student> = QueryDef {
    id: "getStudentById",
    address: |id| Address::new(format!("{}/getStudentById/{}", BASE, id)),
    provides: |id, _| vec![Tag::id(TagKind::Student, id.as_str())],
};

pub static GET_FEE_SUMMARY: QueryDef<(), FeeSummaryResponse> = QueryDef {
    id: "getFeeSummary",
    // Derived from the student roster backend-side, so it shares the
    // collection sentinel and refreshes with it.
    address: |_| Address::new(format!("{}/getFeeSummary", BASE)),
    provides: |_, _| vec![Tag::list(TagKind::Student)],
};
