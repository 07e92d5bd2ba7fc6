//! Attendance endpoints (`/attendance`).

use crate::api::{Address, Verb};
use crate::cache::{Tag, TagKind};
use crate::endpoint::{MutationDef, QueryDef};
use crate::models::{
    AttendanceFilter, AttendanceList, AttendanceRecord, MarkAttendanceArgs, MarkAttendanceResponse,
    Teacher,
};

use super::teacher_list_tags;

const BASE: &str = "/attendance";

pub static GET_ATTENDANCES: QueryDef<AttendanceFilter, AttendanceList> = QueryDef {
    id: "getAttendances",
    address: |filter| {
        Address::new(format!("{}/getAttendances", BASE))
            .opt_param("date", filter.date.as_deref())
            .opt_param("status", filter.status.map(|s| s.as_str()))
            .opt_param("page", filter.page)
            .opt_param("limit", filter.limit)
    },
    provides: |_, list| {
        let mut tags = Vec::with_capacity(list.attendances.len() + 1);
        tags.push(Tag::list(TagKind::Attendance));
        tags.extend(
            list.attendances
                .iter()
                .map(|record| Tag::id(TagKind::Attendance, record.id.as_str())),
        );
        tags
    },
};

pub static GET_ATTENDANCE_BY_ID: QueryDef<String, AttendanceRecord> = QueryDef {
    id: "getAttendanceById",
    address: |id| Address::new(format!("{}/getAttendanceById/{}", BASE, id)),
    provides: |id, _| vec![Tag::id(TagKind::Attendance, id.as_str())],
};

pub static GET_ATTENDANCE_TEACHERS: QueryDef<(), Vec<Teacher>> = QueryDef {
    id: "getAttendanceTeachers",
    address: |_| Address::new(format!("{}/getAttendanceTeachers", BASE)),
    provides: |_, teachers| teacher_list_tags(TagKind::Teacher, teachers),
};

pub static MARK_ATTENDANCE: MutationDef<MarkAttendanceArgs, MarkAttendanceResponse> = MutationDef {
    id: "markAttendance",
    verb: Verb::Post,
    address: |_| Address::new(format!("{}/markAttendance", BASE)),
    body: |args| serde_json::to_value(args).ok(),
    invalidates: |_, response| {
        // Target the echoed record when the server allocated one; every
        // list filtered on any date/status combination shares the sentinel.
        let mut tags = vec![Tag::list(TagKind::Attendance)];
        if let Some(record) = &response.attendance {
            tags.push(Tag::id(TagKind::Attendance, record.id.as_str()));
        }
        tags.push(Tag::list(TagKind::Dashboard));
        tags
    },
};
