//! Schedule endpoints (`/schedule`).

use crate::api::{Address, Verb};
use crate::cache::{Tag, TagKind};
use crate::endpoint::{MutationDef, QueryDef};
use crate::models::{
    CreateScheduleArgs, MessageResponse, ScheduleList, ScheduleMutationResponse, Teacher,
    UpdateScheduleArgs,
};

use super::teacher_list_tags;

const BASE: &str = "/schedule";

fn schedule_list_tags(list: &ScheduleList) -> Vec<Tag> {
    let mut tags = Vec::with_capacity(list.schedules.len() + 1);
    tags.push(Tag::list(TagKind::Schedule));
    tags.extend(
        list.schedules
            .iter()
            .map(|entry| Tag::id(TagKind::Schedule, entry.id.as_str())),
    );
    tags
}

pub static GET_SCHEDULES: QueryDef<(), ScheduleList> = QueryDef {
    id: "getSchedules",
    address: |_| Address::new(format!("{}/getSchedules", BASE)),
    provides: |_, list| schedule_list_tags(list),
};

pub static GET_TODAYS_SCHEDULES: QueryDef<(), ScheduleList> = QueryDef {
    id: "getTodaysSchedules",
    address: |_| Address::new(format!("{}/getTodaysSchedules", BASE)),
    provides: |_, list| schedule_list_tags(list),
};

pub static GET_SCHEDULE_TEACHERS: QueryDef<(), Vec<Teacher>> = QueryDef {
    id: "getScheduleTeachers",
    address: |_| Address::new(format!("{}/getScheduleTeachers", BASE)),
    provides: |_, teachers| teacher_list_tags(TagKind::Teacher, teachers),
};

pub static CREATE_SCHEDULE: MutationDef<CreateScheduleArgs, ScheduleMutationResponse> =
    MutationDef {
        id: "createSchedule",
        verb: Verb::Post,
        address: |_| Address::new(format!("{}/createSchedule", BASE)),
        body: |args| serde_json::to_value(args).ok(),
        invalidates: |_, response| {
            let mut tags = vec![Tag::list(TagKind::Schedule)];
            if let Some(entry) = &response.schedule {
                tags.push(Tag::id(TagKind::Schedule, entry.id.as_str()));
            }
            tags
        },
    };

pub static UPDATE_SCHEDULE: MutationDef<UpdateScheduleArgs, ScheduleMutationResponse> =
    MutationDef {
        id: "updateSchedule",
        verb: Verb::Put,
        address: |args| Address::new(format!("{}/updateSchedule/{}", BASE, args.id)),
        body: |args| serde_json::to_value(&args.changes).ok(),
        invalidates: |args, _| {
            vec![
                Tag::list(TagKind::Schedule),
                Tag::id(TagKind::Schedule, args.id.as_str()),
            ]
        },
    };

pub static DELETE_SCHEDULE: MutationDef<String, MessageResponse> = MutationDef {
    id: "deleteSchedule",
    verb: Verb::Delete,
    address: |id| Address::new(format!("{}/deleteSchedule/{}", BASE, id)),
    body: |_| None,
    invalidates: |id, _| {
        vec![
            Tag::list(TagKind::Schedule),
            Tag::id(TagKind::Schedule, id.as_str()),
        ]
    },
};
