//! Leave request endpoints (`/api/v1/leaveRequest`).

use crate::api::{Address, Verb};
use crate::cache::{Tag, TagKind};
use crate::endpoint::{MutationDef, QueryDef};
use crate::models::{
    LeaveRequest, LeaveRequestFilter, LeaveRequestList, ProcessLeaveArgs, ProcessLeaveResponse,
};

const BASE: &str = "/api/v1/leaveRequest";

pub static GET_LEAVE_REQUESTS: QueryDef<LeaveRequestFilter, LeaveRequestList> = QueryDef {
    id: "getLeaveRequests",
    address: |filter| {
        Address::new(format!("{}/getLeaveRequests", BASE))
            .opt_param("page", filter.page)
            .opt_param("limit", filter.limit)
            .opt_param("status", filter.status.map(|s| s.as_str()))
    },
    provides: |_, list| {
        let mut tags = Vec::with_capacity(list.leave_requests.len() + 1);
        tags.push(Tag::list(TagKind::LeaveRequest));
        tags.extend(
            list.leave_requests
                .iter()
                .map(|request| Tag::id(TagKind::LeaveRequest, request.id.as_str())),
        );
        tags
    },
};

pub static GET_LEAVE_REQUEST_BY_ID: QueryDef<String, LeaveRequest> = QueryDef {
    id: "getLeaveRequestById",
    address: |id| Address::new(format!("{}/getLeaveRequestById/{}", BASE, id)),
    provides: |id, _| vec![Tag::id(TagKind::LeaveRequest, id.as_str())],
};

pub static PROCESS_LEAVE_REQUEST: MutationDef<ProcessLeaveArgs, ProcessLeaveResponse> =
    MutationDef {
        id: "processLeaveRequest",
        verb: Verb::Put,
        address: |args| Address::new(format!("{}/processLeaveRequest/{}", BASE, args.id)),
        body: |args| {
            let mut map = serde_json::Map::new();
            map.insert(
                "status".to_string(),
                serde_json::Value::String(args.status.as_str().to_string()),
            );
            if let Some(reason) = &args.rejection_reason {
                map.insert(
                    "rejectionReason".to_string(),
                    serde_json::Value::String(reason.clone()),
                );
            }
            Some(serde_json::Value::Object(map))
        },
        invalidates: |args, _| {
            vec![
                Tag::list(TagKind::LeaveRequest),
                Tag::id(TagKind::LeaveRequest, args.id.as_str()),
                Tag::list(TagKind::Dashboard),
            ]
        },
    };
