//! Dashboard overview endpoint (`/dashboard`).
//!
//! The stats aggregate across teachers, leaves, salaries and attendance, so
//! the mutations in those groups invalidate the `Dashboard` tag alongside
//! their own.

use crate::api::Address;
use crate::cache::{Tag, TagKind};
use crate::endpoint::QueryDef;
use crate::models::DashboardStatsResponse;

pub static GET_DASHBOARD_STATS: QueryDef<(), DashboardStatsResponse> = QueryDef {
    id: "getDashboardStats",
    address: |_| Address::new("/dashboard/getDashboardStats"),
    provides: |_, _| vec![Tag::list(TagKind::Dashboard)],
};
