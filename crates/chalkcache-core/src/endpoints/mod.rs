//! Static endpoint registry, one module per resource group.
//!
//! Every operation the dashboard issues is declared here: queries with the
//! tags they provide, mutations with the tags they invalidate. List queries
//! tag each contained record plus the collection sentinel, so a mutation can
//! stale exactly the entries that held the touched record.
//!
//! Mutations that move a record through the status workflow (or change
//! money/attendance) additionally invalidate the dashboard counters, since
//! those aggregate across resource groups.

pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod leave;
pub mod salary;
pub mod schedule;
pub mod students;
pub mod teachers;

use crate::cache::{Tag, TagKind};
use crate::models::Teacher;

/// Tags for a roster-style teacher list: the collection sentinel plus one
/// tag per returned teacher.
pub(crate) fn teacher_list_tags(kind: TagKind, teachers: &[Teacher]) -> Vec<Tag> {
    let mut tags = Vec::with_capacity(teachers.len() + 1);
    tags.push(Tag::list(kind));
    tags.extend(teachers.iter().map(|t| Tag::id(kind, t.id.as_str())));
    tags
}
