//! Data models for the dashboard's resource groups.
//!
//! This module contains the typed schemas every endpoint response is
//! validated against at the transport boundary, including:
//!
//! - `Teacher`, `TeacherRef`: the roster and the embedded join reference
//! - `LeaveRequest`: leave workflow records with populated teacher refs
//! - `AttendanceRecord`: per-day attendance
//! - `SalaryPayment`, `ScheduleEntry`, `Student`: the remaining pages
//! - `ApprovalStatus`, `AttendanceStatus`: the centralized status workflow
//! - `DashboardStats`, `AdminProfile`: overview counters and auth profile

pub mod admin;
pub mod attendance;
pub mod common;
pub mod dashboard;
pub mod leave;
pub mod salary;
pub mod schedule;
pub mod status;
pub mod student;
pub mod teacher;

pub use admin::{AdminAuthResponse, AdminLoginArgs, AdminProfile, VerifyOtpArgs};
pub use common::MessageResponse;
pub use attendance::{
    AttendanceFilter, AttendanceList, AttendanceRecord, MarkAttendanceArgs, MarkAttendanceResponse,
};
pub use dashboard::{DashboardAttendance, DashboardStats, DashboardStatsResponse};
pub use leave::{
    LeaveRequest, LeaveRequestFilter, LeaveRequestList, ProcessLeaveArgs, ProcessLeaveResponse,
};
pub use salary::{
    CreateSalaryArgs, SalaryChanges, SalaryFilter, SalaryList, SalaryMutationResponse,
    SalaryPayment, UpdateSalaryArgs,
};
pub use schedule::{
    CreateScheduleArgs, ScheduleChanges, ScheduleEntry, ScheduleList, ScheduleMutationResponse,
    UpdateScheduleArgs,
};
pub use status::{ApprovalStatus, AttendanceStatus};
pub use student::{FeeSummary, FeeSummaryResponse, Student, StudentFees, StudentList};
pub use teacher::{RejectTeacherArgs, Teacher, TeacherMutationResponse, TeacherRef};
