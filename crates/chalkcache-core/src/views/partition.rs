use crate::models::{ApprovalStatus, AttendanceRecord, AttendanceStatus, LeaveRequest, Teacher};

/// Records that carry the pending/approved/rejected workflow status.
pub trait HasApprovalStatus {
    fn approval_status(&self) -> ApprovalStatus;
}

impl HasApprovalStatus for LeaveRequest {
    fn approval_status(&self) -> ApprovalStatus {
        self.status
    }
}

impl HasApprovalStatus for Teacher {
    fn approval_status(&self) -> ApprovalStatus {
        self.workflow_status()
    }
}

/// Records that carry a daily attendance status.
pub trait HasAttendanceStatus {
    fn attendance_status(&self) -> AttendanceStatus;
}

impl HasAttendanceStatus for AttendanceRecord {
    fn attendance_status(&self) -> AttendanceStatus {
        self.status
    }
}

/// The three workflow buckets of a collection. Buckets borrow from the
/// input and are disjoint; their union is exactly the input.
#[derive(Debug)]
pub struct StatusPartition<'a, T> {
    pub pending: Vec<&'a T>,
    pub approved: Vec<&'a T>,
    pub rejected: Vec<&'a T>,
}

impl<T> StatusPartition<'_, T> {
    pub fn total(&self) -> usize {
        self.pending.len() + self.approved.len() + self.rejected.len()
    }

    pub fn counts(&self) -> StatusCounts {
        StatusCounts {
            total: self.total(),
            pending: self.pending.len(),
            approved: self.approved.len(),
            rejected: self.rejected.len(),
        }
    }
}

/// The stat-card numbers shown above every approval-style table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

/// Partition a collection by workflow status.
///
/// Pure and recomputed from scratch on every call; aggregates are never
/// patched incrementally, so a processed record can not leave a stale
/// pending count behind.
pub fn partition_by_status<T: HasApprovalStatus>(records: &[T]) -> StatusPartition<'_, T> {
    let mut partition = StatusPartition {
        pending: Vec::new(),
        approved: Vec::new(),
        rejected: Vec::new(),
    };
    for record in records {
        match record.approval_status() {
            ApprovalStatus::Pending => partition.pending.push(record),
            ApprovalStatus::Approved => partition.approved.push(record),
            ApprovalStatus::Rejected => partition.rejected.push(record),
        }
    }
    partition
}

/// Attendance counters plus the rate shown on the attendance page.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub leave: usize,
    pub total: usize,
    /// Percentage of records marked present; 0 for an empty collection.
    pub attendance_rate: f64,
}

/// Compute attendance counters over a (possibly filtered) collection.
pub fn attendance_summary<T: HasAttendanceStatus>(records: &[T]) -> AttendanceSummary {
    let mut present = 0;
    let mut absent = 0;
    let mut leave = 0;
    for record in records {
        match record.attendance_status() {
            AttendanceStatus::Present => present += 1,
            AttendanceStatus::Absent => absent += 1,
            AttendanceStatus::Leave => leave += 1,
        }
    }
    let total = records.len();
    let attendance_rate = if total == 0 {
        0.0
    } else {
        present as f64 / total as f64 * 100.0
    };
    AttendanceSummary {
        present,
        absent,
        leave,
        total,
        attendance_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leave_request(id: &str, status: &str) -> LeaveRequest {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "fromDate": "2024-01-10T00:00:00Z",
            "toDate": "2024-01-11T00:00:00Z",
            "status": status
        }))
        .unwrap()
    }

    fn attendance(id: &str, status: &str) -> AttendanceRecord {
        serde_json::from_value(serde_json::json!({
            "_id": id,
            "date": "2024-01-10",
            "status": status
        }))
        .unwrap()
    }

    #[test]
    fn test_partitions_are_disjoint_and_complete() {
        let records = vec![
            leave_request("a", "pending"),
            leave_request("b", "approved"),
            leave_request("c", "rejected"),
            leave_request("d", "pending"),
        ];
        let partition = partition_by_status(&records);

        assert_eq!(partition.pending.len(), 2);
        assert_eq!(partition.approved.len(), 1);
        assert_eq!(partition.rejected.len(), 1);
        assert_eq!(partition.total(), records.len());

        // Union by identity equals the input
        let mut ids: Vec<&str> = partition
            .pending
            .iter()
            .chain(&partition.approved)
            .chain(&partition.rejected)
            .map(|r| r.id.as_str())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_counts_sum_to_total() {
        let records = vec![
            leave_request("a", "pending"),
            leave_request("b", "approved"),
        ];
        let counts = partition_by_status(&records).counts();
        assert_eq!(
            counts.total,
            counts.pending + counts.approved + counts.rejected
        );
    }

    #[test]
    fn test_empty_collection_partitions_empty() {
        let records: Vec<LeaveRequest> = Vec::new();
        let counts = partition_by_status(&records).counts();
        assert_eq!(counts.total, 0);
    }

    #[test]
    fn test_teacher_partition_uses_reconciled_status() {
        let teachers: Vec<Teacher> = serde_json::from_value(serde_json::json!([
            {"_id": "t1", "name": "A", "isApproved": true},
            {"_id": "t2", "name": "B", "isRejected": true},
            {"_id": "t3", "name": "C", "status": "pending"}
        ]))
        .unwrap();
        let counts = partition_by_status(&teachers).counts();
        assert_eq!(counts.approved, 1);
        assert_eq!(counts.rejected, 1);
        assert_eq!(counts.pending, 1);
    }

    #[test]
    fn test_attendance_rate() {
        let records = vec![
            attendance("1", "present"),
            attendance("2", "present"),
            attendance("3", "absent"),
            attendance("4", "leave"),
        ];
        let summary = attendance_summary(&records);
        assert_eq!(summary.present, 2);
        assert_eq!(summary.absent, 1);
        assert_eq!(summary.leave, 1);
        assert_eq!(summary.total, 4);
        assert!((summary.attendance_rate - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_attendance_rate_empty_is_zero() {
        let records: Vec<AttendanceRecord> = Vec::new();
        assert_eq!(attendance_summary(&records).attendance_rate, 0.0);
    }
}
