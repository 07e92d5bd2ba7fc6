use crate::models::{LeaveRequest, SalaryPayment, Student};
use crate::utils::{cmp_ignore_case, contains_ignore_case};

/// Filter a collection by a free-text term over the fields `haystack`
/// yields per record. An empty or whitespace-only term keeps everything.
pub fn search_records<'a, T, F>(records: &'a [T], term: &str, haystack: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Vec<String>,
{
    let term = term.trim();
    if term.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| {
            haystack(record)
                .iter()
                .any(|field| contains_ignore_case(field, term))
        })
        .collect()
}

/// Sort references in place by a string key, case-insensitively.
pub fn sort_by_key<T, F>(records: &mut [&T], key: F)
where
    F: Fn(&T) -> String,
{
    records.sort_by(|a, b| cmp_ignore_case(&key(a), &key(b)));
}

/// Leave request search over teacher name, leave type and reason.
pub fn search_leave_requests<'a>(records: &'a [LeaveRequest], term: &str) -> Vec<&'a LeaveRequest> {
    search_records(records, term, |request| {
        let mut fields = vec![request.teacher_name().to_string()];
        if let Some(leave_type) = &request.leave_type {
            fields.push(leave_type.clone());
        }
        if let Some(reason) = &request.reason {
            fields.push(reason.clone());
        }
        fields
    })
}

/// Salary search over teacher name, month and transaction reference.
pub fn search_payments<'a>(records: &'a [SalaryPayment], term: &str) -> Vec<&'a SalaryPayment> {
    search_records(records, term, |payment| {
        let mut fields = vec![payment.teacher_name().to_string(), payment.month.clone()];
        if let Some(reference) = &payment.transaction_ref {
            fields.push(reference.clone());
        }
        fields
    })
}

/// Student roster search over name and email, optionally restricted to one
/// class first.
pub fn search_students<'a>(
    records: &'a [Student],
    class: Option<&str>,
    term: &str,
) -> Vec<&'a Student> {
    let matches_class = |student: &Student| match class {
        Some(class) => student.class_label() == class,
        None => true,
    };
    search_records(records, term, |student| {
        let mut fields = vec![student.name.clone()];
        if let Some(email) = &student.email {
            fields.push(email.clone());
        }
        fields
    })
    .into_iter()
    .filter(|student| matches_class(student))
    .collect()
}
