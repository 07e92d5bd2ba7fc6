use std::cmp::Ordering;

/// Case-insensitive substring check used by search filters.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Case-insensitive comparison for sorting by string columns.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Format a `YYYY-MM` salary month into a readable label, e.g. "January 2024".
pub fn format_month(month: &str) -> String {
    if let Ok(date) = chrono::NaiveDate::parse_from_str(&format!("{}-01", month), "%Y-%m-%d") {
        date.format("%B %Y").to_string()
    } else {
        month.to_string()
    }
}

/// Format a date string to a more readable format
pub fn format_date(date: &str) -> String {
    // Try to parse ISO format and convert to readable
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date) {
        dt.format("%b %d, %Y").to_string()
    } else if date.len() >= 10 {
        // Fall back to the YYYY-MM-DD prefix
        date.chars().take(10).collect()
    } else {
        date.to_string()
    }
}
