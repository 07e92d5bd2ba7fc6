use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fee standing embedded in each student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct StudentFees {
    #[serde(rename = "totalAmount", default)]
    pub total_amount: f64,
    #[serde(rename = "paidAmount", default)]
    pub paid_amount: f64,
    #[serde(rename = "pendingAmount", default)]
    pub pending_amount: f64,
    #[serde(rename = "paymentStatus", default)]
    pub payment_status: Option<String>,
    #[serde(rename = "lastPaymentDate", default)]
    pub last_payment_date: Option<DateTime<Utc>>,
}

/// A student record from the admin roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "className", default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub fees: Option<StudentFees>,
}

impl Student {
    /// Class label with the fallback the roster page uses.
    pub fn class_label(&self) -> &str {
        self.class_name.as_deref().unwrap_or("Unknown")
    }
}

/// List wrapper for `/getAllStudents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct StudentList {
    pub data: Vec<Student>,
}

/// School-wide fee totals from `/getFeeSummary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct FeeSummary {
    #[serde(rename = "totalAmount", default)]
    pub total_amount: f64,
    #[serde(rename = "paidAmount", default)]
    pub paid_amount: f64,
    #[serde(rename = "pendingAmount", default)]
    pub pending_amount: f64,
}

/// Response wrapper for `/getFeeSummary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct FeeSummaryResponse {
    pub data: FeeSummary,
}
