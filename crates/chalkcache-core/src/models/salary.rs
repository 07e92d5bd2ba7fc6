use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::teacher::TeacherRef;

/// A salary payment record. `month` is the `YYYY-MM` accounting month the
/// payment covers, not the date it was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct SalaryPayment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "teacherId", default)]
    pub teacher: Option<TeacherRef>,
    pub month: String,
    #[serde(rename = "paidAmount")]
    pub paid_amount: f64,
    #[serde(rename = "paymentMethod", default)]
    pub payment_method: Option<String>,
    #[serde(rename = "transactionRef", default)]
    pub transaction_ref: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SalaryPayment {
    pub fn teacher_name(&self) -> &str {
        self.teacher
            .as_ref()
            .map(TeacherRef::display_name)
            .unwrap_or("Unknown Teacher")
    }
}

/// List wrapper for `/getAllPayments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS))]
#[cfg_attr(feature = "ts", ts(export))]
pub struct SalaryList {
    pub records: Vec<SalaryPayment>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Query filters for the payment list.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SalaryFilter {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    #[serde(rename = "teacherId")]
    pub teacher_id: Option<String>,
    pub month: Option<String>,
}

/// Body of the create-payment mutation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSalaryArgs {
    #[serde(rename = "teacherId")]
    pub teacher_id: String,
    pub month: String,
    #[serde(rename = "paidAmount")]
    pub paid_amount: f64,
    #[serde(rename = "paymentMethod", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(rename = "transactionRef", skip_serializing_if = "Option::is_none")]
    pub transaction_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Partial update applied to an existing payment.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SalaryChanges {
    #[serde(rename = "paidAmount", skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
    #[serde(rename = "paymentMethod", skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(rename = "transactionRef", skip_serializing_if = "Option::is_none")]
    pub transaction_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Arguments for the update mutation: target id plus the changed fields.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateSalaryArgs {
    pub id: String,
    pub changes: SalaryChanges,
}

/// Response of the create/update mutations; the affected record is echoed
/// back so invalidation can target its id.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryMutationResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub payment: Option<SalaryPayment>,
}
