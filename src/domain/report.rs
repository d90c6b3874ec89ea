// ==========================================
// Sales Bulk Import - batch report model
// ==========================================
// The caller of one upload-processing pass receives three artifacts:
// grouping/validation issues, per-order submission results, and summary
// counts. Order-level failures never abort the batch.
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// OrderIssue - pre-submission validation failure
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIssue {
    pub order_id: String,
    pub message: String,
}

// ==========================================
// SubmissionStatus / SubmissionRecord
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Created,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub order_id: String,
    pub status: SubmissionStatus,
    pub remote_sale_id: Option<String>,
    pub message: String,
}

impl SubmissionRecord {
    pub fn created(order_id: &str, remote_sale_id: Option<String>) -> Self {
        Self {
            order_id: order_id.to_string(),
            status: SubmissionStatus::Created,
            remote_sale_id,
            message: "venda criada com sucesso".to_string(),
        }
    }

    pub fn error(order_id: &str, message: String) -> Self {
        Self {
            order_id: order_id.to_string(),
            status: SubmissionStatus::Error,
            remote_sale_id: None,
            message,
        }
    }
}

// ==========================================
// BatchSummary / BatchReport
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_orders: usize, // validated orders that reached submission
    pub created: usize,
    pub failed: usize, // submission failures only (grouping issues counted apart)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub batch_id: String,
    pub summary: BatchSummary,
    pub results: Vec<SubmissionRecord>,
    pub grouping_issues: Vec<OrderIssue>,
}
