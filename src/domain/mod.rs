// ==========================================
// Sales Bulk Import - domain layer
// ==========================================
// Typed order model and batch report types. No I/O here.
// ==========================================

pub mod order;
pub mod report;
pub mod types;

pub use order::{round2, same_amount, OrderAggregate, OrderHeader, OrderLineItem, PaymentInstallment};
pub use report::{BatchReport, BatchSummary, OrderIssue, SubmissionRecord, SubmissionStatus};
pub use types::{normalize_token, only_digits, CustomerType, ItemKind, PaymentMethod};
