// ==========================================
// Sales Bulk Import - core library
// ==========================================
// Spreadsheet-driven bulk importer for sales orders: parse an operator's
// CSV/Excel upload, validate and group the rows into orders, resolve
// products/services/customers against the accounting API, and create
// each sale through its REST endpoint.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Import layer - file parsing and row normalization
pub mod importer;

// Engine layer - grouping, validation, payload, submission
pub mod engine;

// Remote layer - API client and entity resolution
pub mod remote;

// Configuration
pub mod config;

// Logging
pub mod logging;

// ==========================================
// Core re-exports
// ==========================================

pub use config::ImportConfig;
pub use domain::order::{OrderAggregate, OrderHeader, OrderLineItem, PaymentInstallment};
pub use domain::report::{BatchReport, BatchSummary, OrderIssue, SubmissionRecord, SubmissionStatus};
pub use domain::types::{CustomerType, ItemKind, PaymentMethod};
pub use engine::{BatchSubmitter, OrderError};
pub use importer::{ImportError, ImportResult};
pub use remote::{ApiClient, ApiError, EntityResolver, HttpApiClient, StaticTokenProvider};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "sales-bulk-import";
