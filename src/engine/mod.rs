// ==========================================
// Sales Bulk Import - submission engine
// ==========================================
// Responsibility: canonical rows → validated orders → remote sales
// ==========================================

pub mod error;
pub mod grouper;
pub mod payload;
pub mod submitter;

pub use error::{OrderError, OrderResult};
pub use grouper::group_orders;
pub use payload::{build_payload, extract_order_number, infer_plan_descriptor};
pub use submitter::BatchSubmitter;
