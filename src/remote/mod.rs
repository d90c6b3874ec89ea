// ==========================================
// Sales Bulk Import - remote API layer
// ==========================================
// Client seam, response-shape normalization, and entity resolution.
// ==========================================

pub mod client;
pub mod resolver;
pub mod shapes;

pub use client::{ApiClient, ApiError, HttpApiClient, StaticTokenProvider, TokenProvider};
pub use resolver::{EntityResolver, ResolveError};
pub use shapes::{extract_id, extract_records};
