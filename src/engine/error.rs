// ==========================================
// Sales Bulk Import - per-order error types
// ==========================================
// Everything here is recorded against a single order and never aborts
// the batch. Validation messages are operator-facing and kept in the
// tenant's language, matching what the upload UI shows.
// ==========================================

use crate::remote::client::ApiError;
use crate::remote::resolver::ResolveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderError {
    // ===== Pre-submission validation =====
    #[error("{0}")]
    Validation(String),

    // ===== Resolution =====
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    // ===== Payload construction =====
    #[error("forma de pagamento inválida: '{raw}'. Use valores como: {examples}")]
    InvalidPaymentMethod {
        raw: String,
        examples: &'static str,
    },

    #[error("pedido '{order_id}' não contém dígitos; o número do pedido é obrigatório")]
    MissingOrderNumber { order_id: String },

    // ===== Remote creation =====
    #[error("remote creation call failed: {0}")]
    Remote(#[source] ApiError),
}

pub type OrderResult<T> = Result<T, OrderError>;
