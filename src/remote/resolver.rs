// ==========================================
// Sales Bulk Import - entity resolver
// ==========================================
// Resolves human-entered references (SKU/service code, customer document)
// to the remote API's opaque identifiers, creating a minimal customer
// record when none exists.
//
// Search strategies are best-effort: an HTTP 4xx from one endpoint means
// "no match here, try the next". Transport failures and 5xx are NOT
// swallowed into "not found" — they surface as a retryable remote error
// for that order only.
// ==========================================

use crate::domain::order::{OrderAggregate, OrderHeader};
use crate::domain::types::{only_digits, CustomerType, ItemKind};
use crate::remote::client::{ApiClient, ApiError};
use crate::remote::shapes::{extract_id, extract_records};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

// ==========================================
// ResolveError
// ==========================================
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{kind} not found for code '{code}'")]
    NotFound { kind: ItemKind, code: String },

    #[error("customer creation response carried no usable identifier")]
    MissingCustomerId,

    #[error("remote call failed during resolution: {0}")]
    Remote(#[source] ApiError),
}

// ==========================================
// EntityResolver
// ==========================================
pub struct EntityResolver<'a, C: ApiClient> {
    client: &'a C,
}

impl<'a, C: ApiClient> EntityResolver<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Resolve every line item's remote id in place, then resolve (or
    /// create) the customer. Returns the customer's remote id.
    pub fn fill_order(&self, order: &mut OrderAggregate) -> Result<String, ResolveError> {
        for item in &mut order.items {
            let id = self.resolve_item(item.kind, &item.reference_code)?;
            item.resolved_remote_id = Some(id);
        }
        self.resolve_or_create_customer(&order.header)
    }

    /// Resolve a product/service reference code to its remote id.
    pub fn resolve_item(&self, kind: ItemKind, code: &str) -> Result<String, ResolveError> {
        // Primary and legacy endpoint per kind; both tenants' shapes are
        // handled by the extractor list.
        let strategies: &[(&str, &str)] = match kind {
            ItemKind::Product => &[("/v1/produto", "codigo_sku"), ("/v1/products", "code")],
            ItemKind::Service => &[("/v1/servicos", "codigo")],
        };

        for (path, param) in strategies {
            match self.client.authenticated_get(path, &[(param, code)]) {
                Ok(body) => {
                    if let Some(id) = first_record_id(&body) {
                        debug!(%kind, code, id, "item resolved");
                        return Ok(id);
                    }
                }
                Err(e) if e.is_no_match() => {
                    debug!(%kind, code, path, error = %e, "search strategy yielded no match");
                }
                Err(e) => return Err(ResolveError::Remote(e)),
            }
        }

        Err(ResolveError::NotFound {
            kind,
            code: code.to_string(),
        })
    }

    /// Search the customer by document digits, trying the historical query
    /// parameter names; create a minimal record when nothing matches.
    pub fn resolve_or_create_customer(&self, header: &OrderHeader) -> Result<String, ResolveError> {
        let document = only_digits(&header.customer_document);

        if !document.is_empty() {
            for param in ["documento", "cpf", "cnpj"] {
                match self
                    .client
                    .authenticated_get("/v1/pessoas", &[(param, document.as_str())])
                {
                    Ok(body) => {
                        let candidates = extract_records(&body).unwrap_or_default();
                        for candidate in &candidates {
                            if candidate_matches(candidate, &document, &header.customer_name) {
                                if let Some(id) = extract_id(candidate) {
                                    debug!(document, id, "customer resolved");
                                    return Ok(id);
                                }
                            }
                        }
                    }
                    Err(e) if e.is_no_match() => {
                        debug!(param, error = %e, "customer search yielded no match");
                    }
                    Err(e) => return Err(ResolveError::Remote(e)),
                }
            }
        }

        warn!(document, name = %header.customer_name, "customer not found; creating minimal record");
        self.create_minimal_customer(header, &document)
    }

    fn create_minimal_customer(
        &self,
        header: &OrderHeader,
        document: &str,
    ) -> Result<String, ResolveError> {
        // Person type follows the document length; the spreadsheet type
        // only decides when there is no document (foreign customers).
        let person_type = match document.len() {
            11 => CustomerType::Individual,
            14 => CustomerType::Company,
            _ => header.customer_type,
        };

        let mut payload = json!({
            "perfis": [{"tipo_perfil": "CLIENTE"}],
            "tipo_pessoa": person_type.remote_value(),
            "nome": header.customer_name,
        });
        match document.len() {
            11 => payload["cpf"] = json!(document),
            14 => payload["cnpj"] = json!(document),
            _ => {}
        }

        let response = self
            .client
            .authenticated_post("/v1/pessoa", &payload)
            .map_err(ResolveError::Remote)?;

        // Some tenants wrap the created record
        extract_id(&response)
            .or_else(|| {
                extract_records(&response)
                    .and_then(|records| records.first().and_then(extract_id))
            })
            .ok_or(ResolveError::MissingCustomerId)
    }
}

fn first_record_id(body: &Value) -> Option<String> {
    extract_records(body).and_then(|records| records.iter().find_map(extract_id))
}

/// Candidate comparison: normalized document equality when both carry one;
/// otherwise fall back to normalized name equality.
fn candidate_matches(candidate: &Value, document: &str, name: &str) -> bool {
    let candidate_doc = ["cpf", "cnpj", "documento"]
        .iter()
        .find_map(|k| candidate.get(*k).and_then(Value::as_str))
        .map(only_digits)
        .unwrap_or_default();

    if !candidate_doc.is_empty() {
        return candidate_doc == document;
    }

    let candidate_name = candidate
        .get("nome")
        .or_else(|| candidate.get("name"))
        .and_then(Value::as_str)
        .unwrap_or("");
    !name.trim().is_empty() && normalize_name(candidate_name) == normalize_name(name)
}

fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
