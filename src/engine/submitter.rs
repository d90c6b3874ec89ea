// ==========================================
// Sales Bulk Import - batch submitter
// ==========================================
// End-to-end pipeline for one upload:
//   parse file → normalize rows → group/validate orders →
//   resolve entities → build payload → POST each sale → report
// One failed order costs exactly that order; batch-level failures
// (bad file, limits, expired session) abort before any submission.
// ==========================================

use crate::config::ImportConfig;
use crate::domain::order::OrderAggregate;
use crate::domain::report::{BatchReport, BatchSummary, SubmissionRecord, SubmissionStatus};
use crate::engine::error::OrderError;
use crate::engine::grouper::group_orders;
use crate::engine::payload::build_payload;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::normalizer::normalize_records;
use crate::remote::client::ApiClient;
use crate::remote::resolver::EntityResolver;
use crate::remote::shapes::extract_id;
use serde_json::Value;
use std::path::Path;
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// BatchSubmitter - upload processing entry point
// ==========================================
pub struct BatchSubmitter<'a, C: ApiClient> {
    client: &'a C,
    config: ImportConfig,
}

impl<'a, C: ApiClient> BatchSubmitter<'a, C> {
    pub fn new(client: &'a C, config: ImportConfig) -> Self {
        Self { client, config }
    }

    /// Process one uploaded spreadsheet end to end.
    ///
    /// Steps:
    /// 1. Session check (abort before touching the file on expiry)
    /// 2. Parse CSV/Excel into raw records
    /// 3. Normalize headers/values into canonical rows
    /// 4. Group by order_id and validate each order
    /// 5. Per order: resolve items + customer, build payload, POST
    #[instrument(skip(self, path), fields(file = %path.as_ref().display()))]
    pub fn process_upload<P: AsRef<Path>>(&self, path: P) -> ImportResult<BatchReport> {
        if !self.client.token_is_valid() {
            return Err(ImportError::Unauthenticated);
        }

        let batch_id = Uuid::new_v4().to_string();
        info!(batch_id, "upload processing started");

        // === Step 1: parse the file ===
        let raw_records = UniversalFileParser.parse(path.as_ref())?;

        // === Step 2: normalize rows ===
        let rows = normalize_records(raw_records, self.config.max_rows)?;
        let total_rows = rows.len();

        // === Step 3: group and validate ===
        let (orders, grouping_issues) = group_orders(rows, self.config.max_orders)?;

        // === Step 4: resolve + submit, one order at a time ===
        let resolver = EntityResolver::new(self.client);
        let mut results = Vec::with_capacity(orders.len());
        for mut order in orders {
            let order_id = order.header.order_id.clone();
            match self.submit_order(&resolver, &mut order) {
                Ok(sale_id) => {
                    info!(order_id, sale_id = sale_id.as_deref(), "sale created");
                    results.push(SubmissionRecord::created(&order_id, sale_id));
                }
                Err(e) => {
                    warn!(order_id, error = %e, "order submission failed");
                    results.push(SubmissionRecord::error(&order_id, e.to_string()));
                }
            }
        }

        let created = results
            .iter()
            .filter(|r| r.status == SubmissionStatus::Created)
            .count();
        let summary = BatchSummary {
            total_orders: results.len(),
            created,
            failed: results.len() - created,
        };
        info!(
            batch_id,
            total_rows,
            created = summary.created,
            failed = summary.failed,
            rejected = grouping_issues.len(),
            "upload processing finished"
        );

        Ok(BatchReport {
            batch_id,
            summary,
            results,
            grouping_issues,
        })
    }

    /// Resolve, build, and POST one order. Returns the remote sale id
    /// when the creation response carries one.
    fn submit_order(
        &self,
        resolver: &EntityResolver<'a, C>,
        order: &mut OrderAggregate,
    ) -> Result<Option<String>, OrderError> {
        let customer_id = resolver.fill_order(order)?;
        let payload = build_payload(order, &customer_id)?;
        let response = self
            .client
            .authenticated_post(&self.config.sales_path, &payload)
            .map_err(OrderError::Remote)?;
        Ok(sale_id_from(&response))
    }
}

fn sale_id_from(response: &Value) -> Option<String> {
    extract_id(response).or_else(|| {
        response
            .get("sale_id")
            .and_then(|v| match v {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => n.as_i64().map(|i| i.to_string()),
                _ => None,
            })
    })
}
