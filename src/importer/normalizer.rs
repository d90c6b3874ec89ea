// ==========================================
// Sales Bulk Import - spreadsheet normalizer
// ==========================================
// Stage 1: raw string records → canonical-column rows.
// - header names: diacritics stripped, case-folded, non-alphanumerics
//   collapsed to underscore, then mapped through the localized-header
//   table; unknown headers pass through so the required-column check
//   can still fail loudly
// - numeric text accepts comma or dot decimals; unparseable/empty → 0.0
// - dates parse from common formats; unparseable → None (rejected later,
//   never silently dropped)
// - documents reduced to digits only
// - missing optional columns synthesized with defaults
// ==========================================

use crate::domain::types::only_digits;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRecord;
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Canonical columns every upload must carry (one row = one line item).
pub const REQUIRED_COLUMNS: &[&str] = &[
    "order_id",
    "sale_date",
    "customer_type",
    "customer_name",
    "customer_document",
    "item_kind",
    "item_code",
    "item_quantity",
    "item_unit_price",
    "payment_method",
    "payment_amount",
    "payment_due_date",
];

/// Default status assigned when the optional column is absent.
pub const DEFAULT_STATUS: &str = "EM_ABERTO";

// ==========================================
// SheetRow - one normalized spreadsheet row
// ==========================================
// Dates are Option: None marks the unparseable/missing sentinel the
// grouper must reject explicitly.
#[derive(Debug, Clone)]
pub struct SheetRow {
    pub order_id: String,
    pub sale_date: Option<NaiveDate>,
    pub status: String,
    pub customer_type: String,
    pub customer_name: String,
    pub customer_document: String,
    pub item_kind: String,
    pub item_code: String,
    pub item_quantity: f64,
    pub item_unit_price: f64,
    pub payment_method: String,
    pub payment_amount: f64,
    pub payment_due_date: Option<NaiveDate>,
    pub shipping_cost: f64,
    pub declared_total: Option<f64>,
    pub note: String,
    pub financial_account_id: Option<String>,
    pub row_number: usize,
}

// ==========================================
// Header normalization
// ==========================================

/// Normalize a raw header: strip diacritics (NFKD, drop combining marks),
/// case-fold, collapse runs of non-alphanumerics to a single underscore.
pub fn normalize_header(raw: &str) -> String {
    let folded: String = raw
        .nfkd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let mut out = String::with_capacity(folded.len());
    let mut last_was_sep = true; // also trims leading separators
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Map a normalized localized header to its canonical column name.
/// Unknown headers pass through unchanged.
fn canonical_column(normalized: &str) -> &str {
    match normalized {
        "pedido_id" | "pedido" | "numero_pedido" => "order_id",
        "sale_date" | "data_venda" | "data_da_venda" => "sale_date",
        "customer_tipo" | "cliente_tipo" | "tipo_cliente" => "customer_type",
        "customer_nome" | "cliente_nome" | "nome_cliente" | "razao_social" => "customer_name",
        "customer_documento" | "cliente_documento" | "documento" | "cpf_cnpj" => {
            "customer_document"
        }
        "item_tipo" | "tipo_item" => "item_kind",
        "item_codigo" | "codigo_item" | "sku" => "item_code",
        "item_quantidade" | "quantidade" => "item_quantity",
        "item_unit_price" | "item_preco_unitario" | "preco_unitario" | "valor_unitario" => {
            "item_unit_price"
        }
        "payment_method" | "forma_pagamento" | "forma_de_pagamento" => "payment_method",
        "payment_amount" | "valor_pagamento" | "valor_parcela" => "payment_amount",
        "payment_due_date" | "vencimento" | "data_vencimento" => "payment_due_date",
        "status" | "situacao" => "status",
        "shipping_cost" | "frete" | "valor_frete" => "shipping_cost",
        "total_declarado" | "declared_total" => "declared_total",
        "observacao" | "observacoes" | "nota" | "note" => "note",
        "financial_account_id" | "conta_financeira" | "conta_financeira_id" => {
            "financial_account_id"
        }
        other => other,
    }
}

// ==========================================
// Field coercion
// ==========================================

/// Coerce numeric-looking text. Accepts comma or dot decimal separators;
/// empty or unparseable values coerce to 0.0.
pub fn coerce_number(raw: &str) -> f64 {
    let s = raw.trim().replace(',', ".");
    if s.is_empty() {
        return 0.0;
    }
    s.parse::<f64>().unwrap_or(0.0)
}

/// Parse a calendar date from the formats that show up in uploads.
/// None is the invalid-date sentinel.
pub fn coerce_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    // Excel cells often render as a full datetime
    let s = s.split_whitespace().next().unwrap_or(s);
    const FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%d.%m.%Y"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

// ==========================================
// Normalizer
// ==========================================

fn get<'a>(row: &'a HashMap<String, String>, key: &str) -> &'a str {
    row.get(key).map(String::as_str).unwrap_or("").trim()
}

fn get_opt(row: &HashMap<String, String>, key: &str) -> Option<String> {
    let v = get(row, key);
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

/// Normalize parsed records into canonical rows.
///
/// Fails with a structural error when a required column is absent from the
/// sheet, or when the row count exceeds `max_rows`.
pub fn normalize_records(records: Vec<RawRecord>, max_rows: usize) -> ImportResult<Vec<SheetRow>> {
    if records.is_empty() {
        return Err(ImportError::EmptySheet);
    }
    if records.len() > max_rows {
        return Err(ImportError::RowLimitExceeded {
            count: records.len(),
            max: max_rows,
        });
    }

    // Rename headers once per record (blank cells may drop keys per row,
    // so the required-column check runs over the union of seen headers).
    let mut seen_columns: HashSet<String> = HashSet::new();
    let mut renamed: Vec<HashMap<String, String>> = Vec::with_capacity(records.len());
    for record in records {
        let mut row = HashMap::with_capacity(record.len());
        for (key, value) in record {
            let canonical = canonical_column(&normalize_header(&key)).to_string();
            seen_columns.insert(canonical.clone());
            row.insert(canonical, value);
        }
        renamed.push(row);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !seen_columns.contains(**c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns(missing));
    }

    let mut rows = Vec::with_capacity(renamed.len());
    for (idx, row) in renamed.into_iter().enumerate() {
        let declared_total = get_opt(&row, "declared_total").map(|v| coerce_number(&v));
        rows.push(SheetRow {
            order_id: get(&row, "order_id").to_string(),
            sale_date: coerce_date(get(&row, "sale_date")),
            status: get_opt(&row, "status").unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            customer_type: get(&row, "customer_type").to_string(),
            customer_name: get(&row, "customer_name").to_string(),
            customer_document: only_digits(get(&row, "customer_document")),
            item_kind: get(&row, "item_kind").to_string(),
            item_code: get(&row, "item_code").to_string(),
            item_quantity: coerce_number(get(&row, "item_quantity")),
            item_unit_price: coerce_number(get(&row, "item_unit_price")),
            payment_method: get(&row, "payment_method").to_string(),
            payment_amount: coerce_number(get(&row, "payment_amount")),
            payment_due_date: coerce_date(get(&row, "payment_due_date")),
            shipping_cost: coerce_number(get(&row, "shipping_cost")),
            declared_total,
            note: get(&row, "note").to_string(),
            financial_account_id: get_opt(&row, "financial_account_id"),
            row_number: idx + 1,
        });
    }

    debug!(rows = rows.len(), "spreadsheet normalized");
    Ok(rows)
}
