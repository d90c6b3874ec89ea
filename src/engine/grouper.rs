// ==========================================
// Sales Bulk Import - order grouper & validator
// ==========================================
// Normalized rows → validated order aggregates + per-order issues.
// Row-level problems never raise: each failed order becomes one issue
// keyed by order_id and the rest of the batch continues. Only the
// distinct-order limit is a hard abort (batch-sizing problem).
// ==========================================

use crate::domain::order::{
    round2, same_amount, OrderAggregate, OrderHeader, OrderLineItem, PaymentInstallment,
};
use crate::domain::report::OrderIssue;
use crate::domain::types::{normalize_token, CustomerType, ItemKind, PaymentMethod};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::normalizer::SheetRow;
use std::collections::HashMap;
use tracing::{debug, info};

/// Group rows by order_id and validate each group.
///
/// Iteration follows the distinct-value order of the grouping key, so a
/// batch's result report lines up with the spreadsheet's first mention of
/// each order.
pub fn group_orders(
    rows: Vec<SheetRow>,
    max_orders: usize,
) -> ImportResult<(Vec<OrderAggregate>, Vec<OrderIssue>)> {
    let mut order_ids: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<SheetRow>> = HashMap::new();
    for row in rows {
        let key = row.order_id.clone();
        if !groups.contains_key(&key) {
            order_ids.push(key.clone());
        }
        groups.entry(key).or_default().push(row);
    }

    if order_ids.len() > max_orders {
        return Err(ImportError::OrderLimitExceeded {
            count: order_ids.len(),
            max: max_orders,
        });
    }

    let mut aggregates = Vec::new();
    let mut issues = Vec::new();
    for order_id in order_ids {
        let group = groups.remove(&order_id).unwrap_or_default();
        match build_order(&order_id, &group) {
            Ok(aggregate) => aggregates.push(aggregate),
            Err(message) => {
                debug!(order_id, message, "order rejected during grouping");
                issues.push(OrderIssue { order_id, message });
            }
        }
    }

    info!(
        valid = aggregates.len(),
        rejected = issues.len(),
        "order grouping finished"
    );
    Ok((aggregates, issues))
}

/// Build and validate one order from its row group. Any violation rejects
/// the whole order with an operator-facing message.
fn build_order(order_id: &str, group: &[SheetRow]) -> Result<OrderAggregate, String> {
    let first = group
        .first()
        .ok_or_else(|| "pedido sem linhas na planilha".to_string())?;

    // ===== Header (first-row fields) =====
    let customer_type = CustomerType::parse(&first.customer_type)
        .ok_or_else(|| "customer_tipo inválido (use FISICA/JURIDICA/ESTRANGEIRA)".to_string())?;

    if let Some(expected) = customer_type.expected_document_len() {
        if first.customer_document.len() != expected {
            let label = if expected == 11 { "CPF" } else { "CNPJ" };
            return Err(format!("{label} inválido: use {expected} dígitos"));
        }
    }

    let sale_date = first
        .sale_date
        .ok_or_else(|| "sale_date inválida ou ausente (use YYYY-MM-DD)".to_string())?;

    if first.shipping_cost < 0.0 {
        return Err("shipping_cost deve ser >= 0".to_string());
    }

    let header = OrderHeader {
        order_id: order_id.to_string(),
        sale_date,
        status: first.status.clone(),
        customer_type,
        customer_name: first.customer_name.trim().to_string(),
        customer_document: first.customer_document.clone(),
        shipping_cost: first.shipping_cost,
        declared_total: first.declared_total,
        note: first.note.trim().to_string(),
        financial_account_id: first.financial_account_id.clone(),
    };

    // ===== Line items =====
    // A row carries an item section, a payment section, or both; an order
    // with extra installments repeats the order_id on rows whose item
    // section is blank. Blank sections are skipped, never validated.
    let mut items = Vec::with_capacity(group.len());
    let mut item_total = 0.0;
    for row in group {
        if row.item_kind.trim().is_empty() && row.item_code.trim().is_empty() {
            continue;
        }
        let kind = ItemKind::parse(&row.item_kind)
            .ok_or_else(|| format!("item_tipo inválido: '{}' (use PRODUTO/SERVICO)", row.item_kind))?;
        if row.item_quantity <= 0.0 {
            return Err("item_quantidade deve ser > 0".to_string());
        }
        if row.item_unit_price < 0.0 {
            return Err("item_unit_price deve ser >= 0".to_string());
        }
        item_total += row.item_quantity * row.item_unit_price;
        items.push(OrderLineItem {
            kind,
            reference_code: row.item_code.trim().to_string(),
            quantity: row.item_quantity,
            unit_price: row.item_unit_price,
            resolved_remote_id: None,
        });
    }

    // ===== Payment installments =====
    let mut installments = Vec::with_capacity(group.len());
    let mut payment_total = 0.0;
    for row in group {
        if row.payment_method.trim().is_empty()
            && row.payment_amount == 0.0
            && row.payment_due_date.is_none()
        {
            continue;
        }
        if row.payment_amount <= 0.0 {
            return Err("payment_amount deve ser > 0".to_string());
        }
        let due_date = row
            .payment_due_date
            .ok_or_else(|| "payment_due_date inválida ou ausente (use YYYY-MM-DD)".to_string())?;
        payment_total += row.payment_amount;
        installments.push(PaymentInstallment {
            method_raw: row.payment_method.trim().to_string(),
            amount: row.payment_amount,
            due_date,
        });
    }

    // The grouping guarantees >= 1 row, but every row may still have
    // skipped one of the sections; an aggregate with an empty list is
    // rejected explicitly, never emitted.
    if items.is_empty() {
        return Err("pedido sem itens válidos".to_string());
    }
    if installments.is_empty() {
        return Err("pedido sem parcelas de pagamento válidas".to_string());
    }

    // ===== Cross-installment method invariant =====
    // Compare by canonical value; unmappable raw values compare by token so
    // a consistent-but-unknown method is reported later as
    // InvalidPaymentMethod rather than a spurious divergence here.
    let mut methods: Vec<String> = installments
        .iter()
        .map(|p| match PaymentMethod::canonicalize(&p.method_raw) {
            Some(m) => m.as_str().to_string(),
            None => normalize_token(&p.method_raw),
        })
        .collect();
    methods.sort();
    methods.dedup();
    if methods.len() > 1 {
        return Err(format!(
            "formas de pagamento divergentes no mesmo pedido: {}",
            methods.join(", ")
        ));
    }

    // ===== Arithmetic invariants =====
    let total_calc = round2(item_total + header.shipping_cost);

    if let Some(declared) = header.declared_total {
        if !same_amount(declared, total_calc) {
            return Err(format!(
                "total_declarado ({:.2}) difere da soma (itens+frete={:.2})",
                declared, total_calc
            ));
        }
    }

    let payment_sum = round2(payment_total);
    if !same_amount(payment_sum, total_calc) {
        return Err(format!(
            "soma dos pagamentos ({:.2}) difere do total calculado ({:.2})",
            payment_sum, total_calc
        ));
    }

    Ok(OrderAggregate {
        header,
        items,
        installments,
    })
}
