// ==========================================
// Sales Bulk Import - creation payload builder
// ==========================================
// Validated aggregate + resolved remote ids → the exact nested request
// body the sale-creation endpoint expects. Runs after resolution; a
// missing resolved id here is a pipeline bug, not operator input.
// ==========================================

use crate::domain::order::{same_amount, OrderAggregate, PaymentInstallment};
use crate::domain::types::PaymentMethod;
use crate::engine::error::{OrderError, OrderResult};
use chrono::NaiveDate;
use serde_json::{json, Value};

/// Plan descriptor for a single up-front installment.
pub const PLAN_CASH: &str = "à vista";

/// Extract the numeric order number from the spreadsheet order id.
/// "PED-1001" → 1001; ids with no digits cannot be submitted.
pub fn extract_order_number(order_id: &str) -> OrderResult<i64> {
    let digits: String = order_id.chars().filter(|c| c.is_ascii_digit()).collect();
    digits
        .parse::<i64>()
        .map_err(|_| OrderError::MissingOrderNumber {
            order_id: order_id.to_string(),
        })
}

/// Infer the payment-plan descriptor from the installment schedule:
/// - one installment → cash ("à vista"), whatever the amount
/// - N equal installments (1-cent tolerance) → "Nx"
/// - otherwise → comma-joined day offsets from the sale date, clamped at 0
///
/// An empty schedule yields an empty descriptor (validated aggregates
/// always carry at least one installment).
pub fn infer_plan_descriptor(sale_date: NaiveDate, installments: &[PaymentInstallment]) -> String {
    let first = match installments {
        [] => return String::new(),
        [_] => return PLAN_CASH.to_string(),
        [first, ..] => first,
    };

    if installments.iter().all(|p| same_amount(p.amount, first.amount)) {
        return format!("{}x", installments.len());
    }

    installments
        .iter()
        .map(|p| {
            let offset = (p.due_date - sale_date).num_days().max(0);
            offset.to_string()
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the order-creation request body.
pub fn build_payload(order: &OrderAggregate, customer_id: &str) -> OrderResult<Value> {
    let header = &order.header;
    let order_number = extract_order_number(&header.order_id)?;

    // Single canonical method across installments was enforced at grouping;
    // the first raw value stands for all of them.
    let method_raw = &order.installments[0].method_raw;
    let method = PaymentMethod::canonicalize(method_raw).ok_or_else(|| {
        OrderError::InvalidPaymentMethod {
            raw: method_raw.clone(),
            examples: PaymentMethod::examples(),
        }
    })?;

    let items: Vec<Value> = order
        .items
        .iter()
        .map(|item| {
            let remote_id = item.resolved_remote_id.as_deref().ok_or_else(|| {
                OrderError::Validation(format!(
                    "item '{}' sem identificador resolvido",
                    item.reference_code
                ))
            })?;
            Ok(json!({
                "item_id": remote_id,
                "quantity": item.quantity,
                "unit_price": item.unit_price,
            }))
        })
        .collect::<OrderResult<_>>()?;

    let installments: Vec<Value> = order
        .installments
        .iter()
        .map(|p| {
            json!({
                "amount": p.amount,
                "due_date": p.due_date.format("%Y-%m-%d").to_string(),
            })
        })
        .collect();

    let mut payload = json!({
        "order_number": order_number,
        "customer": { "id": customer_id },
        "sale_date": header.sale_date.format("%Y-%m-%d").to_string(),
        "status": header.status,
        "items": items,
        "payment": {
            "method": method.as_str(),
            "plan_descriptor": infer_plan_descriptor(header.sale_date, &order.installments),
            "installments": installments,
        },
    });

    // Shipping only rides along when it actually costs something
    if header.shipping_cost > 0.0 {
        payload["value_composition"] = json!({ "shipping_cost": header.shipping_cost });
    }
    if !header.note.is_empty() {
        payload["note"] = json!(header.note);
    }
    if let Some(account) = &header.financial_account_id {
        payload["financial_account_id"] = json!(account);
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderHeader, OrderLineItem};
    use crate::domain::types::{CustomerType, ItemKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn installment(amount: f64, due: NaiveDate) -> PaymentInstallment {
        PaymentInstallment {
            method_raw: "PIX".to_string(),
            amount,
            due_date: due,
        }
    }

    fn order() -> OrderAggregate {
        OrderAggregate {
            header: OrderHeader {
                order_id: "PED-1001".to_string(),
                sale_date: date(2025, 7, 27),
                status: "EM_ABERTO".to_string(),
                customer_type: CustomerType::Individual,
                customer_name: "João da Silva".to_string(),
                customer_document: "12345678909".to_string(),
                shipping_cost: 0.0,
                declared_total: None,
                note: String::new(),
                financial_account_id: None,
            },
            items: vec![OrderLineItem {
                kind: ItemKind::Service,
                reference_code: "SVC-1".to_string(),
                quantity: 1.0,
                unit_price: 150.0,
                resolved_remote_id: Some("srv-9".to_string()),
            }],
            installments: vec![installment(150.0, date(2025, 8, 26))],
        }
    }

    #[test]
    fn test_extract_order_number() {
        assert_eq!(extract_order_number("PED-1001").unwrap(), 1001);
        assert_eq!(extract_order_number("1002").unwrap(), 1002);
        let err = extract_order_number("PED-ABC").unwrap_err();
        assert!(matches!(err, OrderError::MissingOrderNumber { .. }));
    }

    #[test]
    fn test_plan_descriptor_empty_schedule_does_not_panic() {
        let plan = infer_plan_descriptor(date(2025, 7, 27), &[]);
        assert_eq!(plan, "");
    }

    #[test]
    fn test_plan_descriptor_single_installment_is_cash() {
        let sale = date(2025, 7, 27);
        let plan = infer_plan_descriptor(sale, &[installment(999.0, date(2025, 8, 1))]);
        assert_eq!(plan, PLAN_CASH);
    }

    #[test]
    fn test_plan_descriptor_equal_installments() {
        let sale = date(2025, 7, 27);
        let plan = infer_plan_descriptor(
            sale,
            &[
                installment(200.0, date(2025, 8, 26)),
                installment(200.0, date(2025, 9, 25)),
                installment(200.004, date(2025, 10, 25)), // within 1 cent
            ],
        );
        assert_eq!(plan, "3x");
    }

    #[test]
    fn test_plan_descriptor_day_offsets() {
        let sale = date(2025, 7, 27);
        let plan = infer_plan_descriptor(
            sale,
            &[
                installment(100.0, date(2025, 8, 26)),
                installment(50.0, date(2025, 9, 25)),
            ],
        );
        assert_eq!(plan, "30,60");
    }

    #[test]
    fn test_plan_descriptor_clamps_negative_offsets() {
        let sale = date(2025, 7, 27);
        let plan = infer_plan_descriptor(
            sale,
            &[
                installment(100.0, date(2025, 7, 20)), // before the sale
                installment(50.0, date(2025, 8, 26)),
            ],
        );
        assert_eq!(plan, "0,30");
    }

    #[test]
    fn test_payload_minimal_order() {
        let payload = build_payload(&order(), "cust-1").unwrap();
        assert_eq!(payload["order_number"], 1001);
        assert_eq!(payload["customer"]["id"], "cust-1");
        assert_eq!(payload["sale_date"], "2025-07-27");
        assert_eq!(payload["items"][0]["item_id"], "srv-9");
        assert_eq!(payload["payment"]["method"], "PIX");
        assert_eq!(payload["payment"]["plan_descriptor"], PLAN_CASH);
        // no shipping, no note, no account
        assert!(payload.get("value_composition").is_none());
        assert!(payload.get("note").is_none());
        assert!(payload.get("financial_account_id").is_none());
    }

    #[test]
    fn test_payload_includes_optionals_when_present() {
        let mut o = order();
        o.header.shipping_cost = 12.5;
        o.header.note = "entrega rápida".to_string();
        o.header.financial_account_id = Some("acc-7".to_string());
        let payload = build_payload(&o, "cust-1").unwrap();
        assert_eq!(payload["value_composition"]["shipping_cost"], 12.5);
        assert_eq!(payload["note"], "entrega rápida");
        assert_eq!(payload["financial_account_id"], "acc-7");
    }

    #[test]
    fn test_payload_canonicalizes_method_alias() {
        let mut o = order();
        o.installments[0].method_raw = "BOLETO_CAIXA".to_string();
        let payload = build_payload(&o, "cust-1").unwrap();
        assert_eq!(payload["payment"]["method"], "BOLETO_BANCARIO");
    }

    #[test]
    fn test_payload_rejects_unknown_method_naming_it() {
        let mut o = order();
        o.installments[0].method_raw = "VALE_REFEICAO".to_string();
        let err = build_payload(&o, "cust-1").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("VALE_REFEICAO"), "{msg}");
        assert!(msg.contains("PIX"), "{msg}");
    }

    #[test]
    fn test_payload_rejects_non_numeric_order_id() {
        let mut o = order();
        o.header.order_id = "PED-ABC".to_string();
        let err = build_payload(&o, "cust-1").unwrap_err();
        assert!(matches!(err, OrderError::MissingOrderNumber { .. }));
    }
}
