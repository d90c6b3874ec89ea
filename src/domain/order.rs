// ==========================================
// Sales Bulk Import - order domain model
// ==========================================
// One OrderAggregate = one logical sale assembled from the spreadsheet
// rows sharing an order_id. Built transiently per batch run, validated
// once, then either promoted to a creation payload or reported as an
// error. Never persisted.
// ==========================================

use crate::domain::types::{CustomerType, ItemKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Round to 2 decimals (money arithmetic happens on cent-rounded values).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Cent comparison helper: true when the two amounts round to the same cent.
pub fn same_amount(a: f64, b: f64) -> bool {
    (a * 100.0).round() as i64 == (b * 100.0).round() as i64
}

// ==========================================
// OrderLineItem
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub kind: ItemKind,
    pub reference_code: String, // SKU or service code, resolved remotely
    pub quantity: f64,          // > 0
    pub unit_price: f64,        // >= 0
    pub resolved_remote_id: Option<String>, // filled during resolution
}

impl OrderLineItem {
    pub fn subtotal(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

// ==========================================
// PaymentInstallment
// ==========================================
// The method is kept raw here; canonicalization happens at payload build,
// after the cross-installment single-method invariant is checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInstallment {
    pub method_raw: String,
    pub amount: f64, // > 0
    pub due_date: NaiveDate,
}

// ==========================================
// OrderHeader
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderHeader {
    // ===== Grouping key =====
    pub order_id: String,

    // ===== Sale =====
    pub sale_date: NaiveDate,
    pub status: String, // tenant-defined enum value, e.g. EM_ABERTO

    // ===== Customer =====
    pub customer_type: CustomerType,
    pub customer_name: String,
    pub customer_document: String, // digits only

    // ===== Financials =====
    pub shipping_cost: f64,          // >= 0, default 0
    pub declared_total: Option<f64>, // cross-checked against computed total

    // ===== Optional =====
    pub note: String,
    pub financial_account_id: Option<String>,
}

// ==========================================
// OrderAggregate
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderAggregate {
    pub header: OrderHeader,
    pub items: Vec<OrderLineItem>,          // non-empty once validated
    pub installments: Vec<PaymentInstallment>, // non-empty once validated
}

impl OrderAggregate {
    /// round2(sum of item subtotals + shipping).
    pub fn computed_total(&self) -> f64 {
        round2(self.items.iter().map(OrderLineItem::subtotal).sum::<f64>() + self.header.shipping_cost)
    }

    /// round2(sum of installment amounts).
    pub fn installment_total(&self) -> f64 {
        round2(self.installments.iter().map(|p| p.amount).sum::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ItemKind;

    fn item(qty: f64, price: f64) -> OrderLineItem {
        OrderLineItem {
            kind: ItemKind::Product,
            reference_code: "SKU".to_string(),
            quantity: qty,
            unit_price: price,
            resolved_remote_id: None,
        }
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(199.8049), 199.80);
        assert_eq!(round2(199.8051), 199.81);
        assert_eq!(round2(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_same_amount_cent_boundary() {
        assert!(same_amount(200.0, 200.004));
        assert!(!same_amount(200.0, 200.006));
        assert!(!same_amount(200.0, 199.99));
    }

    #[test]
    fn test_computed_total_includes_shipping() {
        let agg = OrderAggregate {
            header: OrderHeader {
                order_id: "PED-1".to_string(),
                sale_date: NaiveDate::from_ymd_opt(2025, 7, 27).unwrap(),
                status: "EM_ABERTO".to_string(),
                customer_type: crate::domain::types::CustomerType::Individual,
                customer_name: "João".to_string(),
                customer_document: "12345678909".to_string(),
                shipping_cost: 10.0,
                declared_total: None,
                note: String::new(),
                financial_account_id: None,
            },
            items: vec![item(2.0, 99.90)],
            installments: vec![],
        };
        assert_eq!(agg.computed_total(), 209.80);
    }
}
