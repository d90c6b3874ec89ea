// ==========================================
// Sales Bulk Import - upload template generation
// ==========================================
// Produces the spreadsheet template operators fill in: one row per line
// item, orders with multiple items/installments repeat the same pedido_id.
// The template must round-trip through the normalizer with no structural
// errors.
// ==========================================

use crate::importer::error::ImportResult;
use std::path::Path;

const TEMPLATE_HEADERS: &[&str] = &[
    "pedido_id",
    "sale_date",
    "customer_tipo",
    "customer_nome",
    "customer_documento",
    "item_tipo",
    "item_codigo",
    "item_quantidade",
    "item_unit_price",
    "payment_method",
    "payment_amount",
    "payment_due_date",
    "status",
    "shipping_cost",
    "total_declarado",
    "observacao",
];

const SAMPLE_ROWS: &[&[&str]] = &[
    &[
        "PED-1001",
        "2025-07-27",
        "FISICA",
        "João da Silva",
        "12345678909",
        "PRODUTO",
        "CAMISAPOLO123",
        "2",
        "99.90",
        "PIX",
        "199.80",
        "2025-07-30",
        "EM_ABERTO",
        "0",
        "199.80",
        "Venda exemplo",
    ],
    &[
        "PED-1002",
        "2025-07-27",
        "JURIDICA",
        "TechNova Soluções LTDA",
        "12345678000195",
        "SERVICO",
        "SVC-CONSULTORIA",
        "5",
        "150.00",
        "BOLETO",
        "750.00",
        "2025-08-05",
        "EM_ABERTO",
        "0",
        "750.00",
        "",
    ],
];

/// Render the CSV template with the sample rows.
pub fn generate_template_csv() -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    // Writer::write_record over static slices cannot fail on a Vec sink
    writer.write_record(TEMPLATE_HEADERS).ok();
    for row in SAMPLE_ROWS {
        writer.write_record(*row).ok();
    }
    let bytes = writer.into_inner().unwrap_or_default();
    String::from_utf8(bytes).unwrap_or_default()
}

/// Write the template to disk (download target for the upload UI).
pub fn write_template<P: AsRef<Path>>(path: P) -> ImportResult<()> {
    std::fs::write(path.as_ref(), generate_template_csv())?;
    Ok(())
}
