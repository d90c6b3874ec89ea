// ==========================================
// Upload pipeline end-to-end tests
// ==========================================
// Full pass over a CSV fixture against a canned API: parse → normalize →
// group → resolve → submit → report.
// ==========================================


use sales_bulk_import::{
    logging, BatchSubmitter, ImportConfig, ImportError, SubmissionStatus,
};
use serde_json::json;
use test_helpers::{write_csv_fixture, MockApiClient};

const HEADER: &str = "pedido_id,sale_date,customer_tipo,customer_nome,customer_documento,\
item_tipo,item_codigo,item_quantidade,item_unit_price,payment_method,payment_amount,payment_due_date";

/// Four orders: two that submit, one whose SKU the API does not know,
/// one whose installments do not add up.
fn fixture_csv() -> String {
    format!(
        "{HEADER}\n\
        PED-1001,2025-07-27,FISICA,João da Silva,12345678909,PRODUTO,SKU1,2,99.90,PIX,199.80,2025-07-30\n\
        PED-1002,2025-07-27,JURIDICA,TechNova Soluções LTDA,12345678000195,SERVICO,SVC-OK,1,500.00,BOLETO,500.00,2025-08-05\n\
        PED-1003,2025-07-27,FISICA,Maria Souza,98765432100,PRODUTO,SKU-NOPE,1,50.00,PIX,50.00,2025-08-01\n\
        PED-1004,2025-07-27,FISICA,Carlos Lima,11122233344,PRODUTO,SKU1,1,150.00,PIX,100.00,2025-08-01\n"
    )
}

fn mock_api() -> MockApiClient {
    MockApiClient::new()
        .on_get("/v1/produto", "SKU1", json!({"itens": [{"id": "prod-1"}]}))
        .on_get("/v1/servicos", "SVC-OK", json!([{"id": 55}]))
        .on_get(
            "/v1/pessoas",
            "12345678909",
            json!({"data": [{"id": "c-1", "cpf": "123.456.789-09", "nome": "João da Silva"}]}),
        )
        .on_post("/v1/pessoa", json!({"id": "c-new"}))
        .on_post("/v1/venda", json!({"id": 900}))
}

#[test]
fn test_full_batch_mixed_outcomes() {
    logging::init_test();
    let client = mock_api();
    let file = write_csv_fixture(&fixture_csv());

    let submitter = BatchSubmitter::new(&client, ImportConfig::default());
    let report = submitter.process_upload(file.path()).unwrap();

    // PED-1004 never reaches submission
    assert_eq!(report.grouping_issues.len(), 1);
    assert_eq!(report.grouping_issues[0].order_id, "PED-1004");
    assert!(report.grouping_issues[0]
        .message
        .contains("soma dos pagamentos"));

    // the rest: two created, one failed on resolution
    assert_eq!(report.summary.total_orders, 3);
    assert_eq!(report.summary.created, 2);
    assert_eq!(report.summary.failed, 1);

    // report order follows the spreadsheet's first mention of each order
    let ids: Vec<&str> = report.results.iter().map(|r| r.order_id.as_str()).collect();
    assert_eq!(ids, ["PED-1001", "PED-1002", "PED-1003"]);

    assert_eq!(report.results[0].status, SubmissionStatus::Created);
    assert_eq!(report.results[0].remote_sale_id.as_deref(), Some("900"));
    assert_eq!(report.results[1].status, SubmissionStatus::Created);
    assert_eq!(report.results[2].status, SubmissionStatus::Error);
    assert!(report.results[2].message.contains("SKU-NOPE"));
}

#[test]
fn test_submitted_payloads_carry_resolved_ids() {
    logging::init_test();
    let client = mock_api();
    let file = write_csv_fixture(&fixture_csv());

    let submitter = BatchSubmitter::new(&client, ImportConfig::default());
    submitter.process_upload(file.path()).unwrap();

    let sales = client.posted_to("/v1/venda");
    assert_eq!(sales.len(), 2);

    // known customer, resolved product, single up-front installment
    assert_eq!(sales[0]["order_number"], 1001);
    assert_eq!(sales[0]["customer"]["id"], "c-1");
    assert_eq!(sales[0]["items"][0]["item_id"], "prod-1");
    assert_eq!(sales[0]["payment"]["method"], "PIX");
    assert_eq!(sales[0]["payment"]["plan_descriptor"], "à vista");

    // unknown customer was created first, then referenced
    let people = client.posted_to("/v1/pessoa");
    assert_eq!(people.len(), 1);
    assert_eq!(people[0]["tipo_pessoa"], "JURIDICA");
    assert_eq!(people[0]["cnpj"], "12345678000195");
    assert_eq!(sales[1]["order_number"], 1002);
    assert_eq!(sales[1]["customer"]["id"], "c-new");
    assert_eq!(sales[1]["payment"]["method"], "BOLETO_BANCARIO");
}

#[test]
fn test_expired_session_aborts_before_any_call() {
    logging::init_test();
    let mut client = mock_api();
    client.token_valid = false;
    let file = write_csv_fixture(&fixture_csv());

    let submitter = BatchSubmitter::new(&client, ImportConfig::default());
    let err = submitter.process_upload(file.path()).unwrap_err();
    assert!(matches!(err, ImportError::Unauthenticated));
    assert!(client.posts.borrow().is_empty());
}

#[test]
fn test_order_limit_aborts_whole_batch() {
    logging::init_test();
    let client = mock_api();
    let file = write_csv_fixture(&fixture_csv());

    let config = ImportConfig {
        max_orders: 2,
        ..ImportConfig::default()
    };
    let submitter = BatchSubmitter::new(&client, config);
    let err = submitter.process_upload(file.path()).unwrap_err();
    assert!(matches!(
        err,
        ImportError::OrderLimitExceeded { count: 4, max: 2 }
    ));
    assert!(client.posts.borrow().is_empty());
}

#[test]
fn test_unknown_extension_is_a_structural_error() {
    logging::init_test();
    let client = mock_api();
    let submitter = BatchSubmitter::new(&client, ImportConfig::default());
    let err = submitter.process_upload("planilha.ods").unwrap_err();
    assert!(matches!(err, ImportError::UnsupportedFormat(_)));
}
