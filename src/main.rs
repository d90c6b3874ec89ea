// ==========================================
// Sales Bulk Import - command line runner
// ==========================================
// Usage:
//   sales-bulk-import template <out.csv>   write the upload template
//   sales-bulk-import <planilha.csv|xlsx>  process one upload
//
// Environment:
//   SALES_API_BASE   accounting API base URL (required for uploads)
//   SALES_API_TOKEN  OAuth access token (required for uploads)
//   SALES_API_SALES_PATH, SALES_IMPORT_MAX_ROWS, SALES_IMPORT_MAX_ORDERS
// ==========================================

use anyhow::{bail, Context, Result};
use sales_bulk_import::importer::write_template;
use sales_bulk_import::{
    BatchSubmitter, HttpApiClient, ImportConfig, StaticTokenProvider,
};
use std::path::Path;
use tracing::info;

fn main() -> Result<()> {
    sales_bulk_import::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [cmd, out] if cmd == "template" => {
            write_template(Path::new(out)).context("falha ao gravar o modelo de planilha")?;
            info!(path = %out, "template written");
            Ok(())
        }
        [file] => run_upload(file),
        _ => {
            bail!("uso: sales-bulk-import <planilha.csv|xlsx> | sales-bulk-import template <out.csv>")
        }
    }
}

fn run_upload(file: &str) -> Result<()> {
    let config = ImportConfig::from_env();
    if config.api_base.is_empty() {
        bail!("SALES_API_BASE não definido");
    }
    let token = std::env::var("SALES_API_TOKEN").ok().filter(|t| !t.is_empty());

    let client = HttpApiClient::new(
        config.api_base.clone(),
        Box::new(StaticTokenProvider::new(token)),
    )
    .context("falha ao construir o cliente HTTP")?;

    let submitter = BatchSubmitter::new(&client, config);
    let report = submitter
        .process_upload(file)
        .context("falha ao processar o upload")?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.summary.failed > 0 || !report.grouping_issues.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
