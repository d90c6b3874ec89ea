// ==========================================
// Sales Bulk Import - import layer
// ==========================================
// Responsibility: tabular upload → normalized canonical rows
// Supports: Excel, CSV
// ==========================================

pub mod error;
pub mod file_parser;
pub mod normalizer;
pub mod template;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, RawRecord, UniversalFileParser};
pub use normalizer::{normalize_records, SheetRow, DEFAULT_STATUS, REQUIRED_COLUMNS};
pub use template::{generate_template_csv, write_template};
