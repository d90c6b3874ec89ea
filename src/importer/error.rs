// ==========================================
// Sales Bulk Import - batch-level error types
// ==========================================
// Everything in this enum aborts the whole batch before any order is
// submitted. Per-order problems live in engine::error::OrderError and are
// collected into the report instead of propagating.
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    // ===== File errors =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("unsupported file format: {0} (only .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("file read failed: {0}")]
    FileReadError(String),

    #[error("Excel parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    // ===== Structural errors =====
    #[error("required columns missing: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("spreadsheet has no data rows")]
    EmptySheet,

    // ===== Defensive limits =====
    #[error("row limit exceeded: {count} rows (max {max})")]
    RowLimitExceeded { count: usize, max: usize },

    #[error("order limit exceeded: {count} distinct orders (max {max})")]
    OrderLimitExceeded { count: usize, max: usize },

    // ===== Authentication =====
    #[error("access token missing or expired; log in again before importing")]
    Unauthenticated,
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
