// ==========================================
// Sales Bulk Import - file parser
// ==========================================
// Stage 0 of the pipeline: tabular file → raw string records.
// Supports Excel (.xlsx/.xls) and CSV (.csv); the upload UI accepts both.
// Header keys are kept verbatim here; canonicalization is the
// normalizer's job.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

pub type RawRecord = HashMap<String, String>;

// ==========================================
// CSV parser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    pub fn parse_to_raw_records(&self, path: &Path) -> ImportResult<Vec<RawRecord>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // tolerate ragged rows
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // Skip fully blank rows
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }
            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// Excel parser
// ==========================================
pub struct ExcelParser;

impl ExcelParser {
    pub fn parse_to_raw_records(&self, path: &Path) -> ImportResult<Vec<RawRecord>> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // Auto-detected reader: .xlsx and legacy .xls workbooks
        let mut workbook = open_workbook_auto(path)?;

        // First sheet only; the template keeps data on sheet 1
        let sheet_names = workbook.sheet_names();
        if sheet_names.is_empty() {
            return Err(ImportError::ExcelParseError(
                "workbook has no sheets".to_string(),
            ));
        }
        let sheet_name = sheet_names[0].clone();
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let header_row = rows.next().ok_or(ImportError::EmptySheet)?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut records = Vec::new();
        for data_row in rows {
            let mut row_map = HashMap::new();
            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }
            records.push(row_map);
        }

        Ok(records)
    }
}

// ==========================================
// Universal parser (dispatch on extension)
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<Vec<RawRecord>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_records(path),
            "xlsx" | "xls" => ExcelParser.parse_to_raw_records(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
