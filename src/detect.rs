//! Input format detection.
//!
//! Detection prefers the file extension and falls back to content
//! sniffing: XLSX files are ZIP containers with a fixed magic, JSON
//! documents open with `{` or `[`, and anything else non-empty is
//! treated as delimiter-separated text.

use crate::error::{Error, Result};
use std::fmt;
use std::fs;
use std::path::Path;

/// ZIP local-file-header magic; XLSX is a ZIP container.
const ZIP_MAGIC: &[u8; 4] = b"PK\x03\x04";

/// UTF-8 byte order mark, skipped before sniffing text content.
const UTF8_BOM: &[u8; 3] = &[0xEF, 0xBB, 0xBF];

/// Input formats the readers understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatType {
    /// Office Open XML spreadsheet (ZIP container).
    Xlsx,
    /// Delimiter-separated text with a header row.
    Csv,
    /// One JSON record or an array of records.
    Json,
}

impl fmt::Display for FormatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatType::Xlsx => "XLSX",
            FormatType::Csv => "CSV",
            FormatType::Json => "JSON",
        };
        write!(f, "{name}")
    }
}

/// Detects the format of in-memory input.
///
/// Empty (or all-whitespace) input is the only undetectable case and
/// returns [`Error::UnknownFormat`].
pub fn detect_format_from_bytes(data: &[u8]) -> Result<FormatType> {
    if data.starts_with(ZIP_MAGIC) {
        return Ok(FormatType::Xlsx);
    }
    let body = data.strip_prefix(UTF8_BOM.as_slice()).unwrap_or(data);
    match body.iter().find(|b| !b.is_ascii_whitespace()) {
        Some(&b'{') | Some(&b'[') => Ok(FormatType::Json),
        Some(_) => Ok(FormatType::Csv),
        None => Err(Error::UnknownFormat),
    }
}

/// Detects the format of a file, by extension when it is recognized
/// (`xlsx`/`xlsm`, `json`, `csv`/`txt`) and by content otherwise.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<FormatType> {
    let path = path.as_ref();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" | "xlsm" => return Ok(FormatType::Xlsx),
            "json" => return Ok(FormatType::Json),
            "csv" | "txt" => return Ok(FormatType::Csv),
            _ => {}
        }
    }
    let data = fs::read(path)?;
    detect_format_from_bytes(&data)
}
