//! # tabscrub
//!
//! Cell-level cleanup for tabular data that picked up web noise: HTML
//! fragments, layered character entities, CSS spills, invisible characters,
//! and words fused together where markup used to sit.
//!
//! ## Supported Inputs
//!
//! - **XLSX**: first worksheet, via calamine (default `xlsx` feature)
//! - **CSV**: header row becomes the column names
//! - **JSON**: one record or an array of records, flattened to a table
//!
//! ## Quick Start
//!
//! ```no_run
//! use tabscrub::{clean_file, write_csv_path};
//!
//! fn main() -> tabscrub::Result<()> {
//!     // Read, auto-detect the format, clean every cell
//!     let table = clean_file("export.xlsx")?;
//!
//!     // Write back out as UTF-8 CSV (with BOM, for Excel)
//!     write_csv_path(&table, "export.clean.csv")?;
//!     Ok(())
//! }
//! ```
//!
//! Strings can be cleaned directly:
//!
//! ```
//! use tabscrub::{clean_text, CleanOptions};
//!
//! let cleaned = clean_text("<div>Pre&ccedil;o:&nbsp;30</div>", &CleanOptions::default());
//! assert_eq!(cleaned, "Preço: 30");
//! ```
//!
//! ## Features
//!
//! - `xlsx` (default): XLSX ingestion via calamine

pub mod clean;
pub mod detect;
pub mod error;
pub mod flatten;
pub mod io;
pub mod table;

// Re-exports
pub use clean::{clean_cell, clean_table, clean_text, count_dirty, CleanOptions};
pub use detect::{detect_format_from_bytes, detect_format_from_path, FormatType};
pub use error::{Error, Result};
pub use flatten::{flatten_json, table_to_records};
pub use io::{
    decode_text, read_csv_path, read_csv_str, read_table_from_bytes, read_table_from_path,
    write_csv, write_csv_path,
};
pub use table::{Cell, Table};

#[cfg(feature = "xlsx")]
pub use io::{read_xlsx_bytes, read_xlsx_path};

use std::path::Path;

/// Reads a tabular file and cleans every cell with default options.
///
/// The format is detected automatically. This is the convenience path for
/// when the defaults fit; use [`clean_file_with_options`] otherwise.
///
/// # Example
///
/// ```no_run
/// use tabscrub::clean_file;
///
/// let table = clean_file("export.xlsx")?;
/// println!("Rows: {}", table.row_count());
/// # Ok::<(), tabscrub::Error>(())
/// ```
pub fn clean_file(path: impl AsRef<Path>) -> Result<Table> {
    clean_file_with_options(path, &CleanOptions::default())
}

/// Reads a tabular file and cleans every cell with the given options.
///
/// # Example
///
/// ```no_run
/// use tabscrub::{clean_file_with_options, CleanOptions};
///
/// let options = CleanOptions::default().without_spacing().sequential();
/// let table = clean_file_with_options("export.csv", &options)?;
/// # Ok::<(), tabscrub::Error>(())
/// ```
pub fn clean_file_with_options(
    path: impl AsRef<Path>,
    options: &CleanOptions,
) -> Result<Table> {
    let table = io::read_table_from_path(path)?;
    Ok(clean::clean_table(&table, options))
}

/// Reads an in-memory tabular payload and cleans every cell with default
/// options.
pub fn clean_bytes(data: &[u8]) -> Result<Table> {
    let table = io::read_table_from_bytes(data)?;
    Ok(clean::clean_table(&table, &CleanOptions::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_clean_file_csv_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dirty.csv");
        fs::write(
            &path,
            "nome,nota\n<b>Ana</b>,Valor:10\nRui&nbsp;Santos,\n",
        )
        .unwrap();

        let cleaned = clean_file(&path).unwrap();
        assert_eq!(cleaned.columns, ["nome", "nota"]);
        assert_eq!(cleaned.rows[0][0], Cell::Text("Ana".into()));
        assert_eq!(cleaned.rows[0][1], Cell::Text("Valor: 10".into()));
        assert_eq!(cleaned.rows[1][0], Cell::Text("Rui Santos".into()));
        assert_eq!(cleaned.rows[1][1], Cell::Null);
    }

    #[test]
    fn test_clean_file_json_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"[{"title": "<p>Ol&aacute;</p>", "meta": {"views": 3}}]"#,
        )
        .unwrap();

        let cleaned = clean_file(&path).unwrap();
        assert_eq!(cleaned.columns, ["title", "meta.views"]);
        assert_eq!(cleaned.rows[0][0], Cell::Text("Olá".into()));
        assert_eq!(cleaned.rows[0][1], Cell::Text("3".into()));
    }

    #[test]
    fn test_clean_bytes_json() {
        let table = clean_bytes(b"[{\"t\": \"<b>ok</b>\"}]").unwrap();
        assert_eq!(table.rows[0][0], Cell::Text("ok".into()));
    }

    #[test]
    fn test_clean_file_with_options_respects_toggles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fused.csv");
        fs::write(&path, "col\nNomeIdade\n").unwrap();

        let respaced = clean_file(&path).unwrap();
        assert_eq!(respaced.rows[0][0], Cell::Text("Nome Idade".into()));

        let kept = clean_file_with_options(&path, &CleanOptions::default().without_spacing())
            .unwrap();
        assert_eq!(kept.rows[0][0], Cell::Text("NomeIdade".into()));
    }

    #[test]
    fn test_cleaning_twice_changes_nothing() {
        let table = Table {
            columns: vec!["c".into()],
            rows: vec![
                vec![Cell::Text("<p>a &lt; b &gt; c</p>".into())],
                vec![Cell::Text("Total:AB12".into())],
                vec![Cell::Int(5)],
                vec![Cell::Null],
            ],
        };
        let once = clean_table(&table, &CleanOptions::default());
        let twice = clean_table(&once, &CleanOptions::default());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_count_then_clean_workflow() {
        let table = read_table_from_bytes(
            b"a,b\n<div>x</div>,plain\ny&nbsp;z,<br>\n",
        )
        .unwrap();
        assert_eq!(count_dirty(&table), 3);
        let cleaned = clean_table(&table, &CleanOptions::default());
        assert_eq!(count_dirty(&cleaned), 0);
        assert_eq!(cleaned.rows[0][0], Cell::Text("x".into()));
        assert_eq!(cleaned.rows[1][1], Cell::Text(String::new()));
    }
}
