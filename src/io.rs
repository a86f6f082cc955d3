//! Reading tables from files and writing them back out.
//!
//! Readers exist for XLSX (first worksheet, behind the `xlsx` feature),
//! CSV (header row becomes column names), and JSON (flattened to a table).
//! [`read_table_from_path`] and [`read_table_from_bytes`] pick the reader
//! by detected format. CSV output is written with a UTF-8 byte order mark
//! so Excel recognizes the encoding.
//!
//! Text ingestion never fails on bad bytes: input is decoded lossily,
//! BOM-stripped, and NFC-normalized before parsing.

use crate::detect::{detect_format_from_bytes, detect_format_from_path, FormatType};
use crate::error::Result;
use crate::flatten::flatten_json;
use crate::table::{Cell, Table};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

#[cfg(not(feature = "xlsx"))]
use crate::error::Error;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decodes raw bytes to text: lossy UTF-8, leading BOM stripped, NFC
/// normalization so combining sequences compare and clean consistently.
pub fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(&text);
    text.nfc().collect()
}

/// Reads any supported file into a table, dispatching on detected format.
pub fn read_table_from_path<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    match detect_format_from_path(path)? {
        #[cfg(feature = "xlsx")]
        FormatType::Xlsx => read_xlsx_path(path),
        #[cfg(not(feature = "xlsx"))]
        FormatType::Xlsx => Err(Error::UnsupportedFormat(
            "XLSX input requires the `xlsx` feature".into(),
        )),
        FormatType::Csv => read_csv_path(path),
        FormatType::Json => read_json_bytes(&fs::read(path)?),
    }
}

/// Reads any supported in-memory input into a table.
pub fn read_table_from_bytes(data: &[u8]) -> Result<Table> {
    match detect_format_from_bytes(data)? {
        #[cfg(feature = "xlsx")]
        FormatType::Xlsx => read_xlsx_bytes(data),
        #[cfg(not(feature = "xlsx"))]
        FormatType::Xlsx => Err(Error::UnsupportedFormat(
            "XLSX input requires the `xlsx` feature".into(),
        )),
        FormatType::Csv => read_csv_str(&decode_text(data)),
        FormatType::Json => read_json_bytes(data),
    }
}

fn read_json_bytes(data: &[u8]) -> Result<Table> {
    let text = decode_text(data);
    let value: serde_json::Value = serde_json::from_str(&text)?;
    flatten_json(&value)
}

/// Parses CSV text. The first record names the columns; empty fields
/// become [`Cell::Null`], every other field stays text. No numeric
/// inference happens here: cleaning treats content as text regardless.
pub fn read_csv_str(text: &str) -> Result<Table> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    Cell::Null
                } else {
                    Cell::Text(field.to_string())
                }
            })
            .collect();
        rows.push(row);
    }
    Ok(Table { columns, rows })
}

/// Reads a CSV file, decoding it with [`decode_text`] first.
pub fn read_csv_path<P: AsRef<Path>>(path: P) -> Result<Table> {
    let bytes = fs::read(path)?;
    read_csv_str(&decode_text(&bytes))
}

/// Reads the first worksheet of an XLSX workbook. The first row names
/// the columns.
#[cfg(feature = "xlsx")]
pub fn read_xlsx_path<P: AsRef<Path>>(path: P) -> Result<Table> {
    use calamine::{open_workbook, Reader, Xlsx};
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(Table::default()),
    };
    range_to_table(&range)
}

/// Reads the first worksheet of an in-memory XLSX workbook.
#[cfg(feature = "xlsx")]
pub fn read_xlsx_bytes(data: &[u8]) -> Result<Table> {
    use calamine::{Reader, Xlsx};
    use std::io::Cursor;
    let mut workbook = Xlsx::new(Cursor::new(data))?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(Table::default()),
    };
    range_to_table(&range)
}

#[cfg(feature = "xlsx")]
fn range_to_table(range: &calamine::Range<calamine::Data>) -> Result<Table> {
    let mut rows_iter = range.rows();
    let header = match rows_iter.next() {
        Some(row) => row,
        None => return Ok(Table::default()),
    };
    let columns = header.iter().map(|cell| data_to_cell(cell).to_text()).collect();
    let rows = rows_iter
        .map(|row| row.iter().map(data_to_cell).collect())
        .collect();
    Ok(Table { columns, rows })
}

#[cfg(feature = "xlsx")]
fn data_to_cell(data: &calamine::Data) -> Cell {
    use calamine::Data;
    match data {
        Data::Empty => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(v) => Cell::Number(*v),
        Data::Int(i) => Cell::Int(*i),
        Data::Bool(b) => Cell::Bool(*b),
        // Serial date numbers keep their numeric value; ISO-formatted
        // dates and durations are already text.
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

/// Writes a table as CSV: UTF-8 BOM, header row, then data rows rendered
/// through [`Cell::to_text`] (nulls become empty fields).
pub fn write_csv<W: Write>(table: &Table, mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM)?;
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(&table.columns)?;
    for row in &table.rows {
        csv_writer.write_record(row.iter().map(|cell| cell.to_text()))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes a table as a CSV file.
pub fn write_csv_path<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let file = fs::File::create(path)?;
    write_csv(table, BufWriter::new(file))
}


#[cfg(all(test, feature = "xlsx"))]
mod xlsx_tests {
    use super::*;
    use std::io::Cursor;
    use zip::write::SimpleFileOptions;

    const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

    const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

    const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>
</workbook>"#;

    const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

    /// Builds a minimal single-sheet workbook around the given sheetData rows.
    fn synthetic_xlsx(sheet_rows: &str) -> Vec<u8> {
        let sheet = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetData>{sheet_rows}</sheetData>
</worksheet>"#
        );
        let mut buffer = Cursor::new(Vec::new());
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options = SimpleFileOptions::default();
        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES),
            ("_rels/.rels", ROOT_RELS),
            ("xl/workbook.xml", WORKBOOK),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS),
            ("xl/worksheets/sheet1.xml", sheet.as_str()),
        ];
        for (name, content) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(content.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_read_synthetic_xlsx() {
        let data = synthetic_xlsx(
            r#"<row r="1"><c r="A1" t="inlineStr"><is><t>name</t></is></c><c r="B1" t="inlineStr"><is><t>age</t></is></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t>Ana</t></is></c><c r="B2"><v>30</v></c></row>
<row r="3"><c r="A3" t="inlineStr"><is><t>Rui</t></is></c><c r="B3"><v>2.5</v></c></row>"#,
        );
        let table = read_xlsx_bytes(&data).unwrap();
        assert_eq!(table.columns, ["name", "age"]);
        assert_eq!(table.rows[0][0], Cell::Text("Ana".into()));
        assert_eq!(table.rows[0][1], Cell::Number(30.0));
        assert_eq!(table.rows[1][1], Cell::Number(2.5));
    }

    #[test]
    fn test_missing_cell_is_null() {
        let data = synthetic_xlsx(
            r#"<row r="1"><c r="A1" t="inlineStr"><is><t>a</t></is></c><c r="B1" t="inlineStr"><is><t>b</t></is></c></row>
<row r="2"><c r="B2"><v>1</v></c></row>"#,
        );
        let table = read_xlsx_bytes(&data).unwrap();
        assert_eq!(table.rows[0][0], Cell::Null);
        assert_eq!(table.rows[0][1], Cell::Number(1.0));
    }

    #[test]
    fn test_xlsx_detected_from_bytes() {
        let data = synthetic_xlsx(r#"<row r="1"><c r="A1" t="inlineStr"><is><t>x</t></is></c></row>"#);
        let table = read_table_from_bytes(&data).unwrap();
        assert_eq!(table.columns, ["x"]);
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_xlsx_file_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("book.xlsx");
        let data = synthetic_xlsx(
            r#"<row r="1"><c r="A1" t="inlineStr"><is><t>col</t></is></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t>val</t></is></c></row>"#,
        );
        std::fs::write(&path, &data).unwrap();
        let table = read_table_from_path(&path).unwrap();
        assert_eq!(table.columns, ["col"]);
        assert_eq!(table.rows[0][0], Cell::Text("val".into()));
    }

    #[test]
    fn test_bool_and_error_cells() {
        let data = synthetic_xlsx(
            r#"<row r="1"><c r="A1" t="inlineStr"><is><t>flag</t></is></c><c r="B1" t="inlineStr"><is><t>bad</t></is></c></row>
<row r="2"><c r="A2" t="b"><v>1</v></c><c r="B2" t="e"><v>#DIV/0!</v></c></row>"#,
        );
        let table = read_xlsx_bytes(&data).unwrap();
        assert_eq!(table.rows[0][0], Cell::Bool(true));
        assert_eq!(table.rows[0][1], Cell::Text("#DIV/0!".into()));
    }
}
