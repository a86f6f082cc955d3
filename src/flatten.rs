//! JSON record flattening.
//!
//! APIs return either a single object or an array of records; spreadsheets
//! want rows and columns. [`flatten_json`] turns the former into a [`Table`]:
//! nested objects become dot-joined column paths, records with different key
//! sets align on the union of columns, and anything a cell cannot hold
//! becomes its compact JSON text. [`table_to_records`] goes the other way
//! for record-style output.

use crate::error::{Error, Result};
use crate::table::{Cell, Table};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Flattens a parsed JSON document into a table.
///
/// An object root yields a one-row table; an array root yields one row per
/// element, all of which must be objects. Columns appear in first-seen
/// order across records, nested objects flatten to `parent.child` paths,
/// and keys missing from a record become [`Cell::Null`]. Array values are
/// kept as their compact JSON text.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tabscrub::flatten_json;
///
/// let table = flatten_json(&json!([
///     {"name": "Ana", "address": {"city": "Lisboa"}},
///     {"name": "Rui", "age": 33},
/// ]))?;
/// assert_eq!(table.columns, ["name", "address.city", "age"]);
/// assert_eq!(table.row_count(), 2);
/// # Ok::<(), tabscrub::Error>(())
/// ```
pub fn flatten_json(root: &Value) -> Result<Table> {
    let records: Vec<&Map<String, Value>> = match root {
        Value::Object(map) => vec![map],
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match item {
                    Value::Object(map) => records.push(map),
                    other => {
                        return Err(Error::InvalidData(format!(
                            "record {i} is not an object (found {})",
                            kind_name(other)
                        )));
                    }
                }
            }
            records
        }
        other => return Err(Error::InvalidRootShape(kind_name(other))),
    };

    let mut columns: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut sparse_rows: Vec<Vec<(usize, Cell)>> = Vec::with_capacity(records.len());

    for record in records {
        let mut leaves = Vec::new();
        collect_leaves(record, None, &mut leaves);
        let mut sparse = Vec::with_capacity(leaves.len());
        for (path, cell) in leaves {
            let col = match index.get(&path) {
                Some(&col) => col,
                None => {
                    let col = columns.len();
                    index.insert(path.clone(), col);
                    columns.push(path);
                    col
                }
            };
            sparse.push((col, cell));
        }
        sparse_rows.push(sparse);
    }

    let rows = sparse_rows
        .into_iter()
        .map(|sparse| {
            let mut row = vec![Cell::Null; columns.len()];
            for (col, cell) in sparse {
                row[col] = cell;
            }
            row
        })
        .collect();

    Ok(Table { columns, rows })
}

/// Renders a table back into flat JSON records, one object per row, keys
/// in column order. Dotted column names stay as-is.
pub fn table_to_records(table: &Table) -> Vec<Map<String, Value>> {
    table
        .rows
        .iter()
        .map(|row| {
            let mut record = Map::new();
            for (name, cell) in table.columns.iter().zip(row) {
                record.insert(name.clone(), cell_to_value(cell));
            }
            record
        })
        .collect()
}

/// Depth-first walk over a record; nested objects extend the dot path,
/// everything else lands as a leaf in encounter order.
fn collect_leaves(map: &Map<String, Value>, prefix: Option<&str>, out: &mut Vec<(String, Cell)>) {
    for (key, value) in map {
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };
        match value {
            Value::Object(nested) => collect_leaves(nested, Some(&path), out),
            leaf => out.push((path, value_to_cell(leaf))),
        }
    }
}

fn value_to_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Null,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Cell::Int(i),
            None => Cell::Number(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Cell::Text(s.clone()),
        // Arrays (and objects, when called directly) keep their JSON text.
        other => Cell::Text(other.to_string()),
    }
}

fn cell_to_value(cell: &Cell) -> Value {
    match cell {
        Cell::Null => Value::Null,
        Cell::Text(s) => Value::String(s.clone()),
        Cell::Int(i) => Value::Number((*i).into()),
        Cell::Number(v) => serde_json::Number::from_f64(*v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Cell::Bool(b) => Value::Bool(*b),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
