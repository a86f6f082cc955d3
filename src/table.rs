//! Tabular data model.
//!
//! A [`Table`] is an ordered list of named columns over a row-major grid of
//! [`Cell`]s. Shape is an invariant: every row holds exactly one cell per
//! column, and nothing in this crate ever reorders rows or columns.

use serde::ser::{Serialize, Serializer};

/// A single scalar cell value.
///
/// Cells are nullable: `Null` (and the NaN float, which spreadsheet readers
/// produce for missing numerics) is a distinguished absent value that the
/// cleaning pipeline passes through untouched. Everything else is treated as
/// text once it enters the pipeline, whatever its origin type.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Missing value.
    Null,
    /// Text content.
    Text(String),
    /// Integer value.
    Int(i64),
    /// Floating-point value. NaN counts as null.
    Number(f64),
    /// Boolean value.
    Bool(bool),
}

impl Cell {
    /// Returns true if this cell is null or NaN.
    pub fn is_null(&self) -> bool {
        match self {
            Cell::Null => true,
            Cell::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Returns the text form of this cell, with `""` for null/NaN.
    ///
    /// Numbers use their shortest display form (`30`, not `30.0`); booleans
    /// render as `true`/`false`.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Int(i) => i.to_string(),
            Cell::Number(n) if n.is_nan() => String::new(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
        }
    }

    /// Returns true if this cell is null or its text form is empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Text(s) => s.is_empty(),
            _ => self.is_null(),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Null => serializer.serialize_unit(),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Int(i) => serializer.serialize_i64(*i),
            Cell::Number(n) if n.is_nan() => serializer.serialize_unit(),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Int(i)
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => Cell::Null,
        }
    }
}

/// A flat tabular dataset: named columns plus a row-major grid of cells.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Table {
    /// Column names, in order.
    pub columns: Vec<String>,
    /// Rows, each with exactly `columns.len()` cells.
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Creates a table from column names and prebuilt rows.
    ///
    /// Fails with [`Error::RowLength`](crate::Error::RowLength) if any row
    /// does not match the column count.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> crate::Result<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Appends a row, rejecting ragged input.
    pub fn push_row(&mut self, row: Vec<Cell>) -> crate::Result<()> {
        if row.len() != self.columns.len() {
            return Err(crate::Error::RowLength {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the total number of cells.
    pub fn cell_count(&self) -> usize {
        self.row_count() * self.column_count()
    }

    /// Returns the column names, in order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Gets a cell at the specified position.
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns an iterator over all cells, row by row.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flat_map(|r| r.iter())
    }
}
