//! Cell text cleaning pipeline.
//!
//! Tabular exports of web content arrive with layered entity encodings,
//! embedded markup, CSS fragments, invisible characters, and words fused
//! together where tags used to sit. The pipeline repairs one cell at a
//! time in fixed stages:
//!
//! 1. invisible-character scrub ([`scrub_invisible`])
//! 2. entity decoding to a fixed point ([`decode_entities`])
//! 3. style block and CSS fragment removal ([`strip_styles`])
//! 4. visible-text extraction and markup residue sweep
//!    ([`extract_visible_text`], [`strip_markup_residue`])
//! 5. word-boundary repair ([`normalize_spacing`])
//!
//! Every stage is total: any string in, some string out, no errors and no
//! panics. [`clean_text`] runs the pipeline on a bare string, [`clean_cell`]
//! and [`clean_table`] lift it over cells and whole tables, and
//! [`count_dirty`] reports how many cells would benefit before anything is
//! touched.

mod decode;
mod markup;
mod noise;
mod options;
mod spacing;

pub use decode::decode_entities;
pub use markup::{
    extract_visible_text, looks_like_markup, repair_punctuation, strip_markup_residue,
};
pub use noise::{scrub_invisible, strip_styles};
pub use options::{CleanOptions, DEFAULT_DECODE_ROUNDS};
pub use spacing::normalize_spacing;

use crate::table::{Cell, Table};
use rayon::prelude::*;

/// Runs the full cleaning pipeline on a string, honoring the stage
/// toggles in `options`.
///
/// Input that scrubs down to nothing returns an empty string immediately.
///
/// # Examples
///
/// ```
/// use tabscrub::clean::{clean_text, CleanOptions};
///
/// let cleaned = clean_text("<p>Total:&nbsp;30</p>", &CleanOptions::default());
/// assert_eq!(cleaned, "Total: 30");
/// ```
pub fn clean_text(s: &str, options: &CleanOptions) -> String {
    let scrubbed = noise::scrub_invisible(s);
    let trimmed = scrubbed.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let mut text = if options.decode_entities {
        decode::decode_entities(trimmed, options.decode_rounds)
    } else {
        trimmed.to_string()
    };
    if options.strip_styles {
        text = noise::strip_styles(&text);
    }
    if options.extract_markup {
        if markup::looks_like_markup(&text) {
            text = markup::extract_visible_text(&text);
        }
        text = markup::strip_markup_residue(&text);
        text = markup::repair_punctuation(&text);
        text = spacing::collapse_whitespace(&text);
    }
    if options.normalize_spacing {
        text = spacing::normalize_spacing(&text);
    }
    text
}

/// Cleans one cell. Null and NaN cells pass through unchanged; everything
/// else is rendered to text, cleaned, and returned as [`Cell::Text`].
pub fn clean_cell(cell: &Cell, options: &CleanOptions) -> Cell {
    if cell.is_null() {
        return cell.clone();
    }
    Cell::Text(clean_text(&cell.to_text(), options))
}

/// Cleans every cell of a table, preserving shape, column names, and row
/// order. Rows fan out across threads when `options.parallel` is set; the
/// output is identical either way.
pub fn clean_table(table: &Table, options: &CleanOptions) -> Table {
    let clean_row = |row: &Vec<Cell>| -> Vec<Cell> {
        row.iter().map(|cell| clean_cell(cell, options)).collect()
    };
    let rows = if options.parallel {
        table.rows.par_iter().map(clean_row).collect()
    } else {
        table.rows.iter().map(clean_row).collect()
    };
    Table {
        columns: table.columns.clone(),
        rows,
    }
}

/// Counts cells that still carry markup contamination: a tag-shaped or
/// entity-shaped span, or a `<br`/`<style` fragment in any case. Purely
/// a census; the table is not modified.
pub fn count_dirty(table: &Table) -> usize {
    table
        .rows
        .iter()
        .flatten()
        .filter(|cell| match cell {
            Cell::Text(s) => markup::has_markup_noise(s),
            _ => false,
        })
        .count()
}
