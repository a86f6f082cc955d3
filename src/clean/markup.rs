//! Markup detection, visible-text extraction, and residue removal.
//!
//! Cells that carry HTML are run through a real parser so that tag
//! structure, attributes, and entity edge cases are handled properly.
//! Whatever survives parsing (broken tags, orphan entities) is then
//! swept up by residue patterns.

use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;

/// Anything shaped like a tag: `<` up to the next `>`.
static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Anything shaped like a character reference: `&name;`, `&#123;`.
static RE_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&[a-zA-Z#0-9]+;").unwrap());

/// Sentence punctuation glued straight onto a letter, e.g. `word.Next`.
static RE_PUNCT_GLUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.,!?;])([A-Za-zÀ-ÿ])").unwrap());

/// Cheap check for whether a cell plausibly contains markup.
///
/// True when the text has both `<` and `>`, or both `&` and `;`. False
/// positives are acceptable: the extraction step leaves plain text intact.
pub fn looks_like_markup(s: &str) -> bool {
    (s.contains('<') && s.contains('>')) || (s.contains('&') && s.contains(';'))
}

/// Parses `s` as an HTML fragment and returns its visible text, with each
/// text node trimmed and the non-empty pieces joined by single spaces.
///
/// Plain text passes through unchanged apart from whitespace joining.
pub fn extract_visible_text(s: &str) -> String {
    let fragment = Html::parse_fragment(s);
    let parts: Vec<&str> = fragment
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    parts.join(" ")
}

/// Replaces leftover tag-shaped and entity-shaped fragments with spaces.
///
/// Runs after extraction so it only sees what the parser could not
/// interpret, such as stray `<` `>` pairs in prose.
pub fn strip_markup_residue(s: &str) -> String {
    let without_tags = RE_TAG.replace_all(s, " ");
    RE_ENTITY.replace_all(&without_tags, " ").into_owned()
}

/// Inserts a space between sentence punctuation and a letter glued to it.
/// Digits after punctuation are left alone so decimals survive.
pub fn repair_punctuation(s: &str) -> String {
    RE_PUNCT_GLUE.replace_all(s, "$1 $2").into_owned()
}

/// True when the text still shows signs of markup contamination: a
/// tag-shaped or entity-shaped span, or a `<br`/`<style` fragment in any
/// case. Used to census a table before cleaning.
pub fn has_markup_noise(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    if RE_TAG.is_match(s) || RE_ENTITY.is_match(s) {
        return true;
    }
    let lower = s.to_lowercase();
    lower.contains("<br") || lower.contains("<style")
}
