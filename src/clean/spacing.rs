//! Word-boundary repair for text that lost its spaces.
//!
//! Concatenated exports and stripped markup often leave words fused:
//! `NomeIdade30Cidade`, `Total:123`, `Certo?Sim`. This stage re-inserts
//! spaces at case changes, letter/digit seams, after `:` and `?`, and
//! before glued `Label:` runs, then collapses the result.
//!
//! The accented character classes cover the Latin-1 range, so fused
//! Portuguese, Spanish, and French words split the same way ASCII does.

use regex::Regex;
use std::sync::LazyLock;

/// A colon and any following whitespace, renormalized to `": "`.
static RE_COLON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":\s*").unwrap());

/// A question mark and any following whitespace, renormalized to `"? "`.
static RE_QUESTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\?\s*").unwrap());

/// Re-inserts missing word boundaries and collapses runs of whitespace.
///
/// Rules are applied in a fixed order, each on the output of the previous:
///
/// 1. `:` becomes `": "` (also inside times and ratios, by contract)
/// 2. `?` becomes `"? "`
/// 3. a space is inserted between a lowercase letter and an uppercase
///    letter or digit (`casaNova` to `casa Nova`)
/// 4. a space is inserted before a capitalized short run that ends in a
///    colon, splitting glued labels (`xNome:` to `x Nome:`)
/// 5. a space is inserted between a letter and a digit, and
/// 6. between a digit and a letter
/// 7. whitespace runs collapse to single spaces, ends trimmed
///
/// The result is idempotent: running it twice changes nothing.
///
/// # Examples
///
/// ```
/// use tabscrub::clean::normalize_spacing;
///
/// assert_eq!(normalize_spacing("NomeIdade30Cidade"), "Nome Idade 30 Cidade");
/// ```
pub fn normalize_spacing(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let t = RE_COLON.replace_all(s, ": ");
    let t = RE_QUESTION.replace_all(&t, "? ");
    let t = insert_between(&t, is_lower_accented, |c| {
        is_upper_accented(c) || c.is_ascii_digit()
    });
    let t = split_glued_labels(&t);
    let t = insert_between(&t, is_latin_letter, |c| c.is_ascii_digit());
    let t = insert_between(&t, |c| c.is_ascii_digit(), is_latin_letter);
    collapse_whitespace(&t)
}

/// Collapses every whitespace run to a single space and trims the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for part in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}

/// Lowercase letters as they appear in fused Portuguese-style text.
fn is_lower_accented(c: char) -> bool {
    c.is_ascii_lowercase() || matches!(c, 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ã' | 'õ' | 'ç')
}

/// Uppercase counterparts, including circumflex forms.
fn is_upper_accented(c: char) -> bool {
    c.is_ascii_uppercase()
        || matches!(c, 'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'Â' | 'Ê' | 'Ô' | 'Ã' | 'Õ' | 'Ç')
}

/// ASCII letters plus the Latin-1 supplement letter block.
fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || ('\u{00C0}'..='\u{00FF}').contains(&c)
}

/// Characters allowed inside a label run: lowercase Latin-1 or whitespace.
fn is_label_body(c: char) -> bool {
    c.is_ascii_lowercase() || ('\u{00E0}'..='\u{00FF}').contains(&c) || c.is_whitespace()
}

/// Walks adjacent character pairs and inserts a space wherever the left
/// side matches `left` and the right side matches `right`. The scan reads
/// the original string throughout, so an insertion never creates or
/// destroys a later match.
fn insert_between<L, R>(s: &str, left: L, right: R) -> String
where
    L: Fn(char) -> bool,
    R: Fn(char) -> bool,
{
    let mut out = String::with_capacity(s.len() + 8);
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if let Some(&next) = chars.peek() {
            if left(c) && right(next) {
                out.push(' ');
            }
        }
    }
    out
}

/// Inserts a space between a non-space character and a capitalized run of
/// at most twenty label-body characters that ends in a colon, so that
/// `valorNome:` and `SimNão:` style gluings split before the label.
fn split_glued_labels(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        out.push(c);
        if c.is_whitespace() {
            continue;
        }
        if let Some(&next) = chars.get(i + 1) {
            if is_upper_accented(next) && label_run_ends_in_colon(&chars[i + 2..]) {
                out.push(' ');
            }
        }
    }
    out
}

/// True when `rest` starts with up to twenty label-body characters
/// followed immediately by a colon.
fn label_run_ends_in_colon(rest: &[char]) -> bool {
    for k in 0..=20 {
        match rest.get(k) {
            Some(&':') => return true,
            Some(&c) if is_label_body(c) => {}
            _ => return false,
        }
    }
    false
}
