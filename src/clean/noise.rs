//! Invisible-character scrubbing and CSS noise removal.
//!
//! Spreadsheet exports of web content drag along non-breaking spaces,
//! zero-width characters, stray control bytes, and whole `<style>` blocks.
//! These are replaced before any markup handling so that CSS text never
//! reaches the markup detector as stray angle brackets.

use regex::Regex;
use std::sync::LazyLock;

/// C0 control characters (tab/newline/carriage-return excluded) plus DEL.
static RE_CONTROL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap());

/// `<style ...>...</style>` blocks, case-insensitive, spanning newlines.
static RE_STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<style[\s\S]*?>[\s\S]*?</style>").unwrap());

/// Brace-delimited CSS declaration lists, e.g. `{ color: red; }`.
/// Requires a `property: value;` shape and no nested braces.
static RE_CSS_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*:[^{};]+;[^{}]*\}").unwrap());

/// Replaces non-breaking spaces with plain spaces, removes zero-width
/// spaces and byte-order marks, and turns each remaining control character
/// into a single space.
///
/// Control characters become spaces rather than vanishing so that words
/// separated only by a control byte do not fuse together.
pub fn scrub_invisible(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let replaced = s
        .replace('\u{00A0}', " ")
        .replace('\u{200B}', "")
        .replace('\u{FEFF}', "");
    RE_CONTROL.replace_all(&replaced, " ").into_owned()
}

/// Removes `<style>` blocks and then loose CSS declaration fragments,
/// each replaced with a single space.
///
/// Whole blocks go first: the narrower declaration pattern would otherwise
/// chew through a block's contents piecemeal and leave mangled residue.
pub fn strip_styles(s: &str) -> String {
    let without_blocks = RE_STYLE_BLOCK.replace_all(s, " ");
    RE_CSS_DECL.replace_all(&without_blocks, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nbsp_becomes_space() {
        assert_eq!(scrub_invisible("a\u{00A0}b"), "a b");
    }

    #[test]
    fn test_zero_width_and_bom_removed() {
        assert_eq!(scrub_invisible("a\u{200B}b\u{FEFF}c"), "abc");
    }

    #[test]
    fn test_control_chars_become_spaces() {
        // Words must not fuse across a removed control character.
        assert_eq!(scrub_invisible("one\x00two"), "one two");
        assert_eq!(scrub_invisible("x\x1Fy\x7Fz"), "x y z");
        assert_eq!(scrub_invisible("\x0B\x0C"), "  ");
    }

    #[test]
    fn test_tab_newline_carriage_return_survive() {
        assert_eq!(scrub_invisible("a\tb\nc\rd"), "a\tb\nc\rd");
    }

    #[test]
    fn test_empty_passthrough() {
        assert_eq!(scrub_invisible(""), "");
    }

    #[test]
    fn test_style_block_removed() {
        assert_eq!(strip_styles("<style>.a{color:red;}</style>text"), " text");
    }

    #[test]
    fn test_style_block_case_insensitive_with_attributes() {
        let input = "<STYLE type=\"text/css\">\nbody { margin: 0; }\n</Style>after";
        assert_eq!(strip_styles(input), " after");
    }

    #[test]
    fn test_unclosed_style_block_left_alone() {
        let input = "<style>.a{color:red;}";
        // No closing tag, so the block pattern cannot match; the loose
        // declaration inside is still removed.
        assert_eq!(strip_styles(input), "<style>.a ");
    }

    #[test]
    fn test_css_declaration_fragment_removed() {
        assert_eq!(strip_styles("before {color: red; font-size: 2em;} after"), "before   after");
        assert_eq!(strip_styles(".cls{a:b;}"), ".cls ");
    }

    #[test]
    fn test_braces_without_declaration_shape_survive() {
        assert_eq!(strip_styles("{no colon here}"), "{no colon here}");
        assert_eq!(strip_styles("{key: value}"), "{key: value}");
        assert_eq!(strip_styles("f(x) { return; }"), "f(x) { return; }");
    }

    #[test]
    fn test_nested_braces_not_matched() {
        let input = "@media screen { .a { color: red; } }";
        // Only the innermost declaration list has no nested braces.
        assert_eq!(strip_styles(input), "@media screen { .a   }");
    }
}
