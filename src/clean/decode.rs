//! Entity decoding with bounded convergence.
//!
//! Copy-pasted rich text is often entity-encoded more than once
//! (`&amp;lt;b&amp;gt;` needs two passes to become `<b>`), so a single
//! decode round under-decodes. Decoding repeats until a round changes
//! nothing or the round cap is reached.

/// Repeatedly un-escapes HTML/XML character references until a fixed point
/// or `max_rounds`, whichever comes first.
///
/// Handles numeric references (`&#78;`, `&#x4E;`) and named references
/// (`&amp;`, `&nbsp;`, …). Unknown or malformed references are left as
/// literal text. Never fails.
///
/// # Example
///
/// ```
/// use tabscrub::clean::decode_entities;
///
/// assert_eq!(decode_entities("&amp;lt;b&amp;gt;", 5), "<b>");
/// assert_eq!(decode_entities("R&amp;D", 5), "R&D");
/// ```
pub fn decode_entities(s: &str, max_rounds: usize) -> String {
    // No ampersand means no reference can exist at any depth.
    if !s.contains('&') {
        return s.to_string();
    }

    let mut prev = s.to_string();
    for _ in 0..max_rounds {
        let cur = html_escape::decode_html_entities(&prev).into_owned();
        if cur == prev {
            break;
        }
        prev = cur;
    }
    prev
}
