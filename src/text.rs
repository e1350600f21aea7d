//! Markup helpers used by templates and by [`crate::extract`].
//!
//! [`strip_html`] is a best-effort sanitizer, not an HTML parser: it does not
//! decode entities, it treats everything between `<` and the nearest `>` on
//! the same line as a tag, and it can be fooled by `>` inside attribute
//! values.

use pulldown_cmark::escape::escape_html;
use regex::Regex;
use std::sync::LazyLock;

/// Appended to text that has been cut short.
pub const ELLIPSIS: char = '\u{2026}';

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<.*?>").unwrap());
static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Removes every `<...>` tag, collapses runs of whitespace to a single space
/// and trims the result. `None` and `""` yield `""`.
pub fn strip_html(html: Option<&str>) -> String {
    let html = match html {
        Some(html) if !html.is_empty() => html,
        _ => return String::new(),
    };
    let without_tags = RE_TAG.replace_all(html, "");
    RE_WHITESPACE
        .replace_all(&without_tags, " ")
        .trim()
        .to_owned()
}

/// HTML-encodes `text` for embedding in markup: `&`, `<`, `>` and `"` are
/// escaped by pulldown-cmark's escaper, `'` becomes `&#39;`. Every input
/// character is escaped at most once. `None` yields `""`.
pub fn encode(text: Option<&str>) -> String {
    let text = text.unwrap_or_default();
    let mut out = String::with_capacity(text.len());
    for (i, segment) in text.split('\'').enumerate() {
        if i > 0 {
            out.push_str("&#39;");
        }
        // writing into a String can't fail
        let _ = escape_html(&mut out, segment);
    }
    out
}

/// Cuts `text` to its first `max_chars` characters and trims trailing
/// whitespace from the cut. Returns the (possibly unchanged) text and whether
/// a cut happened. Lengths are counted in `char`s.
pub fn truncate(text: &str, max_chars: usize) -> (String, bool) {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => (text[..end].trim_end().to_owned(), true),
        None => (text.to_owned(), false),
    }
}

/// Like [`truncate`], but always appends [`ELLIPSIS`] to the result when a
/// cut happened.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match truncate(text, max_chars) {
        (mut cut, true) => {
            cut.push(ELLIPSIS);
            cut
        }
        (whole, false) => whole,
    }
}
