//! Derives the display title, excerpt and URL of a [`Document`] for page
//! templates. None of these functions fail: missing data degrades to a
//! fallback value instead.

use std::io::Read;

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use crate::document::{Document, LinkResolver};
use crate::text::{strip_html, truncate, truncate_with_ellipsis, ELLIPSIS};

/// Returned by [`url`] when there is nothing to link to.
pub const NO_LINK: &str = "#";

/// Appended to resolved links.
pub const HTML_EXTENSION: &str = ".html";

/// The title length used by layouts that truncate titles.
pub const DEFAULT_TITLE_LENGTH: usize = 82;

/// The excerpt length used when none is configured.
pub const DEFAULT_EXCERPT_LENGTH: usize = 50;

static RE_H2_BLOCK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<h2.*?/h2>").unwrap());

/// How [`title`] limits the length of a title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TitleLength {
    /// The title is returned whole.
    Unlimited,

    /// Titles longer than the limit are cut and get an ellipsis.
    Truncated(usize),

    /// The title is cut to at most the limit and always gets an ellipsis,
    /// even when it was already short enough.
    AlwaysEllipsis(usize),
}

impl Default for TitleLength {
    fn default() -> Self {
        TitleLength::Unlimited
    }
}

/// Whether [`url`] keeps the leading `/` of a resolved link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UrlStyle {
    /// `/posts/hello.html`
    RootRelative,

    /// `posts/hello.html`
    BareRelative,
}

impl Default for UrlStyle {
    fn default() -> Self {
        UrlStyle::BareRelative
    }
}

/// An excerpt together with its markup-safety flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Excerpt {
    /// Plain text derived from the content. Templates escape it.
    Plain(String),

    /// The document's authored `Excerpt` field. Templates emit it verbatim as
    /// markup.
    Authored(String),
}

impl Excerpt {
    /// The excerpt text, plain or markup depending on the variant.
    pub fn text(&self) -> &str {
        match self {
            Excerpt::Plain(text) | Excerpt::Authored(text) => text,
        }
    }

    /// `true` when [`Excerpt::text`] must be rendered as markup without
    /// escaping.
    pub fn is_html(&self) -> bool {
        matches!(self, Excerpt::Authored(_))
    }

    /// Splits the excerpt into its text and [`Excerpt::is_html`] flag.
    pub fn into_parts(self) -> (String, bool) {
        let is_html = self.is_html();
        match self {
            Excerpt::Plain(text) | Excerpt::Authored(text) => (text, is_html),
        }
    }
}

/// Returns the document's `Title` field if it has any non-whitespace
/// character, otherwise the file stem of its source. The result is then
/// limited according to `length`.
pub fn title(doc: &dyn Document, length: TitleLength) -> String {
    let title = match doc.field("Title") {
        Some(title) if !title.trim().is_empty() => title.to_owned(),
        _ => doc
            .source()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    match length {
        TitleLength::Unlimited => title,
        TitleLength::Truncated(max) => truncate_with_ellipsis(&title, max),
        TitleLength::AlwaysEllipsis(max) => {
            let (cut, _) = truncate(&title, max);
            let mut cut = cut.trim_end().to_owned();
            cut.push(ELLIPSIS);
            cut
        }
    }
}

/// Derives a plain-text excerpt of at most `max_length` characters (plus an
/// ellipsis) from the document content, leaving out `<h2>` blocks. If the
/// content can't be read, the authored `Excerpt` field is returned instead as
/// [`Excerpt::Authored`] (empty when the field is absent).
pub fn excerpt(doc: &dyn Document, max_length: usize) -> Excerpt {
    match read_content(doc) {
        Ok(content) => {
            let without_headings = RE_H2_BLOCK.replace_all(&content, "");
            let plain = strip_html(Some(&without_headings));
            Excerpt::Plain(truncate_with_ellipsis(&plain, max_length))
        }
        Err(e) => {
            tracing::debug!(
                "using authored excerpt for `{}`: {}",
                doc.source().display(),
                e
            );
            Excerpt::Authored(doc.field("Excerpt").unwrap_or_default().to_owned())
        }
    }
}

fn read_content(doc: &dyn Document) -> std::io::Result<String> {
    let mut content = String::new();
    doc.open_content()?.read_to_string(&mut content)?;
    Ok(content)
}

/// Returns the document's link with [`HTML_EXTENSION`] appended, or
/// [`NO_LINK`] when there is no document or the resolver has no link for it.
pub fn url(doc: Option<&dyn Document>, resolver: &dyn LinkResolver, style: UrlStyle) -> String {
    let doc = match doc {
        Some(doc) => doc,
        None => return NO_LINK.to_owned(),
    };
    match resolver.resolve(doc) {
        Some(link) if !link.is_empty() => {
            let link = match style {
                UrlStyle::RootRelative => &link[..],
                UrlStyle::BareRelative => link.strip_prefix('/').unwrap_or(&link),
            };
            format!("{}{}", link, HTML_EXTENSION)
        }
        _ => NO_LINK.to_owned(),
    }
}
