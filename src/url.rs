//! The site's [`LinkRoot`] and [`SiteLinkResolver`], which turns document
//! source paths into site-relative links under that root.

use std::fmt;
use std::path::{Component, Path};

use url::Url;

use crate::document::{Document, LinkResolver};

/// The environment variable the link root is read from.
pub const LINK_ROOT_VAR: &str = "SITE_LINKROOT";

const MARKDOWN_EXTENSION: &str = "md";
const BUNDLE_INDEX: &str = "index";

/// The path prefix the site is served under, e.g. `/myblog`. It is either
/// empty or starts with `/`, and never ends with `/`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkRoot(String);

impl LinkRoot {
    /// Normalizes a raw value: surrounding whitespace is dropped, a leading
    /// `/` is added and trailing `/`s are removed. Absent or blank values
    /// give the empty root.
    pub fn normalize(raw: Option<&str>) -> LinkRoot {
        let raw = match raw.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return LinkRoot::default(),
        };
        let rooted = if raw.starts_with('/') {
            raw.to_owned()
        } else {
            format!("/{}", raw)
        };
        LinkRoot(rooted.trim_end_matches('/').to_owned())
    }

    /// Reads and normalizes the variable `name`. Unset or non-unicode values
    /// give the empty root.
    pub fn from_var(name: &str) -> LinkRoot {
        let root = LinkRoot::normalize(std::env::var(name).ok().as_deref());
        tracing::info!("link root from `{}`: {:?}", name, root.as_str());
        root
    }

    /// Reads the link root from [`LINK_ROOT_VAR`]. Call once at startup.
    pub fn from_env() -> LinkRoot {
        LinkRoot::from_var(LINK_ROOT_VAR)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|segment| !segment.is_empty())
    }
}

impl fmt::Display for LinkRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves documents whose sources are relative to the content directory to
/// `{link_root}/{path}`, where `path` is the source path without its
/// extension. Bundles (`foo/index.md`) resolve to `{link_root}/foo`. Segments
/// are percent-encoded. Absolute sources and sources escaping the content
/// directory don't resolve.
pub struct SiteLinkResolver<'a> {
    link_root: &'a LinkRoot,
}

impl<'a> SiteLinkResolver<'a> {
    pub fn new(link_root: &'a LinkRoot) -> SiteLinkResolver<'a> {
        SiteLinkResolver { link_root }
    }

    fn segments(source: &Path) -> Option<Vec<String>> {
        let mut segments = Vec::new();
        for component in source.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_str()?.to_owned()),
                Component::CurDir => {}
                _ => return None,
            }
        }

        let last = segments.pop()?;
        let stem = Path::new(&last).file_stem()?.to_str()?;
        let is_bundle = stem == BUNDLE_INDEX
            && !segments.is_empty()
            && Path::new(&last).extension().and_then(|ext| ext.to_str())
                == Some(MARKDOWN_EXTENSION);
        if !is_bundle {
            segments.push(stem.to_owned());
        }
        Some(segments)
    }
}

impl LinkResolver for SiteLinkResolver<'_> {
    fn resolve(&self, doc: &dyn Document) -> Option<String> {
        let segments = Self::segments(doc.source())?;

        // the host is a placeholder; only the encoded path is returned
        let mut url = Url::parse("http://localhost/").ok()?;
        url.path_segments_mut()
            .ok()?
            .clear()
            .extend(self.link_root.segments())
            .extend(&segments);
        Some(url.path().to_owned())
    }
}
