//! [`IndexEntry`] bundles everything a list page shows for one document.

use crate::config::SiteConfig;
use crate::document::{Document, LinkResolver};
use crate::extract::{excerpt, title, url, Excerpt};

/// A tag of a listed document with the CSS classes from the site's tag table
/// (empty when the tag isn't in the table).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexTag {
    pub label: String,
    pub css_classes: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexEntry {
    pub title: String,
    pub excerpt: Excerpt,
    pub url: String,
    pub tags: Vec<IndexTag>,
}

impl IndexEntry {
    pub fn new(doc: &dyn Document, resolver: &dyn LinkResolver, config: &SiteConfig) -> IndexEntry {
        IndexEntry {
            title: title(doc, config.title_length),
            excerpt: excerpt(doc, config.excerpt_length),
            url: url(Some(doc), resolver, config.url_style),
            tags: doc
                .field_values("Tags")
                .into_iter()
                .map(|label| IndexTag {
                    label: label.to_owned(),
                    css_classes: config
                        .tags
                        .css_classes(label)
                        .unwrap_or_default()
                        .to_owned(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::SourceDocument;
    use crate::url::{LinkRoot, SiteLinkResolver};
    use std::path::Path;

    #[test]
    fn test_index_entry() -> crate::document::Result<()> {
        let config = SiteConfig::with_defaults(Path::new("."), LinkRoot::normalize(Some("blog")));
        let resolver = SiteLinkResolver::new(&config.link_root);
        let doc = SourceDocument::from_str(
            "posts/hello.md",
            "---\nTitle: Hello\nTags: [HTML, Rust]\n---\nSome *text*.\n",
        )?;

        assert_eq!(
            IndexEntry {
                title: String::from("Hello"),
                excerpt: Excerpt::Plain(String::from("Some text.")),
                url: String::from("blog/posts/hello.html"),
                tags: vec![
                    IndexTag {
                        label: String::from("HTML"),
                        css_classes: String::from("text-red-600 bg-red-300/50"),
                    },
                    IndexTag {
                        label: String::from("Rust"),
                        css_classes: String::new(),
                    },
                ],
            },
            IndexEntry::new(&doc, &resolver, &config)
        );
        Ok(())
    }

    #[test]
    fn test_index_entry_tag_with_comma() -> crate::document::Result<()> {
        let config = SiteConfig::with_defaults(Path::new("."), LinkRoot::default());
        let resolver = SiteLinkResolver::new(&config.link_root);
        let doc = SourceDocument::from_str("a.md", "---\nTags: [\"C#, .NET\", HTML]\n---\n")?;
        let labels: Vec<String> = IndexEntry::new(&doc, &resolver, &config)
            .tags
            .into_iter()
            .map(|t| t.label)
            .collect();
        assert_eq!(vec!["C#, .NET", "HTML"], labels);
        Ok(())
    }

    #[test]
    fn test_index_entry_without_tags() -> crate::document::Result<()> {
        let config = SiteConfig::with_defaults(Path::new("."), LinkRoot::default());
        let resolver = SiteLinkResolver::new(&config.link_root);
        let doc = SourceDocument::from_str("untitled.md", "---\n---\n")?;
        let entry = IndexEntry::new(&doc, &resolver, &config);
        assert_eq!("untitled", entry.title);
        assert_eq!("untitled.html", entry.url);
        assert!(entry.tags.is_empty());
        Ok(())
    }
}
