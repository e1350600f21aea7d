//! Template helpers for the blog. The site itself is generated by an external
//! pipeline; this crate supplies what its page templates call into:
//!
//! 1. Deriving a title, an excerpt and a URL from a document
//!    ([`crate::extract`]), with markup helpers in [`crate::text`]
//! 2. The ordered tag → CSS classes table ([`crate::tag`])
//! 3. The link root, read once from `SITE_LINKROOT` ([`crate::url`]) and
//!    carried with the rest of the settings in [`crate::config::SiteConfig`]
//!
//! Documents are only seen through the narrow [`crate::document::Document`]
//! capability. [`crate::document::SourceDocument`] implements it for Markdown
//! and HTML files with YAML frontmatter, which is what the preview binary
//! ([`crate::preview`]) uses.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod config;
pub mod document;
pub mod extract;
pub mod index;
mod markdown;
pub mod preview;
pub mod tag;
pub mod text;
pub mod url;
mod util;
pub mod value;
