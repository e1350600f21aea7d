//! Defines [`TagEntry`] and [`TagTable`], the ordered tag → CSS classes
//! lookup layouts use to color post tags.

use serde::Deserialize;
use std::borrow::Cow;

/// A tag label and the CSS classes it is displayed with.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TagEntry {
    pub label: Cow<'static, str>,
    pub css_classes: Cow<'static, str>,
}

impl TagEntry {
    pub const fn new(label: &'static str, css_classes: &'static str) -> TagEntry {
        TagEntry {
            label: Cow::Borrowed(label),
            css_classes: Cow::Borrowed(css_classes),
        }
    }
}

/// The built-in tags, in display order.
pub const TAGS: [TagEntry; 14] = [
    TagEntry::new("C#", "text-blue-600 bg-blue-300/50"),
    TagEntry::new("后端", "text-stone-600 bg-stone-400/50"),
    TagEntry::new(".NET", "text-indigo-600 bg-indigo-300/50"),
    TagEntry::new("Javascript", "text-amber-600 bg-amber-300/50"),
    TagEntry::new("HTML", "text-red-600 bg-red-300/50"),
    TagEntry::new("CSS", "text-yellow-600 bg-yellow-300/50"),
    TagEntry::new("前端", "text-lime-600 bg-lime-300/50"),
    TagEntry::new("React", "text-cyan-600 bg-cyan-300/50"),
    TagEntry::new("Vue", "text-green-600 bg-green-400/50"),
    TagEntry::new("数据库", "text-zinc-600 bg-zinc-300/50"),
    TagEntry::new("MSSQL", "text-slate-600 bg-slate-300/50"),
    TagEntry::new("MySQL", "text-teal-600 bg-teal-300/50"),
    TagEntry::new("Python", "text-gray-600 bg-gray-300/50"),
    TagEntry::new("Redux", "text-pink-600 bg-pink-300/50"),
];

/// An ordered, read-only set of [`TagEntry`]s. Built once with the site
/// configuration and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagTable(Vec<TagEntry>);

impl TagTable {
    /// Builds a table that keeps `entries` in the given order.
    pub fn new(entries: Vec<TagEntry>) -> TagTable {
        TagTable(entries)
    }

    /// Iterates over the entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &TagEntry> {
        self.0.iter()
    }

    /// The CSS classes for the tag with exactly this label, if any. When a
    /// label appears more than once, the first entry wins.
    pub fn css_classes(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| &*entry.css_classes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for TagTable {
    /// The table made of [`TAGS`].
    fn default() -> Self {
        TagTable(TAGS.to_vec())
    }
}
