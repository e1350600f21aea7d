//! Conversions into [`Value`]s so gtmpl templates can consume the helpers'
//! results.

use crate::extract::Excerpt;
use crate::index::{IndexEntry, IndexTag};
use crate::tag::{TagEntry, TagTable};
use crate::url::LinkRoot;
use gtmpl_value::Value;
use std::collections::HashMap;

fn object<const N: usize>(fields: [(&str, Value); N]) -> Value {
    let mut m: HashMap<String, Value> = HashMap::with_capacity(N);
    for (key, value) in fields {
        m.insert(key.to_owned(), value);
    }
    Value::Object(m)
}

impl From<&TagEntry> for Value {
    /// `{label, css_classes}`
    fn from(t: &TagEntry) -> Value {
        object([
            ("label", Value::String(t.label.to_string())),
            ("css_classes", Value::String(t.css_classes.to_string())),
        ])
    }
}

impl From<&TagTable> for Value {
    fn from(tags: &TagTable) -> Value {
        Value::Array(tags.iter().map(Value::from).collect())
    }
}

impl From<&IndexTag> for Value {
    fn from(t: &IndexTag) -> Value {
        object([
            ("label", Value::String(t.label.clone())),
            ("css_classes", Value::String(t.css_classes.clone())),
        ])
    }
}

impl From<&Excerpt> for Value {
    /// `{text, is_html}`. Templates must emit `text` unescaped when `is_html`
    /// is set.
    fn from(e: &Excerpt) -> Value {
        object([
            ("text", Value::String(e.text().to_owned())),
            ("is_html", Value::Bool(e.is_html())),
        ])
    }
}

impl From<&IndexEntry> for Value {
    fn from(entry: &IndexEntry) -> Value {
        object([
            ("title", Value::String(entry.title.clone())),
            ("excerpt", Value::from(&entry.excerpt)),
            ("url", Value::String(entry.url.clone())),
            (
                "tags",
                Value::Array(entry.tags.iter().map(Value::from).collect()),
            ),
        ])
    }
}

impl From<&LinkRoot> for Value {
    fn from(root: &LinkRoot) -> Value {
        Value::String(root.to_string())
    }
}
