//! Previews what list pages will show for a set of documents: either a plain
//! listing or the output of a gtmpl template fed with the [`IndexEntry`]s,
//! the tag table and the link root.

use crate::config::SiteConfig;
use crate::document::Document;
use crate::index::IndexEntry;
use crate::text::{encode, strip_html};
use crate::url::SiteLinkResolver;
use gtmpl::{Context, Template, Value};
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Builds the [`IndexEntry`] of every document, in order, resolving links
/// under the configured link root.
pub fn entries<'a, D, I>(docs: I, config: &SiteConfig) -> Vec<IndexEntry>
where
    D: Document + 'a,
    I: IntoIterator<Item = &'a D>,
{
    let resolver = SiteLinkResolver::new(&config.link_root);
    docs.into_iter()
        .map(|doc| IndexEntry::new(doc, &resolver, config))
        .collect()
}

/// Writes one block per entry: title, URL, excerpt and tags.
pub fn write_listing<W: Write>(mut w: W, entries: &[IndexEntry]) -> io::Result<()> {
    for entry in entries {
        writeln!(w, "{}", entry.title)?;
        writeln!(w, "  url:     {}", entry.url)?;
        writeln!(
            w,
            "  excerpt: {}{}",
            entry.excerpt.text(),
            if entry.excerpt.is_html() { " (html)" } else { "" }
        )?;
        if !entry.tags.is_empty() {
            let labels: Vec<&str> = entry.tags.iter().map(|t| t.label.as_str()).collect();
            writeln!(w, "  tags:    {}", labels.join(", "))?;
        }
    }
    Ok(())
}

/// Returns an empty template with the `encode` and `strip_html` functions
/// registered. Plain-text values (titles, URLs, excerpts whose `is_html` is
/// false) must go through `encode`.
pub fn new_template() -> Template {
    let mut template = Template::default();
    template.add_func("encode", encode_func);
    template.add_func("strip_html", strip_html_func);
    template
}

fn string_arg<'a>(
    name: &str,
    args: &'a [Value],
) -> std::result::Result<Option<&'a str>, String> {
    match args {
        [Value::String(s)] => Ok(Some(s.as_str())),
        [Value::Nil] | [Value::NoValue] => Ok(None),
        [_] => Err(format!("{} expects a string", name)),
        _ => Err(format!("{} expects exactly one argument", name)),
    }
}

fn encode_func(args: &[Value]) -> std::result::Result<Value, String> {
    Ok(Value::String(encode(string_arg("encode", args)?)))
}

fn strip_html_func(args: &[Value]) -> std::result::Result<Value, String> {
    Ok(Value::String(strip_html(string_arg("strip_html", args)?)))
}

/// Loads and parses a template file. See [`new_template`] for the functions
/// available to it.
pub fn parse_template(path: &Path) -> Result<Template> {
    let mut contents = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut contents))
        .map_err(|err| Error::OpenTemplateFile {
            path: path.to_owned(),
            err,
        })?;

    let mut template = new_template();
    template.parse(&contents).map_err(Error::ParseTemplate)?;
    Ok(template)
}

/// Executes `template` with `{entries, tags, link_root}` and writes the
/// result to `w`.
pub fn render<W: Write>(
    mut w: W,
    template: &Template,
    entries: &[IndexEntry],
    config: &SiteConfig,
) -> Result<()> {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert(
        "entries".to_owned(),
        Value::Array(entries.iter().map(Value::from).collect()),
    );
    m.insert("tags".to_owned(), Value::from(&config.tags));
    m.insert("link_root".to_owned(), Value::from(&config.link_root));

    let context = Context::from(Value::Object(m)).map_err(Error::Template)?;
    template
        .execute(&mut w, &context)
        .map_err(Error::Template)?;
    Ok(())
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for previews.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate(String),

    /// Returned for errors executing a template.
    Template(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => write!(f, "Parsing template: {}", err),
            Error::Template(err) => write!(f, "Executing template: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::Template(_) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::document::SourceDocument;
    use crate::extract::Excerpt;
    use crate::index::IndexTag;
    use crate::url::LinkRoot;

    fn fixture() -> (SiteConfig, Vec<SourceDocument>) {
        let config = SiteConfig::with_defaults(Path::new("."), LinkRoot::normalize(Some("/blog/")));
        let docs = vec![
            SourceDocument::from_str(
                "hello.md",
                "---\nTitle: Hello\nTags: [CSS]\n---\nHi *there*.\n",
            )
            .unwrap(),
            SourceDocument::from_str("bare.html", "---\nExcerpt: unused\n---\n<p>Body</p>").unwrap(),
        ];
        (config, docs)
    }

    #[test]
    fn test_write_listing() -> io::Result<()> {
        let (config, docs) = fixture();
        let mut out = Vec::new();
        write_listing(&mut out, &entries(&docs, &config))?;
        assert_eq!(
            "Hello\n  url:     blog/hello.html\n  excerpt: Hi there.\n  tags:    CSS\n\
             bare\n  url:     blog/bare.html\n  excerpt: Body\n",
            String::from_utf8_lossy(&out)
        );
        Ok(())
    }

    #[test]
    fn test_render_template() -> Result<()> {
        let (config, docs) = fixture();
        let mut template = new_template();
        template
            .parse("{{.link_root}}:{{range .entries}}[{{.title}}|{{.url}}|{{.excerpt.text}}]{{end}}")
            .map_err(Error::ParseTemplate)?;

        let mut out = Vec::new();
        render(&mut out, &template, &entries(&docs, &config), &config)?;
        assert_eq!(
            "/blog:[Hello|blog/hello.html|Hi there.][bare|blog/bare.html|Body]",
            String::from_utf8_lossy(&out)
        );
        Ok(())
    }

    #[test]
    fn test_parse_template_missing_file() {
        match parse_template(Path::new("./testdata/missing.tmpl")) {
            Err(Error::OpenTemplateFile { path, .. }) => {
                assert_eq!(Path::new("./testdata/missing.tmpl"), path)
            }
            _ => panic!("expected OpenTemplateFile"),
        }
    }

    #[test]
    fn test_parse_template_file() -> Result<()> {
        let template = parse_template(Path::new("./testdata/index.tmpl"))?;
        let (config, docs) = fixture();
        let mut out = Vec::new();
        render(&mut out, &template, &entries(&docs, &config), &config)?;
        let out = String::from_utf8_lossy(&out);
        assert!(out.contains("<a href=\"blog/hello.html\">Hello</a>"));
        assert!(out.contains("text-yellow-600 bg-yellow-300/50"));
        Ok(())
    }

    #[test]
    fn test_template_escapes_plain_text_only() -> Result<()> {
        let template = parse_template(Path::new("./testdata/index.tmpl"))?;
        let config = SiteConfig::with_defaults(Path::new("."), LinkRoot::default());
        let entries = vec![
            IndexEntry {
                title: String::from("<script>alert(1)</script>"),
                excerpt: Excerpt::Plain(String::from("1 < 2 & \"quotes\"")),
                url: String::from("x.html"),
                tags: vec![IndexTag {
                    label: String::from("<b>tag</b>"),
                    css_classes: String::new(),
                }],
            },
            IndexEntry {
                title: String::from("Authored"),
                excerpt: Excerpt::Authored(String::from("<b>raw</b>")),
                url: String::from("y.html"),
                tags: Vec::new(),
            },
        ];

        let mut out = Vec::new();
        render(&mut out, &template, &entries, &config)?;
        let out = String::from_utf8_lossy(&out);
        assert!(!out.contains("<script>"));
        assert!(out.contains("<a href=\"x.html\">&lt;script&gt;alert(1)&lt;/script&gt;</a>"));
        assert!(out.contains("<p>1 &lt; 2 &amp; &quot;quotes&quot;</p>"));
        assert!(out.contains("&lt;b&gt;tag&lt;/b&gt;"));
        assert!(out.contains("<p><b>raw</b></p>"));
        Ok(())
    }

    #[test]
    fn test_strip_html_func() -> Result<()> {
        let mut template = new_template();
        template
            .parse("{{range .entries}}{{strip_html .excerpt.text}}{{end}}")
            .map_err(Error::ParseTemplate)?;
        let config = SiteConfig::with_defaults(Path::new("."), LinkRoot::default());
        let entries = vec![IndexEntry {
            title: String::new(),
            excerpt: Excerpt::Authored(String::from("<b>raw</b>  text")),
            url: String::from("#"),
            tags: Vec::new(),
        }];

        let mut out = Vec::new();
        render(&mut out, &template, &entries, &config)?;
        assert_eq!("raw text", String::from_utf8_lossy(&out));
        Ok(())
    }
}
