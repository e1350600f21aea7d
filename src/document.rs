//! Defines the [`Document`] and [`LinkResolver`] capabilities the helpers in
//! [`crate::extract`] depend on, plus [`SourceDocument`], the adapter that
//! satisfies [`Document`] for Markdown (or HTML) source files with YAML
//! frontmatter.

use std::{
    collections::HashMap,
    fmt,
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use serde_yaml::Value as YamlValue;

use crate::markdown;

/// The read-only view of a content item that the extraction helpers need. The
/// pipeline owns the real document; implementations must never mutate it.
pub trait Document {
    /// Looks up a metadata field such as `Title` or `Excerpt`.
    fn field(&self, name: &str) -> Option<&str>;

    /// Looks up a multi-valued field such as `Tags`. By default the text of
    /// [`Document::field`] is split on commas.
    fn field_values(&self, name: &str) -> Vec<&str> {
        self.field(name).map(split_values).unwrap_or_default()
    }

    /// The path-like identifier of the file the document came from.
    fn source(&self) -> &Path;

    /// Opens a reader over the (rendered) content body. The reader is scoped
    /// to the borrow of the document and released when dropped.
    fn open_content(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// Resolves a document to a site-relative link path (e.g. `/posts/hello`).
/// Returning `None` or an empty string means the document has no link.
pub trait LinkResolver {
    fn resolve(&self, doc: &dyn Document) -> Option<String>;
}

impl<F> LinkResolver for F
where
    F: Fn(&dyn Document) -> Option<String>,
{
    fn resolve(&self, doc: &dyn Document) -> Option<String> {
        self(doc)
    }
}

/// Splits a comma separated field into its trimmed, non-empty values.
pub fn split_values(text: &str) -> Vec<&str> {
    text.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .collect()
}

/// A document loaded from a source file. Frontmatter values are kept as text
/// (sequences are joined with `", "`) and YAML sequences are also kept item
/// by item for [`Document::field_values`]. The body is rendered to HTML once
/// at load time.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceDocument {
    source: PathBuf,
    fields: HashMap<String, String>,
    sequences: HashMap<String, Vec<String>>,
    content: String,
}

const MARKDOWN_EXTENSION: &str = "md";
const HTML_EXTENSION: &str = "html";

impl SourceDocument {
    /// Builds a document from an in-memory source file. `source` is only used
    /// as the identifier (and to decide whether the body is Markdown).
    pub fn from_str(source: impl Into<PathBuf>, input: &str) -> Result<Self> {
        fn frontmatter_indices(input: &str) -> Result<(usize, usize, usize)> {
            const FENCE: &str = "---";
            if !input.starts_with(FENCE) {
                return Err(Error::FrontmatterMissingStartFence);
            }
            match input[FENCE.len()..].find("\n---") {
                None => Err(Error::FrontmatterMissingEndFence),
                Some(offset) => Ok((
                    FENCE.len(),                            // yaml_start
                    FENCE.len() + offset + 1,               // yaml_stop
                    FENCE.len() + offset + 1 + FENCE.len(), // body_start
                )),
            }
        }

        let source = source.into();
        let (yaml_start, yaml_stop, body_start) = frontmatter_indices(input)?;
        let (fields, sequences) = parse_fields(&input[yaml_start..yaml_stop])?;

        let body = &input[body_start..];
        let mut content = String::new();
        match source.extension().and_then(|ext| ext.to_str()) {
            Some(MARKDOWN_EXTENSION) => markdown::to_html(&mut content, body),
            _ => content.push_str(body),
        }

        Ok(SourceDocument {
            source,
            fields,
            sequences,
            content,
        })
    }

    /// Loads the document at `{root}/{relative_path}`. The document's
    /// [`Document::source`] is the relative path.
    pub fn load(root: &Path, relative_path: &Path) -> Result<Self> {
        let mut contents = String::new();
        File::open(root.join(relative_path))
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|e| {
                Error::Annotated(
                    format!("reading `{}`", relative_path.display()),
                    Box::new(Error::Io(e)),
                )
            })?;
        SourceDocument::from_str(relative_path, &contents).map_err(|e| {
            Error::Annotated(
                format!("parsing `{}`", relative_path.display()),
                Box::new(e),
            )
        })
    }

    /// Walks `root` and loads every Markdown and HTML source file. Documents
    /// are ordered by their `Date` field (most recent first), then by source
    /// path.
    pub fn load_all(root: &Path) -> Result<Vec<SourceDocument>> {
        use walkdir::WalkDir;

        let mut docs = Vec::new();
        for result in WalkDir::new(root).sort_by(|a, b| a.file_name().cmp(b.file_name())) {
            let entry = result?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_source = matches!(
                entry.path().extension().and_then(|ext| ext.to_str()),
                Some(MARKDOWN_EXTENSION) | Some(HTML_EXTENSION)
            );
            if !is_source {
                continue;
            }
            // strip_prefix can't fail for entries yielded under `root`
            let relative = match entry.path().strip_prefix(root) {
                Ok(relative) => relative,
                Err(_) => continue,
            };
            docs.push(SourceDocument::load(root, relative)?);
        }

        docs.sort_by(|a, b| {
            b.field("Date")
                .cmp(&a.field("Date"))
                .then_with(|| a.source.cmp(&b.source))
        });
        tracing::debug!("loaded {} documents from `{}`", docs.len(), root.display());
        Ok(docs)
    }

    /// The rendered body.
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Document for SourceDocument {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    fn field_values(&self, name: &str) -> Vec<&str> {
        match self.sequences.get(name) {
            Some(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .collect(),
            None => self.field(name).map(split_values).unwrap_or_default(),
        }
    }

    fn source(&self) -> &Path {
        &self.source
    }

    fn open_content(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(self.content.as_bytes()))
    }
}

type Fields = (HashMap<String, String>, HashMap<String, Vec<String>>);

fn parse_fields(yaml: &str) -> Result<Fields> {
    let mut fields = HashMap::new();
    let mut sequences = HashMap::new();
    if yaml.trim().is_empty() {
        return Ok((fields, sequences));
    }
    let mapping: HashMap<String, YamlValue> = serde_yaml::from_str(yaml)?;
    for (name, value) in mapping {
        if let YamlValue::Sequence(items) = &value {
            sequences.insert(name.clone(), items.iter().filter_map(field_text).collect());
        }
        if let Some(text) = field_text(&value) {
            fields.insert(name, text);
        }
    }
    Ok((fields, sequences))
}

fn field_text(value: &YamlValue) -> Option<String> {
    match value {
        YamlValue::Null => None,
        YamlValue::Bool(b) => Some(b.to_string()),
        YamlValue::Number(n) => Some(n.to_string()),
        YamlValue::String(s) => Some(s.clone()),
        YamlValue::Sequence(items) => Some(
            items
                .iter()
                .filter_map(field_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        YamlValue::Mapping(_) => None,
    }
}

/// Represents the result of loading a [`SourceDocument`].
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error loading a [`SourceDocument`].
#[derive(Debug)]
pub enum Error {
    /// Returned when a source file is missing its starting frontmatter fence
    /// (`---`).
    FrontmatterMissingStartFence,

    /// Returned when the starting fence was found but the closing one was
    /// missing.
    FrontmatterMissingEndFence,

    /// Returned when the frontmatter isn't a valid YAML mapping.
    DeserializeYaml(serde_yaml::Error),

    /// Returned for I/O errors.
    Io(io::Error),

    /// Returned for WalkDir I/O errors.
    WalkDir(walkdir::Error),

    /// An error with an annotation.
    Annotated(String, Box<Error>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::FrontmatterMissingStartFence => {
                write!(f, "document must begin with `---`")
            }
            Error::FrontmatterMissingEndFence => {
                write!(f, "missing closing `---`")
            }
            Error::DeserializeYaml(err) => err.fmt(f),
            Error::Io(err) => err.fmt(f),
            Error::WalkDir(err) => err.fmt(f),
            Error::Annotated(annotation, err) => {
                write!(f, "{}: {}", &annotation, err)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::FrontmatterMissingStartFence => None,
            Error::FrontmatterMissingEndFence => None,
            Error::DeserializeYaml(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::WalkDir(err) => Some(err),
            Error::Annotated(_, err) => Some(err),
        }
    }
}

impl From<serde_yaml::Error> for Error {
    /// Lets `?` be used on [`serde_yaml`] deserialization.
    fn from(err: serde_yaml::Error) -> Error {
        Error::DeserializeYaml(err)
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Error {
        Error::WalkDir(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}
