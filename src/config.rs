//! Site configuration, built once at startup and passed by reference to
//! everything that renders pages.

use crate::extract::{TitleLength, UrlStyle, DEFAULT_EXCERPT_LENGTH};
use crate::tag::{TagEntry, TagTable};
use crate::url::LinkRoot;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// The project file searched for by [`SiteConfig::from_directory`].
pub const PROJECT_FILE: &str = "myblog.yaml";

const DEFAULT_CONTENT_DIRECTORY: &str = "input";

#[derive(Deserialize)]
struct ExcerptLength(usize);
impl Default for ExcerptLength {
    fn default() -> Self {
        ExcerptLength(DEFAULT_EXCERPT_LENGTH)
    }
}

#[derive(Deserialize)]
struct Project {
    #[serde(default)]
    content_directory: Option<PathBuf>,

    #[serde(default)]
    title_length: Option<usize>,

    #[serde(default)]
    always_ellipsis: bool,

    #[serde(default)]
    excerpt_length: ExcerptLength,

    #[serde(default)]
    url_style: UrlStyle,

    #[serde(default)]
    tags: Option<Vec<TagEntry>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    /// The prefix every resolved link starts with. Always taken from the
    /// environment, never from the project file.
    pub link_root: LinkRoot,
    pub content_directory: PathBuf,
    pub title_length: TitleLength,
    pub excerpt_length: usize,
    pub url_style: UrlStyle,
    pub tags: TagTable,
}

impl SiteConfig {
    /// The configuration used when there is no project file: content is read
    /// from `{root}/input`.
    pub fn with_defaults(root: &Path, link_root: LinkRoot) -> SiteConfig {
        SiteConfig {
            link_root,
            content_directory: root.join(DEFAULT_CONTENT_DIRECTORY),
            title_length: TitleLength::default(),
            excerpt_length: DEFAULT_EXCERPT_LENGTH,
            url_style: UrlStyle::default(),
            tags: TagTable::default(),
        }
    }

    /// Looks for [`PROJECT_FILE`] in `dir` and its ancestors. Without one,
    /// falls back to [`SiteConfig::with_defaults`] rooted at `dir`.
    pub fn from_directory(dir: &Path, link_root: LinkRoot) -> Result<SiteConfig> {
        let mut current = Some(dir);
        while let Some(candidate) = current {
            let path = candidate.join(PROJECT_FILE);
            if path.exists() {
                return SiteConfig::from_project_file(&path, link_root)
                    .map_err(|e| anyhow!("Loading configuration: {:?}", e));
            }
            current = candidate.parent();
        }
        tracing::info!(
            "no `{}` found above `{}`, using defaults",
            PROJECT_FILE,
            dir.display()
        );
        Ok(SiteConfig::with_defaults(dir, link_root))
    }

    pub fn from_project_file(path: &Path, link_root: LinkRoot) -> Result<SiteConfig> {
        use crate::util::open;
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        let project_root = path.parent().ok_or_else(|| {
            anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )
        })?;
        if project.excerpt_length.0 == 0 {
            return Err(anyhow!("`excerpt_length` must be greater than zero"));
        }

        tracing::info!("loaded configuration from `{}`", path.display());
        Ok(SiteConfig {
            link_root,
            content_directory: project_root.join(
                project
                    .content_directory
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIRECTORY)),
            ),
            title_length: match (project.title_length, project.always_ellipsis) {
                (None, _) => TitleLength::Unlimited,
                (Some(max), false) => TitleLength::Truncated(max),
                (Some(max), true) => TitleLength::AlwaysEllipsis(max),
            },
            excerpt_length: project.excerpt_length.0,
            url_style: project.url_style,
            tags: match project.tags {
                Some(tags) => TagTable::new(tags),
                None => TagTable::default(),
            },
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_project_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = SiteConfig::from_directory(dir.path(), LinkRoot::default())?;
        assert_eq!(
            SiteConfig::with_defaults(dir.path(), LinkRoot::default()),
            config
        );
        assert_eq!(dir.path().join("input"), config.content_directory);
        assert_eq!(TitleLength::Unlimited, config.title_length);
        assert_eq!(UrlStyle::BareRelative, config.url_style);
        assert_eq!(50, config.excerpt_length);
        Ok(())
    }

    #[test]
    fn test_project_file_in_ancestor() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join(PROJECT_FILE),
            "content_directory: posts\n\
             title_length: 82\n\
             always_ellipsis: true\n\
             excerpt_length: 120\n\
             url_style: root-relative\n\
             tags:\n\
             - label: Rust\n  css_classes: text-orange-600\n",
        )?;
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested)?;

        let link_root = LinkRoot::normalize(Some("myblog"));
        let config = SiteConfig::from_directory(&nested, link_root.clone())?;
        assert_eq!(link_root, config.link_root);
        assert_eq!(dir.path().join("posts"), config.content_directory);
        assert_eq!(TitleLength::AlwaysEllipsis(82), config.title_length);
        assert_eq!(120, config.excerpt_length);
        assert_eq!(UrlStyle::RootRelative, config.url_style);
        assert_eq!(Some("text-orange-600"), config.tags.css_classes("Rust"));
        assert_eq!(None, config.tags.css_classes("C#"));
        Ok(())
    }

    #[test]
    fn test_title_length_without_ellipsis_flag() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join(PROJECT_FILE);
        fs::write(&path, "title_length: 10\n")?;
        let config = SiteConfig::from_project_file(&path, LinkRoot::default())?;
        assert_eq!(TitleLength::Truncated(10), config.title_length);
        assert_eq!(TagTable::default(), config.tags);
        Ok(())
    }

    #[test]
    fn test_invalid_project_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        fs::write(dir.path().join(PROJECT_FILE), "url_style: sideways\n")?;
        assert!(SiteConfig::from_directory(dir.path(), LinkRoot::default()).is_err());

        fs::write(dir.path().join(PROJECT_FILE), "excerpt_length: 0\n")?;
        let err = SiteConfig::from_directory(dir.path(), LinkRoot::default()).unwrap_err();
        assert!(err.to_string().contains("excerpt_length"));
        Ok(())
    }
}
