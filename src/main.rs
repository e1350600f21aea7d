use anyhow::{anyhow, Result};
use clap::{App, Arg};
use myblog::config::SiteConfig;
use myblog::document::SourceDocument;
use myblog::preview;
use myblog::url::LinkRoot;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("myblog=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let matches = App::new("myblog")
        .about("Previews titles, excerpts and URLs of the blog's documents")
        .arg(
            Arg::with_name("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Directory to search (with its parents) for myblog.yaml")
                .takes_value(true)
                .default_value("."),
        )
        .arg(
            Arg::with_name("content")
                .long("content")
                .value_name("DIR")
                .help("Overrides the content directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("template")
                .long("template")
                .value_name("FILE")
                .help("Renders the entries through this gtmpl template")
                .takes_value(true),
        )
        .get_matches();

    // The link root is read exactly once, here.
    let link_root = LinkRoot::from_env();
    // absolute, so the project file search can climb past the working directory
    let config_dir = std::env::current_dir()?.join(matches.value_of("config-dir").unwrap_or("."));
    let mut config = SiteConfig::from_directory(&config_dir, link_root)?;
    if let Some(content) = matches.value_of("content") {
        config.content_directory = PathBuf::from(content);
    }

    let docs = SourceDocument::load_all(&config.content_directory).map_err(|e| {
        anyhow!(
            "Loading documents from `{}`: {}",
            config.content_directory.display(),
            e
        )
    })?;
    let entries = preview::entries(&docs, &config);
    tracing::info!("previewing {} documents", entries.len());

    let stdout = std::io::stdout();
    match matches.value_of("template") {
        Some(path) => {
            let template = preview::parse_template(Path::new(path))?;
            preview::render(stdout.lock(), &template, &entries, &config)?;
        }
        None => preview::write_listing(stdout.lock(), &entries)?,
    }
    Ok(())
}
