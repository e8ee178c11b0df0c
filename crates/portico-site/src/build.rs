//! Static site build.

use std::path::{Path, PathBuf};

use portico_news::NewsStore;

use crate::error::RenderError;
use crate::page::Page;
use crate::renderer::SiteRenderer;

/// Page source extension scanned by [`build_site`].
const PAGE_EXTENSION: &str = "html";

/// Summary of a completed build.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Written files, in build order.
    pub written: Vec<PathBuf>,
}

/// Render every `*.html` page in `content_dir` into `output_dir`.
///
/// Pages are rendered independently in file name order. The first failing
/// page aborts the build and its error is returned; pages written before it
/// are left in place.
///
/// # Errors
///
/// Returns [`RenderError`] if a page cannot be read, rendered or written.
pub async fn build_site<S: NewsStore>(
    renderer: &SiteRenderer<'_, S>,
    content_dir: &Path,
    output_dir: &Path,
) -> Result<BuildReport, RenderError> {
    let mut report = BuildReport::default();

    for source in page_sources(content_dir)? {
        let page = Page::load(&source)?;
        let rendered = renderer.render(&page).await?;

        let target = output_dir.join(&rendered.output_path);
        write_page(&target, &rendered.html)?;
        tracing::info!(
            page = %rendered.current_page,
            output = %target.display(),
            "Wrote page"
        );
        report.written.push(target);
    }

    Ok(report)
}

/// Page sources directly inside `content_dir`, sorted by path.
fn page_sources(content_dir: &Path) -> Result<Vec<PathBuf>, RenderError> {
    let pattern = format!(
        "{}/*.{PAGE_EXTENSION}",
        glob::Pattern::escape(&content_dir.to_string_lossy())
    );
    let mut sources = Vec::new();
    for entry in glob::glob(&pattern)? {
        let path = entry.map_err(|e| RenderError::Io {
            path: e.path().to_path_buf(),
            source: std::io::Error::from(e),
        })?;
        if path.is_file() {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

/// Write a rendered page, creating parent directories.
pub(crate) fn write_page(target: &Path, html: &str) -> Result<(), RenderError> {
    let io_error = |source: std::io::Error| RenderError::Io {
        path: target.to_path_buf(),
        source,
    };
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    std::fs::write(target, html).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use portico_config::{Config, NavConfig};
    use portico_nav::MenuBuilder;
    use portico_news::MockNewsStore;
    use portico_template::TemplateRegistry;
    use pretty_assertions::assert_eq;

    use super::*;

    fn config() -> Config {
        let mut config = Config::default();
        config.nav = NavConfig {
            menu: MenuBuilder::new()
                .top_bar("Home", "Home", "/index.php")
                .top_bar("About", "About", "/about.php")
                .build()
                .unwrap(),
            ..NavConfig::default()
        };
        config
    }

    fn registry() -> TemplateRegistry {
        TemplateRegistry::new().with_template("header", "<tr>{top_bar}</tr>")
    }

    #[tokio::test]
    async fn test_build_writes_every_page() {
        let content = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(
            content.path().join("index.html"),
            "---\npage: Home\n---\n$template{name=\"header\"}$",
        )
        .unwrap();
        std::fs::write(
            content.path().join("about.html"),
            "---\npage: About\noutput: about/index.html\n---\n$template{name=\"header\"}$",
        )
        .unwrap();
        std::fs::write(content.path().join("notes.txt"), "not a page").unwrap();
        let config = config();
        let renderer = SiteRenderer::<MockNewsStore>::new(&config, registry());

        let report = build_site(&renderer, content.path(), output.path())
            .await
            .unwrap();

        assert_eq!(
            report.written,
            vec![
                output.path().join("about/index.html"),
                output.path().join("index.html"),
            ]
        );
        let about = std::fs::read_to_string(output.path().join("about/index.html")).unwrap();
        assert!(about.contains("class=\"headerMenuItem2 header_item_end\">About</a>"));
        let index = std::fs::read_to_string(output.path().join("index.html")).unwrap();
        assert!(index.contains("class=\"headerMenuItem2 header_item_start\">Home</a>"));
    }

    #[tokio::test]
    async fn test_build_empty_content_dir() {
        let content = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let config = config();
        let renderer = SiteRenderer::<MockNewsStore>::new(&config, registry());

        let report = build_site(&renderer, content.path(), output.path())
            .await
            .unwrap();

        assert!(report.written.is_empty());
    }

    #[tokio::test]
    async fn test_build_stops_at_first_error() {
        let content = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        std::fs::write(content.path().join("a.html"), "$template{name=\"missing\"}$").unwrap();
        std::fs::write(content.path().join("b.html"), "<p>fine</p>").unwrap();
        let config = config();
        let renderer = SiteRenderer::<MockNewsStore>::new(&config, registry());

        let err = build_site(&renderer, content.path(), output.path())
            .await
            .unwrap_err();

        assert!(matches!(err, RenderError::Template { .. }));
        assert!(!output.path().join("b.html").exists());
    }

    #[test]
    fn test_write_page_creates_parents() {
        let output = tempfile::tempdir().unwrap();
        let target = output.path().join("docs/6.0/index.html");

        write_page(&target, "<html></html>").unwrap();

        assert_eq!(std::fs::read_to_string(target).unwrap(), "<html></html>");
    }
}
