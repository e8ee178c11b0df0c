//! CLI command implementations.

mod build;
mod nav;
mod news;
mod render;

pub(crate) use build::BuildArgs;
pub(crate) use nav::NavArgs;
pub(crate) use news::NewsArgs;
pub(crate) use render::RenderArgs;

use portico_config::Config;
use portico_news::SqliteNewsStore;
use portico_site::SiteRenderer;
use portico_template::TemplateRegistry;

use crate::error::CliError;

/// Build a renderer from loaded configuration.
///
/// Fragments are read from the configured templates directory. A news store
/// is attached only when a `[news]` section (or `--database-url`) is present.
fn site_renderer(config: &Config) -> Result<SiteRenderer<'_, SqliteNewsStore>, CliError> {
    let registry = TemplateRegistry::load_dir(&config.site_resolved.templates_dir)?;
    tracing::info!(
        templates = registry.len(),
        dir = %config.site_resolved.templates_dir.display(),
        "Loaded fragments"
    );

    let renderer = SiteRenderer::new(config, registry);
    match &config.news {
        Some(news) => Ok(renderer.with_news_store(SqliteNewsStore::from_url(&news.database_url)?)),
        None => Ok(renderer),
    }
}

/// Run a future on a fresh tokio runtime.
fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Runtime::new()?;
    Ok(runtime.block_on(future))
}
