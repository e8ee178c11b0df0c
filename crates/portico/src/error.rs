//! CLI error types.

use portico_config::ConfigError;
use portico_news::FeedError;
use portico_site::RenderError;
use portico_template::TemplateError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Template(#[from] TemplateError),

    #[error("{0}")]
    Feed(#[from] FeedError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
