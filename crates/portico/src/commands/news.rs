//! `news` command implementation.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::Args;
use portico_config::{CliSettings, Config};
use portico_news::{SqliteNewsStore, fetch_latest, to_lines};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the news command.
#[derive(Args)]
pub(crate) struct NewsArgs {
    /// Number of items to list (default: `[news].max_items`).
    #[arg(short = 'n', long)]
    count: Option<NonZeroUsize>,

    /// Path to configuration file (default: auto-discover portico.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// News database URL (overrides `[news].database_url`).
    #[arg(long, env = "PORTICO_DATABASE_URL")]
    database_url: Option<String>,
}

impl NewsArgs {
    /// Print the latest news lines.
    ///
    /// # Errors
    ///
    /// Returns an error if news is not configured or the store fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            database_url: self.database_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let news = config.require_news()?;

        let store = SqliteNewsStore::from_url(&news.database_url)?;
        let count = self.count.unwrap_or(news.max_items);
        let items = super::block_on(fetch_latest(&store, count))??;

        let output = Output::new();
        if items.is_empty() {
            output.info("No news");
            return Ok(());
        }
        for line in to_lines(&items) {
            output.result(&format!(
                "{}#{}\t{} {}",
                news.page, line.anchor, line.date, line.title
            ))?;
        }
        Ok(())
    }
}
