//! `render` command implementation.

use std::path::PathBuf;

use clap::Args;
use portico_config::{CliSettings, Config};
use portico_site::Page;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Page source file.
    page: PathBuf,

    /// Write the page here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover portico.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// News database URL (overrides `[news].database_url`).
    #[arg(long, env = "PORTICO_DATABASE_URL")]
    database_url: Option<String>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, fragments or the page fail.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            database_url: self.database_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let renderer = super::site_renderer(&config)?;

        let page = Page::load(&self.page)?;
        let rendered = super::block_on(renderer.render(&page))??;

        let output = Output::new();
        match self.output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, &rendered.html)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => output.result(&rendered.html)?,
        }
        Ok(())
    }
}
