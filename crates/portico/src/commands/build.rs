//! `build` command implementation.

use std::path::PathBuf;

use clap::Args;
use portico_config::{CliSettings, Config};
use portico_site::build_site;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover portico.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory containing page sources.
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Directory rendered pages are written to.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// News database URL (overrides `[news].database_url`).
    #[arg(long, env = "PORTICO_DATABASE_URL")]
    database_url: Option<String>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, fragments or any page fail.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            content_dir: self.content_dir,
            output_dir: self.output_dir,
            database_url: self.database_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let site = &config.site_resolved;

        let output = Output::new();
        output.info(&format!(
            "Building {} -> {}",
            site.content_dir.display(),
            site.output_dir.display()
        ));

        let renderer = super::site_renderer(&config)?;
        let report =
            super::block_on(build_site(&renderer, &site.content_dir, &site.output_dir))??;

        output.success(&format!("Wrote {} page(s)", report.written.len()));
        Ok(())
    }
}
