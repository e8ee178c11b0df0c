//! `nav` command implementation.

use std::path::PathBuf;

use clap::Args;
use portico_config::Config;
use portico_nav::resolve_with_default;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    /// Current-page identifier (default: the configured default page).
    current_page: Option<String>,

    /// Path to configuration file (default: auto-discover portico.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl NavArgs {
    /// Print the resolved navigation state as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref(), None)?;
        let state = resolve_with_default(
            self.current_page.as_deref(),
            &config.site_resolved.default_page,
            &config.nav.menu,
        );

        Output::new().result(&serde_json::to_string_pretty(&state)?)?;
        Ok(())
    }
}
