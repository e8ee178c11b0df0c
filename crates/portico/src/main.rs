//! Portico CLI.
//!
//! Composes site pages from fragments, navigation and the news store.

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::commands::{BuildArgs, NavArgs, NewsArgs, RenderArgs};
use crate::output::Output;

/// Static page composition for marketing and documentation sites.
#[derive(Parser)]
#[command(name = "portico")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every page in the content directory.
    Build(BuildArgs),
    /// Render a single page.
    Render(RenderArgs),
    /// Show the navigation state for a page.
    Nav(NavArgs),
    /// List the latest news.
    News(NewsArgs),
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build(args) => args.execute(),
        Commands::Render(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
        Commands::News(args) => args.execute(),
    };

    if let Err(err) = result {
        let output = Output::new();
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
