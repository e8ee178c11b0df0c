//! Page rendering error types.

use std::path::PathBuf;

use portico_news::FeedError;
use portico_template::TemplateError;

/// Error returned when a page cannot be rendered or written.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Page source or output file I/O failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// File being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Page front matter cannot be parsed.
    #[error("Invalid front matter in {}: {message}", .path.display())]
    FrontMatter {
        /// Page source file.
        path: PathBuf,
        /// What is wrong with the front matter.
        message: String,
    },
    /// Directive expansion failed.
    #[error("Template error in {}: {source}", .path.display())]
    Template {
        /// Page source file.
        path: PathBuf,
        /// Underlying expansion error.
        #[source]
        source: TemplateError,
    },
    /// Latest news could not be fetched.
    #[error("News feed error in {}: {source}", .path.display())]
    Feed {
        /// Page source file.
        path: PathBuf,
        /// Underlying feed error.
        #[source]
        source: FeedError,
    },
    /// A page requests latest news but no news store is configured.
    #[error("Page {} requests latest news but no [news] store is configured", .0.display())]
    NewsNotConfigured(PathBuf),
    /// The content directory cannot be turned into a search pattern.
    #[error("Invalid content directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}
