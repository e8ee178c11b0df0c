//! Template error types.

use std::path::PathBuf;

/// Error returned when directive expansion or registry loading fails.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A directive names a fragment that is not registered.
    #[error("Template not found: {0}")]
    NotFound(String),
    /// Fragments nest deeper than the configured ceiling.
    #[error("Template recursion limit of {depth} exceeded while expanding '{name}'")]
    Recursion {
        /// Fragment that would have exceeded the ceiling.
        name: String,
        /// Configured ceiling.
        depth: usize,
    },
    /// A directive token cannot be parsed.
    #[error("Malformed template directive at byte {offset}: {reason}")]
    Malformed {
        /// Byte offset of the token in the scanned text.
        offset: usize,
        /// What is wrong with the token.
        reason: &'static str,
    },
    /// A fragment file cannot be read.
    #[error("Failed to load template {}: {source}", .path.display())]
    Load {
        /// Fragment file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The templates directory cannot be turned into a search pattern.
    #[error("Invalid template directory pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}
