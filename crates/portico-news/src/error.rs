//! Feed error types.

/// Error returned when the latest news cannot be read.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// The news store could not be reached or the query failed.
    #[error("News store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
    /// A stored record has an unusable date or title.
    #[error("Invalid news record at row {row}: {reason}")]
    InvalidRecord {
        /// 1-based row position in the query result.
        row: usize,
        /// What is wrong with the record.
        reason: String,
    },
}
