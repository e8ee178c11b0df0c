//! News store abstraction.

use std::future::Future;

use crate::error::FeedError;
use crate::item::NewsItem;

/// Read-only source of news records.
///
/// The store exposes a single query: every record, newest first. Each call is
/// independent; implementations acquire and release any connection within the
/// call.
pub trait NewsStore: Send + Sync {
    /// List all news records ordered by date descending.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Unavailable`] if the store cannot be queried and
    /// [`FeedError::InvalidRecord`] if a record cannot be decoded.
    fn list_by_date_desc(&self) -> impl Future<Output = Result<Vec<NewsItem>, FeedError>> + Send;
}
