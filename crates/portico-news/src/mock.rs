//! Mock news store for testing.
//!
//! Provides [`MockNewsStore`] for unit testing without a database.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;

use crate::error::FeedError;
use crate::item::NewsItem;
use crate::store::NewsStore;

/// In-memory news store.
///
/// Records are returned in insertion order, so tests control exactly what the
/// "database" hands back. Use the builder methods to configure test data.
///
/// # Example
///
/// ```ignore
/// use portico_news::{MockNewsStore, NewsStore};
///
/// let store = MockNewsStore::new().with_item(2019, 1, 2, "A");
/// let items = store.list_by_date_desc().await.unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockNewsStore {
    items: Vec<NewsItem>,
    unavailable: bool,
    queries: AtomicUsize,
}

impl MockNewsStore {
    /// Create an empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record.
    ///
    /// # Panics
    ///
    /// Panics if the date is not a valid calendar date.
    #[must_use]
    pub fn with_item(mut self, year: i32, month: u32, day: u32, title: impl Into<String>) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("valid mock news date");
        self.with_news_item(NewsItem::new(date, title))
    }

    /// Append an already built record.
    #[must_use]
    pub fn with_news_item(mut self, item: NewsItem) -> Self {
        self.items.push(item);
        self
    }

    /// Make every query fail with [`FeedError::Unavailable`].
    #[must_use]
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    /// Number of queries issued against this store.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl NewsStore for MockNewsStore {
    async fn list_by_date_desc(&self) -> Result<Vec<NewsItem>, FeedError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        if self.unavailable {
            return Err(FeedError::Unavailable(sqlx::Error::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "mock news store unavailable",
            ))));
        }
        Ok(self.items.clone())
    }
}
