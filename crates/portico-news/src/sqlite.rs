//! SQLite-backed news store.

use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row};

use crate::error::FeedError;
use crate::item::{NewsItem, parse_date};
use crate::store::NewsStore;

const LIST_QUERY: &str = "SELECT date, title FROM news ORDER BY date DESC";

/// News store reading a `news(date, title)` table from a SQLite database.
///
/// Opens one read-only connection per query and closes it before returning.
#[derive(Clone, Debug)]
pub struct SqliteNewsStore {
    options: SqliteConnectOptions,
}

impl SqliteNewsStore {
    /// Create a store from a connection URL (`sqlite://news.db`, `sqlite:news.db`
    /// or a bare path).
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Unavailable`] if the URL cannot be parsed.
    pub fn from_url(url: &str) -> Result<Self, FeedError> {
        let options = SqliteConnectOptions::from_str(url)?.read_only(true);
        Ok(Self { options })
    }

    /// Create a store for a database file.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            options: SqliteConnectOptions::new()
                .filename(path)
                .read_only(true),
        }
    }
}

impl NewsStore for SqliteNewsStore {
    async fn list_by_date_desc(&self) -> Result<Vec<NewsItem>, FeedError> {
        let mut conn = self.options.connect().await?;
        let rows = sqlx::query(LIST_QUERY).fetch_all(&mut conn).await;
        // Close before surfacing a query error
        let closed = conn.close().await;
        let rows = rows?;
        closed?;

        tracing::debug!(count = rows.len(), "Fetched news records");
        rows.iter()
            .enumerate()
            .map(|(i, row)| item_from_row(i + 1, row))
            .collect()
    }
}

fn item_from_row(row_number: usize, row: &SqliteRow) -> Result<NewsItem, FeedError> {
    let invalid = |reason: String| FeedError::InvalidRecord {
        row: row_number,
        reason,
    };

    let raw_date: String = row.try_get("date").map_err(|e| invalid(e.to_string()))?;
    let title: String = row.try_get("title").map_err(|e| invalid(e.to_string()))?;
    let date =
        parse_date(&raw_date).ok_or_else(|| invalid(format!("unrecognized date '{raw_date}'")))?;

    Ok(NewsItem::new(date, title))
}
