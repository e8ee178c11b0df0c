//! Latest news feed for Portico pages.
//!
//! Reads news records from a [`NewsStore`], keeps the most recent ones and
//! renders them as deep links into the full news page.
//!
//! # Example
//!
//! ```ignore
//! use std::num::NonZeroUsize;
//! use portico_news::{SqliteNewsStore, fetch_latest, render_latest_news, to_lines};
//!
//! let store = SqliteNewsStore::from_url("sqlite://news.db")?;
//! let items = fetch_latest(&store, NonZeroUsize::new(5).unwrap()).await?;
//! let html = render_latest_news(&to_lines(&items), "news.php");
//! ```

mod error;
mod feed;
mod item;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod sqlite;
mod store;

pub use error::FeedError;
pub use feed::{NewsLine, fetch_latest, render_latest_news, to_lines};
pub use item::NewsItem;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockNewsStore;
pub use sqlite::SqliteNewsStore;
pub use store::NewsStore;
