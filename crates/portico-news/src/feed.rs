//! Latest news list.

use std::fmt::Write;
use std::num::NonZeroUsize;

use crate::error::FeedError;
use crate::item::NewsItem;
use crate::store::NewsStore;

/// One formatted entry of the latest news list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewsLine {
    /// 1-based position in the list.
    pub index: usize,
    /// Anchor on the full news page (`news1`, `news2`, ...).
    pub anchor: String,
    /// Date formatted as `n/j/Y`.
    pub date: String,
    /// Headline.
    pub title: String,
}

impl NewsLine {
    fn new(index: usize, item: &NewsItem) -> Self {
        Self {
            index,
            anchor: format!("news{index}"),
            date: item.display_date(),
            title: item.title.clone(),
        }
    }
}

/// Fetch at most `max_count` news records, newest first.
///
/// Issues exactly one store query. Fewer available records than `max_count`
/// is not an error. Records with the same date keep the store's order.
///
/// # Errors
///
/// Store failures are returned unchanged; no partial or cached list is
/// produced.
pub async fn fetch_latest<S: NewsStore>(
    store: &S,
    max_count: NonZeroUsize,
) -> Result<Vec<NewsItem>, FeedError> {
    let mut items = store.list_by_date_desc().await?;
    items.sort_by(|a, b| b.date.cmp(&a.date));
    items.truncate(max_count.get());

    tracing::debug!(count = items.len(), max = max_count.get(), "Latest news");
    Ok(items)
}

/// Pair each record with its 1-based anchor and display date.
#[must_use]
pub fn to_lines(items: &[NewsItem]) -> Vec<NewsLine> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| NewsLine::new(i + 1, item))
        .collect()
}

/// Render the "Latest News" link lines.
///
/// Each line deep-links to `{news_page}#newsN`. Titles are HTML-escaped.
#[must_use]
pub fn render_latest_news(lines: &[NewsLine], news_page: &str) -> String {
    let mut html = String::with_capacity(lines.len() * 160);
    for line in lines {
        let _ = write!(
            html,
            "<a href='{}#{}' style='font-size: 10pt'><span style='white-space: nowrap'>{} {}</span></a><br>",
            html_escape::encode_single_quoted_attribute(news_page),
            line.anchor,
            line.date,
            html_escape::encode_text(&line.title),
        );
    }
    html
}
