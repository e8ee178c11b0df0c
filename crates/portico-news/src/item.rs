//! News record type.

use chrono::{NaiveDate, NaiveDateTime};

/// Display pattern for news dates: numeric month/day/year without padding.
pub(crate) const DATE_FORMAT: &str = "%-m/%-d/%Y";

/// A single news record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewsItem {
    /// Publication date.
    pub date: NaiveDate,
    /// Headline.
    pub title: String,
}

impl NewsItem {
    /// Create a news record.
    #[must_use]
    pub fn new(date: NaiveDate, title: impl Into<String>) -> Self {
        Self {
            date,
            title: title.into(),
        }
    }

    /// Format the date as `n/j/Y` (e.g. `1/2/2019`).
    #[must_use]
    pub fn display_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Parse a stored date, accepting `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS`.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}
