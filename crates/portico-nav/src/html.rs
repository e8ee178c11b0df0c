//! HTML for the top bar and sidebar widgets.
//!
//! Reproduces the site's table-based header cells and `div` sidebar links.
//! Each link carries exactly one class of its widget's active/inactive pair.

use std::fmt::Write;

use crate::menu::{Menu, MenuEntry};
use crate::state::NavigationState;

/// CSS class pairs for the two navigation widgets.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NavClasses {
    /// Class of the active top bar cell.
    pub top_bar_active: String,
    /// Class of inactive top bar cells.
    pub top_bar_inactive: String,
    /// Class of the active sidebar link.
    pub sidebar_active: String,
    /// Class of inactive sidebar links.
    pub sidebar_inactive: String,
}

impl Default for NavClasses {
    fn default() -> Self {
        Self {
            top_bar_active: "headerMenuItem2".to_owned(),
            top_bar_inactive: "headerMenuItem".to_owned(),
            sidebar_active: "aboutMenuItem".to_owned(),
            sidebar_inactive: "aboutMenuItem2".to_owned(),
        }
    }
}

impl NavClasses {
    /// Class for `entry` in the top bar.
    #[must_use]
    pub fn top_bar_class(&self, entry: &MenuEntry, state: &NavigationState) -> &str {
        if state.is_active(entry) {
            &self.top_bar_active
        } else {
            &self.top_bar_inactive
        }
    }

    /// Class for `entry` in the sidebar.
    #[must_use]
    pub fn sidebar_class(&self, entry: &MenuEntry, state: &NavigationState) -> &str {
        if state.is_active(entry) {
            &self.sidebar_active
        } else {
            &self.sidebar_inactive
        }
    }
}

/// Marker placed before a top-level sidebar label.
const TOP_LEVEL_MARKER: &str = "&raquo; ";

/// Indentation placed before a sidebar sub-link.
const SUB_INDENT: &str = "&nbsp;&nbsp;&nbsp;";

/// Render the top bar cells.
///
/// The first and last cells additionally carry `header_item_start` and
/// `header_item_end`.
#[must_use]
pub fn render_top_bar(menu: &Menu, state: &NavigationState, classes: &NavClasses) -> String {
    let entries: Vec<_> = menu.top_bar().collect();
    let last = entries.len().saturating_sub(1);
    let mut html = String::with_capacity(entries.len() * 160);

    html.push_str("<td style=\"width: 1px\"></td>\n");
    for (i, entry) in entries.iter().enumerate() {
        let position = match (i == 0, i == last) {
            (true, true) => " header_item_start header_item_end",
            (true, false) => " header_item_start",
            (false, true) => " header_item_end",
            (false, false) => "",
        };
        let class = format!("{}{position}", classes.top_bar_class(entry, state));
        let _ = writeln!(
            html,
            "<td class=\"{class}\">&nbsp;<a href=\"{}\" class=\"{class}\">{}</a>&nbsp;</td>",
            html_escape::encode_double_quoted_attribute(&entry.url),
            html_escape::encode_text(&entry.label),
        );
        html.push_str("<td style=\"width: 1px\"></td>\n");
    }
    html
}

/// Render the sidebar links.
#[must_use]
pub fn render_sidebar(menu: &Menu, state: &NavigationState, classes: &NavClasses) -> String {
    let mut html = String::with_capacity(menu.entries().len() * 128);

    for entry in menu.sidebar() {
        if entry.separator_before {
            html.push_str("<hr/>\n");
        }
        let class = classes.sidebar_class(entry, state);
        let (indent, marker) = if entry.parent.is_some() {
            (SUB_INDENT, "")
        } else {
            ("", TOP_LEVEL_MARKER)
        };
        let _ = writeln!(
            html,
            "<div class=\"{class}\">{indent}<a href=\"{}\" class=\"{class}\">{marker}{}</a><br></div>",
            html_escape::encode_double_quoted_attribute(&entry.url),
            html_escape::encode_text(&entry.label),
        );
    }
    html
}
