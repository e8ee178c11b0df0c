//! Navigation state resolution.
//!
//! [`resolve`] turns a single current-page identifier into the active flag of
//! every menu entry. The top bar and the sidebar are resolved independently,
//! so a documentation version can be active in the sidebar while no top bar
//! tab is.

use crate::menu::{Menu, MenuEntry, MenuGroup};

/// Identifier used when a page declares no current page.
pub const DEFAULT_PAGE: &str = "Home";

/// Active flag of every menu entry for one page render.
///
/// # Example
///
/// ```
/// use portico_nav::{MenuBuilder, resolve};
///
/// let menu = MenuBuilder::new()
///     .top_bar("Home", "Home", "/index.php")
///     .top_bar("About", "About", "/about.php")
///     .build()
///     .unwrap();
///
/// let state = resolve(Some("About"), &menu);
/// assert_eq!(state.active_top_bar(), Some("About"));
/// assert_eq!(state.top_bar(), &[("Home".to_owned(), false), ("About".to_owned(), true)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NavigationState {
    current_page: String,
    top_bar: Vec<(String, bool)>,
    sidebar: Vec<(String, bool)>,
}

impl NavigationState {
    /// Effective current-page identifier after defaulting.
    #[must_use]
    pub fn current_page(&self) -> &str {
        &self.current_page
    }

    /// Top bar entry ids with their active flag, in menu order.
    #[must_use]
    pub fn top_bar(&self) -> &[(String, bool)] {
        &self.top_bar
    }

    /// Sidebar entry ids (including sub-links) with their active flag, in menu order.
    #[must_use]
    pub fn sidebar(&self) -> &[(String, bool)] {
        &self.sidebar
    }

    /// Id of the active top bar entry, if any.
    #[must_use]
    pub fn active_top_bar(&self) -> Option<&str> {
        first_active(&self.top_bar)
    }

    /// Id of the active sidebar entry, if any.
    #[must_use]
    pub fn active_sidebar(&self) -> Option<&str> {
        first_active(&self.sidebar)
    }

    /// Whether `entry` is active in its own widget.
    ///
    /// Entries that are not part of the resolved menu are inactive.
    #[must_use]
    pub fn is_active(&self, entry: &MenuEntry) -> bool {
        let flags = match entry.group {
            MenuGroup::TopBar => &self.top_bar,
            MenuGroup::Sidebar | MenuGroup::SidebarSub => &self.sidebar,
        };
        flags
            .iter()
            .any(|(id, active)| *active && *id == entry.id)
    }
}

fn first_active(flags: &[(String, bool)]) -> Option<&str> {
    flags
        .iter()
        .find(|(_, active)| *active)
        .map(|(id, _)| id.as_str())
}

/// Resolve the navigation state for `current_page`.
///
/// A missing, empty or blank identifier is replaced by [`DEFAULT_PAGE`]
/// before matching. Resolution is total: unmatched entries are inactive.
#[must_use]
pub fn resolve(current_page: Option<&str>, menu: &Menu) -> NavigationState {
    resolve_with_default(current_page, DEFAULT_PAGE, menu)
}

/// Resolve the navigation state with a custom fallback identifier.
#[must_use]
pub fn resolve_with_default(
    current_page: Option<&str>,
    default_page: &str,
    menu: &Menu,
) -> NavigationState {
    let current_page = match current_page {
        Some(page) if !page.trim().is_empty() => page,
        _ => default_page,
    };

    NavigationState {
        current_page: current_page.to_owned(),
        top_bar: mark_active(menu.top_bar(), current_page),
        sidebar: mark_active(menu.sidebar(), current_page),
    }
}

/// Flag the first entry matching `current_page`.
///
/// Menu validation keeps identifiers unique per widget, so at most one entry
/// can match; taking only the first keeps the invariant even for menus that
/// bypassed validation.
fn mark_active<'a>(
    entries: impl Iterator<Item = &'a MenuEntry>,
    current_page: &str,
) -> Vec<(String, bool)> {
    let mut found = false;
    entries
        .map(|entry| {
            let active = !found && entry.matches(current_page);
            found |= active;
            (entry.id.clone(), active)
        })
        .collect()
}
