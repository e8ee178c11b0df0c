//! Static menu model.
//!
//! A [`Menu`] is the ordered list of every navigation entry on the site: the
//! top tab bar and the sidebar, with sidebar sub-links nested right after the
//! sidebar entry that owns them. The model is pure data; it is validated once
//! when built and then shared read-only by every page render.

use std::collections::HashSet;

/// Navigation widget an entry belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MenuGroup {
    /// Horizontal tab bar at the top of every page.
    TopBar,
    /// Top-level sidebar link.
    Sidebar,
    /// Indented sidebar link nested under a [`MenuGroup::Sidebar`] entry.
    SidebarSub,
}

impl MenuGroup {
    /// Whether the entry is rendered in the sidebar.
    #[must_use]
    pub fn is_sidebar(self) -> bool {
        matches!(self, Self::Sidebar | Self::SidebarSub)
    }
}

/// A single navigation link.
///
/// # Example
///
/// ```
/// use portico_nav::{MenuEntry, MenuGroup};
///
/// let entry = MenuEntry::new("Download", "Download", "/downloads.php", MenuGroup::Sidebar);
/// assert!(entry.matches("Download"));
/// assert!(!entry.matches("download"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct MenuEntry {
    /// Current-page identifier that activates this entry.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Link target.
    pub url: String,
    /// Widget the entry is rendered in.
    pub group: MenuGroup,
    /// Id of the owning sidebar entry (sub-links only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<String>,
    /// Additional identifiers that also activate this entry.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub aliases: Vec<String>,
    /// Non-matchable entries are decoration and never active.
    #[cfg_attr(feature = "serde", serde(default = "default_matchable"))]
    pub matchable: bool,
    /// Render a separator rule before this entry (sidebar only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub separator_before: bool,
}

#[cfg(feature = "serde")]
fn default_matchable() -> bool {
    true
}

impl MenuEntry {
    /// Create a matchable entry with no parent, aliases or separator.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        url: impl Into<String>,
        group: MenuGroup,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: url.into(),
            group,
            parent: None,
            aliases: Vec::new(),
            matchable: true,
            separator_before: false,
        }
    }

    /// Create a sidebar sub-link owned by the sidebar entry `parent`.
    #[must_use]
    pub fn sub(
        id: impl Into<String>,
        label: impl Into<String>,
        url: impl Into<String>,
        parent: impl Into<String>,
    ) -> Self {
        Self {
            parent: Some(parent.into()),
            ..Self::new(id, label, url, MenuGroup::SidebarSub)
        }
    }

    /// Add an alias identifier.
    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Mark the entry as decoration that is never active.
    #[must_use]
    pub fn decoration(mut self) -> Self {
        self.matchable = false;
        self
    }

    /// Render a separator before this entry.
    #[must_use]
    pub fn with_separator(mut self) -> Self {
        self.separator_before = true;
        self
    }

    /// Whether `current_page` activates this entry.
    ///
    /// Matching is exact equality against the id or any alias.
    #[must_use]
    pub fn matches(&self, current_page: &str) -> bool {
        self.matchable
            && (self.id == current_page || self.aliases.iter().any(|a| a == current_page))
    }

    /// Identifiers this entry answers to (id first, then aliases).
    fn identifiers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.id.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Error returned when a menu violates the model invariants.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// Two entries of the same widget answer to the same identifier.
    #[error("Duplicate menu identifier '{id}' in {widget}")]
    DuplicateId {
        /// Conflicting identifier.
        id: String,
        /// `top bar` or `sidebar`.
        widget: &'static str,
    },
    /// A sub-link is not nested right after the sidebar entry it names.
    #[error("Sidebar sub-entry '{id}' must follow its parent '{parent}'")]
    MisplacedSub {
        /// Sub-entry id.
        id: String,
        /// Declared parent id.
        parent: String,
    },
    /// A sub-link declares no parent.
    #[error("Sidebar sub-entry '{0}' has no parent")]
    MissingParent(String),
    /// A top-level entry declares a parent.
    #[error("Menu entry '{0}' is not a sidebar sub-entry but declares a parent")]
    UnexpectedParent(String),
}

/// Validated, ordered menu.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    /// Validate and wrap an ordered entry list.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError`] if identifiers collide within a widget or a
    /// sub-link is not nested under the sidebar entry it names.
    pub fn new(entries: Vec<MenuEntry>) -> Result<Self, MenuError> {
        validate(&entries)?;
        Ok(Self { entries })
    }

    /// All entries in declaration order.
    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Top bar entries, left to right.
    pub fn top_bar(&self) -> impl Iterator<Item = &MenuEntry> {
        self.entries.iter().filter(|e| e.group == MenuGroup::TopBar)
    }

    /// Flattened sidebar entries (top-level and sub-links), top to bottom.
    pub fn sidebar(&self) -> impl Iterator<Item = &MenuEntry> {
        self.entries.iter().filter(|e| e.group.is_sidebar())
    }

    /// Sub-links owned by the sidebar entry `parent_id`.
    pub fn children_of<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a MenuEntry> {
        self.entries
            .iter()
            .filter(move |e| e.parent.as_deref() == Some(parent_id))
    }

    /// Check if the menu has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Menu {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<MenuEntry>::deserialize(deserializer)?;
        Self::new(entries).map_err(serde::de::Error::custom)
    }
}

/// Incremental menu construction.
///
/// # Example
///
/// ```
/// use portico_nav::{MenuBuilder, MenuEntry, MenuGroup};
///
/// let menu = MenuBuilder::new()
///     .top_bar("Home", "Home", "/index.php")
///     .sidebar("All docs", "All docs", "/doc")
///     .entry(MenuEntry::sub("v6.0", "v6.0", "/doc/6.0", "All docs"))
///     .build()
///     .unwrap();
/// assert_eq!(menu.entries().len(), 3);
/// ```
#[derive(Debug, Default)]
pub struct MenuBuilder {
    entries: Vec<MenuEntry>,
}

impl MenuBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top bar entry.
    #[must_use]
    pub fn top_bar(self, id: &str, label: &str, url: &str) -> Self {
        self.entry(MenuEntry::new(id, label, url, MenuGroup::TopBar))
    }

    /// Append a top-level sidebar entry.
    #[must_use]
    pub fn sidebar(self, id: &str, label: &str, url: &str) -> Self {
        self.entry(MenuEntry::new(id, label, url, MenuGroup::Sidebar))
    }

    /// Append an arbitrary entry.
    #[must_use]
    pub fn entry(mut self, entry: MenuEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Validate and build the menu.
    ///
    /// # Errors
    ///
    /// See [`Menu::new`].
    pub fn build(self) -> Result<Menu, MenuError> {
        Menu::new(self.entries)
    }
}

fn validate(entries: &[MenuEntry]) -> Result<(), MenuError> {
    let mut top_bar_ids = HashSet::new();
    let mut sidebar_ids = HashSet::new();
    // Id of the closest preceding top-level sidebar entry.
    let mut open_parent: Option<&str> = None;

    for entry in entries {
        let (seen, widget) = match entry.group {
            MenuGroup::TopBar => (&mut top_bar_ids, "top bar"),
            MenuGroup::Sidebar | MenuGroup::SidebarSub => (&mut sidebar_ids, "sidebar"),
        };
        for id in entry.identifiers() {
            if !seen.insert(id) {
                return Err(MenuError::DuplicateId {
                    id: id.to_owned(),
                    widget,
                });
            }
        }

        match entry.group {
            MenuGroup::TopBar => {
                if entry.parent.is_some() {
                    return Err(MenuError::UnexpectedParent(entry.id.clone()));
                }
            }
            MenuGroup::Sidebar => {
                if entry.parent.is_some() {
                    return Err(MenuError::UnexpectedParent(entry.id.clone()));
                }
                open_parent = Some(&entry.id);
            }
            MenuGroup::SidebarSub => {
                let parent = entry
                    .parent
                    .as_deref()
                    .ok_or_else(|| MenuError::MissingParent(entry.id.clone()))?;
                if open_parent != Some(parent) {
                    return Err(MenuError::MisplacedSub {
                        id: entry.id.clone(),
                        parent: parent.to_owned(),
                    });
                }
            }
        }
    }

    Ok(())
}
