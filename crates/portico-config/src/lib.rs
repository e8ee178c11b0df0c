//! Configuration management for Portico.
//!
//! Parses `portico.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.name`
//! - `news.database_url`

mod expand;

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use portico_nav::{DEFAULT_PAGE, Menu, MenuEntry, MenuError, NavClasses};
use portico_template::DEFAULT_MAX_DEPTH;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override page source directory.
    pub content_dir: Option<PathBuf>,
    /// Override build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override news database URL.
    pub database_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "portico.toml";

/// Upper bound for `templates.max_depth`.
const MAX_TEMPLATE_DEPTH: usize = 64;

/// Default number of latest news items.
const DEFAULT_NEWS_ITEMS: NonZeroUsize = NonZeroUsize::new(5).unwrap();

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Template expansion configuration.
    pub templates: TemplatesConfig,
    /// Latest news configuration (optional section).
    pub news: Option<NewsConfig>,
    /// Navigation menu as declared in TOML.
    menu: MenuConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Validated navigation menu (set after loading).
    #[serde(skip)]
    pub nav: NavConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    name: Option<String>,
    content_dir: Option<String>,
    templates_dir: Option<String>,
    output_dir: Option<String>,
    default_page: Option<String>,
    chromeless_pages: Option<Vec<String>>,
    variables: BTreeMap<String, String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Site name, exposed to fragments as `site_name`.
    pub name: String,
    /// Directory of page sources.
    pub content_dir: PathBuf,
    /// Directory of template fragments.
    pub templates_dir: PathBuf,
    /// Directory rendered pages are written to.
    pub output_dir: PathBuf,
    /// Current-page identifier used when a page declares none.
    pub default_page: String,
    /// Pages rendered without the top frame.
    pub chromeless_pages: Vec<String>,
    /// Extra template globals (e.g. `version = "6.0"`).
    pub variables: BTreeMap<String, String>,
}

impl SiteConfig {
    /// Check if `current_page` is rendered without the top frame.
    #[must_use]
    pub fn is_chromeless(&self, current_page: &str) -> bool {
        self.chromeless_pages.iter().any(|p| p == current_page)
    }
}

fn default_chromeless_pages() -> Vec<String> {
    vec!["Forums".to_owned()]
}

/// Template expansion configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Maximum fragment nesting depth.
    pub max_depth: usize,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Latest news configuration.
#[derive(Debug, Deserialize)]
pub struct NewsConfig {
    /// News database URL (`sqlite://news.db`).
    pub database_url: String,
    /// Number of items listed when a page enables news without a count.
    #[serde(default = "default_max_items")]
    pub max_items: NonZeroUsize,
    /// Full news page the latest news lines link to.
    #[serde(default = "default_news_page")]
    pub page: String,
}

impl NewsConfig {
    /// News configuration for `database_url` with default settings.
    #[must_use]
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_items: default_max_items(),
            page: default_news_page(),
        }
    }

    /// Validate that all required fields are properly set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.database_url, "news.database_url")?;
        require_non_empty(&self.page, "news.page")?;
        Ok(())
    }
}

fn default_max_items() -> NonZeroUsize {
    DEFAULT_NEWS_ITEMS
}

fn default_news_page() -> String {
    "news.php".to_owned()
}

/// Raw menu configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct MenuConfigRaw {
    entries: Vec<MenuEntry>,
    classes: NavClasses,
}

/// Validated navigation configuration.
#[derive(Debug, Default)]
pub struct NavConfig {
    /// Ordered menu entries.
    pub menu: Menu,
    /// CSS class pairs for the two widgets.
    pub classes: NavClasses,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`news.database_url`").
        field: String,
        /// Error message (e.g., "${`NEWS_DB`} not set").
        message: String,
    },
    /// Invalid menu declaration.
    #[error("Invalid menu: {0}")]
    Menu(#[from] MenuError),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Template variable names follow the placeholder syntax `[A-Za-z_][A-Za-z0-9_-]*`.
fn is_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `portico.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails or
    /// the result does not validate.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.site_resolved.content_dir.clone_from(content_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(database_url) = &settings.database_url {
            match &mut self.news {
                Some(news) => news.database_url.clone_from(database_url),
                None => self.news = Some(NewsConfig::with_database_url(database_url.clone())),
            }
        }
    }

    /// Get the news configuration.
    ///
    /// Use this instead of accessing the `news` field directly when the
    /// command requires a news store.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the section is missing or invalid.
    pub fn require_news(&self) -> Result<&NewsConfig, ConfigError> {
        let news = self.news.as_ref().ok_or_else(|| {
            ConfigError::Validation("[news] section or --database-url required".into())
        })?;
        news.validate()?;
        Ok(news)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            templates: TemplatesConfig::default(),
            news: None,
            menu: MenuConfigRaw::default(),
            site_resolved: SiteConfig {
                name: String::new(),
                content_dir: base.join("content"),
                templates_dir: base.join("templates"),
                output_dir: base.join("public"),
                default_page: DEFAULT_PAGE.to_owned(),
                chromeless_pages: default_chromeless_pages(),
                variables: BTreeMap::new(),
            },
            nav: NavConfig::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            menu_entries = config.nav.menu.entries().len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_templates()?;
        if let Some(news) = &self.news {
            news.validate()?;
        }
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site_resolved.default_page, "site.default_page")?;

        if let Some(name) = self
            .site_resolved
            .variables
            .keys()
            .find(|name| !is_variable_name(name))
        {
            return Err(ConfigError::Validation(format!(
                "site.variables key '{name}' is not a valid placeholder name"
            )));
        }

        Ok(())
    }

    /// Validate templates configuration.
    fn validate_templates(&self) -> Result<(), ConfigError> {
        let depth = self.templates.max_depth;
        if depth == 0 {
            return Err(ConfigError::Validation(
                "templates.max_depth must be greater than 0".to_owned(),
            ));
        }
        if depth > MAX_TEMPLATE_DEPTH {
            return Err(ConfigError::Validation(format!(
                "templates.max_depth cannot exceed {MAX_TEMPLATE_DEPTH}"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref name) = self.site.name {
            self.site.name = Some(expand::expand_env(name, "site.name")?);
        }

        if let Some(ref mut news) = self.news {
            news.database_url = expand::expand_env(&news.database_url, "news.database_url")?;
        }

        Ok(())
    }

    /// Resolve relative paths against the config directory and validate the menu.
    fn resolve(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));
        let site = std::mem::take(&mut self.site);

        self.site_resolved = SiteConfig {
            name: site.name.unwrap_or_default(),
            content_dir: resolve(site.content_dir.as_deref(), "content"),
            templates_dir: resolve(site.templates_dir.as_deref(), "templates"),
            output_dir: resolve(site.output_dir.as_deref(), "public"),
            default_page: site
                .default_page
                .unwrap_or_else(|| DEFAULT_PAGE.to_owned()),
            chromeless_pages: site
                .chromeless_pages
                .unwrap_or_else(default_chromeless_pages),
            variables: site.variables,
        };

        let menu = std::mem::take(&mut self.menu);
        self.nav = NavConfig {
            menu: Menu::new(menu.entries)?,
            classes: menu.classes,
        };

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use portico_nav::MenuGroup;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site_resolved.content_dir, PathBuf::from("/test/content"));
        assert_eq!(config.site_resolved.templates_dir, PathBuf::from("/test/templates"));
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/test/public"));
        assert_eq!(config.site_resolved.default_page, "Home");
        assert_eq!(config.site_resolved.chromeless_pages, vec!["Forums".to_owned()]);
        assert_eq!(config.templates.max_depth, 10);
        assert!(config.news.is_none());
        assert!(config.nav.menu.is_empty());
        assert_eq!(config.nav.classes, NavClasses::default());
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve(Path::new("/site")).unwrap();

        assert_eq!(config.site_resolved.content_dir, PathBuf::from("/site/content"));
        assert_eq!(config.site_resolved.default_page, "Home");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
name = "JPPF"
content_dir = "pages"
output_dir = "dist"
default_page = "Welcome"
chromeless_pages = []

[site.variables]
version = "6.0"
unstable-version = "6.1-alpha"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/site")).unwrap();

        let site = &config.site_resolved;
        assert_eq!(site.name, "JPPF");
        assert_eq!(site.content_dir, PathBuf::from("/site/pages"));
        assert_eq!(site.templates_dir, PathBuf::from("/site/templates"));
        assert_eq!(site.output_dir, PathBuf::from("/site/dist"));
        assert_eq!(site.default_page, "Welcome");
        assert!(site.chromeless_pages.is_empty());
        assert_eq!(site.variables.get("version").map(String::as_str), Some("6.0"));
        assert!(!site.is_chromeless("Forums"));
    }

    #[test]
    fn test_parse_news_config_defaults() {
        let toml = r#"
[news]
database_url = "sqlite://news.db"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let news = config.require_news().unwrap();

        assert_eq!(news.database_url, "sqlite://news.db");
        assert_eq!(news.max_items.get(), 5);
        assert_eq!(news.page, "news.php");
    }

    #[test]
    fn test_news_max_items_zero_rejected() {
        let toml = r#"
[news]
database_url = "sqlite://news.db"
max_items = 0
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_require_news_missing_section() {
        let config = Config::default_with_base(Path::new("/test"));

        let err = config.require_news().unwrap_err();

        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("[news]"));
    }

    #[test]
    fn test_parse_menu() {
        let toml = r#"
[[menu.entries]]
id = "Home"
label = "Home"
url = "/index.php"
group = "top_bar"

[[menu.entries]]
id = "All docs"
label = "All docs"
url = "/doc"
group = "sidebar"

[[menu.entries]]
id = "v6.0"
label = "v6.0"
url = "/doc/6.0"
group = "sidebar_sub"
parent = "All docs"

[menu.classes]
top_bar_active = "tab-on"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/site")).unwrap();

        let menu = &config.nav.menu;
        assert_eq!(menu.entries().len(), 3);
        assert_eq!(menu.top_bar().count(), 1);
        assert_eq!(menu.entries()[2].group, MenuGroup::SidebarSub);
        assert_eq!(config.nav.classes.top_bar_active, "tab-on");
        assert_eq!(config.nav.classes.top_bar_inactive, "headerMenuItem");
    }

    #[test]
    fn test_invalid_menu_is_menu_error() {
        let toml = r#"
[[menu.entries]]
id = "v6.0"
label = "v6.0"
url = "/doc/6.0"
group = "sidebar_sub"
parent = "All docs"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();

        let err = config.resolve(Path::new("/site")).unwrap_err();

        assert!(matches!(err, ConfigError::Menu(_)));
    }

    #[test]
    fn test_validate_max_depth_bounds() {
        let mut config = Config::default_with_base(Path::new("/test"));

        config.templates.max_depth = 0;
        assert!(config.validate().is_err());

        config.templates.max_depth = 65;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("cannot exceed 64"));

        config.templates.max_depth = 64;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_variable_names() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config
            .site_resolved
            .variables
            .insert("bad name".to_owned(), "x".to_owned());

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("bad name"));
    }

    #[test]
    fn test_validate_empty_default_page() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.default_page = "  ".to_owned();

        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_apply_cli_settings_dirs() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            content_dir: Some(PathBuf::from("/custom/content")),
            output_dir: Some(PathBuf::from("/custom/out")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site_resolved.content_dir, PathBuf::from("/custom/content"));
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/custom/out"));
        assert_eq!(config.site_resolved.templates_dir, PathBuf::from("/test/templates"));
    }

    #[test]
    fn test_apply_cli_settings_database_url_creates_section() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            database_url: Some("sqlite://cli.db".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        let news = config.require_news().unwrap();
        assert_eq!(news.database_url, "sqlite://cli.db");
        assert_eq!(news.page, "news.php");
    }

    #[test]
    fn test_apply_cli_settings_database_url_keeps_section() {
        let mut config: Config = toml::from_str(
            r#"
[news]
database_url = "sqlite://file.db"
max_items = 3
"#,
        )
        .unwrap();
        let overrides = CliSettings {
            database_url: Some("sqlite://cli.db".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        let news = config.require_news().unwrap();
        assert_eq!(news.database_url, "sqlite://cli.db");
        assert_eq!(news.max_items.get(), 3);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/portico.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portico.toml");
        std::fs::write(
            &path,
            r#"
[site]
content_dir = "pages"

[news]
database_url = "sqlite://news.db"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site_resolved.content_dir, dir.path().join("pages"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert!(config.news.is_some());
    }

    #[test]
    fn test_load_expands_env_vars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portico.toml");
        std::fs::write(
            &path,
            r#"
[news]
database_url = "${PORTICO_TEST_LOAD_DB:-sqlite://fallback.db}"
"#,
        )
        .unwrap();
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("PORTICO_TEST_LOAD_DB");
        }

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.require_news().unwrap().database_url, "sqlite://fallback.db");
    }

    #[test]
    fn test_load_rejects_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("portico.toml");
        std::fs::write(&path, "[site\nname = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_is_variable_name() {
        assert!(is_variable_name("version"));
        assert!(is_variable_name("_private"));
        assert!(is_variable_name("unstable-version"));
        assert!(!is_variable_name(""));
        assert!(!is_variable_name("1st"));
        assert!(!is_variable_name("a.b"));
    }
}
