//! Page composition.
//!
//! Provides [`SiteRenderer`], which turns one [`Page`] into a complete HTML
//! document: navigation state and widgets, optional latest news, then
//! directive expansion with page-level globals.

use std::path::PathBuf;

use portico_config::Config;
use portico_nav::{NavigationState, render_sidebar, render_top_bar, resolve_with_default};
use portico_news::{NewsStore, fetch_latest, render_latest_news, to_lines};
use portico_template::{Expander, TemplateRegistry};

use crate::error::RenderError;
use crate::page::Page;

/// Markup exposed as `frame_top` on pages that keep the top frame.
pub const FRAME_TOP: &str = "<div class=\"frame_top\"></div>";

/// A rendered page ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// Output path relative to the output directory.
    pub output_path: PathBuf,
    /// Complete HTML document.
    pub html: String,
    /// Resolved current-page identifier.
    pub current_page: String,
}

/// Composes pages from the site configuration, fragment registry and an
/// optional news store.
///
/// Each [`render`](Self::render) call is independent: navigation state is
/// computed from the page alone and the news store is queried at most once.
///
/// # Example
///
/// ```ignore
/// use portico_config::Config;
/// use portico_news::SqliteNewsStore;
/// use portico_site::{Page, SiteRenderer};
/// use portico_template::TemplateRegistry;
///
/// let config = Config::load(None, None)?;
/// let registry = TemplateRegistry::load_dir(&config.site_resolved.templates_dir)?;
/// let renderer = SiteRenderer::<SqliteNewsStore>::new(&config, registry);
/// let page = Page::load(Path::new("content/about.html"))?;
/// let rendered = renderer.render(&page).await?;
/// ```
pub struct SiteRenderer<'c, S> {
    config: &'c Config,
    registry: TemplateRegistry,
    news_store: Option<S>,
}

impl<'c, S: NewsStore> SiteRenderer<'c, S> {
    /// Create a renderer without a news store.
    #[must_use]
    pub fn new(config: &'c Config, registry: TemplateRegistry) -> Self {
        Self {
            config,
            registry,
            news_store: None,
        }
    }

    /// Attach the store pages read latest news from.
    #[must_use]
    pub fn with_news_store(mut self, store: S) -> Self {
        self.news_store = Some(store);
        self
    }

    /// Resolve navigation state for a page.
    #[must_use]
    pub fn navigation(&self, page: &Page) -> NavigationState {
        resolve_with_default(
            page.front_matter.page.as_deref(),
            &self.config.site_resolved.default_page,
            &self.config.nav.menu,
        )
    }

    /// Render one page.
    ///
    /// # Errors
    ///
    /// - [`RenderError::NewsNotConfigured`] if the page requests news and no
    ///   store or `[news]` section is available
    /// - [`RenderError::Feed`] if the news store fails
    /// - [`RenderError::Template`] if directive expansion fails
    pub async fn render(&self, page: &Page) -> Result<RenderedPage, RenderError> {
        let site = &self.config.site_resolved;
        let nav = &self.config.nav;

        let state = self.navigation(page);
        let top_bar = render_top_bar(&nav.menu, &state, &nav.classes);
        let sidebar = render_sidebar(&nav.menu, &state, &nav.classes);
        let latest_news = self.latest_news(page).await?;
        let frame_top = if site.is_chromeless(state.current_page()) {
            ""
        } else {
            FRAME_TOP
        };

        // Page-level values are set last so site variables cannot shadow them
        let expander = Expander::new(&self.registry)
            .with_max_depth(self.config.templates.max_depth)
            .with_globals(&site.variables)
            .with_global("site_name", &site.name)
            .with_global("current_page", state.current_page())
            .with_global("title", page.front_matter.title.as_deref().unwrap_or_default())
            .with_global("top_bar", top_bar)
            .with_global("sidebar", sidebar)
            .with_global("latest_news", latest_news)
            .with_global("frame_top", frame_top);

        let html = expander
            .expand(&page.body)
            .map_err(|source| RenderError::Template {
                path: page.source_path.clone(),
                source,
            })?;

        tracing::debug!(
            page = %state.current_page(),
            source = %page.source_path.display(),
            "Rendered page"
        );

        Ok(RenderedPage {
            output_path: page.output_path(),
            html,
            current_page: state.current_page().to_owned(),
        })
    }

    /// Render the latest news lines the page asks for, or nothing.
    async fn latest_news(&self, page: &Page) -> Result<String, RenderError> {
        let Some(request) = page.front_matter.news else {
            return Ok(String::new());
        };
        let not_configured = || RenderError::NewsNotConfigured(page.source_path.clone());
        let news = self.config.news.as_ref().ok_or_else(not_configured)?;
        let Some(count) = request.count(news.max_items) else {
            return Ok(String::new());
        };
        let store = self.news_store.as_ref().ok_or_else(not_configured)?;

        let items = fetch_latest(store, count)
            .await
            .map_err(|source| RenderError::Feed {
                path: page.source_path.clone(),
                source,
            })?;
        Ok(render_latest_news(&to_lines(&items), &news.page))
    }
}
