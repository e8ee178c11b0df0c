//! Page composition for Portico.
//!
//! Each page source declares its current-page identifier in front matter.
//! [`SiteRenderer`] resolves navigation state for it, renders the top bar and
//! sidebar, optionally lists the latest news, and expands the page's template
//! directives with those values available as globals:
//!
//! | Global | Value |
//! |---|---|
//! | `current_page` | Resolved current-page identifier |
//! | `title` | Front matter `title` |
//! | `site_name` | `site.name` |
//! | `top_bar`, `sidebar` | Navigation widget markup |
//! | `latest_news` | Latest news lines (empty unless requested) |
//! | `frame_top` | Top frame markup (empty on chromeless pages) |
//!
//! Site variables from `[site.variables]` are available too, but cannot
//! shadow the names above.
//!
//! [`build_site`] renders a whole content directory.

mod build;
mod error;
mod page;
mod renderer;

pub use build::{BuildReport, build_site};
pub use error::RenderError;
pub use page::{FrontMatter, NewsRequest, Page};
pub use renderer::{FRAME_TOP, RenderedPage, SiteRenderer};
