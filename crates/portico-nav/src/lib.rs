//! Menu model and navigation state for Portico.
//!
//! Every page declares one current-page identifier. This crate turns that
//! identifier into the active flag of each top bar and sidebar entry and
//! renders both widgets with the matching CSS classes.
//!
//! # Example
//!
//! ```
//! use portico_nav::{MenuBuilder, NavClasses, render_sidebar, resolve};
//!
//! let menu = MenuBuilder::new()
//!     .sidebar("Home", "Home", "/")
//!     .sidebar("About", "About", "/about.php")
//!     .build()
//!     .unwrap();
//!
//! let state = resolve(Some("About"), &menu);
//! let html = render_sidebar(&menu, &state, &NavClasses::default());
//! assert!(html.contains("<a href=\"/about.php\" class=\"aboutMenuItem\">"));
//! ```

mod html;
mod menu;
mod state;

pub use html::{NavClasses, render_sidebar, render_top_bar};
pub use menu::{Menu, MenuBuilder, MenuEntry, MenuError, MenuGroup};
pub use state::{DEFAULT_PAGE, NavigationState, resolve, resolve_with_default};
