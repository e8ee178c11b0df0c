//! Inline template directives for Portico pages.
//!
//! Pages embed reusable fragments with `$template{name="NAME" key="value"}$`
//! tokens. Fragments are loaded into a [`TemplateRegistry`] and expanded by an
//! [`Expander`], which substitutes `{key}` placeholders from the directive's
//! attributes or from page-level globals.
//!
//! # Example
//!
//! ```
//! use portico_template::{Expander, TemplateRegistry};
//!
//! let registry = TemplateRegistry::new()
//!     .with_template("about-page-header", "<div class=\"menu\">{sidebar}</div><h1>{title}</h1>");
//! let html = Expander::new(&registry)
//!     .with_global("sidebar", "<a>Home</a>")
//!     .expand(r#"$template{name="about-page-header" title="About"}$"#)
//!     .unwrap();
//! assert_eq!(html, "<div class=\"menu\"><a>Home</a></div><h1>About</h1>");
//! ```

mod args;
mod directive;
mod error;
mod expander;
mod registry;

pub use directive::TemplateDirective;
pub use error::TemplateError;
pub use expander::{DEFAULT_MAX_DEPTH, Expander, expand};
pub use registry::TemplateRegistry;
