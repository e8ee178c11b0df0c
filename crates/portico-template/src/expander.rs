//! Directive expansion.
//!
//! Replaces every `$template{...}$` token with the named fragment, after
//! substituting `{attr}` (or `${attr}`) placeholders in the fragment source.
//! Lookup order for a placeholder is: directive attribute, expander global,
//! empty string.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::directive::{Segment, TemplateDirective, scan};
use crate::error::TemplateError;
use crate::registry::TemplateRegistry;

/// Default nesting ceiling for fragments that contain further directives.
pub const DEFAULT_MAX_DEPTH: usize = 10;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$?\{([A-Za-z_][A-Za-z0-9_-]*)\}").expect("invalid placeholder regex")
});

/// Expand directives in `body` against `registry` with default settings.
///
/// # Errors
///
/// See [`Expander::expand`].
///
/// # Example
///
/// ```
/// use portico_template::{TemplateRegistry, expand};
///
/// let registry = TemplateRegistry::new()
///     .with_template("title-with-icon", "<{heading}>{title}</{heading}>");
/// let html = expand(
///     r#"$template{name="title-with-icon" title="Getting started" heading="h3"}$"#,
///     &registry,
/// )
/// .unwrap();
/// assert_eq!(html, "<h3>Getting started</h3>");
/// ```
pub fn expand(body: &str, registry: &TemplateRegistry) -> Result<String, TemplateError> {
    Expander::new(registry).expand(body)
}

/// Configurable directive expander.
///
/// Holds page-level globals (navigation markup, news list, site variables)
/// that any fragment can reference without the directive passing them.
#[derive(Debug)]
pub struct Expander<'r> {
    registry: &'r TemplateRegistry,
    globals: HashMap<String, String>,
    max_depth: usize,
}

impl<'r> Expander<'r> {
    /// Create an expander with no globals and [`DEFAULT_MAX_DEPTH`].
    #[must_use]
    pub fn new(registry: &'r TemplateRegistry) -> Self {
        Self {
            registry,
            globals: HashMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set a global placeholder value.
    #[must_use]
    pub fn with_global(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.globals.insert(key.into(), value.into());
        self
    }

    /// Set several global placeholder values.
    #[must_use]
    pub fn with_globals<I, K, V>(mut self, globals: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.globals
            .extend(globals.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Set the fragment nesting ceiling.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Expand every directive in `body`.
    ///
    /// Text outside directives is copied unchanged, so expanding text that
    /// contains no directive returns it as is.
    ///
    /// # Errors
    ///
    /// - [`TemplateError::NotFound`] if a directive names an unregistered fragment
    /// - [`TemplateError::Recursion`] if fragments nest deeper than the ceiling
    /// - [`TemplateError::Malformed`] if a directive token cannot be parsed
    pub fn expand(&self, body: &str) -> Result<String, TemplateError> {
        self.expand_source(body, None, 0)
    }

    /// Expand `source`, the page body (`context` is `None`) or the source of
    /// the fragment named by `context`.
    ///
    /// Only source text is scanned for directives. Substituted values are
    /// copied as literal text.
    fn expand_source(
        &self,
        source: &str,
        context: Option<&TemplateDirective>,
        depth: usize,
    ) -> Result<String, TemplateError> {
        let segments = scan(source)?;
        let mut output = String::with_capacity(source.len());

        for segment in segments {
            match segment {
                Segment::Text(text) => match context {
                    Some(ctx) => output.push_str(&self.substitute(text, ctx)),
                    None => output.push_str(text),
                },
                Segment::Directive(mut directive) => {
                    if let Some(ctx) = context {
                        for value in directive.attributes.values_mut() {
                            *value = self.substitute(value, ctx);
                        }
                    }
                    if depth >= self.max_depth {
                        return Err(TemplateError::Recursion {
                            name: directive.name,
                            depth: self.max_depth,
                        });
                    }
                    let fragment = self
                        .registry
                        .get(&directive.name)
                        .ok_or_else(|| TemplateError::NotFound(directive.name.clone()))?;
                    output.push_str(&self.expand_source(fragment, Some(&directive), depth + 1)?);
                }
            }
        }

        Ok(output)
    }

    /// Replace placeholders in `text` with directive attributes or globals.
    fn substitute(&self, text: &str, directive: &TemplateDirective) -> String {
        PLACEHOLDER_RE
            .replace_all(text, |caps: &Captures<'_>| {
                let key = &caps[1];
                directive
                    .get(key)
                    .or_else(|| self.globals.get(key).map(String::as_str))
                    .unwrap_or_default()
                    .to_owned()
            })
            .into_owned()
    }
}
