//! Directive token parsing.
//!
//! A page embeds a reusable fragment with a token of the form
//! `$template{name="NAME" key="value" ...}$`. Scanning a body yields a list of
//! [`Segment`]s: literal text interleaved with parsed [`TemplateDirective`]s.

use std::collections::HashMap;

use crate::args::parse_attributes;
use crate::error::TemplateError;

/// Token opening sequence.
pub(crate) const OPEN: &str = "$template{";

/// Token closing sequence.
const CLOSE: &str = "}$";

/// A parsed `$template{...}$` token.
///
/// # Example
///
/// ```
/// use portico_template::TemplateDirective;
///
/// let directive =
///     TemplateDirective::parse(r#"$template{name="title-with-icon" title="Contribute"}$"#)
///         .unwrap();
/// assert_eq!(directive.name, "title-with-icon");
/// assert_eq!(directive.get("title"), Some("Contribute"));
/// assert_eq!(directive.get("heading"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateDirective {
    /// Fragment name to look up in the registry.
    pub name: String,
    /// Substitution attributes (excluding `name`).
    pub attributes: HashMap<String, String>,
}

impl TemplateDirective {
    /// Parse a single complete token.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Malformed`] if `token` is not exactly one
    /// well-formed directive.
    pub fn parse(token: &str) -> Result<Self, TemplateError> {
        let trimmed = token.trim();
        let inner = trimmed
            .strip_prefix(OPEN)
            .ok_or(TemplateError::Malformed {
                offset: 0,
                reason: "expected `$template{`",
            })?;
        let close = find_close(inner).ok_or(TemplateError::Malformed {
            offset: 0,
            reason: "unterminated directive, expected `}$`",
        })?;
        if close + CLOSE.len() != inner.len() {
            return Err(TemplateError::Malformed {
                offset: OPEN.len() + close + CLOSE.len(),
                reason: "unexpected text after directive",
            });
        }
        Self::from_attributes(&inner[..close], 0)
    }

    fn from_attributes(attrs_str: &str, offset: usize) -> Result<Self, TemplateError> {
        let mut attributes = parse_attributes(attrs_str);
        let name = attributes
            .remove("name")
            .filter(|name| !name.is_empty())
            .ok_or(TemplateError::Malformed {
                offset,
                reason: "missing `name` attribute",
            })?;
        Ok(Self { name, attributes })
    }

    /// Get an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// A piece of scanned text.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// Literal text copied to the output unchanged.
    Text(&'a str),
    /// Directive to be replaced by its expanded fragment.
    Directive(TemplateDirective),
}

/// Split `body` into literal text and directives.
pub(crate) fn scan(body: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut segments = Vec::new();
    let mut pos = 0;

    while let Some(found) = body[pos..].find(OPEN) {
        let start = pos + found;
        if start > pos {
            segments.push(Segment::Text(&body[pos..start]));
        }

        let attrs_start = start + OPEN.len();
        let close = find_close(&body[attrs_start..]).ok_or(TemplateError::Malformed {
            offset: start,
            reason: "unterminated directive, expected `}$`",
        })?;

        let attrs_str = &body[attrs_start..attrs_start + close];
        segments.push(Segment::Directive(TemplateDirective::from_attributes(
            attrs_str, start,
        )?));
        pos = attrs_start + close + CLOSE.len();
    }

    if pos < body.len() {
        segments.push(Segment::Text(&body[pos..]));
    }

    Ok(segments)
}

/// Find the byte offset of the closing `}$`, skipping quoted values.
fn find_close(s: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '}') if matches!(chars.peek(), Some((_, '$'))) => return Some(i),
            (None, _) => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn directive(name: &str, attrs: &[(&str, &str)]) -> TemplateDirective {
        TemplateDirective {
            name: name.to_owned(),
            attributes: attrs
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
        }
    }

    #[test]
    fn test_parse_single_token() {
        let parsed = TemplateDirective::parse(
            r#"$template{name="title-with-icon" title="Getting started" heading="h3"}$"#,
        )
        .unwrap();

        assert_eq!(
            parsed,
            directive(
                "title-with-icon",
                &[("title", "Getting started"), ("heading", "h3")]
            )
        );
    }

    #[test]
    fn test_parse_rejects_trailing_text() {
        let err = TemplateDirective::parse(r#"$template{name="a"}$ tail"#).unwrap_err();
        assert!(matches!(err, TemplateError::Malformed { .. }));
    }

    #[test]
    fn test_parse_requires_name() {
        let err = TemplateDirective::parse(r#"$template{title="x"}$"#).unwrap_err();
        assert!(err.to_string().contains("missing `name`"));
    }

    #[test]
    fn test_parse_rejects_empty_name() {
        let err = TemplateDirective::parse(r#"$template{name=""}$"#).unwrap_err();
        assert!(matches!(err, TemplateError::Malformed { .. }));
    }

    #[test]
    fn test_scan_mixed_body() {
        let body = r#"<p>before</p>
$template{name="about-page-header" title="About JPPF"}$
<p>middle</p>$template{name="about-page-footer"}$"#;

        let segments = scan(body).unwrap();

        assert_eq!(
            segments,
            vec![
                Segment::Text("<p>before</p>\n"),
                Segment::Directive(directive("about-page-header", &[("title", "About JPPF")])),
                Segment::Text("\n<p>middle</p>"),
                Segment::Directive(directive("about-page-footer", &[])),
            ]
        );
    }

    #[test]
    fn test_scan_plain_text() {
        let segments = scan("<h3>Getting started</h3>").unwrap();
        assert_eq!(segments, vec![Segment::Text("<h3>Getting started</h3>")]);
    }

    #[test]
    fn test_scan_empty_body() {
        assert!(scan("").unwrap().is_empty());
    }

    #[test]
    fn test_scan_closing_brace_inside_quotes() {
        let segments = scan(r#"$template{name="t" title="a}$b"}$"#).unwrap();
        assert_eq!(
            segments,
            vec![Segment::Directive(directive("t", &[("title", "a}$b")]))]
        );
    }

    #[test]
    fn test_scan_unterminated_reports_offset() {
        let err = scan(r#"text $template{name="t""#).unwrap_err();
        match err {
            TemplateError::Malformed { offset, .. } => assert_eq!(offset, 5),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_ignores_other_dollar_syntax() {
        let body = "<h3 style=\"${style}\">x</h3> costs $5";
        assert_eq!(scan(body).unwrap(), vec![Segment::Text(body)]);
    }
}
