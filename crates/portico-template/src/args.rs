//! Directive attribute parsing.
//!
//! Parses the `key="value" key='value' key=value` list found between the
//! braces of a `$template{...}$` token.

use std::collections::HashMap;

/// Parse an attribute list into a key/value map.
///
/// Later duplicates overwrite earlier ones. Text that is not part of a
/// `key=value` pair is skipped.
pub(crate) fn parse_attributes(attrs_str: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    let mut remaining = attrs_str.trim();

    while !remaining.is_empty() {
        remaining = remaining.trim_start();

        if let Some((key, value, rest)) = parse_key_value(remaining) {
            attrs.insert(key.to_owned(), value.to_owned());
            remaining = rest;
        } else {
            // Skip one unrecognized character
            let mut chars = remaining.chars();
            chars.next();
            remaining = chars.as_str();
        }
    }

    attrs
}

/// Parse a key-value pair from the start of the attributes string.
///
/// Supports: `key="value"`, `key='value'`, `key=value`
fn parse_key_value(s: &str) -> Option<(&str, &str, &str)> {
    let key_end = s.find(|c: char| c == '=' || c.is_whitespace())?;
    let key = &s[..key_end];
    if !is_valid_key(key) {
        return None;
    }

    let after_eq = s[key_end..].trim_start().strip_prefix('=')?.trim_start();

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end_quote = stripped.find('"')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, &stripped[..end_quote], &stripped[end_quote + 1..]))
    } else {
        // Unquoted value (until whitespace)
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, &after_eq[..end], &after_eq[end..]))
    }
}

/// Keys contain only alphanumeric characters, hyphens, and underscores.
pub(crate) fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_attributes() {
        assert!(parse_attributes("").is_empty());
        assert!(parse_attributes("   ").is_empty());
    }

    #[test]
    fn test_double_quoted_value() {
        let attrs = parse_attributes(r#"title="About JPPF""#);
        assert_eq!(attrs.get("title").map(String::as_str), Some("About JPPF"));
    }

    #[test]
    fn test_single_quoted_value() {
        let attrs = parse_attributes("title='Did you know ...'");
        assert_eq!(
            attrs.get("title").map(String::as_str),
            Some("Did you know ...")
        );
    }

    #[test]
    fn test_unquoted_value() {
        let attrs = parse_attributes("heading=h3");
        assert_eq!(attrs.get("heading").map(String::as_str), Some("h3"));
    }

    #[test]
    fn test_multiple_attributes() {
        let attrs = parse_attributes(
            r#"name="title-with-icon" img="images/icons/news.png" title="Latest News" heading="h3""#,
        );
        assert_eq!(attrs.len(), 4);
        assert_eq!(
            attrs.get("img").map(String::as_str),
            Some("images/icons/news.png")
        );
        assert_eq!(attrs.get("heading").map(String::as_str), Some("h3"));
    }

    #[test]
    fn test_spaces_around_equals() {
        let attrs = parse_attributes(r#"title = "Spaced""#);
        assert_eq!(attrs.get("title").map(String::as_str), Some("Spaced"));
    }

    #[test]
    fn test_empty_quoted_value() {
        let attrs = parse_attributes(r#"style="""#);
        assert_eq!(attrs.get("style").map(String::as_str), Some(""));
    }

    #[test]
    fn test_quote_inside_other_quotes() {
        let attrs = parse_attributes(r#"title="It's here" alt='say "hi"'"#);
        assert_eq!(attrs.get("title").map(String::as_str), Some("It's here"));
        assert_eq!(attrs.get("alt").map(String::as_str), Some(r#"say "hi""#));
    }

    #[test]
    fn test_later_duplicate_wins() {
        let attrs = parse_attributes("a=1 a=2");
        assert_eq!(attrs.get("a").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_garbage_is_skipped() {
        let attrs = parse_attributes("@@ é title=x");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("title").map(String::as_str), Some("x"));
    }

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("title"));
        assert!(is_valid_key("page-header"));
        assert!(is_valid_key("max_items"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("a@b"));
    }
}
