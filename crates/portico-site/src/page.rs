//! Page sources with YAML front matter.
//!
//! A page is an HTML body optionally preceded by a front matter block:
//!
//! ```text
//! ---
//! page: About
//! title: About JPPF
//! news: 3
//! ---
//! $template{name="about-page-header" title="About JPPF"}$
//! ...
//! ```

use std::num::NonZeroUsize;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::RenderError;

const DELIMITER: &str = "---";

/// Page settings declared in front matter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrontMatter {
    /// Current-page identifier driving navigation state.
    pub page: Option<String>,
    /// Page title, exposed to fragments as `title`.
    pub title: Option<String>,
    /// Latest news request.
    pub news: Option<NewsRequest>,
    /// Output path relative to the output directory.
    pub output: Option<String>,
}

/// How many latest news items a page lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum NewsRequest {
    /// `news: true` lists the configured default count, `news: false` none.
    Enabled(bool),
    /// `news: 3` lists at most that many.
    Count(NonZeroUsize),
}

impl NewsRequest {
    /// Resolve to a count, using `default` for `news: true`.
    #[must_use]
    pub fn count(self, default: NonZeroUsize) -> Option<NonZeroUsize> {
        match self {
            Self::Enabled(true) => Some(default),
            Self::Enabled(false) => None,
            Self::Count(n) => Some(n),
        }
    }
}

/// A page source ready to render.
#[derive(Clone, Debug)]
pub struct Page {
    /// Source file the page was read from.
    pub source_path: PathBuf,
    /// Front matter settings (default when absent).
    pub front_matter: FrontMatter,
    /// Body text after the front matter.
    pub body: String,
}

impl Page {
    /// Read and parse a page source file.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if the file cannot be read and
    /// [`RenderError::FrontMatter`] if its front matter is invalid.
    pub fn load(path: &Path) -> Result<Self, RenderError> {
        let content = std::fs::read_to_string(path).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse page source text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::FrontMatter`] if a front matter block is opened
    /// but not closed, is not valid YAML, or names an output path outside the
    /// output directory.
    pub fn parse(path: &Path, content: &str) -> Result<Self, RenderError> {
        let invalid = |message: String| RenderError::FrontMatter {
            path: path.to_path_buf(),
            message,
        };

        let (front_matter, body) = match split_front_matter(content) {
            Split::Absent => (FrontMatter::default(), content),
            Split::Unterminated => {
                return Err(invalid("missing closing `---`".to_owned()));
            }
            Split::Block { yaml, body } => {
                let front_matter = if yaml.trim().is_empty() {
                    FrontMatter::default()
                } else {
                    serde_yaml::from_str(yaml).map_err(|e| invalid(e.to_string()))?
                };
                (front_matter, body)
            }
        };

        if let Some(output) = &front_matter.output
            && !is_relative_inside(Path::new(output))
        {
            return Err(invalid(format!(
                "output '{output}' must be a relative path inside the output directory"
            )));
        }

        Ok(Self {
            source_path: path.to_path_buf(),
            front_matter,
            body: body.to_owned(),
        })
    }

    /// Output path relative to the output directory.
    ///
    /// Defaults to the source file name.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        match &self.front_matter.output {
            Some(output) => PathBuf::from(output),
            None => self
                .source_path
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_default(),
        }
    }
}

enum Split<'a> {
    Absent,
    Unterminated,
    Block { yaml: &'a str, body: &'a str },
}

/// Split a leading `---` delimited block from the body.
fn split_front_matter(content: &str) -> Split<'_> {
    let Some(rest) = content.strip_prefix(DELIMITER) else {
        return Split::Absent;
    };
    let Some(rest) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) else {
        return Split::Absent;
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            return Split::Block {
                yaml: &rest[..offset],
                body: &rest[offset + line.len()..],
            };
        }
        offset += line.len();
    }
    Split::Unterminated
}

fn is_relative_inside(path: &Path) -> bool {
    path.components().next().is_some()
        && path.components().all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(content: &str) -> Result<Page, RenderError> {
        Page::parse(Path::new("content/about.html"), content)
    }

    #[test]
    fn test_parse_front_matter() {
        let page = parse("---\npage: About\ntitle: About JPPF\nnews: 3\n---\n<p>body</p>\n").unwrap();

        assert_eq!(
            page.front_matter,
            FrontMatter {
                page: Some("About".to_owned()),
                title: Some("About JPPF".to_owned()),
                news: NonZeroUsize::new(3).map(NewsRequest::Count),
                output: None,
            }
        );
        assert_eq!(page.body, "<p>body</p>\n");
    }

    #[test]
    fn test_no_front_matter() {
        let page = parse("<p>plain</p>").unwrap();

        assert_eq!(page.front_matter, FrontMatter::default());
        assert_eq!(page.body, "<p>plain</p>");
    }

    #[test]
    fn test_empty_front_matter() {
        let page = parse("---\n---\nbody").unwrap();

        assert_eq!(page.front_matter, FrontMatter::default());
        assert_eq!(page.body, "body");
    }

    #[test]
    fn test_crlf_front_matter() {
        let page = parse("---\r\npage: Home\r\n---\r\nbody").unwrap();

        assert_eq!(page.front_matter.page.as_deref(), Some("Home"));
        assert_eq!(page.body, "body");
    }

    #[test]
    fn test_dashes_later_in_body_are_text() {
        let page = parse("<hr>\n---\n<p>x</p>").unwrap();
        assert_eq!(page.body, "<hr>\n---\n<p>x</p>");
    }

    #[test]
    fn test_unterminated_front_matter() {
        let err = parse("---\npage: About\n<p>body</p>").unwrap_err();
        assert!(err.to_string().contains("missing closing"));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse("---\npage: [About\n---\nbody").unwrap_err();
        assert!(matches!(err, RenderError::FrontMatter { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse("---\npgae: About\n---\nbody").unwrap_err();
        assert!(matches!(err, RenderError::FrontMatter { .. }));
    }

    #[test]
    fn test_news_request_forms() {
        let default = NonZeroUsize::new(5).unwrap();

        let enabled = parse("---\nnews: true\n---\n").unwrap();
        let disabled = parse("---\nnews: false\n---\n").unwrap();
        let counted = parse("---\nnews: 3\n---\n").unwrap();

        assert_eq!(enabled.front_matter.news.and_then(|n| n.count(default)), Some(default));
        assert_eq!(disabled.front_matter.news.and_then(|n| n.count(default)), None);
        assert_eq!(
            counted.front_matter.news.and_then(|n| n.count(default)),
            NonZeroUsize::new(3)
        );
    }

    #[test]
    fn test_news_zero_rejected() {
        assert!(parse("---\nnews: 0\n---\n").is_err());
    }

    #[test]
    fn test_output_path_default_and_override() {
        let page = parse("body").unwrap();
        assert_eq!(page.output_path(), PathBuf::from("about.html"));

        let page = parse("---\noutput: about/index.html\n---\n").unwrap();
        assert_eq!(page.output_path(), PathBuf::from("about/index.html"));
    }

    #[test]
    fn test_output_path_escaping_rejected() {
        assert!(parse("---\noutput: ../outside.html\n---\n").is_err());
        assert!(parse("---\noutput: /etc/passwd\n---\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Page::load(Path::new("/nonexistent/page.html")).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }));
    }
}
