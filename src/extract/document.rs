//! Parsed HTML document handle
//!
//! Wraps the HTML5 parser so the extractor only sees "select elements, read
//! attributes and text". Parsing never fails outright: malformed markup is
//! repaired the way browsers do it, and the repairs are counted.

use scraper::html::Select;
use scraper::{Html, Selector};

/// A fetched page parsed into a queryable DOM
///
/// The handle is scoped to one extraction. It is not `Send`, so callers parse,
/// extract, and drop it before awaiting anything.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Parses a full HTML document, recovering from malformed markup
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Lazily yields the elements matching `selector`, in document order
    pub fn select<'a, 'b>(&'a self, selector: &'b Selector) -> Select<'a, 'b> {
        self.html.select(selector)
    }

    /// Number of markup errors the parser recovered from
    pub fn recovered_errors(&self) -> usize {
        self.html.errors.len()
    }
}

impl std::fmt::Debug for ParsedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedDocument")
            .field("recovered_errors", &self.recovered_errors())
            .finish()
    }
}
