//! Document extraction
//!
//! Turns a parsed page into the structured data the report is built from:
//! - the meta description
//! - heading text grouped by level
//! - deduplicated internal and external links
//! - images with their alt text
//!
//! No network I/O happens here.

mod document;

pub use document::ParsedDocument;

use crate::url::{
    classify, is_candidate_link, normalize, site_domain, LinkCategory, PublicSuffixList,
    RegistrableDomain,
};
use scraper::Selector;
use serde::Serialize;
use indexmap::IndexSet;
use std::collections::BTreeMap;
use url::Url;

/// Alt text recorded for images without an `alt` attribute
pub const NO_ALT_TAG: &str = "No Alt Tag";

/// Heading levels `h1` through `h6`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    /// Maps an element name to its heading level
    pub fn from_tag(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            "h5" => Some(Self::H5),
            "h6" => Some(Self::H6),
            _ => None,
        }
    }
}

/// An image found on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageEntry {
    /// Absolute image URL
    pub src: String,

    /// Alt text, or [`NO_ALT_TAG`] when the attribute is missing
    pub alt: String,
}

/// Everything extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub meta_description: Option<String>,

    /// Non-empty heading text per level, in document order
    #[serde(rename = "tagData")]
    pub headings: BTreeMap<HeadingLevel, Vec<String>>,

    /// Same-site links, deduplicated, in order of first appearance
    pub internal_links: Vec<String>,

    /// Cross-site http(s) links, deduplicated, in order of first appearance
    pub external_links: Vec<String>,

    /// Images, deduplicated by source URL
    pub images: Vec<ImageEntry>,

    /// Alt text of the images that have one, aligned with `images` order
    pub image_alt_tags: Vec<String>,
}

impl ExtractionResult {
    /// All discovered web URLs (internal, external, then images), deduplicated
    ///
    /// This is the input set for liveness checking. Image sources that are
    /// not http(s), such as inline `data:` images, carry their content with
    /// them and are left out.
    pub fn candidate_urls(&self) -> Vec<String> {
        let images = self
            .images
            .iter()
            .map(|image| &image.src)
            .filter(|src| is_web_url(src));

        self.internal_links
            .iter()
            .chain(self.external_links.iter())
            .chain(images)
            .cloned()
            .collect::<IndexSet<String>>()
            .into_iter()
            .collect()
    }
}

fn is_web_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Extracts metadata, headings, links and images from a parsed page
///
/// Links are classified against the registrable domain of `base_url` using
/// the Public Suffix List.
///
/// # Example
///
/// ```
/// use sumi_probe::extract::{extract, ParsedDocument};
/// use url::Url;
///
/// let doc = ParsedDocument::parse(r#"<a href="/about">About</a><h1>Welcome</h1>"#);
/// let base = Url::parse("https://example.com/").unwrap();
/// let result = extract(&doc, &base);
/// assert_eq!(result.internal_links, vec!["https://example.com/about"]);
/// ```
pub fn extract(doc: &ParsedDocument, base_url: &Url) -> ExtractionResult {
    extract_with(doc, base_url, &PublicSuffixList)
}

/// Same as [`extract`], with an explicit registrable-domain resolver
pub fn extract_with(
    doc: &ParsedDocument,
    base_url: &Url,
    resolver: &dyn RegistrableDomain,
) -> ExtractionResult {
    if doc.recovered_errors() > 0 {
        tracing::debug!(
            "Recovered from {} markup errors in {}",
            doc.recovered_errors(),
            base_url
        );
    }

    let (internal_links, external_links) = extract_links(doc, base_url, resolver);
    let (images, image_alt_tags) = extract_images(doc, base_url);

    ExtractionResult {
        meta_description: extract_meta_description(doc),
        headings: extract_headings(doc),
        internal_links,
        external_links,
        images,
        image_alt_tags,
    }
}

/// Reads the content of the first `<meta name="description">` tag
fn extract_meta_description(doc: &ParsedDocument) -> Option<String> {
    let selector = Selector::parse("meta[name]").ok()?;

    doc.select(&selector)
        .find(|element| {
            element
                .value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}

/// Groups trimmed heading text by level
///
/// A level gets an entry as soon as one of its headings appears, even if all
/// of them turn out to be empty.
fn extract_headings(doc: &ParsedDocument) -> BTreeMap<HeadingLevel, Vec<String>> {
    let mut headings: BTreeMap<HeadingLevel, Vec<String>> = BTreeMap::new();

    let Ok(selector) = Selector::parse("h1, h2, h3, h4, h5, h6") else {
        return headings;
    };

    for element in doc.select(&selector) {
        let Some(level) = HeadingLevel::from_tag(element.value().name()) else {
            continue;
        };

        let text = element.text().collect::<String>();
        let text = text.trim();

        let group = headings.entry(level).or_default();
        if !text.is_empty() {
            group.push(text.to_string());
        }
    }

    headings
}

/// Collects and classifies anchor links
fn extract_links(
    doc: &ParsedDocument,
    base_url: &Url,
    resolver: &dyn RegistrableDomain,
) -> (Vec<String>, Vec<String>) {
    let mut internal: IndexSet<String> = IndexSet::new();
    let mut external: IndexSet<String> = IndexSet::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return (Vec::new(), Vec::new());
    };

    let base_domain = site_domain(base_url, resolver).unwrap_or_default();

    for element in doc.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if !is_candidate_link(href) {
            continue;
        }

        let absolute = match normalize(href, base_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping malformed href '{}': {}", href, e);
                continue;
            }
        };

        match classify(&absolute, &base_domain, resolver) {
            Some(LinkCategory::Internal) => {
                internal.insert(absolute.into());
            }
            Some(LinkCategory::External) => {
                external.insert(absolute.into());
            }
            None => {}
        }
    }

    (internal.into_iter().collect(), external.into_iter().collect())
}

/// Collects image sources and their alt text
fn extract_images(doc: &ParsedDocument, base_url: &Url) -> (Vec<ImageEntry>, Vec<String>) {
    let mut images = Vec::new();
    let mut alt_tags = Vec::new();
    let mut seen: IndexSet<String> = IndexSet::new();

    let Ok(selector) = Selector::parse("img") else {
        return (images, alt_tags);
    };

    for element in doc.select(&selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };

        let absolute = match normalize(src, base_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping malformed image src '{}': {}", src, e);
                continue;
            }
        };

        let src = String::from(absolute);
        if !seen.insert(src.clone()) {
            continue;
        }

        let alt = element.value().attr("alt");
        if let Some(alt) = alt {
            alt_tags.push(alt.to_string());
        }

        images.push(ImageEntry {
            src,
            alt: alt.unwrap_or(NO_ALT_TAG).to_string(),
        });
    }

    (images, alt_tags)
}
