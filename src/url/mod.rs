//! URL handling module for Sumi-Probe
//!
//! This module provides URL normalization, registrable-domain lookup,
//! candidate-link filtering, and internal/external link classification.

mod candidate;
mod domain;
mod normalize;

use ::url::Url;
use serde::Serialize;

// Re-export main functions
pub use candidate::is_candidate_link;
pub use domain::{extract_domain, site_domain, PublicSuffixList, RegistrableDomain};
pub use normalize::{normalize, validate_target_url};

/// Category of a discovered anchor URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkCategory {
    /// Same registrable domain as the page
    Internal,
    /// A different site reachable over http(s)
    External,
}

/// Classifies an absolute anchor URL relative to the page's site
///
/// Rules, in order:
/// 1. URLs without a host are rejected
/// 2. Same registrable domain as `base_domain` => `Internal`
/// 3. Different domain with an http or https scheme => `External`
/// 4. Anything else is rejected
///
/// Image sources are never classified; the extractor collects them from
/// `<img>` elements directly.
///
/// # Examples
///
/// ```
/// use sumi_probe::url::{classify, LinkCategory, PublicSuffixList};
/// use url::Url;
///
/// let link = Url::parse("https://blog.example.com/post").unwrap();
/// let category = classify(&link, "example.com", &PublicSuffixList);
/// assert_eq!(category, Some(LinkCategory::Internal));
/// ```
pub fn classify(
    url: &Url,
    base_domain: &str,
    resolver: &dyn RegistrableDomain,
) -> Option<LinkCategory> {
    let domain = site_domain(url, resolver)?;

    if domain == base_domain {
        Some(LinkCategory::Internal)
    } else if url.scheme() == "http" || url.scheme() == "https" {
        Some(LinkCategory::External)
    } else {
        None
    }
}
