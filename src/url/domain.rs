use url::{Host, Url};

/// Resolves a host name to its registrable domain
///
/// The registrable domain is the public-suffix-aware apex of a host:
/// `shop.example.co.uk` becomes `example.co.uk`, not `co.uk`. Link
/// classification depends on this being correct, so the lookup sits behind a
/// trait and can be replaced in tests.
pub trait RegistrableDomain: Send + Sync {
    /// Returns the registrable domain of a lowercase host name, if it has one
    fn registrable_domain(&self, host: &str) -> Option<String>;
}

/// Registrable-domain lookup backed by the compiled-in Public Suffix List
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicSuffixList;

impl RegistrableDomain for PublicSuffixList {
    fn registrable_domain(&self, host: &str) -> Option<String> {
        psl::domain_str(host).map(str::to_string)
    }
}

/// Extracts the domain from a URL
///
/// This function retrieves the host portion of a URL and converts it to lowercase.
/// If the URL has no host (`mailto:`, `javascript:`, `data:`), it returns None.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use sumi_probe::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("mailto:someone@example.com").unwrap();
/// assert_eq!(extract_domain(&url), None);
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str()
        .filter(|h| !h.is_empty())
        .map(|h| h.to_lowercase())
}

/// Returns the site identity used to compare a URL against the page
///
/// Domain hosts are reduced to their registrable domain. IP addresses and
/// hosts without a public suffix (`localhost`, intranet names) have no
/// registrable domain, so the bare host stands in for it.
pub fn site_domain(url: &Url, resolver: &dyn RegistrableDomain) -> Option<String> {
    match url.host()? {
        Host::Domain(host) => {
            let host = host.trim_end_matches('.').to_lowercase();
            if host.is_empty() {
                return None;
            }
            resolver.registrable_domain(&host).or(Some(host))
        }
        Host::Ipv4(addr) => Some(addr.to_string()),
        Host::Ipv6(addr) => Some(addr.to_string()),
    }
}
