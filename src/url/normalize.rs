use crate::UrlError;
use url::Url;

/// Resolves a raw `href`/`src` value against the page URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Resolve against `base` using RFC 3986 relative-reference rules
///    (scheme, authority, path and query are inherited or replaced as usual)
/// 3. Remove the fragment, so links differing only by `#anchor` collapse
///
/// The result is always absolute. It is not guaranteed to be an http(s) URL;
/// scheme filtering happens during classification.
///
/// # Arguments
///
/// * `raw` - The attribute value as written in the document
/// * `base` - The URL of the page the value was found on
///
/// # Returns
///
/// * `Ok(Url)` - The absolute URL
/// * `Err(UrlError)` - The value cannot be resolved to a valid URL
///
/// # Examples
///
/// ```
/// use sumi_probe::url::normalize;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/blog/post").unwrap();
/// let url = normalize("../about#team", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn normalize(raw: &str, base: &Url) -> Result<Url, UrlError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(UrlError::Malformed("empty URL".to_string()));
    }

    let mut url = base.join(raw).map_err(|e| UrlError::Parse(e.to_string()))?;
    url.set_fragment(None);
    Ok(url)
}

/// Validates the URL submitted for scraping
///
/// The target must be an absolute web URI: http or https with a host.
/// Anything else is rejected before any network work starts.
///
/// # Examples
///
/// ```
/// use sumi_probe::url::validate_target_url;
///
/// assert!(validate_target_url("https://example.com").is_ok());
/// assert!(validate_target_url("/relative/path").is_err());
/// assert!(validate_target_url("ftp://example.com/file").is_err());
/// ```
pub fn validate_target_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingDomain),
    }
}
