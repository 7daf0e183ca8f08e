//! SEO heuristics derived from the target URL
//!
//! Both checks are plain string inspections. They make no network calls.

use serde::Serialize;

/// Characters that disqualify a URL from being "short and clean"
const UNFRIENDLY_CHARS: &[char] = &['#', '!', '%'];

/// Longest scheme-less URL still considered short
const MAX_FRIENDLY_LEN: usize = 15;

/// Status string reported for URLs passing [`is_short_and_clean_url`]
pub const SEO_FRIENDLY: &str = "URL is SEO friendly";

/// Status string reported for URLs failing [`is_short_and_clean_url`]
pub const NOT_SEO_FRIENDLY: &str = "URL is not SEO friendly";

/// Transport security of the target URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SslStatus {
    #[serde(rename = "Secured")]
    Secured,
    #[serde(rename = "Not Secured")]
    NotSecured,
}

/// Crude "SEO-friendly URL" heuristic
///
/// After stripping the `scheme://` prefix, the URL must be at most 15
/// characters long and contain none of `#`, `!` or `%`. This is a rough
/// proxy, not a real ranking signal.
///
/// # Examples
///
/// ```
/// use sumi_probe::seo::is_short_and_clean_url;
///
/// assert!(is_short_and_clean_url("https://ab.co"));
/// assert!(!is_short_and_clean_url("https://example.com/very-long-path"));
/// ```
pub fn is_short_and_clean_url(url: &str) -> bool {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);

    !rest.contains(UNFRIENDLY_CHARS) && rest.chars().count() <= MAX_FRIENDLY_LEN
}

/// True iff the URL uses the `https` scheme (case-insensitive)
pub fn has_transport_security(url: &str) -> bool {
    url.trim_start()
        .split_once("://")
        .is_some_and(|(scheme, _)| scheme.eq_ignore_ascii_case("https"))
}

/// Human-readable SEO status for the report
pub fn seo_friendly_status(url: &str) -> &'static str {
    if is_short_and_clean_url(url) {
        SEO_FRIENDLY
    } else {
        NOT_SEO_FRIENDLY
    }
}

/// SSL status for the report
pub fn ssl_status(url: &str) -> SslStatus {
    if has_transport_security(url) {
        SslStatus::Secured
    } else {
        SslStatus::NotSecured
    }
}
