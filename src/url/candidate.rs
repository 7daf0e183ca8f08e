/// Path extensions that mark a link as a downloadable resource rather than a page
const NON_PAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".pdf", ".gif", ".svg"];

/// Schemes that never point at a crawlable page
const NON_WEB_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

/// Checks whether an anchor `href` is a followable link
///
/// Rejects:
/// - empty or whitespace-only values
/// - pure fragment links (`#section`)
/// - `javascript:`, `mailto:`, `tel:` and `data:` URIs
/// - links whose path ends in `.jpg`, `.jpeg`, `.png`, `.pdf`, `.gif` or
///   `.svg` (case-insensitive), ignoring any query or fragment
///
/// Image `src` values never go through this filter.
///
/// # Examples
///
/// ```
/// use sumi_probe::url::is_candidate_link;
///
/// assert!(is_candidate_link("/about"));
/// assert!(!is_candidate_link("#top"));
/// assert!(!is_candidate_link("brochure.PDF"));
/// ```
pub fn is_candidate_link(raw: &str) -> bool {
    let raw = raw.trim();

    if raw.is_empty() || raw.starts_with('#') {
        return false;
    }

    let lower = raw.to_ascii_lowercase();

    if NON_WEB_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return false;
    }

    let path = lower
        .split(|c: char| c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    !NON_PAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
