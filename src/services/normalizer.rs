//! Page path normalization service
//!
//! Reduces a reported page path to the key pages are aggregated under,
//! so `/post/?utm_source=x`, `/post` and `/post/` count as one page.

/// Normalize a page path to its aggregation key.
///
/// Transformations, in order:
/// - Drop the query string: "/a?x=1" → "/a"
/// - Drop anything after the first space: "/a (not set)" → "/a"
/// - Strip trailing slashes: "/a/" → "/a", "/" → ""
///
/// Returns `None` when nothing is left; such rows are discarded.
/// Matching is exact: no case folding, no percent-decoding.
///
/// # Examples
/// ```
/// use pagestats::services::normalizer::normalize_path;
///
/// assert_eq!(normalize_path("/blog/post/?ref=home"), Some("/blog/post"));
/// assert_eq!(normalize_path("/"), None);
/// ```
pub fn normalize_path(path: &str) -> Option<&str> {
    let path = path.split('?').next().unwrap_or_default();
    let path = path.split(' ').next().unwrap_or_default();
    let path = path.trim_end_matches('/');

    if path.is_empty() {
        None
    } else {
        Some(path)
    }
}
