use url::Url;

/// Resolves a raw href against the address of the page it was found on
///
/// # Resolution Rules
///
/// 1. A missing or blank href is rejected
/// 2. An href that already starts with `http://` or `https://` is returned
///    unchanged (no canonicalization of absolute links)
/// 3. Anything else is joined onto `base_address` with standard URL
///    reference resolution (`/path`, `../path`, `?query`, `#fragment`,
///    `//host/path`)
///
/// The result is not guaranteed to be http(s): `mailto:` and friends resolve
/// to themselves and are dropped later by the origin filter.
///
/// # Arguments
///
/// * `href` - The raw href value, `None` when the anchor had no href
/// * `base_address` - Absolute address of the page containing the link
///
/// # Returns
///
/// * `Some(String)` - The absolute address
/// * `None` - The href is empty or cannot be resolved
///
/// # Examples
///
/// ```
/// use scoped_crawl::url::normalize;
///
/// let base = "https://example.com/docs/intro";
/// assert_eq!(
///     normalize(Some("/about"), base).as_deref(),
///     Some("https://example.com/about")
/// );
/// assert_eq!(
///     normalize(Some("../up"), base).as_deref(),
///     Some("https://example.com/up")
/// );
/// assert_eq!(normalize(None, base), None);
/// ```
pub fn normalize(href: Option<&str>, base_address: &str) -> Option<String> {
    let href = href.map(str::trim).filter(|h| !h.is_empty())?;

    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }

    let base = Url::parse(base_address).ok()?;
    base.join(href).ok().map(String::from)
}
