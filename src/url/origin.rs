use std::fmt;
use url::Url;

/// The site boundary of an address: its scheme and host
///
/// Two addresses are same-origin iff their origins compare equal. The port is
/// not part of the origin: `http://host:8080/` and `http://host:9090/` are the
/// same site, so a crawl follows links between services on one host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: String,
    host: String,
}

impl Origin {
    /// Returns the scheme, lowercase (e.g. `https`)
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the host, lowercase
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns true if `address` belongs to this origin
    ///
    /// Malformed addresses never belong to any origin.
    pub fn admits(&self, address: &str) -> bool {
        base_of(address).as_ref() == Some(self)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

/// Derives the origin (`scheme://host`) of an address
///
/// # Returns
///
/// * `Some(Origin)` - The address parsed and has a host
/// * `None` - The address is malformed or host-less (e.g. `mailto:`)
///
/// # Examples
///
/// ```
/// use scoped_crawl::url::base_of;
///
/// let origin = base_of("https://Example.COM:8443/a/b?q=1").unwrap();
/// assert_eq!(origin.to_string(), "https://example.com");
///
/// assert!(base_of("not a url").is_none());
/// ```
pub fn base_of(address: &str) -> Option<Origin> {
    let url = Url::parse(address).ok()?;
    let host = url.host_str().filter(|h| !h.is_empty())?;

    Some(Origin {
        scheme: url.scheme().to_string(),
        host: host.to_lowercase(),
    })
}

/// Returns true iff both addresses have a defined and identical origin
pub fn same_origin(address: &str, base_address: &str) -> bool {
    match (base_of(address), base_of(base_address)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_of_strips_path_query_and_fragment() {
        let origin = base_of("https://example.com/about?x=1#top").unwrap();
        assert_eq!(origin.to_string(), "https://example.com");
        assert_eq!(origin.scheme(), "https");
        assert_eq!(origin.host(), "example.com");
    }

    #[test]
    fn test_base_of_lowercases_host() {
        let origin = base_of("HTTP://WWW.Example.com/").unwrap();
        assert_eq!(origin.to_string(), "http://www.example.com");
    }

    #[test]
    fn test_base_of_ignores_port() {
        assert_eq!(
            base_of("http://127.0.0.1:8080/a"),
            base_of("http://127.0.0.1:9090/b")
        );
    }

    #[test]
    fn test_base_of_malformed() {
        assert!(base_of("").is_none());
        assert!(base_of("/relative/path").is_none());
        assert!(base_of("mailto:someone@example.com").is_none());
    }

    #[test]
    fn test_same_origin() {
        assert!(same_origin(
            "https://example.com/about",
            "https://example.com/"
        ));
        assert!(same_origin("https://example.com/about", "https://example.com"));
    }

    #[test]
    fn test_different_scheme_is_cross_origin() {
        assert!(!same_origin("http://example.com/", "https://example.com/"));
    }

    #[test]
    fn test_subdomain_is_cross_origin() {
        assert!(!same_origin(
            "https://docs.example.com/",
            "https://example.com/"
        ));
    }

    #[test]
    fn test_malformed_is_never_same_origin() {
        assert!(!same_origin("garbage", "garbage"));
        assert!(!same_origin("https://example.com/", "garbage"));
    }

    #[test]
    fn test_admits() {
        let origin = base_of("https://example.com/").unwrap();
        assert!(origin.admits("https://example.com/deep/page"));
        assert!(!origin.admits("https://external.org/x"));
        assert!(!origin.admits("javascript:void(0)"));
    }
}
