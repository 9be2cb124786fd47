// src/extract/urls.rs
// =============================================================================
// Small, pure helpers for working with URL strings.
//
// URLs are treated as opaque identifiers: we never normalize trailing
// slashes, query strings, fragments, or host case. That means
// "http://x.com/a" and "http://x.com/a/" are two different pages as far as
// the crawler is concerned.
//
// None of these functions fail. A string that doesn't look like a URL just
// has an empty origin, and comparisons fall back to comparing those strings.
// =============================================================================

// Returns true if the URL starts with an HTTP or HTTPS scheme
//
// Examples:
//   "https://example.com/docs" -> true
//   "/docs"                    -> false
//   "mailto:someone@x.com"     -> false
pub fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// Returns the "scheme://host" part of a URL, or "" if there is none
//
// The host part runs until the first '/', '?' or '#' after the scheme
// separator, so a port or user info stays attached to it.
pub fn origin(url: &str) -> &str {
    let Some(sep) = url.find("://") else {
        return "";
    };

    let authority_start = sep + 3;
    let authority_len = url[authority_start..]
        .find(['/', '?', '#'])
        .unwrap_or(url.len() - authority_start);

    &url[..authority_start + authority_len]
}

// Resolves a (possibly relative) link against a base page URL
//
// Absolute links are returned unchanged. Anything else gets the scheme and
// host of the base glued in front of it:
//
//   resolve("/about", "https://x.com/a/b")    -> "https://x.com/about"
//   resolve("about", "https://x.com/a/b")     -> "https://x.com/about"
//   resolve("//cdn.x.com/p", "https://x.com") -> "https://cdn.x.com/p"
//
// If the base has no scheme+host we can't do anything useful and the link
// comes back as-is.
pub fn resolve(relative_url: &str, base_page_url: &str) -> String {
    if is_absolute(relative_url) {
        return relative_url.to_string();
    }

    let base_origin = origin(base_page_url);
    if base_origin.is_empty() {
        return relative_url.to_string();
    }

    if let Some(rest) = relative_url.strip_prefix("//") {
        let scheme = &base_origin[..base_origin.find("://").unwrap_or(0)];
        return format!("{}://{}", scheme, rest);
    }

    if relative_url.starts_with('/') {
        format!("{}{}", base_origin, relative_url)
    } else {
        format!("{}/{}", base_origin, relative_url)
    }
}

// Two URLs are on the same domain when their scheme+host parts are exactly
// equal (case-sensitive, "http" and "https" count as different)
pub fn same_domain(url_a: &str, url_b: &str) -> bool {
    origin(url_a) == origin(url_b)
}

// The root page of the site a URL belongs to: scheme + host + "/"
//
// Example: "https://x.com/blog/post?id=3" -> "https://x.com/"
pub fn domain_root(url: &str) -> String {
    let site_origin = origin(url);
    if site_origin.is_empty() {
        url.to_string()
    } else {
        format!("{}/", site_origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("http://example.com"));
        assert!(is_absolute("https://example.com/page"));
        assert!(!is_absolute("/docs"));
        assert!(!is_absolute("docs/page.html"));
        assert!(!is_absolute("ftp://example.com"));
    }

    #[test]
    fn test_resolve_keeps_absolute_links() {
        let link = "https://other.com/page?x=1";
        assert_eq!(resolve(link, "https://example.com/"), link);
        // Resolving twice changes nothing
        assert_eq!(resolve(&resolve(link, "https://example.com/"), "http://a.b"), link);
    }

    #[test]
    fn test_resolve_relative_link() {
        assert_eq!(
            resolve("/docs/intro", "https://example.com/blog/post"),
            "https://example.com/docs/intro"
        );
        assert_eq!(
            resolve("contact.html", "https://example.com/blog/post"),
            "https://example.com/contact.html"
        );
    }

    #[test]
    fn test_resolve_protocol_relative_link() {
        assert_eq!(
            resolve("//cdn.example.com/a.html", "https://example.com/"),
            "https://cdn.example.com/a.html"
        );
    }

    #[test]
    fn test_resolve_without_usable_base() {
        assert_eq!(resolve("/docs", "not a url"), "/docs");
    }

    #[test]
    fn test_same_domain() {
        assert!(same_domain("https://x.com/a", "https://x.com/b?q=1"));
        assert!(same_domain("https://x.com", "https://x.com/"));
        assert!(!same_domain("https://x.com/a", "https://y.com/a"));
        assert!(!same_domain("http://x.com/a", "https://x.com/a"));
        // No normalization of host case
        assert!(!same_domain("https://X.com/a", "https://x.com/a"));
        assert!(!same_domain("https://x.com:8080/", "https://x.com/"));
    }

    #[test]
    fn test_domain_root() {
        assert_eq!(domain_root("https://x.com/blog/post?id=3"), "https://x.com/");
        assert_eq!(domain_root("http://x.com"), "http://x.com/");
        assert_eq!(domain_root("http://x.com#top"), "http://x.com/");
        assert_eq!(domain_root("garbage"), "garbage");
    }
}
