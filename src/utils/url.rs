//! URL resolution and status classification helpers.
//!
//! All functions here are pure and total.

/// Strip at most one trailing slash.
pub fn remove_trailing_end_slash(url: &str) -> &str {
    url.strip_suffix('/').unwrap_or(url)
}

/// Whether `url` starts with the HTTP scheme marker.
pub fn is_absolute_url(url: &str) -> bool {
    url.starts_with("http")
}

/// Join a base URL and a request URL with exactly one separating slash.
///
/// An absolute `url` wins: it is returned without its trailing slash and
/// `base_url` is ignored. No percent-encoding, query parsing or collapsing of
/// repeated slashes is performed.
///
/// ```rust,ignore
/// assert_eq!(format_url("https://hello.com/", "/abs"), "https://hello.com/abs");
/// assert_eq!(format_url("/test", "https://hello.com/"), "https://hello.com");
/// ```
pub fn format_url(base_url: &str, url: &str) -> String {
    if is_absolute_url(url) {
        return remove_trailing_end_slash(url).to_string();
    }

    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let path = url.strip_prefix('/').unwrap_or(url);
    format!("{base}/{path}")
}

/// 200..=299 is success.
pub fn is_success_http_code(code: u16) -> bool {
    199 < code && code < 300
}
