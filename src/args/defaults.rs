pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!("cacheload/", env!("CARGO_PKG_VERSION"));

/// Sample API paths used when no endpoints are given.
pub(crate) const DEFAULT_ENDPOINTS: [&str; 3] = ["/api/users", "/api/posts", "/api/comments"];
