//! Remote endpoint descriptors.

/// A GraphQL endpoint to introspect.
///
/// `insecure` only has an effect on `https://` URLs, where it disables
/// certificate verification for requests made to this endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub insecure: bool,
}

impl Endpoint {
    #[must_use]
    pub fn new(url: impl Into<String>, insecure: bool) -> Self {
        Self {
            url: url.into(),
            insecure,
        }
    }

    /// Whether the URL uses the `https` scheme.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        has_scheme(&self.url, "https://")
    }

    /// Whether requests to this endpoint should skip certificate verification.
    #[must_use]
    pub fn accepts_invalid_certs(&self) -> bool {
        self.insecure && self.is_secure()
    }
}

/// Returns `true` when `source` starts with `http://` or `https://` (case-insensitive).
///
/// ```
/// # use graphql_introspect::is_http_url;
/// assert!(is_http_url("HTTPS://api.example.com/graphql"));
/// assert!(!is_http_url("schema/remote.graphql"));
/// ```
#[must_use]
pub fn is_http_url(source: &str) -> bool {
    has_scheme(source, "http://") || has_scheme(source, "https://")
}

fn has_scheme(url: &str, scheme: &str) -> bool {
    url.get(..scheme.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
}
