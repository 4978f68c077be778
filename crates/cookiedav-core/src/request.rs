//! Per-request input: cookies and connection metadata.
//!
//! The host builds a [`RequestContext`] for every inbound request and passes it
//! explicitly to the deriver. Nothing here reads ambient or global state.

use std::collections::BTreeMap;

use cookie::Cookie;
use tracing::trace;

/// The cookies sent with a request.
///
/// Names are unique. Iteration is in lexicographic name order, whatever order
/// the cookies arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    /// Creates an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the value of a `Cookie:` request header.
    ///
    /// Values are percent-decoded. Pairs that fail to parse or decode are
    /// skipped. When a name repeats, the first occurrence wins.
    pub fn parse_header(header: &str) -> Self {
        let mut jar = Self::new();
        for parsed in Cookie::split_parse_encoded(header) {
            match parsed {
                Ok(cookie) => {
                    jar.cookies
                        .entry(cookie.name().to_string())
                        .or_insert_with(|| cookie.value().to_string());
                }
                Err(e) => trace!(error = %e, "skipping malformed cookie pair"),
            }
        }
        jar
    }

    /// Adds a cookie, replacing any previous value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Returns the value of the named cookie.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Returns true if a cookie with this name is present.
    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Iterates over `(name, value)` pairs in lexicographic name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of cookies.
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Returns true if the jar holds no cookies.
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CookieJar
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut jar = Self::new();
        for (name, value) in iter {
            jar.insert(name, value);
        }
        jar
    }
}

/// Connection metadata and cookies of the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Value of the `Host` header, without port.
    pub host: String,
    /// Port the server accepted the request on.
    pub port: Option<u16>,
    /// TLS indicator as reported by the server (e.g. `"on"`, `"off"`).
    pub https: Option<String>,
    /// Value of the `X-Forwarded-Proto` header.
    pub forwarded_proto: Option<String>,
    /// Request cookies.
    pub cookies: CookieJar,
}

impl RequestContext {
    /// Creates a context for the given host with no cookies.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    /// Sets the server port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the TLS indicator.
    #[must_use]
    pub fn with_https(mut self, value: impl Into<String>) -> Self {
        self.https = Some(value.into());
        self
    }

    /// Sets the `X-Forwarded-Proto` value.
    #[must_use]
    pub fn with_forwarded_proto(mut self, proto: impl Into<String>) -> Self {
        self.forwarded_proto = Some(proto.into());
        self
    }

    /// Adds a single cookie.
    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name, value);
        self
    }

    /// Replaces the cookie jar.
    #[must_use]
    pub fn with_cookies(mut self, cookies: CookieJar) -> Self {
        self.cookies = cookies;
        self
    }

    /// Replaces the cookie jar with the parsed `Cookie:` header.
    #[must_use]
    pub fn with_cookie_header(self, header: &str) -> Self {
        self.with_cookies(CookieJar::parse_header(header))
    }
}
