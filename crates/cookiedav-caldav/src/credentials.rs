//! Credentials derived from the request cookies.
//!
//! A [`Credentials`] value lives for one request. The token is wrapped in a
//! [`SecretString`] so it never shows up in `Debug` output.

use secrecy::{ExposeSecret, SecretString};

/// Number of token characters that may appear in debug logs.
const TOKEN_PREFIX_LEN: usize = 4;

/// Username, token and session id resolved from cookies.
#[derive(Debug, Default)]
pub struct Credentials {
    username: Option<String>,
    token: Option<SecretString>,
    session_id: Option<String>,
}

impl Credentials {
    /// Bundles resolved values. Empty strings are treated as absent.
    pub fn new(username: Option<&str>, token: Option<&str>, session_id: Option<&str>) -> Self {
        Self {
            username: non_empty(username).map(str::to_string),
            token: non_empty(token).map(|t| SecretString::from(t.to_string())),
            session_id: non_empty(session_id).map(str::to_string),
        }
    }

    /// The username, if present.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The token, if present.
    pub fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// The session id, if present.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// True only when username, token and session id are all present.
    ///
    /// A partial bundle is never used for authentication.
    pub fn is_valid(&self) -> bool {
        self.username.is_some() && self.token.is_some() && self.session_id.is_some()
    }

    /// A short prefix of the token, safe for debug logs.
    pub fn token_prefix(&self) -> Option<String> {
        self.token.as_ref().map(|t| token_prefix(t.expose_secret()))
    }
}

/// Returns the first few characters of `token` followed by an ellipsis.
pub(crate) fn token_prefix(token: &str) -> String {
    let prefix: String = token.chars().take(TOKEN_PREFIX_LEN).collect();
    format!("{prefix}…")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
