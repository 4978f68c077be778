//! HTTP authentication handed to the CalDAV client.
//!
//! The token cookie doubles as the password for Basic authentication
//! (RFC 7617) or is sent as a Bearer token (RFC 6750). A deployment uses one
//! scheme, selected by [`AuthScheme`](cookiedav_core::AuthScheme).

use base64::Engine;
use secrecy::{ExposeSecret, SecretString};

/// Content type sent with every calendar request.
pub const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=UTF-8";

/// Authentication material for the calendar server.
#[derive(Debug)]
pub enum CalDavAuth {
    /// Username with the token as password.
    Basic {
        username: String,
        password: SecretString,
    },
    /// Token sent as a bearer credential.
    Bearer { token: SecretString },
}

impl CalDavAuth {
    /// Basic credentials using `token` as the password.
    pub fn basic(username: impl Into<String>, token: &str) -> Self {
        Self::Basic {
            username: username.into(),
            password: SecretString::from(token.to_string()),
        }
    }

    /// Bearer credentials.
    pub fn bearer(token: &str) -> Self {
        Self::Bearer {
            token: SecretString::from(token.to_string()),
        }
    }

    /// The username, for Basic authentication.
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Basic { username, .. } => Some(username.as_str()),
            Self::Bearer { .. } => None,
        }
    }

    /// The token. For Basic authentication this is the password.
    pub fn token(&self) -> &SecretString {
        match self {
            Self::Basic { password, .. } => password,
            Self::Bearer { token } => token,
        }
    }

    /// Renders the `Authorization` header value.
    pub fn authorization_header(&self) -> String {
        match self {
            Self::Basic { username, password } => basic_auth(username, password.expose_secret()),
            Self::Bearer { token } => bearer_auth(token.expose_secret()),
        }
    }
}

/// Generates a Basic authentication header value.
pub fn basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
    format!("Basic {}", encoded)
}

/// Generates a Bearer authentication header value.
pub fn bearer_auth(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Everything the CalDAV client needs to issue an authenticated request.
#[derive(Debug)]
pub struct CalDavRequest {
    /// Calendar collection URL.
    pub url: String,
    /// Authentication material.
    pub auth: CalDavAuth,
    /// Value of the `Content-Type` header.
    pub content_type: &'static str,
}

impl CalDavRequest {
    /// Creates a request description with the calendar content type.
    pub fn new(url: impl Into<String>, auth: CalDavAuth) -> Self {
        Self {
            url: url.into(),
            auth,
            content_type: CALENDAR_CONTENT_TYPE,
        }
    }

    /// Header name/value pairs to attach to the request.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", self.auth.authorization_header()),
            ("Content-Type", self.content_type.to_string()),
        ]
    }
}
