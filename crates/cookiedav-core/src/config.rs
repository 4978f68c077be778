//! Deriver configuration.
//!
//! The configuration is supplied once by the host process and is read-only
//! afterwards. It can be built in code with the `with_*` methods or loaded from
//! a TOML document:
//!
//! ```toml
//! enabled = true
//! domain = "%HOST%"
//! caldav_path = "/remote.php/dav/calendars/"
//! append_username = true
//! auth_scheme = "basic"
//!
//! [cookie_names]
//! token = "nc_token"
//! username = "nc_username"
//! session_id = "nc_session_id"
//! ```
//!
//! The legacy webmail keys `oidc_enabled`, `nextcloud_domain` and
//! `nextcloud_cookies` are accepted as aliases.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Placeholder in the domain override that is replaced by the request's own domain.
pub const HOST_PLACEHOLDER: &str = "%HOST%";

/// Default path prefix of the calendar collection endpoint.
pub const DEFAULT_CALDAV_PATH: &str = "/remote.php/dav/calendars/";

/// Default name of the fixed token cookie.
pub const DEFAULT_TOKEN_COOKIE: &str = "nc_token";

/// Default name of the username cookie.
pub const DEFAULT_USERNAME_COOKIE: &str = "nc_username";

/// Default name of the session id cookie.
pub const DEFAULT_SESSION_ID_COOKIE: &str = "nc_session_id";

/// HTTP authentication scheme used against the calendar server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// `Authorization: Basic base64(username:token)`.
    #[default]
    Basic,
    /// `Authorization: Bearer token`.
    Bearer,
}

impl AuthScheme {
    /// Returns the lowercase name of the scheme.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Bearer => "bearer",
        }
    }
}

/// Exact cookie names to read credentials from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CookieNames {
    /// Cookie carrying the token.
    pub token: String,
    /// Cookie carrying the username.
    pub username: String,
    /// Cookie carrying the session id.
    pub session_id: String,
}

impl Default for CookieNames {
    fn default() -> Self {
        Self {
            token: DEFAULT_TOKEN_COOKIE.to_string(),
            username: DEFAULT_USERNAME_COOKIE.to_string(),
            session_id: DEFAULT_SESSION_ID_COOKIE.to_string(),
        }
    }
}

impl CookieNames {
    /// Creates a mapping with explicit names for all three cookies.
    pub fn new(
        token: impl Into<String>,
        username: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            session_id: session_id.into(),
        }
    }
}

/// How the token cookie is located in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenCookie<'a> {
    /// Read the cookie with exactly this name.
    Fixed(&'a str),
    /// Scan the cookie set for the per-installation `oc…` cookie.
    Discover,
}

/// Configuration of the credential deriver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeriverConfig {
    /// Feature toggle.
    #[serde(alias = "oidc_enabled")]
    pub enabled: bool,

    /// Calendar host override. `%HOST%` expands to the request's domain.
    #[serde(alias = "nextcloud_domain")]
    pub domain: Option<String>,

    /// Path prefix of the calendar collection endpoint.
    pub caldav_path: String,

    /// Exact cookie names. When absent the token cookie is discovered.
    #[serde(alias = "nextcloud_cookies")]
    pub cookie_names: Option<CookieNames>,

    /// Append the username to the calendar URL.
    pub append_username: bool,

    /// Authentication scheme active for this deployment.
    pub auth_scheme: AuthScheme,
}

impl Default for DeriverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            domain: None,
            caldav_path: DEFAULT_CALDAV_PATH.to_string(),
            cookie_names: None,
            append_username: true,
            auth_scheme: AuthScheme::Basic,
        }
    }
}

impl DeriverConfig {
    /// Parses and validates a configuration from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.caldav_path.starts_with('/') {
            return Err(ConfigError::InvalidCaldavPath(self.caldav_path.clone()));
        }
        if self.domain.as_deref().is_some_and(|d| d.trim().is_empty()) {
            return Err(ConfigError::EmptyDomain);
        }
        if let Some(ref names) = self.cookie_names {
            for (field, value) in [
                ("token", &names.token),
                ("username", &names.username),
                ("session_id", &names.session_id),
            ] {
                if value.trim().is_empty() {
                    return Err(ConfigError::EmptyCookieName(field));
                }
            }
        }
        Ok(())
    }

    /// Enables or disables the feature.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the domain override.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the CalDAV path prefix.
    #[must_use]
    pub fn with_caldav_path(mut self, path: impl Into<String>) -> Self {
        self.caldav_path = path.into();
        self
    }

    /// Uses exact cookie names instead of token discovery.
    #[must_use]
    pub fn with_cookie_names(mut self, names: CookieNames) -> Self {
        self.cookie_names = Some(names);
        self
    }

    /// Controls whether the username is appended to the calendar URL.
    #[must_use]
    pub fn with_append_username(mut self, append: bool) -> Self {
        self.append_username = append;
        self
    }

    /// Sets the authentication scheme.
    #[must_use]
    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    /// Returns how the token cookie is located.
    pub fn token_cookie(&self) -> TokenCookie<'_> {
        match self.cookie_names {
            Some(ref names) => TokenCookie::Fixed(&names.token),
            None => TokenCookie::Discover,
        }
    }

    /// Returns the name of the username cookie.
    pub fn username_cookie(&self) -> &str {
        self.cookie_names
            .as_ref()
            .map_or(DEFAULT_USERNAME_COOKIE, |names| names.username.as_str())
    }

    /// Returns the name of the session id cookie.
    pub fn session_id_cookie(&self) -> &str {
        self.cookie_names
            .as_ref()
            .map_or(DEFAULT_SESSION_ID_COOKIE, |names| names.session_id.as_str())
    }
}
