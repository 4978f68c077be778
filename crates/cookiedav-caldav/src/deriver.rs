//! The credential deriver.
//!
//! [`CredentialDeriver`] borrows the immutable configuration and the current
//! request, and answers every question from those two values alone. It holds
//! no state of its own, so calling any method twice gives the same answer.

use cookiedav_core::config::HOST_PLACEHOLDER;
use cookiedav_core::{AuthScheme, DeriverConfig, RequestContext, TokenCookie};
use secrecy::ExposeSecret;
use tracing::{debug, trace};
use url::Url;

use crate::auth::{CalDavAuth, CalDavRequest};
use crate::credentials::{Credentials, token_prefix};
use crate::discovery::{DYNAMIC_TOKEN_LABEL, discover_token_cookie};
use crate::error::EndpointError;
use crate::snapshot::{ConfigSnapshot, CookieNameSnapshot};

/// Derives CalDAV credentials and the calendar URL for one request.
#[derive(Debug, Clone, Copy)]
pub struct CredentialDeriver<'a> {
    config: &'a DeriverConfig,
    request: &'a RequestContext,
}

impl<'a> CredentialDeriver<'a> {
    /// Creates a deriver for `request` under `config`.
    pub fn new(config: &'a DeriverConfig, request: &'a RequestContext) -> Self {
        Self { config, request }
    }

    /// Returns the configured feature flag.
    ///
    /// Logs which credential cookies are present at debug level.
    pub fn is_enabled(&self) -> bool {
        let present = |found: bool| if found { "present" } else { "missing" };
        debug!(
            enabled = self.config.enabled,
            token = present(self.resolve_token().is_some()),
            username = present(self.resolve_username().is_some()),
            session_id = present(self.resolve_session_id().is_some()),
            "credential cookie status"
        );
        self.config.enabled
    }

    /// Returns the token cookie value.
    ///
    /// Uses the configured cookie name, or discovers the `oc…` cookie when no
    /// names are configured.
    pub fn resolve_token(&self) -> Option<&'a str> {
        let value = match self.config.token_cookie() {
            TokenCookie::Fixed(name) => self.request.cookies.get(name),
            TokenCookie::Discover => {
                discover_token_cookie(&self.request.cookies).map(|(_, value)| value)
            }
        };
        let value = value.filter(|v| !v.is_empty());
        if let Some(token) = value {
            trace!(prefix = %token_prefix(token), "resolved token");
        }
        value
    }

    /// Returns the username cookie value.
    pub fn resolve_username(&self) -> Option<&'a str> {
        let value = self.cookie(self.config.username_cookie());
        match value {
            Some(username) => debug!(username, "username retrieved from cookies"),
            None => debug!(
                cookie = self.config.username_cookie(),
                "username not found in cookies"
            ),
        }
        value
    }

    /// Returns the session id cookie value.
    pub fn resolve_session_id(&self) -> Option<&'a str> {
        self.cookie(self.config.session_id_cookie())
    }

    /// Bundles the three resolved values.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.resolve_username(),
            self.resolve_token(),
            self.resolve_session_id(),
        )
    }

    /// True iff token, username and session id are all present and non-empty.
    pub fn has_valid_credentials(&self) -> bool {
        self.credentials().is_valid()
    }

    /// Returns `host[:port]` of the request. Ports 80 and 443 are omitted.
    pub fn current_domain(&self) -> String {
        match self.request.port {
            Some(port) if port != 80 && port != 443 => {
                format!("{}:{}", self.request.host, port)
            }
            _ => self.request.host.clone(),
        }
    }

    /// Returns the host the calendar URL points at.
    ///
    /// The configured override wins, with `%HOST%` replaced by
    /// [`current_domain`](Self::current_domain).
    pub fn calendar_domain(&self) -> String {
        match self.config.domain {
            Some(ref domain) => domain.replace(HOST_PLACEHOLDER, &self.current_domain()),
            None => self.current_domain(),
        }
    }

    /// Best-effort check whether the client reached us over TLS.
    ///
    /// True if the TLS indicator is set and not `"off"`, the server port is
    /// 443, or `X-Forwarded-Proto` is exactly `"https"`.
    ///
    /// The forwarded header is trusted unconditionally. A client can send it
    /// itself, so this is only sound behind a reverse proxy that strips or
    /// overwrites inbound `X-Forwarded-Proto` headers.
    pub fn is_secure(&self) -> bool {
        let tls = self
            .request
            .https
            .as_deref()
            .is_some_and(|v| !v.is_empty() && v != "off");
        tls || self.request.port == Some(443)
            || self.request.forwarded_proto.as_deref() == Some("https")
    }

    /// `"https"` or `"http"`, per [`is_secure`](Self::is_secure).
    pub fn scheme(&self) -> &'static str {
        if self.is_secure() { "https" } else { "http" }
    }

    /// Builds `scheme://domain + caldav_path [+ username]`.
    ///
    /// The username is percent-encoded and only appended when
    /// `append_username` is set and a username cookie is present.
    pub fn build_calendar_url(&self) -> String {
        let suffix = if self.config.append_username {
            self.resolve_username()
                .map(|u| urlencoding::encode(u).into_owned())
                .unwrap_or_default()
        } else {
            String::new()
        };

        let url = format!(
            "{}://{}{}{}",
            self.scheme(),
            self.calendar_domain(),
            self.config.caldav_path,
            suffix
        );
        debug!(%url, "calendar URL generated");
        url
    }

    /// The calendar URL as a parsed [`Url`].
    ///
    /// # Errors
    ///
    /// Fails when no host is known or the assembled URL does not parse.
    pub fn calendar_endpoint(&self) -> Result<Url, EndpointError> {
        if self.calendar_domain().is_empty() {
            return Err(EndpointError::EmptyHost);
        }
        let url = self.build_calendar_url();
        Url::parse(&url).map_err(|source| EndpointError::InvalidUrl { url, source })
    }

    /// Authentication for the calendar server, per the configured scheme.
    ///
    /// `None` unless all three credential cookies are present.
    pub fn build_auth_credentials(&self) -> Option<CalDavAuth> {
        let credentials = self.credentials();
        if !credentials.is_valid() {
            return None;
        }
        let token = credentials.token()?.expose_secret();
        let auth = match self.config.auth_scheme {
            AuthScheme::Basic => CalDavAuth::basic(credentials.username()?, token),
            AuthScheme::Bearer => CalDavAuth::bearer(token),
        };
        Some(auth)
    }

    /// URL, authentication and content type for the CalDAV client.
    ///
    /// `None` when the feature is disabled or the credentials are incomplete.
    pub fn caldav_request(&self) -> Option<CalDavRequest> {
        if !self.config.enabled {
            return None;
        }
        let auth = self.build_auth_credentials()?;
        Some(CalDavRequest::new(self.build_calendar_url(), auth))
    }

    /// Diagnostic view of everything above, for operators.
    pub fn describe_config(&self) -> ConfigSnapshot {
        let token = match self.config.token_cookie() {
            TokenCookie::Fixed(name) => name.to_string(),
            TokenCookie::Discover => DYNAMIC_TOKEN_LABEL.to_string(),
        };

        ConfigSnapshot {
            enabled: self.is_enabled(),
            domain: self.calendar_domain(),
            caldav_url: self.build_calendar_url(),
            username: self.resolve_username().map(str::to_string),
            session_id: self.resolve_session_id().map(str::to_string),
            has_credentials: self.has_valid_credentials(),
            auth_scheme: self.config.auth_scheme.as_str(),
            cookie_names: CookieNameSnapshot {
                token,
                username: self.config.username_cookie().to_string(),
                session_id: self.config.session_id_cookie().to_string(),
            },
        }
    }

    fn cookie(&self, name: &str) -> Option<&'a str> {
        self.request.cookies.get(name).filter(|v| !v.is_empty())
    }
}
