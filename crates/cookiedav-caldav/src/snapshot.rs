//! Operator-facing diagnostic snapshot.

use serde::Serialize;

/// Cookie names in effect for a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CookieNameSnapshot {
    /// Configured token cookie, or the dynamic label.
    pub token: String,
    pub username: String,
    pub session_id: String,
}

/// What the deriver sees for the current request.
///
/// Meant for debug pages and logs, not for programmatic use. The token value
/// is never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSnapshot {
    pub enabled: bool,
    pub domain: String,
    pub caldav_url: String,
    pub username: Option<String>,
    pub session_id: Option<String>,
    pub has_credentials: bool,
    pub auth_scheme: &'static str,
    pub cookie_names: CookieNameSnapshot,
}

impl ConfigSnapshot {
    /// Renders the snapshot as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
