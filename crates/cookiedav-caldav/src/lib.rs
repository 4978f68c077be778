//! Credential deriver for CalDAV single sign-on through identity-provider cookies.
//!
//! A webmail host that sits next to a self-hosted collaboration suite can reuse
//! the suite's browser cookies to talk to its CalDAV server. This crate turns
//! the cookies of the current request into:
//!
//! - an "authenticated" signal ([`CredentialDeriver::has_valid_credentials`])
//! - the calendar URL ([`CredentialDeriver::build_calendar_url`])
//! - HTTP authentication for the CalDAV client ([`CalDavAuth`], [`CalDavRequest`])
//!
//! Nothing is fetched, cached or stored: every call is a pure function of the
//! configuration and the request.
//!
//! # Example
//!
//! ```
//! use cookiedav_caldav::CredentialDeriver;
//! use cookiedav_core::{DeriverConfig, RequestContext};
//!
//! let config = DeriverConfig::default();
//! let request = RequestContext::new("cloud.example.org")
//!     .with_port(443)
//!     .with_cookie_header("ocwe8qziyo2m=T1; nc_username=alice; nc_session_id=S1");
//!
//! let deriver = CredentialDeriver::new(&config, &request);
//! assert!(deriver.has_valid_credentials());
//! assert_eq!(
//!     deriver.build_calendar_url(),
//!     "https://cloud.example.org/remote.php/dav/calendars/alice"
//! );
//! ```

pub mod auth;
pub mod credentials;
pub mod deriver;
pub mod discovery;
pub mod error;
pub mod snapshot;

pub use auth::{CALENDAR_CONTENT_TYPE, CalDavAuth, CalDavRequest, basic_auth, bearer_auth};
pub use credentials::Credentials;
pub use deriver::CredentialDeriver;
pub use discovery::{DYNAMIC_TOKEN_LABEL, discover_token_cookie, is_dynamic_token_name};
pub use error::EndpointError;
pub use snapshot::{ConfigSnapshot, CookieNameSnapshot};
