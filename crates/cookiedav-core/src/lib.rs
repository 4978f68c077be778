//! Core types: deriver configuration, request context, cookie jar, tracing

pub mod config;
pub mod error;
pub mod request;
pub mod tracing;

pub use config::{AuthScheme, CookieNames, DeriverConfig, TokenCookie};
pub use error::ConfigError;
pub use request::{CookieJar, RequestContext};
pub use crate::tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
