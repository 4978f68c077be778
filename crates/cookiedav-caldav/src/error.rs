//! Errors for the few fallible deriver operations.

use thiserror::Error;

/// The calendar endpoint could not be turned into a URL.
#[derive(Debug, Error)]
pub enum EndpointError {
    /// Neither the request nor the configuration provides a host.
    #[error("no host available to build the calendar URL")]
    EmptyHost,

    /// The assembled URL does not parse.
    #[error("invalid calendar URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}
