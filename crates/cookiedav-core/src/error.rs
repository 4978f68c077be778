//! Error types for configuration loading and validation.

use std::path::PathBuf;

use thiserror::Error;

/// An error raised while loading or validating a [`DeriverConfig`](crate::DeriverConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configured cookie name is empty.
    #[error("cookie name for `{0}` must not be empty")]
    EmptyCookieName(&'static str),

    /// The CalDAV path does not start with a slash.
    #[error("caldav_path must start with '/', got {0:?}")]
    InvalidCaldavPath(String),

    /// The domain override is set but empty.
    #[error("domain override must not be empty")]
    EmptyDomain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ConfigError::EmptyCookieName("token").to_string(),
            "cookie name for `token` must not be empty"
        );
        assert_eq!(
            ConfigError::InvalidCaldavPath("dav".to_string()).to_string(),
            "caldav_path must start with '/', got \"dav\""
        );
    }

    #[test]
    fn read_error_keeps_source() {
        use std::error::Error;
        let err = ConfigError::Read {
            path: PathBuf::from("/nowhere/cookiedav.toml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(err.to_string().contains("/nowhere/cookiedav.toml"));
        assert!(err.source().is_some());
    }
}
