//! Configuration error types.

use std::fmt;

/// Result type alias for config loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// A single violation found while validating a raw configuration.
///
/// Violations are collected, never raised individually; see
/// [`InvalidConfiguration`] for the aggregate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting was empty or absent.
    #[error("missing setting: {setting}")]
    MissingSetting {
        /// Setting name as it appears on the command line.
        setting: &'static str,
    },

    /// A URL setting failed to parse.
    #[error("error parsing {kind}-url={value:?} {message}")]
    InvalidUrl {
        /// Which URL setting (`redirect`, `login`, `redeem`, `profile`).
        kind: &'static str,
        /// The offending value.
        value: String,
        /// Parser message.
        message: String,
    },

    /// An upstream target failed to parse.
    #[error("error parsing upstream={value:?} {message}")]
    InvalidUpstream {
        /// The offending value.
        value: String,
        /// Parser message.
        message: String,
    },

    /// A skip-auth pattern failed to compile.
    #[error("error compiling regex={pattern:?} {message}")]
    InvalidRegex {
        /// The offending pattern.
        pattern: String,
        /// Compiler message.
        message: String,
    },
}

impl ConfigError {
    /// Create a missing setting error.
    pub fn missing(setting: &'static str) -> Self {
        Self::MissingSetting { setting }
    }

    /// Create a URL parse error.
    pub fn invalid_url(
        kind: &'static str,
        value: impl Into<String>,
        message: impl fmt::Display,
    ) -> Self {
        Self::InvalidUrl {
            kind,
            value: value.into(),
            message: message.to_string(),
        }
    }

    /// Create an upstream parse error.
    pub fn invalid_upstream(value: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::InvalidUpstream {
            value: value.into(),
            message: message.to_string(),
        }
    }

    /// Create a regex compile error.
    pub fn invalid_regex(pattern: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::InvalidRegex {
            pattern: pattern.into(),
            message: message.to_string(),
        }
    }
}

/// Every violation found in one validation pass.
///
/// Displays as a multi-line report suitable for startup logging:
///
/// ```text
/// Invalid configuration:
///   missing setting: cookie-secret
///   error compiling regex="(bad" ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidConfiguration {
    errors: Vec<ConfigError>,
}

impl InvalidConfiguration {
    /// Wrap a list of violations. Returns `None` when the list is empty.
    pub fn from_errors(errors: Vec<ConfigError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// The individual violations, in discovery order.
    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }
}

impl fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid configuration:")?;
        for error in &self.errors {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidConfiguration {}

/// Errors that can occur while locating and reading config files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
