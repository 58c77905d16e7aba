//! Error types for identity providers.

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors that can occur while resolving an authenticated identity.
///
/// Each error is scoped to a single authentication attempt; callers treat any
/// of them as "authentication not completed".
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// A required field was absent or not a string.
    #[error("missing or non-string field '{0}'")]
    FieldMissing(&'static str),

    /// The identity token is not in compact serialization.
    #[error("malformed id_token: {0}")]
    MalformedToken(String),

    /// The token payload is not valid base64url.
    #[error("failed to decode token payload: {0}")]
    Decode(#[from] base64::DecodeError),

    /// A document was not valid JSON.
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Network failure or non-success status.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request could not be built.
    #[error("failed to build request: {0}")]
    RequestBuild(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ProviderError::RequestBuild(e.to_string())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}
