use thiserror::Error;

/// Startup-time configuration error for the token codec.
///
/// A missing or short signing secret is fatal at process start, never a
/// per-request condition.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Signing secret must be at least {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },
}

/// Error type for token operations.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    /// Token structure could not be decoded at all.
    #[error("Token is malformed: {0}")]
    Malformed(String),

    /// The MAC does not verify against the current secret.
    #[error("Token signature is invalid")]
    BadSignature,

    /// The token was valid once but its expiry has passed.
    #[error("Token is expired")]
    Expired,

    /// Claims could not be serialized into a token.
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}
