use thiserror::Error;

use super::purpose::TokenPurpose;

/// Error type for token operations.
///
/// Variants are detailed for operators; callers facing the outside world
/// should collapse them into a single generic message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    SigningFailed(String),

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token expired at {expired_at}")]
    ExpiredToken { expired_at: i64 },

    #[error("Token purpose mismatch: expected {expected}, got {actual}")]
    PurposeMismatch {
        expected: TokenPurpose,
        actual: TokenPurpose,
    },
}
