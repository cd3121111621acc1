use super::claims::Claims;
use super::errors::TokenError;
use super::purpose::TokenPurpose;

/// Expiry and purpose rules for parsed claims.
///
/// Stateless; safe to share or call concurrently from anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenValidator;

impl TokenValidator {
    /// Check claims against the current time and the consuming operation.
    ///
    /// # Arguments
    /// * `claims` - Claims from a successfully parsed token
    /// * `now` - Current Unix timestamp
    /// * `expected_purpose` - Purpose required by the caller
    ///
    /// # Returns
    /// The claims, unchanged
    ///
    /// # Errors
    /// * `ExpiredToken` - `now >= exp`
    /// * `PurposeMismatch` - Token was issued for a different operation
    pub fn validate(
        claims: Claims,
        now: i64,
        expected_purpose: TokenPurpose,
    ) -> Result<Claims, TokenError> {
        if claims.is_expired(now) {
            return Err(TokenError::ExpiredToken {
                expired_at: claims.exp,
            });
        }

        if claims.purpose != expected_purpose {
            return Err(TokenError::PurposeMismatch {
                expected: expected_purpose,
                actual: claims.purpose,
            });
        }

        Ok(claims)
    }
}
