use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::purpose::TokenPurpose;

/// Claims carried by every token this crate issues.
///
/// Field order is the serialization order. Claims are integrity-protected
/// but not encrypted, so nothing secret belongs in here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (credential identifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Email the token was issued for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Operation the token may be used for
    pub purpose: TokenPurpose,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Unique token identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

impl Claims {
    /// Create claims with the given purpose and validity window.
    ///
    /// # Arguments
    /// * `purpose` - Operation the token is restricted to
    /// * `issued_at` - Issuance instant
    /// * `ttl` - Lifetime; `exp = iat + ttl`
    pub fn new(purpose: TokenPurpose, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: None,
            email: None,
            purpose,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
            jti: None,
        }
    }

    /// Claims for an access token bound to a credential.
    pub fn access(
        subject: impl ToString,
        email: impl ToString,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self::new(TokenPurpose::Access, issued_at, ttl)
            .with_subject(subject)
            .with_email(email)
    }

    /// Claims for a single password reset, identified by a fresh `jti`.
    pub fn password_reset(email: impl ToString, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self::new(TokenPurpose::PasswordReset, issued_at, ttl)
            .with_email(email)
            .with_token_id(Uuid::new_v4())
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set email.
    pub fn with_email(mut self, email: impl ToString) -> Self {
        self.email = Some(email.to_string());
        self
    }

    /// Set token identifier.
    pub fn with_token_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    /// Check if token is expired. A token is already expired at `exp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Expiration as a UTC instant.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_access_claims() {
        let claims = Claims::access("user123", "bob@example.com", issued_at(), Duration::hours(24));

        assert_eq!(claims.sub, Some("user123".to_string()));
        assert_eq!(claims.email, Some("bob@example.com".to_string()));
        assert_eq!(claims.purpose, TokenPurpose::Access);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert!(claims.jti.is_none());
    }

    #[test]
    fn test_password_reset_claims_have_unique_ids() {
        let first = Claims::password_reset("bob@example.com", issued_at(), Duration::minutes(15));
        let second = Claims::password_reset("bob@example.com", issued_at(), Duration::minutes(15));

        assert_eq!(first.purpose, TokenPurpose::PasswordReset);
        assert!(first.sub.is_none());
        assert_eq!(first.exp - first.iat, 15 * 60);
        assert!(first.jti.is_some());
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn test_is_expired() {
        let claims = Claims::new(TokenPurpose::Access, issued_at(), Duration::seconds(100));
        let exp = claims.exp;

        assert!(!claims.is_expired(exp - 1));
        assert!(claims.is_expired(exp));
        assert!(claims.is_expired(exp + 1));
    }

    #[test]
    fn test_serialized_claim_names() {
        let claims = Claims::access("id-1", "bob@example.com", issued_at(), Duration::hours(1));
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["sub"], "id-1");
        assert_eq!(value["email"], "bob@example.com");
        assert_eq!(value["purpose"], "access");
        assert!(value["iat"].is_i64());
        assert!(value["exp"].is_i64());
        assert!(value.get("jti").is_none());
    }
}
