use std::sync::OnceLock;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::password::CredentialHasher;
use crate::password::PasswordError;
use crate::token::Claims;
use crate::token::TokenCodec;
use crate::token::TokenError;
use crate::token::TokenPurpose;
use crate::token::TokenValidator;

/// Lifetimes of the tokens an [`Authenticator`] issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLifetimes {
    pub access: Duration,
    pub password_reset: Duration,
}

impl Default for TokenLifetimes {
    fn default() -> Self {
        Self {
            access: Duration::hours(24),
            password_reset: Duration::minutes(15),
        }
    }
}

/// A signed token together with the claims it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Authentication coordinator combining credential hashing and token handling.
///
/// Services hold one of these (usually behind an `Arc`) and pass the current
/// time explicitly, which keeps every operation here free of clocks and I/O.
pub struct Authenticator {
    hasher: CredentialHasher,
    codec: TokenCodec,
    lifetimes: TokenLifetimes,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Shared secret for token signing
    /// * `lifetimes` - Access and reset token lifetimes
    pub fn new(secret: &[u8], lifetimes: TokenLifetimes) -> Self {
        Self {
            hasher: CredentialHasher::new(),
            codec: TokenCodec::new(secret),
            lifetimes,
        }
    }

    pub fn lifetimes(&self) -> TokenLifetimes {
        self.lifetimes
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// # Errors
    /// * `CorruptHash` - Stored hash is unreadable
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.hasher.verify(password, stored_hash)
    }

    /// Burn one verification against a fixed decoy hash.
    ///
    /// Login paths call this when no credential exists so that an unknown
    /// email costs the same as a wrong password.
    pub fn verify_decoy(&self, password: &str) {
        static DECOY_HASH: OnceLock<Option<String>> = OnceLock::new();

        let decoy = DECOY_HASH.get_or_init(|| CredentialHasher::new().hash("decoy-password").ok());
        if let Some(hash) = decoy {
            let _ = self.hasher.verify(password, hash);
        }
    }

    /// Issue an access token for an authenticated credential.
    ///
    /// # Arguments
    /// * `subject` - Credential identifier
    /// * `email` - Normalized email address
    /// * `now` - Issuance instant
    ///
    /// # Errors
    /// * `SigningFailed` - Token generation failed
    pub fn issue_access_token(
        &self,
        subject: impl ToString,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = Claims::access(subject, email, now, self.lifetimes.access);
        self.sign(claims)
    }

    /// Issue a single-use password reset token.
    ///
    /// # Errors
    /// * `SigningFailed` - Token generation failed
    pub fn issue_password_reset_token(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let claims = Claims::password_reset(email, now, self.lifetimes.password_reset);
        self.sign(claims)
    }

    /// Parse and validate a token for one purpose.
    ///
    /// # Errors
    /// * `InvalidSignature` / `MalformedToken` - Token failed to parse
    /// * `ExpiredToken` - Token is past its expiry
    /// * `PurposeMismatch` - Token was issued for another operation
    pub fn verify_token(
        &self,
        token: &str,
        expected_purpose: TokenPurpose,
        now: DateTime<Utc>,
    ) -> Result<Claims, TokenError> {
        let claims = self.codec.parse(token)?;
        TokenValidator::validate(claims, now.timestamp(), expected_purpose)
    }

    fn sign(&self, claims: Claims) -> Result<IssuedToken, TokenError> {
        let token = self.codec.issue(&claims)?;
        Ok(IssuedToken { token, claims })
    }
}
