use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::errors::EventPublisherError;
use crate::account::errors::NotifierError;
use crate::domain::account::events::AccountEvent;
use crate::domain::account::models::Credential;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::ResetPasswordCommand;

/// Port for registration and login.
#[async_trait]
pub trait AuthenticationPort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Normalized email and plaintext password
    ///
    /// # Returns
    /// Stored credential
    ///
    /// # Errors
    /// * `Validation` - Password is empty
    /// * `DuplicateEmail` - Email is already registered
    /// * `Store` - Storage operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Credential, AccountError>;

    /// Verify a password and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `CorruptHash` - Stored hash cannot be read
    /// * `Store` - Storage operation failed
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError>;
}

/// Port for the password reset flow.
#[async_trait]
pub trait PasswordResetPort: Send + Sync + 'static {
    /// Start a reset for a raw, unvalidated email.
    ///
    /// Succeeds for malformed and unregistered emails without issuing
    /// anything, so callers cannot tell which addresses exist.
    ///
    /// # Errors
    /// * `Validation` - Email is blank
    /// * `Store` - Storage operation failed
    async fn request_reset(&self, email: &str) -> Result<(), AccountError>;

    /// Finish a reset with a mailed token.
    ///
    /// # Errors
    /// * `Token` - Token is malformed, forged, expired or not a reset token
    /// * `TokenAlreadyUsed` - Token was already consumed
    /// * `EmailMismatch` - Token was issued for another email
    /// * `UserNotFound` - Account no longer exists
    async fn complete_reset(&self, command: ResetPasswordCommand) -> Result<(), AccountError>;
}

/// Persistence operations for credentials.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve credential by normalized email.
    ///
    /// # Returns
    /// Optional credential (None if not found)
    ///
    /// # Errors
    /// * `Store` - Storage operation failed
    async fn find_by_email(&self, email: &EmailAddress)
        -> Result<Option<Credential>, AccountError>;

    /// Persist a new credential.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `Store` - Storage operation failed
    async fn insert(&self, credential: Credential) -> Result<Credential, AccountError>;

    /// Replace the password hash of an existing credential.
    ///
    /// # Returns
    /// Whether a credential was updated
    ///
    /// # Errors
    /// * `Store` - Storage operation failed
    async fn update_password_hash(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<bool, AccountError>;
}

/// Outgoing email.
#[async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Send a plain-text email.
    ///
    /// # Errors
    /// * `InvalidAddress` - Sender or recipient rejected
    /// * `MessageFailed` - Message could not be built
    /// * `DeliveryFailed` - Transport failed
    async fn send_email(
        &self,
        to: &EmailAddress,
        subject: &str,
        body: &str,
    ) -> Result<(), NotifierError>;
}

/// Event publishing for domain events.
#[async_trait]
pub trait EventPublisher: Send + Sync + 'static {
    /// Publish an account event.
    ///
    /// # Errors
    /// * `SerializationFailed` - Event serialization failed
    /// * `PublishFailed` - Failed to publish to broker
    async fn publish(&self, event: &AccountEvent) -> Result<(), EventPublisherError>;
}

/// Record of consumed password reset tokens.
#[async_trait]
pub trait ResetTokenLedger: Send + Sync + 'static {
    /// Mark a token as used.
    ///
    /// # Arguments
    /// * `token_id` - The token's `jti` claim
    /// * `expires_at` - Token expiry; the entry may be dropped after this
    /// * `now` - Current time
    ///
    /// # Returns
    /// `true` the first time a token is consumed, `false` on any replay
    async fn consume(
        &self,
        token_id: &str,
        expires_at: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, AccountError>;

    /// Forget a consumed token whose reset did not complete.
    ///
    /// The token can be used again until it expires.
    async fn release(&self, token_id: &str) -> Result<(), AccountError>;
}

/// Source of the current time.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
