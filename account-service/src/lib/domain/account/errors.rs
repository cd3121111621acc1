use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Error for CredentialId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CredentialIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Email is required")]
    Empty,

    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for event publishing operations
#[derive(Debug, Clone, Error)]
pub enum EventPublisherError {
    #[error("Failed to serialize event: {0}")]
    SerializationFailed(String),

    #[error("Failed to publish event to broker: {0}")]
    PublishFailed(String),
}

/// Error for outgoing email
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    MessageFailed(String),

    #[error("Failed to deliver message: {0}")]
    DeliveryFailed(String),
}

/// Top-level error for all account operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token rejected: {0}")]
    Token(#[from] TokenError),

    #[error("Reset token has already been used")]
    TokenAlreadyUsed,

    #[error("Token email does not match request email")]
    EmailMismatch,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Stored password hash is corrupt: {0}")]
    CorruptHash(String),

    #[error("Password error: {0}")]
    Password(PasswordError),

    // Infrastructure errors
    #[error("Storage error: {0}")]
    Store(String),
}

impl From<PasswordError> for AccountError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::EmptyPassword => AccountError::Validation(err.to_string()),
            PasswordError::CorruptHash(detail) => AccountError::CorruptHash(detail),
            PasswordError::HashingFailed(_) => AccountError::Password(err),
        }
    }
}
