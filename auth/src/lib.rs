//! Credential and token utilities
//!
//! Provides the reusable building blocks of the account flows:
//! - Password hashing (Argon2id)
//! - Signed, time-bound claim tokens (HS256 JWT)
//! - Expiry and purpose validation
//! - An `Authenticator` that binds them together with token lifetimes
//!
//! Nothing in this crate performs I/O or reads the clock; callers pass the
//! current time in.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::CredentialHasher;
//!
//! let hasher = CredentialHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, TokenCodec, TokenPurpose, TokenValidator};
//! use chrono::{Duration, Utc};
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let now = Utc::now();
//! let claims = Claims::access("user123", "alice@example.com", now, Duration::hours(1));
//! let token = codec.issue(&claims).unwrap();
//!
//! let parsed = codec.parse(&token).unwrap();
//! let valid = TokenValidator::validate(parsed, now.timestamp(), TokenPurpose::Access).unwrap();
//! assert_eq!(valid, claims);
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use authenticator::TokenLifetimes;
pub use password::CredentialHasher;
pub use password::PasswordError;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
pub use token::TokenPurpose;
pub use token::TokenValidator;
