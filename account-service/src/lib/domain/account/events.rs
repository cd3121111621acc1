use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::EmailAddress;

/// What happened to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountEventKind {
    UserRegistered,
    UserLoggedIn,
    PasswordResetRequested,
    PasswordResetCompleted,
}

/// Domain event published after a successful account operation.
///
/// Consumers use these for notifications and downstream triggers only;
/// nothing in this service depends on delivery.
#[derive(Debug, Clone)]
pub struct AccountEvent {
    pub event_id: String,
    pub kind: AccountEventKind,
    pub email: String,
    pub occurred_at: DateTime<Utc>,
}

impl AccountEvent {
    /// Create a new event with a unique event ID.
    ///
    /// # Arguments
    /// * `kind` - Event kind
    /// * `email` - Account the event relates to
    /// * `occurred_at` - When the operation completed
    pub fn new(kind: AccountEventKind, email: &EmailAddress, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            kind,
            email: email.as_str().to_string(),
            occurred_at,
        }
    }

    /// Get the event type name.
    pub fn event_type(&self) -> &'static str {
        match self.kind {
            AccountEventKind::UserRegistered => "user_registered",
            AccountEventKind::UserLoggedIn => "user_logged_in",
            AccountEventKind::PasswordResetRequested => "password_reset_requested",
            AccountEventKind::PasswordResetCompleted => "password_reset_completed",
        }
    }

    /// Human-readable notification text.
    pub fn message(&self) -> String {
        match self.kind {
            AccountEventKind::UserRegistered => {
                format!("{}, You have successfully registered!", self.email)
            }
            AccountEventKind::UserLoggedIn => format!("{} logged in successfully!", self.email),
            AccountEventKind::PasswordResetRequested => {
                format!("Password reset requested for {}", self.email)
            }
            AccountEventKind::PasswordResetCompleted => {
                format!("Password reset successfully for {}", self.email)
            }
        }
    }
}
