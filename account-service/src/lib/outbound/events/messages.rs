use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::account::events::AccountEvent;
use crate::domain::account::events::AccountEventKind;

/// Serializable envelope for account events.
///
/// The `event_type` tag carries the kind; `message` is ready for display by
/// notification consumers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountEventMessage {
    pub event_id: String,
    pub event_type: AccountEventType,
    pub email: String,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountEventType {
    UserRegistered,
    UserLoggedIn,
    PasswordResetRequested,
    PasswordResetCompleted,
}

impl From<AccountEventKind> for AccountEventType {
    fn from(kind: AccountEventKind) -> Self {
        match kind {
            AccountEventKind::UserRegistered => AccountEventType::UserRegistered,
            AccountEventKind::UserLoggedIn => AccountEventType::UserLoggedIn,
            AccountEventKind::PasswordResetRequested => AccountEventType::PasswordResetRequested,
            AccountEventKind::PasswordResetCompleted => AccountEventType::PasswordResetCompleted,
        }
    }
}

impl From<&AccountEvent> for AccountEventMessage {
    fn from(event: &AccountEvent) -> Self {
        Self {
            event_id: event.event_id.clone(),
            event_type: event.kind.into(),
            email: event.email.clone(),
            message: event.message(),
            occurred_at: event.occurred_at,
        }
    }
}
