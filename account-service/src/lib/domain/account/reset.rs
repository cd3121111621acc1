use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenError;
use auth::TokenPurpose;
use tracing::Instrument;

use crate::account::errors::AccountError;
use crate::account::ports::Clock;
use crate::account::ports::CredentialStore;
use crate::account::ports::EventPublisher;
use crate::account::ports::Notifier;
use crate::account::ports::PasswordResetPort;
use crate::account::ports::ResetTokenLedger;
use crate::account::ports::SystemClock;
use crate::domain::account::events::AccountEvent;
use crate::domain::account::events::AccountEventKind;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::ResetPasswordCommand;

pub const RESET_EMAIL_SUBJECT: &str = "Reset Your Password";

/// Password reset request and completion.
///
/// A request mails a short-lived reset token; completion checks the token,
/// burns it in the ledger and replaces the password hash. No reset state is
/// stored apart from the ledger entry.
///
/// Mail and the request event go out on a spawned task, so a request for a
/// registered email returns as fast as one for an unknown email.
pub struct PasswordResetFlow<CS, N, EP, L>
where
    CS: CredentialStore,
    N: Notifier,
    EP: EventPublisher,
    L: ResetTokenLedger,
{
    store: Arc<CS>,
    notifier: Arc<N>,
    event_publisher: Arc<EP>,
    ledger: Arc<L>,
    authenticator: Arc<Authenticator>,
    link_base_url: String,
    clock: Arc<dyn Clock>,
}

impl<CS, N, EP, L> PasswordResetFlow<CS, N, EP, L>
where
    CS: CredentialStore,
    N: Notifier,
    EP: EventPublisher,
    L: ResetTokenLedger,
{
    /// Create a new reset flow with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `notifier` - Outgoing email
    /// * `event_publisher` - Domain event publishing implementation
    /// * `ledger` - Consumed token record
    /// * `authenticator` - Hashing and token issuance
    /// * `link_base_url` - Page the mailed link points at; the token is appended as `token=`
    pub fn new(
        store: Arc<CS>,
        notifier: Arc<N>,
        event_publisher: Arc<EP>,
        ledger: Arc<L>,
        authenticator: Arc<Authenticator>,
        link_base_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            notifier,
            event_publisher,
            ledger,
            authenticator,
            link_base_url: link_base_url.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the wall clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn reset_link(&self, token: &str) -> String {
        let separator = if self.link_base_url.contains('?') { '&' } else { '?' };
        format!("{}{}token={}", self.link_base_url, separator, token)
    }

    async fn release(&self, token_id: &str) {
        if let Err(e) = self.ledger.release(token_id).await {
            tracing::error!(token_id, error = %e, "Failed to release reset token");
        }
    }
}

async fn publish<EP: EventPublisher>(event_publisher: &EP, event: AccountEvent) {
    if let Err(e) = event_publisher.publish(&event).await {
        tracing::error!(
            event_type = event.event_type(),
            email = %event.email,
            error = %e,
            "Failed to publish account event"
        );
    }
}

#[async_trait]
impl<CS, N, EP, L> PasswordResetPort for PasswordResetFlow<CS, N, EP, L>
where
    CS: CredentialStore,
    N: Notifier,
    EP: EventPublisher,
    L: ResetTokenLedger,
{
    #[tracing::instrument(name = "request_reset", skip_all)]
    async fn request_reset(&self, email: &str) -> Result<(), AccountError> {
        if email.trim().is_empty() {
            return Err(AccountError::Validation("Email is required".to_string()));
        }

        let email = match EmailAddress::new(email) {
            Ok(email) => email,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring reset request for malformed email");
                return Ok(());
            }
        };

        let Some(credential) = self.store.find_by_email(&email).await? else {
            tracing::info!(email = %email, "Reset requested for unregistered email");
            return Ok(());
        };

        let now = self.clock.now();
        let issued = self
            .authenticator
            .issue_password_reset_token(credential.email.as_str(), now)?;

        let body = format!(
            "Click the link to reset your password:\n{}\n\nThe link expires in {} minutes.",
            self.reset_link(&issued.token),
            self.authenticator.lifetimes().password_reset.num_minutes()
        );

        tracing::info!(email = %credential.email, "Password reset token issued");

        let notifier = Arc::clone(&self.notifier);
        let event_publisher = Arc::clone(&self.event_publisher);
        let event = AccountEvent::new(
            AccountEventKind::PasswordResetRequested,
            &credential.email,
            now,
        );
        let to = credential.email;

        tokio::spawn(
            async move {
                if let Err(e) = notifier.send_email(&to, RESET_EMAIL_SUBJECT, &body).await {
                    tracing::error!(email = %to, error = %e, "Failed to send reset email");
                }

                publish(event_publisher.as_ref(), event).await;
            }
            .instrument(tracing::Span::current()),
        );

        Ok(())
    }

    #[tracing::instrument(name = "complete_reset", skip_all, fields(email = %command.email))]
    async fn complete_reset(&self, command: ResetPasswordCommand) -> Result<(), AccountError> {
        if command.new_password.is_empty() {
            return Err(AccountError::Validation("New password is required".to_string()));
        }

        let now = self.clock.now();
        let claims = self
            .authenticator
            .verify_token(&command.token, TokenPurpose::PasswordReset, now)
            .map_err(|e| {
                tracing::warn!(error = %e, "Reset token rejected");
                AccountError::Token(e)
            })?;

        let claimed_email = claims
            .email
            .as_deref()
            .and_then(|email| EmailAddress::new(email).ok())
            .ok_or_else(|| {
                tracing::warn!("Reset token carries no usable email");
                AccountError::Token(TokenError::MalformedToken(
                    "missing email claim".to_string(),
                ))
            })?;

        if claimed_email != command.email {
            tracing::warn!(token_email = %claimed_email, "Reset token issued for another email");
            return Err(AccountError::EmailMismatch);
        }

        let credential = self
            .store
            .find_by_email(&command.email)
            .await?
            .ok_or_else(|| AccountError::UserNotFound(command.email.to_string()))?;

        let token_id = claims.jti.as_deref().ok_or_else(|| {
            AccountError::Token(TokenError::MalformedToken("missing jti claim".to_string()))
        })?;

        let password_hash = self.authenticator.hash_password(&command.new_password)?;

        if !self.ledger.consume(token_id, claims.exp, now).await? {
            tracing::warn!(token_id, "Reset token replayed");
            return Err(AccountError::TokenAlreadyUsed);
        }

        // The token stays consumed only if the new hash was written.
        match self
            .store
            .update_password_hash(&credential.email, &password_hash)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                self.release(token_id).await;
                return Err(AccountError::UserNotFound(credential.email.to_string()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to store new password hash");
                self.release(token_id).await;
                return Err(e);
            }
        }

        tracing::info!(credential_id = %credential.id, "Password reset completed");

        publish(
            self.event_publisher.as_ref(),
            AccountEvent::new(
                AccountEventKind::PasswordResetCompleted,
                &credential.email,
                now,
            ),
        )
        .await;

        Ok(())
    }
}
