use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::account::errors::AccountError;
use crate::account::ports::AuthenticationPort;
use crate::account::ports::Clock;
use crate::account::ports::CredentialStore;
use crate::account::ports::EventPublisher;
use crate::account::ports::SystemClock;
use crate::domain::account::events::AccountEvent;
use crate::domain::account::events::AccountEventKind;
use crate::domain::account::models::Credential;
use crate::domain::account::models::CredentialId;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::RegisterCommand;

/// Domain service for registration and login.
///
/// Concrete implementation of AuthenticationPort with dependency injection.
pub struct AuthenticationService<CS, EP>
where
    CS: CredentialStore,
    EP: EventPublisher,
{
    store: Arc<CS>,
    event_publisher: Arc<EP>,
    authenticator: Arc<Authenticator>,
    clock: Arc<dyn Clock>,
}

impl<CS, EP> AuthenticationService<CS, EP>
where
    CS: CredentialStore,
    EP: EventPublisher,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `event_publisher` - Domain event publishing implementation
    /// * `authenticator` - Hashing and token issuance
    pub fn new(store: Arc<CS>, event_publisher: Arc<EP>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            store,
            event_publisher,
            authenticator,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the wall clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    async fn publish(&self, event: AccountEvent) {
        if let Err(e) = self.event_publisher.publish(&event).await {
            tracing::error!(
                event_type = event.event_type(),
                email = %event.email,
                error = %e,
                "Failed to publish account event"
            );
        }
    }
}

#[async_trait]
impl<CS, EP> AuthenticationPort for AuthenticationService<CS, EP>
where
    CS: CredentialStore,
    EP: EventPublisher,
{
    #[tracing::instrument(name = "register", skip_all, fields(email = %command.email))]
    async fn register(&self, command: RegisterCommand) -> Result<Credential, AccountError> {
        if command.password.is_empty() {
            return Err(AccountError::Validation("Password is required".to_string()));
        }

        if self.store.find_by_email(&command.email).await?.is_some() {
            tracing::warn!("Registration rejected: email already exists");
            return Err(AccountError::DuplicateEmail(command.email.to_string()));
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;
        let now = self.clock.now();

        let credential = Credential {
            id: CredentialId::new(),
            email: command.email,
            password_hash,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.insert(credential).await?;
        tracing::info!(credential_id = %created.id, "User registered");

        self.publish(AccountEvent::new(
            AccountEventKind::UserRegistered,
            &created.email,
            now,
        ))
        .await;

        Ok(created)
    }

    #[tracing::instrument(name = "login", skip_all, fields(email = %command.email))]
    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, AccountError> {
        let Some(credential) = self.store.find_by_email(&command.email).await? else {
            self.authenticator.verify_decoy(&command.password);
            tracing::warn!("Login failed: unknown email");
            return Err(AccountError::InvalidCredentials);
        };

        let is_valid = self
            .authenticator
            .verify_password(&command.password, &credential.password_hash)
            .map_err(|e| {
                tracing::error!(credential_id = %credential.id, error = %e, "Stored hash rejected");
                AccountError::from(e)
            })?;

        if !is_valid {
            tracing::warn!(credential_id = %credential.id, "Login failed: wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let now = self.clock.now();
        let issued = self.authenticator.issue_access_token(
            credential.id,
            credential.email.as_str(),
            now,
        )?;
        let expires_at = issued
            .claims
            .expires_at()
            .unwrap_or_else(|| now + self.authenticator.lifetimes().access);

        tracing::info!(credential_id = %credential.id, "User logged in");

        self.publish(AccountEvent::new(
            AccountEventKind::UserLoggedIn,
            &credential.email,
            now,
        ))
        .await;

        Ok(LoginOutcome {
            credential,
            access_token: issued.token,
            expires_at,
        })
    }
}
