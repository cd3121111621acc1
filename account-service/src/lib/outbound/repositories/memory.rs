use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::Credential;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::CredentialStore;

/// Credential store kept in process memory, keyed by normalized email.
///
/// Writes are visible to the next read on any clone.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    credentials: Arc<RwLock<HashMap<EmailAddress, Credential>>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored credentials.
    pub async fn len(&self) -> usize {
        self.credentials.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.credentials.read().await.is_empty()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Credential>, AccountError> {
        Ok(self.credentials.read().await.get(email).cloned())
    }

    async fn insert(&self, credential: Credential) -> Result<Credential, AccountError> {
        let mut credentials = self.credentials.write().await;

        if credentials.contains_key(&credential.email) {
            return Err(AccountError::DuplicateEmail(credential.email.to_string()));
        }

        credentials.insert(credential.email.clone(), credential.clone());
        Ok(credential)
    }

    async fn update_password_hash(
        &self,
        email: &EmailAddress,
        password_hash: &str,
    ) -> Result<bool, AccountError> {
        let mut credentials = self.credentials.write().await;

        match credentials.get_mut(email) {
            Some(credential) => {
                credential.password_hash = password_hash.to_string();
                credential.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
