use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::account::errors::AccountError;
use crate::domain::account::ports::ResetTokenLedger;

/// Consumed reset tokens kept in process memory.
///
/// Entries are dropped once their token has expired, since an expired token
/// is rejected before the ledger is consulted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResetTokenLedger {
    consumed: Arc<Mutex<HashMap<String, i64>>>,
}

impl InMemoryResetTokenLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResetTokenLedger for InMemoryResetTokenLedger {
    async fn consume(
        &self,
        token_id: &str,
        expires_at: i64,
        now: DateTime<Utc>,
    ) -> Result<bool, AccountError> {
        let now = now.timestamp();
        let mut consumed = self.consumed.lock().await;

        consumed.retain(|_, exp| *exp > now);

        if consumed.contains_key(token_id) {
            return Ok(false);
        }

        consumed.insert(token_id.to_string(), expires_at);
        Ok(true)
    }

    async fn release(&self, token_id: &str) -> Result<(), AccountError> {
        self.consumed.lock().await.remove(token_id);
        Ok(())
    }
}
