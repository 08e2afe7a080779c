use crate::domain_model::CredentialPair;
use crate::domain_port::{CredentialStore, StoreError};
use tokio::sync::RwLock;

/// Keeps the pair for the lifetime of the process only.
#[derive(Default)]
pub struct MemoryCredentialStore {
    pair: RwLock<Option<CredentialPair>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pair(pair: CredentialPair) -> Self {
        Self {
            pair: RwLock::new(Some(pair)),
        }
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<CredentialPair>, StoreError> {
        Ok(self.pair.read().await.clone())
    }

    async fn save(&self, pair: &CredentialPair) -> Result<(), StoreError> {
        *self.pair.write().await = Some(pair.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.pair.write().await = None;
        Ok(())
    }
}
