use crate::domain_model::CredentialPair;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("credential storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("credential serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistent home of the access/refresh pair.
///
/// Implementations must never hand back half a pair: anything that cannot
/// be read as a complete pair is reported as `None`.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> Result<Option<CredentialPair>, StoreError>;
    async fn save(&self, pair: &CredentialPair) -> Result<(), StoreError>;
    async fn clear(&self) -> Result<(), StoreError>;
}
