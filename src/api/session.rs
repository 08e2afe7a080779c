use super::error::ApiError;
use crate::domain_model::{AccessToken, CredentialPair, RefreshToken};
use crate::domain_port::{CredentialStore, StoreError};
use crate::logger::*;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Owner of the credential pair.
///
/// Holds the pair in memory, mirrors every change into the
/// [`CredentialStore`], and serialises refresh exchanges so that callers
/// racing on the same expired token share one exchange.
pub struct Session {
    store: Arc<dyn CredentialStore>,
    current: RwLock<Option<CredentialPair>>,
    refresh_gate: Mutex<()>,
}

impl Session {
    /// Restore the session persisted by `store`.
    pub async fn load(store: Arc<dyn CredentialStore>) -> Result<Self, StoreError> {
        let current = store.load().await?;
        debug!(authenticated = current.is_some(), "session loaded");
        Ok(Self {
            store,
            current: RwLock::new(current),
            refresh_gate: Mutex::new(()),
        })
    }

    pub async fn credentials(&self) -> Option<CredentialPair> {
        self.current.read().await.clone()
    }

    pub async fn access_token(&self) -> Option<AccessToken> {
        self.current.read().await.as_ref().map(|p| p.access().clone())
    }

    pub async fn refresh_token(&self) -> Option<RefreshToken> {
        self.current.read().await.as_ref().map(|p| p.refresh().clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Replace the whole pair, as after login or registration.
    pub async fn establish(&self, pair: CredentialPair) -> Result<(), StoreError> {
        let mut current = self.current.write().await;
        self.store.save(&pair).await?;
        *current = Some(pair);
        info!("session established");
        Ok(())
    }

    /// Drop both tokens. The in-memory pair is cleared even when the store
    /// fails, so the process never keeps using credentials it meant to drop.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut current = self.current.write().await;
        *current = None;
        self.store.clear().await?;
        info!("session cleared");
        Ok(())
    }

    /// Obtain a usable access token after `stale` was rejected.
    ///
    /// When another caller already replaced `stale`, its token is returned
    /// without a new exchange. Otherwise `exchange` is called with the
    /// stored refresh token; on success only the access token is replaced,
    /// on failure the session is cleared and `AuthenticationFailed` returned.
    pub async fn refresh_after<F, Fut>(
        &self,
        stale: &AccessToken,
        exchange: F,
    ) -> Result<AccessToken, ApiError>
    where
        F: FnOnce(RefreshToken) -> Fut,
        Fut: Future<Output = Result<AccessToken, ApiError>>,
    {
        let _gate = self.refresh_gate.lock().await;

        let refresh = match self.credentials().await {
            None => {
                debug!("session was cleared while waiting to refresh");
                return Err(ApiError::AuthenticationFailed);
            }
            Some(pair) if pair.access() != stale => {
                debug!("reusing access token refreshed by a concurrent call");
                return Ok(pair.access().clone());
            }
            Some(pair) => pair.refresh().clone(),
        };

        match exchange(refresh.clone()).await {
            Ok(access) => {
                let mut current = self.current.write().await;
                match current.as_ref() {
                    Some(pair) if pair.refresh() == &refresh => {
                        let next = pair.with_access(access.clone());
                        self.store.save(&next).await?;
                        *current = Some(next);
                        debug!("access token refreshed");
                        Ok(access)
                    }
                    // Logged out or re-logged in during the exchange.
                    Some(pair) => Ok(pair.access().clone()),
                    None => Err(ApiError::AuthenticationFailed),
                }
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing session");
                let mut current = self.current.write().await;
                if current.as_ref().map(|p| p.refresh()) == Some(&refresh) {
                    *current = None;
                    if let Err(e) = self.store.clear().await {
                        error!(error = %e, "failed to clear stored credentials");
                    }
                }
                Err(ApiError::AuthenticationFailed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MemoryCredentialStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn pair(access: &str, refresh: &str) -> CredentialPair {
        CredentialPair::new(AccessToken::new(access), RefreshToken::new(refresh))
    }

    async fn session_with(pair: CredentialPair) -> (Arc<MemoryCredentialStore>, Session) {
        let store = Arc::new(MemoryCredentialStore::with_pair(pair));
        let session = Session::load(store.clone()).await.unwrap();
        (store, session)
    }

    #[tokio::test]
    async fn refresh_replaces_access_and_keeps_refresh() {
        let (store, session) = session_with(pair("old", "r1")).await;

        let token = session
            .refresh_after(&AccessToken::new("old"), |refresh| async move {
                assert_eq!(refresh.as_str(), "r1");
                Ok(AccessToken::new("new"))
            })
            .await
            .unwrap();

        assert_eq!(token.as_str(), "new");
        assert_eq!(store.load().await.unwrap(), Some(pair("new", "r1")));
    }

    #[tokio::test]
    async fn failed_refresh_clears_both_tokens() {
        let (store, session) = session_with(pair("old", "r1")).await;

        let result = session
            .refresh_after(&AccessToken::new("old"), |_| async {
                Err::<AccessToken, _>(ApiError::AuthenticationFailed)
            })
            .await;

        assert!(matches!(result, Err(ApiError::AuthenticationFailed)));
        assert!(!session.is_authenticated().await);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn concurrent_refreshes_share_one_exchange() {
        let (_store, session) = session_with(pair("old", "r1")).await;
        let session = Arc::new(session);
        let exchanges = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let session = session.clone();
                let exchanges = exchanges.clone();
                tokio::spawn(async move {
                    session
                        .refresh_after(&AccessToken::new("old"), |_| async move {
                            exchanges.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            Ok(AccessToken::new("new"))
                        })
                        .await
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap().as_str(), "new");
        }
        assert_eq!(exchanges.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn waiters_fail_without_exchange_after_failed_refresh() {
        let (_store, session) = session_with(pair("old", "r1")).await;

        let _ = session
            .refresh_after(&AccessToken::new("old"), |_| async {
                Err::<AccessToken, _>(ApiError::AuthenticationFailed)
            })
            .await;

        let exchanges = AtomicUsize::new(0);
        let second = session
            .refresh_after(&AccessToken::new("old"), |_| async {
                exchanges.fetch_add(1, Ordering::SeqCst);
                Ok(AccessToken::new("never"))
            })
            .await;
        assert!(matches!(second, Err(ApiError::AuthenticationFailed)));
        assert_eq!(exchanges.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn establish_and_clear_round_trip_through_store() {
        let store = Arc::new(MemoryCredentialStore::new());
        let session = Session::load(store.clone()).await.unwrap();
        assert!(!session.is_authenticated().await);

        session.establish(pair("a", "r")).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(pair("a", "r")));
        assert_eq!(session.access_token().await, Some(AccessToken::new("a")));

        session.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
        assert_eq!(session.refresh_token().await, None);
    }
}
