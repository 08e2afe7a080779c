#![allow(dead_code)]

use eventboard::api::{self, ApiClient, Session};
use eventboard::domain_model::{AccessToken, CredentialPair, RefreshToken};
use eventboard::domain_port::CredentialStore;
use eventboard::infra::MemoryCredentialStore;
use std::sync::Arc;
use std::time::Duration;

pub fn pair(access: &str, refresh: &str) -> CredentialPair {
    CredentialPair::new(AccessToken::new(access), RefreshToken::new(refresh))
}

pub fn base_url(server_url: &str) -> url::Url {
    format!("{server_url}/api/v1").parse().expect("valid base url")
}

/// Client backed by an in-memory store, optionally already logged in.
pub async fn client_with(
    server_url: &str,
    credentials: Option<CredentialPair>,
) -> (Arc<MemoryCredentialStore>, Arc<ApiClient>) {
    let store = Arc::new(match credentials {
        Some(pair) => MemoryCredentialStore::with_pair(pair),
        None => MemoryCredentialStore::new(),
    });
    let client = client_on_store(server_url, store.clone()).await;
    (store, client)
}

pub async fn client_on_store(
    server_url: &str,
    store: Arc<dyn CredentialStore>,
) -> Arc<ApiClient> {
    let session = Arc::new(Session::load(store).await.expect("session loads"));
    Arc::new(
        api::build(base_url(server_url), session)
            .with_request_timeout(Duration::from_secs(5))
            .with_refresh_timeout(Duration::from_secs(5))
            .build(),
    )
}
