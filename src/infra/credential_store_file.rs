use crate::domain_model::CredentialPair;
use crate::domain_port::{CredentialStore, StoreError};
use crate::logger::*;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the token pair as a small JSON document on disk.
pub struct FileCredentialStore {
    path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(default)]
    access: Option<String>,
    #[serde(default)]
    refresh: Option<String>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn discard(&self, reason: &str) -> Result<(), StoreError> {
        warn!(path = %self.path.display(), reason, "discarding stored credentials");
        self.clear().await
    }
}

#[async_trait::async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<CredentialPair>, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredCredentials = match serde_json::from_slice(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                self.discard(&format!("unreadable: {e}")).await?;
                return Ok(None);
            }
        };

        match CredentialPair::from_parts(stored.access, stored.refresh) {
            Some(pair) => Ok(Some(pair)),
            None => {
                self.discard("incomplete token pair").await?;
                Ok(None)
            }
        }
    }

    async fn save(&self, pair: &CredentialPair) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let stored = StoredCredentials {
            access: Some(pair.access().as_str().to_string()),
            refresh: Some(pair.refresh().as_str().to_string()),
        };
        let body = serde_json::to_vec_pretty(&stored)?;

        // Write then rename so a crash never leaves half a file behind.
        let temp = self.temp_path();
        tokio::fs::write(&temp, body).await?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&temp, std::fs::Permissions::from_mode(0o600)).await?;
        }
        tokio::fs::rename(&temp, &self.path).await?;
        debug!(path = %self.path.display(), "stored credentials");
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::{AccessToken, RefreshToken};

    fn pair(access: &str, refresh: &str) -> CredentialPair {
        CredentialPair::new(AccessToken::new(access), RefreshToken::new(refresh))
    }

    #[tokio::test]
    async fn missing_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("session.json"));
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_then_load_survives_new_store_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        FileCredentialStore::new(&path)
            .save(&pair("a1", "r1"))
            .await
            .unwrap();

        let loaded = FileCredentialStore::new(&path).load().await.unwrap();
        assert_eq!(loaded, Some(pair("a1", "r1")));

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(raw["access"], "a1");
        assert_eq!(raw["refresh"], "r1");
    }

    #[tokio::test]
    async fn partial_pair_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"access": "only-access"}"#).unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(store.load().await.unwrap().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(&path);
        assert!(store.load().await.unwrap().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("session.json"));
        store.save(&pair("a", "r")).await.unwrap();
        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
