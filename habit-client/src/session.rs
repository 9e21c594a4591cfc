//! Session gate - the authenticated identity every request is made as
//!
//! `SessionGate` is a cheaply clonable handle. It is created once at app
//! start (`init` reads the persisted credential) and torn down by `logout`,
//! which clears both memory and the persisted file.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::client::{UserInfo, UserPatch};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::ClientConfig;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// What gets written to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserInfo>,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(token: String, user: Option<UserInfo>) -> Self {
        Self {
            token,
            user,
            saved_at: Utc::now(),
        }
    }
}

/// JSON file holding the persisted session
#[derive(Debug, Clone)]
pub struct CredentialStorage {
    path: PathBuf,
}

impl CredentialStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    pub fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Missing or unreadable files both yield `None`
    pub fn load(&self) -> Option<StoredSession> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring corrupt session file");
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn delete(&self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Clone, Default)]
struct SessionData {
    token: Option<String>,
    user: Option<UserInfo>,
}

/// Supplies the bearer credential to the habit client
#[derive(Debug, Clone, Default)]
pub struct SessionGate {
    inner: Arc<RwLock<SessionData>>,
    storage: Option<CredentialStorage>,
}

impl SessionGate {
    /// A session that lives in memory only
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Start a session backed by `storage`, restoring any persisted credential
    pub fn init(storage: CredentialStorage) -> Self {
        let data = match storage.load() {
            Some(stored) => {
                tracing::info!(path = %storage.path().display(), "Restored persisted session");
                SessionData {
                    token: Some(stored.token),
                    user: stored.user,
                }
            }
            None => SessionData::default(),
        };

        Self {
            inner: Arc::new(RwLock::new(data)),
            storage: Some(storage),
        }
    }

    /// Persisted when the config names a session path, in memory otherwise
    pub fn from_config(config: &ClientConfig) -> Self {
        match &config.session_path {
            Some(path) => Self::init(CredentialStorage::new(path)),
            None => Self::in_memory(),
        }
    }

    pub async fn current_token(&self) -> Option<String> {
        self.inner.read().await.token.clone()
    }

    pub async fn current_user(&self) -> Option<UserInfo> {
        self.inner.read().await.user.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.token.is_some()
    }

    /// Record a successful login
    ///
    /// The in-memory session is updated even if persisting it fails.
    pub async fn set_credentials(&self, user: UserInfo, token: String) -> Result<(), SessionError> {
        {
            let mut data = self.inner.write().await;
            data.token = Some(token.clone());
            data.user = Some(user.clone());
        }
        tracing::info!(user_id = %user.id, "Session established");

        if let Some(storage) = &self.storage {
            storage.save(&StoredSession::new(token, Some(user)))?;
        }
        Ok(())
    }

    /// Merge `patch` into the current user, if there is one
    pub async fn update_user(&self, patch: UserPatch) -> Result<(), SessionError> {
        let snapshot = {
            let mut data = self.inner.write().await;
            let Some(user) = data.user.as_mut() else {
                return Ok(());
            };
            user.apply(patch);
            data.clone()
        };

        if let (Some(storage), Some(token)) = (&self.storage, snapshot.token) {
            storage.save(&StoredSession::new(token, snapshot.user))?;
        }
        Ok(())
    }

    /// Tear the session down, in memory and on disk
    pub async fn logout(&self) -> Result<(), SessionError> {
        {
            let mut data = self.inner.write().await;
            data.token = None;
            data.user = None;
        }
        tracing::info!("Session cleared");

        if let Some(storage) = &self.storage {
            storage.delete()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user() -> UserInfo {
        UserInfo {
            id: "u1".to_string(),
            email: "ada@example.com".to_string(),
            name: None,
        }
    }

    #[tokio::test]
    async fn test_in_memory_session() {
        let gate = SessionGate::in_memory();
        assert!(!gate.is_authenticated().await);
        assert!(gate.current_token().await.is_none());

        gate.set_credentials(user(), "tok".to_string()).await.unwrap();
        assert_eq!(gate.current_token().await.as_deref(), Some("tok"));
        assert_eq!(gate.current_user().await.unwrap().id, "u1");

        gate.logout().await.unwrap();
        assert!(!gate.is_authenticated().await);
        assert!(gate.current_user().await.is_none());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let gate = SessionGate::in_memory();
        let other = gate.clone();
        gate.set_credentials(user(), "tok".to_string()).await.unwrap();
        assert_eq!(other.current_token().await.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_persisted_session_survives_restart() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let gate = SessionGate::init(CredentialStorage::new(&path));
        assert!(!gate.is_authenticated().await);
        gate.set_credentials(user(), "persisted".to_string())
            .await
            .unwrap();
        assert!(path.exists());

        let restarted = SessionGate::init(CredentialStorage::new(&path));
        assert_eq!(
            restarted.current_token().await.as_deref(),
            Some("persisted")
        );
        assert_eq!(restarted.current_user().await, Some(user()));

        restarted.logout().await.unwrap();
        assert!(!path.exists());
        let after_logout = SessionGate::init(CredentialStorage::new(&path));
        assert!(!after_logout.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_update_user() {
        let dir = TempDir::new().unwrap();
        let storage = CredentialStorage::new(dir.path().join("session.json"));
        let gate = SessionGate::init(storage.clone());

        // No user yet: nothing to patch
        gate.update_user(UserPatch {
            name: Some("Ada".into()),
            ..Default::default()
        })
        .await
        .unwrap();
        assert!(gate.current_user().await.is_none());

        gate.set_credentials(user(), "tok".to_string()).await.unwrap();
        gate.update_user(UserPatch {
            name: Some("Ada".into()),
            ..Default::default()
        })
        .await
        .unwrap();
        assert_eq!(
            gate.current_user().await.unwrap().name.as_deref(),
            Some("Ada")
        );
        assert_eq!(
            storage.load().unwrap().user.unwrap().name.as_deref(),
            Some("Ada")
        );
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();
        let storage = CredentialStorage::new(&path);
        assert!(storage.exists());
        assert!(storage.load().is_none());
    }
}
