use crate::client::AuthSession;
use crate::error::Result;
use crate::models::UserData;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const LOCAL_FILENAME: &str = "local.json";
const SESSION_FILENAME: &str = "session.json";

/// Where a login is kept.
///
/// `Local` survives until logout ("remember me"); `Session` is dropped by
/// `logout` and `clear_session`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageScope {
    Local,
    Session,
}

impl StorageScope {
    fn filename(self) -> &'static str {
        match self {
            StorageScope::Local => LOCAL_FILENAME,
            StorageScope::Session => SESSION_FILENAME,
        }
    }
}

/// On-disk shape, keyed the same way the web client keys its storage
#[derive(Debug, Serialize, Deserialize)]
struct StoredCredentials {
    auth_token: String,
    token_type: String,
    #[serde(default)]
    user_type: String,
    #[serde(default)]
    user_data: UserData,
}

impl From<&AuthSession> for StoredCredentials {
    fn from(session: &AuthSession) -> Self {
        Self {
            auth_token: session.access_token.clone(),
            token_type: session.token_type.clone(),
            user_type: session.user_type.clone(),
            user_data: session.user_data.clone(),
        }
    }
}

impl From<StoredCredentials> for AuthSession {
    fn from(stored: StoredCredentials) -> Self {
        AuthSession {
            access_token: stored.auth_token,
            token_type: stored.token_type,
            user_type: stored.user_type,
            user_data: stored.user_data,
        }
    }
}

/// Manages credential storage for auth sessions, one directory per profile.
pub struct CredentialStore {
    profile: String,
    base_dir: PathBuf,
}

impl CredentialStore {
    /// Create a new credential store for the given profile
    pub fn new(profile: Option<String>) -> Result<Self> {
        let profile = profile.unwrap_or_else(|| super::DEFAULT_PROFILE.to_string());
        let base_dir = super::profile_dir(&super::sessions_root()?, &profile)?;

        Ok(Self { profile, base_dir })
    }

    /// Create a credential store with a custom base directory (for testing)
    pub fn with_dir(profile: impl Into<String>, base_dir: PathBuf) -> Result<Self> {
        let profile = profile.into();
        let dir = super::profile_dir(&base_dir, &profile)?;

        Ok(Self {
            profile,
            base_dir: dir,
        })
    }

    /// Get the profile name
    pub fn profile(&self) -> &str {
        &self.profile
    }

    fn path(&self, scope: StorageScope) -> PathBuf {
        self.base_dir.join(scope.filename())
    }

    /// Save a session under the given scope
    pub fn save(&self, session: &AuthSession, scope: StorageScope) -> Result<()> {
        let path = self.path(scope);
        let json = serde_json::to_string_pretty(&StoredCredentials::from(session))?;
        fs::write(&path, json)?;

        // Set restrictive permissions on Unix
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Load the session stored under one scope
    pub fn load_scope(&self, scope: StorageScope) -> Result<Option<AuthSession>> {
        let path = self.path(scope);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let stored: StoredCredentials = serde_json::from_str(&json)?;
        Ok(Some(stored.into()))
    }

    /// Load the active session, preferring the persistent scope
    pub fn load(&self) -> Result<Option<AuthSession>> {
        match self.load_scope(StorageScope::Local)? {
            Some(session) => Ok(Some(session)),
            None => self.load_scope(StorageScope::Session),
        }
    }

    /// Which scope currently holds credentials, if any
    pub fn active_scope(&self) -> Option<StorageScope> {
        [StorageScope::Local, StorageScope::Session]
            .into_iter()
            .find(|scope| self.path(*scope).exists())
    }

    /// Check if credentials exist in either scope
    pub fn has_credentials(&self) -> bool {
        self.active_scope().is_some()
    }

    /// Drop the session-scoped credentials only
    pub fn clear_session(&self) -> Result<()> {
        let path = self.path(StorageScope::Session);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Clear all stored credentials
    pub fn clear(&self) -> Result<()> {
        for scope in [StorageScope::Local, StorageScope::Session] {
            let path = self.path(scope);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_session() -> AuthSession {
        AuthSession::new("test_access").with_user(
            "employee",
            UserData {
                id: Some(1),
                email: "test@example.com".to_string(),
                full_name: Some("Test User".to_string()),
                ..Default::default()
            },
        )
    }

    fn test_store(temp_dir: &TempDir) -> CredentialStore {
        CredentialStore::with_dir("test_profile", temp_dir.path().to_path_buf()).unwrap()
    }

    #[test]
    fn test_credential_store_creation() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::with_dir("test_profile", temp_dir.path().to_path_buf());
        assert!(store.is_ok());
        assert_eq!(store.unwrap().profile(), "test_profile");
    }

    #[test]
    fn test_save_and_load_local() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        let session = create_test_session();
        store.save(&session, StorageScope::Local).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, Some(session));
        assert_eq!(store.active_scope(), Some(StorageScope::Local));
    }

    #[test]
    fn test_stored_keys_match_web_client() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        store
            .save(&create_test_session(), StorageScope::Session)
            .unwrap();

        let raw = fs::read_to_string(temp_dir.path().join("test_profile").join(SESSION_FILENAME))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["auth_token"], "test_access");
        assert_eq!(json["token_type"], "bearer");
        assert_eq!(json["user_type"], "employee");
        assert_eq!(json["user_data"]["email"], "test@example.com");
    }

    #[test]
    fn test_load_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);
        assert!(store.load().unwrap().is_none());
        assert!(!store.has_credentials());
    }

    #[test]
    fn test_local_preferred_over_session() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store
            .save(&AuthSession::new("session_token"), StorageScope::Session)
            .unwrap();
        assert_eq!(store.load().unwrap().unwrap().access_token, "session_token");

        store
            .save(&AuthSession::new("local_token"), StorageScope::Local)
            .unwrap();
        assert_eq!(store.load().unwrap().unwrap().access_token, "local_token");
    }

    #[test]
    fn test_clear_session_keeps_local() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store
            .save(&create_test_session(), StorageScope::Local)
            .unwrap();
        store
            .save(&create_test_session(), StorageScope::Session)
            .unwrap();

        store.clear_session().unwrap();
        assert!(store.load_scope(StorageScope::Session).unwrap().is_none());
        assert!(store.load_scope(StorageScope::Local).unwrap().is_some());
    }

    #[test]
    fn test_clear_credentials() {
        let temp_dir = TempDir::new().unwrap();
        let store = test_store(&temp_dir);

        store
            .save(&create_test_session(), StorageScope::Local)
            .unwrap();
        store
            .save(&create_test_session(), StorageScope::Session)
            .unwrap();
        assert!(store.has_credentials());

        store.clear().unwrap();
        assert!(!store.has_credentials());
    }
}
