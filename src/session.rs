//! Session credential storage.
//!
//! A [`Session`] is an explicit value: it is loaded from disk by the CLI and
//! handed to [`crate::api::ApiClient::with_session`]. Nothing reads the token
//! from shared global state.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::models::{Role, UserProfile};

/// Credential returned by `/auth/login`, with the profile it belongs to.
#[derive(Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub user: Option<UserProfile>,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<UserProfile>) -> Self {
        Self {
            token: token.into(),
            user,
            created_at: Utc::now(),
        }
    }

    /// Role of the signed-in user; unknown profiles count as plain users.
    pub fn role(&self) -> Role {
        self.user.as_ref().map_or(Role::User, |u| u.role)
    }
}

/// File-backed store for the current session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location, `~/.cabinet/session.json`.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::paths::get_session_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored session, `None` if nobody is signed in.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session file: {}", self.path.display()))?;
        let session = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", self.path.display()))?;
        Ok(Some(session))
    }

    /// Persist a session, replacing any previous one.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_vec_pretty(session).context("Failed to serialize session")?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options
            .open(&self.path)
            .with_context(|| format!("Failed to open session file: {}", self.path.display()))?;

        // `mode` only applies on creation. Narrow an existing file before
        // the token is written.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .with_context(|| format!("Failed to restrict {}", self.path.display()))?;
        }

        file.write_all(&json)
            .with_context(|| format!("Failed to write session file: {}", self.path.display()))?;
        Ok(())
    }

    /// Remove the stored session. Returns whether one existed.
    pub fn clear(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path)
            .with_context(|| format!("Failed to remove session file: {}", self.path.display()))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Id;
    use tempfile::TempDir;

    fn admin() -> UserProfile {
        UserProfile {
            id: Id::new("1"),
            email: "admin@cabinet.fr".into(),
            nom: Some("Bernard".into()),
            prenom: None,
            role: Role::Admin,
        }
    }

    #[test]
    fn test_load_missing_is_none() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
        assert!(!store.clear().unwrap());
    }

    #[test]
    fn test_save_load_clear() {
        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path().join("nested").join("session.json"));

        store.save(&Session::new("tok-123", Some(admin()))).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.token, "tok-123");
        assert_eq!(loaded.role(), Role::Admin);

        assert!(store.clear().unwrap());
        assert!(store.load().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let store = SessionStore::new(tmp.path().join("session.json"));
        store.save(&Session::new("tok", None)).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_session_file_is_narrowed() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = SessionStore::new(&path);
        store.save(&Session::new("tok", None)).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap().unwrap().token, "tok");
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("super-secret", None);
        let debug = format!("{session:?}");
        assert!(!debug.contains("super-secret"));
        assert_eq!(session.role(), Role::User);
    }
}
