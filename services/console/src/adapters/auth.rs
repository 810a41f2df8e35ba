//! services/console/src/adapters/auth.rs
//!
//! The file-backed authentication store: a stand-in for the browser's two
//! local-storage keys (the signed-in flag and the username).
//!
//! The credential check itself is a client-side static-secret comparison
//! against the configured admin pair. It is not a sound security mechanism
//! and is not meant to be one; the hosted console worked the same way.

use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;

/// The literal flag value the browser client stored under its token key.
const AUTH_TOKEN_VALUE: &str = "authenticated";

#[derive(Serialize, Deserialize)]
struct StoredAuth {
    token: String,
    user: String,
}

/// Owns the persisted sign-in state. Constructed once by the composition
/// root and passed down; read once at startup, written only on login/logout.
#[derive(Debug, Clone)]
pub struct AuthStore {
    path: PathBuf,
}

impl AuthStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the signed-in username, if the flag is present and valid.
    /// A missing or unreadable state file simply means "not signed in".
    pub fn load(&self) -> io::Result<Option<String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        match serde_json::from_str::<StoredAuth>(&raw) {
            Ok(stored) if stored.token == AUTH_TOKEN_VALUE => Ok(Some(stored.user)),
            _ => Ok(None),
        }
    }

    /// Persists the signed-in flag and username.
    pub fn login(&self, user: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let stored = StoredAuth {
            token: AUTH_TOKEN_VALUE.to_string(),
            user: user.to_string(),
        };
        let raw = serde_json::to_string_pretty(&stored)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, raw)
    }

    /// Clears the signed-in state. Signing out twice is not an error.
    pub fn logout(&self) -> io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// Compares the entered credentials against the configured admin pair.
pub fn verify_credentials(config: &Config, username: &str, password: &str) -> bool {
    username == config.admin_username && password == config.admin_password
}

//=========================================================================================
// Tests
//=========================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_store(name: &str) -> AuthStore {
        let path = std::env::temp_dir()
            .join(format!("botverse-auth-{}-{}", std::process::id(), name))
            .join("session.json");
        let store = AuthStore::new(path);
        store.logout().unwrap();
        store
    }

    #[test]
    fn starts_signed_out() {
        let store = scratch_store("fresh");
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn login_then_load_round_trips_the_username() {
        let store = scratch_store("login");
        store.login("botverse_admin").unwrap();
        assert_eq!(store.load().unwrap(), Some("botverse_admin".to_string()));

        store.logout().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn logout_is_idempotent() {
        let store = scratch_store("logout");
        store.logout().unwrap();
        store.logout().unwrap();
    }

    #[test]
    fn a_corrupt_state_file_reads_as_signed_out() {
        let store = scratch_store("corrupt");
        std::fs::create_dir_all(store.path.parent().unwrap()).unwrap();
        std::fs::write(&store.path, "not json").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
