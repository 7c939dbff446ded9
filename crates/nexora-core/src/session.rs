//! Session persistence
//!
//! The current account snapshot and its bearer token live in their own
//! key-value slots, owned by whichever store backend was constructed.
//! Reads never fail: an absent or unparsable snapshot simply means nobody
//! is signed in.

use tracing::debug;

use crate::error::Result;
use crate::models::Account;
use crate::store::kv::KvStore;

const SESSION_KEY: &str = "nexora_session";
const TOKEN_KEY: &str = "nexora_token";

/// Durable session slot shared by both store backends
#[derive(Debug, Clone)]
pub struct SessionStore {
    kv: KvStore,
}

impl SessionStore {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }

    /// Persist the signed-in account and, when present, its bearer token
    pub fn save(&self, account: &Account, token: Option<&str>) -> Result<()> {
        self.kv.put(SESSION_KEY, account)?;
        match token {
            Some(token) => self.kv.put(TOKEN_KEY, &token.to_string())?,
            None => self.kv.remove(TOKEN_KEY)?,
        }
        debug!(email = %account.email, "Session saved");
        Ok(())
    }

    /// Clear the session unconditionally; always succeeds
    pub fn clear(&self) {
        let _ = self.kv.remove(SESSION_KEY);
        let _ = self.kv.remove(TOKEN_KEY);
    }

    /// Last persisted account snapshot, or None when absent/unparsable
    pub fn current(&self) -> Option<Account> {
        self.kv.get(SESSION_KEY).ok().flatten()
    }

    /// Bearer token for the current session, if one was issued
    pub fn token(&self) -> Option<String> {
        self.kv.get(TOKEN_KEY).ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account() -> Account {
        Account {
            id: "u1".to_string(),
            name: "Asha".to_string(),
            email: "asha@nexora.dev".to_string(),
            position: "Founder".to_string(),
            password: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_absent_session_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionStore::new(KvStore::open(dir.path()).unwrap());
        assert!(sessions.current().is_none());
        assert!(sessions.token().is_none());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionStore::new(KvStore::open(dir.path()).unwrap());

        sessions.save(&account(), Some("tok-123")).unwrap();
        assert_eq!(sessions.current().unwrap().email, "asha@nexora.dev");
        assert_eq!(sessions.token().as_deref(), Some("tok-123"));

        sessions.clear();
        assert!(sessions.current().is_none());
        assert!(sessions.token().is_none());

        // Clearing an already-empty session is fine
        sessions.clear();
    }

    #[test]
    fn test_save_without_token_drops_stale_token() {
        let dir = tempfile::tempdir().unwrap();
        let sessions = SessionStore::new(KvStore::open(dir.path()).unwrap());

        sessions.save(&account(), Some("tok-123")).unwrap();
        sessions.save(&account(), None).unwrap();
        assert!(sessions.token().is_none());
    }

    #[test]
    fn test_corrupt_snapshot_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("nexora_session.json"), "{not json").unwrap();
        let sessions = SessionStore::new(KvStore::open(dir.path()).unwrap());
        assert!(sessions.current().is_none());
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let sessions = SessionStore::new(KvStore::open(dir.path()).unwrap());
            sessions.save(&account(), Some("tok-123")).unwrap();
        }
        let sessions = SessionStore::new(KvStore::open(dir.path()).unwrap());
        assert_eq!(sessions.current().unwrap().id, "u1");
        assert_eq!(sessions.token().as_deref(), Some("tok-123"));
    }
}
