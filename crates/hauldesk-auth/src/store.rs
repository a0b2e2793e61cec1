//! In-memory token lifecycle store.
//!
//! Maps each live access credential to its paired refresh credential,
//! owning account, and expiry. Process-lifetime only: a restart loses all
//! pairs and forces re-authentication. The [`TokenStore`] trait keeps
//! callers independent of this implementation so the store can later be
//! externalized without touching them.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// A live access/refresh credential pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPair {
    pub access: String,
    pub refresh: String,
    pub account_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Synchronous, process-wide credential pair store.
pub trait TokenStore: Send + Sync {
    /// Register a pair, superseding any existing pair for the same
    /// account (at most one live pair per account).
    fn store(&self, pair: CredentialPair);

    /// The paired refresh credential for an access credential, or `None`.
    /// An expired pair is evicted and reported as absent; a second lookup
    /// also returns `None` without error.
    fn lookup_refresh(&self, access: &str) -> Option<String>;

    /// The full pair for an access credential, with the same
    /// expiry-eviction semantics as [`TokenStore::lookup_refresh`].
    fn get(&self, access: &str) -> Option<CredentialPair>;

    /// Evict the pair stored under an access credential.
    fn remove(&self, access: &str);

    /// Evict whatever pair the account currently holds.
    fn remove_all_for_account(&self, account_id: i64);

    /// Atomically replace the pair under `old_access` with a new one for
    /// the same account. Returns the new pair, or `None` when no pair was
    /// stored under `old_access`.
    fn rotate(
        &self,
        old_access: &str,
        new_access: String,
        new_refresh: String,
        new_expires_at: DateTime<Utc>,
    ) -> Option<CredentialPair>;

    /// Evict every pair past its expiry; returns how many were dropped.
    /// Safe to run concurrently with ordinary mutations.
    fn sweep_expired(&self) -> usize;
}

#[derive(Debug)]
struct Entry {
    refresh: String,
    account_id: i64,
    expires_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct Indices {
    /// access credential → pair data.
    by_access: HashMap<String, Entry>,
    /// account id → access credential, for account-wide invalidation.
    by_account: HashMap<i64, String>,
}

impl Indices {
    fn evict_access(&mut self, access: &str) -> Option<Entry> {
        let entry = self.by_access.remove(access)?;
        // Only clear the reverse index if it still points at this access
        // credential; a newer pair may have overwritten it.
        if self
            .by_account
            .get(&entry.account_id)
            .is_some_and(|a| a == access)
        {
            self.by_account.remove(&entry.account_id);
        }
        Some(entry)
    }

    fn insert(&mut self, pair: CredentialPair) {
        if let Some(old_access) = self.by_account.remove(&pair.account_id) {
            self.by_access.remove(&old_access);
        }
        self.by_account
            .insert(pair.account_id, pair.access.clone());
        self.by_access.insert(
            pair.access,
            Entry {
                refresh: pair.refresh,
                account_id: pair.account_id,
                expires_at: pair.expires_at,
            },
        );
    }
}

/// The default in-memory [`TokenStore`]. Both indices live under a single
/// lock so every operation observes them consistent.
#[derive(Debug, Default)]
pub struct TokenLifecycleStore {
    inner: RwLock<Indices>,
}

impl TokenLifecycleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get_unexpired(&self, access: &str) -> Option<CredentialPair> {
        let mut inner = self.inner.write();
        let expired = match inner.by_access.get(access) {
            Some(entry) => Utc::now() > entry.expires_at,
            None => return None,
        };
        if expired {
            inner.evict_access(access);
            return None;
        }
        inner.by_access.get(access).map(|entry| CredentialPair {
            access: access.to_string(),
            refresh: entry.refresh.clone(),
            account_id: entry.account_id,
            expires_at: entry.expires_at,
        })
    }
}

impl TokenStore for TokenLifecycleStore {
    fn store(&self, pair: CredentialPair) {
        self.inner.write().insert(pair);
    }

    fn lookup_refresh(&self, access: &str) -> Option<String> {
        self.get_unexpired(access).map(|pair| pair.refresh)
    }

    fn get(&self, access: &str) -> Option<CredentialPair> {
        self.get_unexpired(access)
    }

    fn remove(&self, access: &str) {
        self.inner.write().evict_access(access);
    }

    fn remove_all_for_account(&self, account_id: i64) {
        let mut inner = self.inner.write();
        if let Some(access) = inner.by_account.remove(&account_id) {
            inner.by_access.remove(&access);
        }
    }

    fn rotate(
        &self,
        old_access: &str,
        new_access: String,
        new_refresh: String,
        new_expires_at: DateTime<Utc>,
    ) -> Option<CredentialPair> {
        let mut inner = self.inner.write();
        let old = inner.evict_access(old_access)?;
        let pair = CredentialPair {
            access: new_access,
            refresh: new_refresh,
            account_id: old.account_id,
            expires_at: new_expires_at,
        };
        inner.insert(pair.clone());
        Some(pair)
    }

    fn sweep_expired(&self) -> usize {
        let mut inner = self.inner.write();
        let now = Utc::now();
        let dead: Vec<String> = inner
            .by_access
            .iter()
            .filter(|(_, entry)| now > entry.expires_at)
            .map(|(access, _)| access.clone())
            .collect();
        for access in &dead {
            inner.evict_access(access);
        }
        dead.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn pair(access: &str, refresh: &str, account_id: i64, ttl_secs: i64) -> CredentialPair {
        CredentialPair {
            access: access.into(),
            refresh: refresh.into(),
            account_id,
            expires_at: Utc::now() + Duration::seconds(ttl_secs),
        }
    }

    fn store_with(pairs: &[CredentialPair]) -> TokenLifecycleStore {
        let store = TokenLifecycleStore::new();
        for p in pairs {
            store.store(p.clone());
        }
        store
    }

    #[test]
    fn store_and_lookup() {
        let store = store_with(&[pair("a1", "r1", 1, 60)]);
        assert_eq!(store.lookup_refresh("a1"), Some("r1".into()));
        assert_eq!(store.lookup_refresh("missing"), None);
    }

    #[test]
    fn newest_pair_supersedes() {
        let store = store_with(&[pair("a1", "r1", 1, 60), pair("a2", "r2", 1, 60)]);
        // Only the latest pair survives for account 1.
        assert_eq!(store.lookup_refresh("a1"), None);
        assert_eq!(store.lookup_refresh("a2"), Some("r2".into()));
    }

    #[test]
    fn expired_pair_is_evicted_idempotently() {
        let store = store_with(&[pair("a1", "r1", 1, -5)]);
        assert_eq!(store.lookup_refresh("a1"), None);
        // Second lookup still None, no error.
        assert_eq!(store.lookup_refresh("a1"), None);
        assert!(store.get("a1").is_none());
    }

    #[test]
    fn remove_clears_both_indices() {
        let store = store_with(&[pair("a1", "r1", 1, 60)]);
        store.remove("a1");
        assert_eq!(store.lookup_refresh("a1"), None);
        // The account index is clear too: storing a new pair works and
        // does not resurrect the old access credential.
        store.store(pair("a2", "r2", 1, 60));
        assert_eq!(store.lookup_refresh("a1"), None);
        assert_eq!(store.lookup_refresh("a2"), Some("r2".into()));
    }

    #[test]
    fn remove_all_for_account() {
        let store = store_with(&[pair("a1", "r1", 1, 60), pair("b1", "r2", 2, 60)]);
        store.remove_all_for_account(1);
        assert_eq!(store.lookup_refresh("a1"), None);
        assert_eq!(store.lookup_refresh("b1"), Some("r2".into()));
    }

    #[test]
    fn rotate_replaces_pair_atomically() {
        let store = store_with(&[pair("a1", "r1", 1, 60)]);
        let rotated = store
            .rotate("a1", "a2".into(), "r2".into(), Utc::now() + Duration::seconds(60))
            .unwrap();
        assert_eq!(rotated.account_id, 1);
        assert_eq!(store.lookup_refresh("a1"), None);
        assert_eq!(store.lookup_refresh("a2"), Some("r2".into()));
    }

    #[test]
    fn rotate_unknown_access_is_none() {
        let store = store_with(&[]);
        assert!(
            store
                .rotate("ghost", "a".into(), "r".into(), Utc::now())
                .is_none()
        );
    }

    #[test]
    fn sweep_evicts_only_expired() {
        let store = store_with(&[
            pair("dead1", "r", 1, -10),
            pair("dead2", "r", 2, -1),
            pair("live", "r", 3, 60),
        ]);
        assert_eq!(store.sweep_expired(), 2);
        assert_eq!(store.lookup_refresh("live"), Some("r".into()));
        assert_eq!(store.sweep_expired(), 0);
    }

    #[test]
    fn stale_reverse_index_is_not_clobbered() {
        let store = store_with(&[pair("a1", "r1", 1, 60)]);
        store.store(pair("a2", "r2", 1, 60));
        // Removing the superseded access credential must not drop the
        // account's live pair.
        store.remove("a1");
        assert_eq!(store.lookup_refresh("a2"), Some("r2".into()));
    }
}
