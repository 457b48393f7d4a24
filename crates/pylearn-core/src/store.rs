//! Token persistence.
//!
//! The token store is the single durable slot holding the access/refresh
//! pair. It is deliberately dumb: no validation, no expiry tracking. The
//! trait exists so hosts can substitute their own persistence (the CLI
//! stores a file; tests use [`MemoryTokenStore`]).

use std::sync::RwLock;

use crate::tokens::{AccessToken, TokenPair, TokenSnapshot};
use crate::Result;

/// Durable storage for the session's credential pair.
///
/// Writes follow a last-writer-wins discipline; there is no transaction
/// around read-then-write sequences.
pub trait TokenStore: Send + Sync {
    /// Returns the currently stored tokens. Either half may be absent.
    fn read(&self) -> Result<TokenSnapshot>;

    /// Persist both halves of a credential pair.
    fn save(&self, pair: &TokenPair) -> Result<()>;

    /// Replace only the access token, leaving any refresh token in place.
    ///
    /// This is the refresh-success path: the refresh endpoint issues a new
    /// access token but the refresh token itself is unchanged.
    fn save_access(&self, token: &AccessToken) -> Result<()>;

    /// Remove both tokens. Idempotent.
    fn clear(&self) -> Result<()>;
}

/// An in-memory token store.
///
/// Used in tests and by hosts that manage persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    slot: RwLock<TokenSnapshot>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with a snapshot.
    pub fn with_tokens(snapshot: TokenSnapshot) -> Self {
        Self {
            slot: RwLock::new(snapshot),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn read(&self) -> Result<TokenSnapshot> {
        Ok(self.slot.read().unwrap().clone())
    }

    fn save(&self, pair: &TokenPair) -> Result<()> {
        let mut slot = self.slot.write().unwrap();
        slot.access = Some(pair.access.clone());
        slot.refresh = Some(pair.refresh.clone());
        Ok(())
    }

    fn save_access(&self, token: &AccessToken) -> Result<()> {
        self.slot.write().unwrap().access = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.write().unwrap() = TokenSnapshot::default();
        Ok(())
    }
}
