//! Process-wide authentication state.

use std::sync::RwLock;

use tracing::{debug, info, instrument};

use pylearn_core::models::User;
use pylearn_core::{Result, TokenPair};

use crate::client::ApiClient;

/// The client-side belief about who is signed in.
#[derive(Debug, Clone, Default)]
pub enum AuthState {
    /// Startup validation has not completed yet.
    #[default]
    Unknown,
    /// No user is signed in.
    Anonymous,
    /// A user record is held. This says nothing about whether the stored
    /// tokens are still valid on the backend; staleness is discovered by
    /// the next failing call.
    Authenticated(User),
}

impl AuthState {
    /// Returns true while startup validation is pending.
    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Unknown)
    }

    /// Returns true iff a user record is held.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

/// Owner of the session state.
///
/// Consumers read the state and call [`login`](Self::login) /
/// [`logout`](Self::logout); they never mutate it directly. Session
/// validity is evaluated exactly once, at [`bootstrap`](Self::bootstrap);
/// afterwards local state is trusted until a request elsewhere fails.
pub struct AuthSession {
    client: ApiClient,
    state: RwLock<AuthState>,
}

impl AuthSession {
    /// Create a session provider in the `Unknown` state.
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: RwLock::new(AuthState::Unknown),
        }
    }

    /// Validate any stored token against the backend, settling the state.
    ///
    /// With no stored access token this resolves to `Anonymous` without a
    /// network call. Otherwise the current-user endpoint decides: success
    /// authenticates; any failure (including a failed transparent refresh)
    /// clears the store and resolves to `Anonymous`.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self) -> Result<()> {
        let snapshot = self.client.store().read()?;
        if snapshot.access.is_none() {
            debug!("no stored access token");
            *self.state.write().unwrap() = AuthState::Anonymous;
            return Ok(());
        }

        match self.client.current_user().await {
            Ok(user) => {
                info!(username = %user.username, "Restored session");
                *self.state.write().unwrap() = AuthState::Authenticated(user);
            }
            Err(err) => {
                debug!(error = %err, "Stored session rejected; clearing tokens");
                self.client.store().clear()?;
                *self.state.write().unwrap() = AuthState::Anonymous;
            }
        }

        Ok(())
    }

    /// Record a completed login/register exchange.
    ///
    /// Persists the pair and authenticates with the given user record.
    /// Does not call the backend.
    pub fn login(&self, user: User, tokens: &TokenPair) -> Result<()> {
        self.client.store().save(tokens)?;
        *self.state.write().unwrap() = AuthState::Authenticated(user);
        Ok(())
    }

    /// Clear the stored pair and become `Anonymous`. Idempotent.
    pub fn logout(&self) -> Result<()> {
        self.client.store().clear()?;
        *self.state.write().unwrap() = AuthState::Anonymous;
        Ok(())
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state.read().unwrap().clone()
    }

    /// Returns the signed-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        match &*self.state.read().unwrap() {
            AuthState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// Returns true iff a user record is held.
    pub fn is_authenticated(&self) -> bool {
        self.state.read().unwrap().is_authenticated()
    }

    /// Returns true while startup validation is pending.
    pub fn is_loading(&self) -> bool {
        self.state.read().unwrap().is_loading()
    }

    /// Returns the underlying API client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("state", &*self.state.read().unwrap())
            .finish_non_exhaustive()
    }
}
