//! Host-application hooks for session lifecycle events.

/// Callbacks the [`ApiClient`](crate::ApiClient) invokes when the session
/// changes underneath the host application.
///
/// The client never forces navigation or exits; when a refresh attempt is
/// rejected it clears the stored tokens and notifies the host through this
/// trait, leaving the response (re-prompt, redirect, message) to the UI
/// layer.
pub trait SessionEvents: Send + Sync {
    /// Called after a rejected token refresh has cleared the stored
    /// credential pair. The session cannot recover without a new login.
    fn session_expired(&self) {}
}

/// Default implementation that ignores all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionEvents;

impl SessionEvents for NoopSessionEvents {}
