//! pylearn-client - Authenticated HTTP session client for the PyLearn API.
//!
//! All API operations flow through an [`ApiClient`], which attaches the
//! stored access token to outbound calls and transparently performs a
//! one-shot token refresh and retry when the backend answers 401.
//! [`AuthSession`] layers process-wide authentication state on top.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use pylearn_client::ApiClient;
//! use pylearn_core::{BaseUrl, Credentials, MemoryTokenStore};
//!
//! # async fn example() -> Result<(), pylearn_core::Error> {
//! let base = BaseUrl::new("https://pylearn.example.com/api")?;
//! let store = Arc::new(MemoryTokenStore::new());
//! let client = ApiClient::new(base, store);
//!
//! let tokens = client.login(&Credentials::new("ada", "hunter2")).await?;
//! client.store().save(&tokens)?;
//!
//! let dashboard = client.dashboard().await?;
//! println!("{} topics", dashboard.topics.len());
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod endpoints;
mod events;
mod http;

pub use auth::{AuthSession, AuthState};
pub use client::{ApiClient, RegisterOutput};
pub use events::{NoopSessionEvents, SessionEvents};
