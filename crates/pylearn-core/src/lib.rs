//! pylearn-core - Core types and traits for the PyLearn client toolkit.

pub mod credentials;
pub mod error;
pub mod models;
pub mod store;
pub mod tokens;
pub mod types;

pub use credentials::{Credentials, NewAccount};
pub use error::Error;
pub use store::{MemoryTokenStore, TokenStore};
pub use tokens::{AccessToken, RefreshToken, TokenPair, TokenSnapshot};
pub use types::BaseUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
