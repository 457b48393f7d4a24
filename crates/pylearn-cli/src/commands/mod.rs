//! CLI command implementations.

pub mod dashboard;
pub mod login;
pub mod logout;
pub mod question;
pub mod register;
pub mod run;
pub mod submit;
pub mod topic;
pub mod topics;
pub mod whoami;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::{fs, io};

use anyhow::{Context, Result};

use pylearn_client::{ApiClient, SessionEvents};
use pylearn_core::BaseUrl;

use crate::output;
use crate::store::FileTokenStore;

/// Session hook that tells the user how to recover an expired session.
struct CliSessionEvents;

impl SessionEvents for CliSessionEvents {
    fn session_expired(&self) {
        tracing::debug!("stored tokens cleared after rejected refresh");
        output::error("Session expired. Run 'pylearn login' to sign in again.");
    }
}

/// Build an API client backed by the on-disk token store.
pub(crate) fn build_client(api_url: &str) -> Result<ApiClient> {
    let base = BaseUrl::new(api_url).context("Invalid API URL")?;
    let store = Arc::new(FileTokenStore::default_path()?);

    Ok(ApiClient::with_events(
        base,
        store,
        Arc::new(CliSessionEvents),
    ))
}

/// Read a snippet from a file, or from stdin when the path is absent or `-`.
pub(crate) fn read_code(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut code = String::new();
            io::stdin()
                .read_to_string(&mut code)
                .context("Failed to read code from stdin")?;
            Ok(code)
        }
    }
}
