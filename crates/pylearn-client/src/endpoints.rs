//! API endpoint paths and request/response wire types.

use serde::{Deserialize, Serialize};

use pylearn_core::models::User;

// ============================================================================
// Endpoint Paths
// ============================================================================

/// POST — create an account.
pub(crate) const REGISTER: &str = "/auth/register/";

/// POST — exchange credentials for a token pair.
pub(crate) const LOGIN: &str = "/auth/login/";

/// POST — exchange a refresh token for a new access token.
pub(crate) const REFRESH: &str = "/auth/refresh/";

/// GET — resolve the current user from the access token.
pub(crate) const CURRENT_USER: &str = "/auth/user/";

/// GET — aggregate progress summary.
pub(crate) const DASHBOARD: &str = "/dashboard/";

/// GET — list all topics.
pub(crate) const TOPICS: &str = "/topics/";

/// POST — execute a snippet without grading.
pub(crate) const RUN_CODE: &str = "/run-code/";

/// GET — topic detail with nested questions.
pub(crate) fn topic_path(id: u64) -> String {
    format!("/topics/{id}/")
}

/// GET — question detail.
pub(crate) fn question_path(id: u64) -> String {
    format!("/questions/{id}/")
}

/// POST — grade a submission for a question.
pub(crate) fn submit_path(id: u64) -> String {
    format!("/submit/{id}/")
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from login.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub access: String,
    pub refresh: String,
}

/// Request body for token refresh.
#[derive(Debug, Serialize)]
pub(crate) struct RefreshRequest<'a> {
    pub refresh: &'a str,
}

/// Response from token refresh.
///
/// Only a new access token is issued; the refresh token is unchanged.
#[derive(Debug, Deserialize)]
pub(crate) struct RefreshResponse {
    pub access: String,
}

/// Request body for registration.
#[derive(Debug, Serialize)]
pub(crate) struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub password2: &'a str,
}

/// Response from registration.
#[derive(Debug, Deserialize)]
pub(crate) struct RegisterResponse {
    pub message: String,
    pub user: User,
    pub tokens: IssuedTokens,
}

/// A freshly issued token pair, as serialized by the backend.
#[derive(Debug, Deserialize)]
pub(crate) struct IssuedTokens {
    pub access: String,
    pub refresh: String,
}

/// Request body for run-code and submit.
#[derive(Debug, Serialize)]
pub(crate) struct CodeRequest<'a> {
    pub code: &'a str,
}
