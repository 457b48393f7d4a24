//! The authenticated API client.
//!
//! Every operation flows through a single pipeline: attach the stored
//! access token if present, dispatch, and on a 401 perform at most one
//! refresh-and-retry before handing the outcome back to the caller.

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use pylearn_core::error::{AuthError, Error};
use pylearn_core::models::{
    Dashboard, QuestionDetail, RunCodeOutput, SubmitOutput, TopicDetail, TopicSummary, User,
};
use pylearn_core::{
    AccessToken, BaseUrl, Credentials, NewAccount, RefreshToken, Result, TokenPair, TokenStore,
};

use crate::endpoints::{
    CURRENT_USER, CodeRequest, DASHBOARD, LOGIN, LoginRequest, LoginResponse, REFRESH, REGISTER,
    RUN_CODE, RefreshRequest, RefreshResponse, RegisterRequest, RegisterResponse, TOPICS,
    question_path, submit_path, topic_path,
};
use crate::events::{NoopSessionEvents, SessionEvents};
use crate::http::HttpClient;

/// The outcome of a successful registration: the backend logs the new
/// account in immediately by issuing a token pair alongside the user.
#[derive(Debug)]
pub struct RegisterOutput {
    pub message: String,
    pub user: User,
    pub tokens: TokenPair,
}

/// Client for the PyLearn API.
///
/// Cheap to clone (internal `Arc`) and safe to share across tasks. The
/// token store is injected so hosts decide where the credential pair
/// lives; the client only reads and updates it through the refresh
/// pipeline.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    store: Arc<dyn TokenStore>,
    events: Arc<dyn SessionEvents>,
    // Serializes refresh attempts so concurrent 401s don't race each
    // other into the refresh endpoint.
    refresh_gate: Mutex<()>,
}

impl ApiClient {
    /// Create a client with no event hooks.
    pub fn new(base: BaseUrl, store: Arc<dyn TokenStore>) -> Self {
        Self::with_events(base, store, Arc::new(NoopSessionEvents))
    }

    /// Create a client that notifies `events` about session changes.
    pub fn with_events(
        base: BaseUrl,
        store: Arc<dyn TokenStore>,
        events: Arc<dyn SessionEvents>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: HttpClient::new(base),
                store,
                events,
                refresh_gate: Mutex::new(()),
            }),
        }
    }

    /// Returns the API base URL this client is configured for.
    pub fn base(&self) -> &BaseUrl {
        self.inner.http.base()
    }

    /// Returns the token store backing this client.
    pub fn store(&self) -> &dyn TokenStore {
        self.inner.store.as_ref()
    }

    // ========================================================================
    // Auth Operations
    // ========================================================================

    /// Create a new account.
    ///
    /// Returns the new user together with a freshly issued token pair.
    /// The pair is not written to the store; the caller decides whether
    /// registration doubles as login.
    #[instrument(skip(self, account), fields(username = account.username()))]
    pub async fn register(&self, account: &NewAccount) -> Result<RegisterOutput> {
        info!("Registering account");

        let request = RegisterRequest {
            username: account.username(),
            email: account.email(),
            password: account.password(),
            password2: account.password_confirm(),
        };

        let response: RegisterResponse = self.post_with_refresh(REGISTER, &request).await?;

        Ok(RegisterOutput {
            message: response.message,
            user: response.user,
            tokens: TokenPair::new(
                AccessToken::new(response.tokens.access),
                RefreshToken::new(response.tokens.refresh),
            ),
        })
    }

    /// Exchange credentials for a token pair.
    ///
    /// Does not write the store: callers that want a persistent session
    /// pass the pair to [`AuthSession::login`](crate::AuthSession::login)
    /// or save it themselves.
    ///
    /// # Errors
    ///
    /// A 401 from the backend is reported as
    /// [`AuthError::InvalidCredentials`].
    #[instrument(skip(self, credentials), fields(username = credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair> {
        info!("Logging in");

        let request = LoginRequest {
            username: credentials.username(),
            password: credentials.password(),
        };

        match self
            .post_with_refresh::<_, LoginResponse>(LOGIN, &request)
            .await
        {
            Ok(response) => Ok(TokenPair::new(
                AccessToken::new(response.access),
                RefreshToken::new(response.refresh),
            )),
            Err(Error::Api(err)) if err.is_unauthorized() => {
                Err(Error::Auth(AuthError::InvalidCredentials))
            }
            Err(err) => Err(err),
        }
    }

    /// Resolve the user the stored access token belongs to.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User> {
        self.get_with_refresh(CURRENT_USER).await
    }

    // ========================================================================
    // Learning Operations
    // ========================================================================

    /// Fetch the aggregate progress dashboard.
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<Dashboard> {
        self.get_with_refresh(DASHBOARD).await
    }

    /// List all topics with per-user progress flags.
    #[instrument(skip(self))]
    pub async fn topics(&self) -> Result<Vec<TopicSummary>> {
        self.get_with_refresh(TOPICS).await
    }

    /// Fetch a single topic with its questions.
    ///
    /// Locked topics answer 403 and missing ones 404; both surface as
    /// [`Error::Api`] for the caller to present.
    #[instrument(skip(self))]
    pub async fn topic(&self, id: u64) -> Result<TopicDetail> {
        self.get_with_refresh(&topic_path(id)).await
    }

    /// Fetch a single question, including any previously submitted code.
    #[instrument(skip(self))]
    pub async fn question(&self, id: u64) -> Result<QuestionDetail> {
        self.get_with_refresh(&question_path(id)).await
    }

    /// Execute a snippet without grading it.
    #[instrument(skip(self, code))]
    pub async fn run_code(&self, code: &str) -> Result<RunCodeOutput> {
        self.post_with_refresh(RUN_CODE, &CodeRequest { code }).await
    }

    /// Submit a solution for grading.
    #[instrument(skip(self, code))]
    pub async fn submit_code(&self, id: u64, code: &str) -> Result<SubmitOutput> {
        self.post_with_refresh(&submit_path(id), &CodeRequest { code })
            .await
    }

    // ========================================================================
    // Refresh Pipeline
    // ========================================================================

    async fn get_with_refresh<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        self.call_with_refresh::<(), R>(Method::GET, path, None)
            .await
    }

    async fn post_with_refresh<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + fmt::Debug,
        R: DeserializeOwned,
    {
        self.call_with_refresh(Method::POST, path, Some(body)).await
    }

    /// Dispatch one logical request: original call, then at most one
    /// refresh and one retry.
    async fn call_with_refresh<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<R>
    where
        B: Serialize + fmt::Debug,
        R: DeserializeOwned,
    {
        let access = self.inner.store.read()?.access;
        let outcome = self
            .inner
            .http
            .send(method.clone(), path, body, access.as_ref())
            .await;

        let err = match outcome {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        // Only an authorization failure is recoverable here.
        let unauthorized = matches!(&err, Error::Api(api) if api.is_unauthorized());
        if !unauthorized {
            return Err(err);
        }

        // Without a refresh token the original failure stands.
        if self.inner.store.read()?.refresh.is_none() {
            return Err(err);
        }

        debug!(path, "unauthorized response; attempting token refresh");
        let access = self.refresh_access(access.as_ref()).await?;

        // Exactly one retry; its outcome is final even if it fails again.
        self.inner.http.send(method, path, body, Some(&access)).await
    }

    /// Obtain a fresh access token, updating the store.
    ///
    /// Refreshes are serialized behind a gate. A caller that waited on the
    /// gate and then finds an access token different from the one its
    /// request failed with adopts that newer token instead of spending its
    /// own refresh call.
    #[instrument(skip(self, stale))]
    async fn refresh_access(&self, stale: Option<&AccessToken>) -> Result<AccessToken> {
        let _gate = self.inner.refresh_gate.lock().await;

        let snapshot = self.inner.store.read()?;
        if let (Some(current), Some(stale)) = (&snapshot.access, stale) {
            if current != stale {
                debug!("adopting access token refreshed by a concurrent request");
                return Ok(current.clone());
            }
        }

        // The store may have been cleared while we waited on the gate.
        let refresh = snapshot
            .refresh
            .ok_or(Error::Auth(AuthError::RefreshTokenMissing))?;

        info!("Refreshing access token");
        let request = RefreshRequest {
            refresh: refresh.as_str(),
        };

        match self
            .inner
            .http
            .post::<_, RefreshResponse>(REFRESH, &request, None)
            .await
        {
            Ok(response) => {
                let access = AccessToken::new(response.access);
                self.inner.store.save_access(&access)?;
                debug!("Access token refreshed");
                Ok(access)
            }
            Err(source) => {
                // The session is unrecoverable: drop the pair and tell the
                // host, then report the refresh failure rather than the
                // original 401.
                self.inner.store.clear()?;
                self.inner.events.session_expired();
                Err(Error::Auth(AuthError::RefreshRejected {
                    source: Box::new(source),
                }))
            }
        }
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", self.inner.http.base())
            .finish_non_exhaustive()
    }
}
