//! HTTP transport for the PyLearn API.

use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, trace};

use pylearn_core::error::{ApiError, Error, TransportError};
use pylearn_core::{AccessToken, BaseUrl};

/// Thin wrapper over reqwest that knows the API base URL and the backend's
/// error body conventions. Authorization is the caller's concern: a token
/// is passed per call, never stored here.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    base: BaseUrl,
}

impl HttpClient {
    /// Create a new HTTP client for the given API base URL.
    pub fn new(base: BaseUrl) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pylearn/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("failed to build HTTP client");

        Self { client, base }
    }

    /// Returns the base URL this client is configured for.
    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    /// Make a GET request.
    pub async fn get<R>(&self, path: &str, token: Option<&AccessToken>) -> Result<R, Error>
    where
        R: DeserializeOwned,
    {
        self.send::<(), R>(Method::GET, path, None, token).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post<B, R>(
        &self,
        path: &str,
        body: &B,
        token: Option<&AccessToken>,
    ) -> Result<R, Error>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        self.send(Method::POST, path, Some(body), token).await
    }

    /// Dispatch a single request and decode the response.
    pub async fn send<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        token: Option<&AccessToken>,
    ) -> Result<R, Error>
    where
        B: Serialize + std::fmt::Debug,
        R: DeserializeOwned,
    {
        let url = self.base.endpoint_url(path);
        debug!(%method, path, authenticated = token.is_some(), "API request");
        trace!(?body, "request body");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            request = request.headers(auth_headers(token));
        }

        let response = request.send().await.map_err(transport_error)?;
        self.handle_response(response).await
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<R, Error> {
        let status = response.status();
        trace!(status = %status, "API response");

        if status.is_success() {
            let body = response.json::<R>().await.map_err(transport_error)?;
            Ok(body)
        } else {
            Err(Error::Api(parse_error_response(response).await))
        }
    }
}

/// Create authorization headers for authenticated requests.
fn auth_headers(token: &AccessToken) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let auth_value = format!("Bearer {}", token.as_str());
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&auth_value).expect("invalid token characters"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Parse a non-2xx response into an [`ApiError`].
async fn parse_error_response(response: reqwest::Response) -> ApiError {
    let status = response.status().as_u16();

    // The error body may be a detail message, a field-error map, or not
    // JSON at all (proxies, HTML error pages).
    match response.json::<serde_json::Value>().await {
        Ok(body) => ApiError::from_body(status, Some(body)),
        Err(_) => ApiError::from_body(status, None),
    }
}

/// Map a reqwest failure into the transport taxonomy.
fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}
