//! HTTP client for the movie catalog API. Owns the CSRF token lifecycle and
//! issues credentialed requests through an explicit [`CredentialStore`]
//! cookie jar. Writes go through `post_json`, which re-acquires the token
//! and retries exactly once when the backend rejects the attempt with 403;
//! reads go through `get_json` and are never retried.

pub mod credentials;
pub mod error;

use credentials::CredentialStore;
use error::ApiError;
use reqwest::header::{COOKIE, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info_span, Instrument};
use url::Url;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

/// Header carrying the CSRF token on state-changing requests.
const CSRF_HEADER: &str = "X-CSRFToken";
/// Cookie the backend sets alongside the session.
const CSRF_COOKIE: &str = "csrftoken";
/// JSON field of the bootstrap response, when the backend returns one.
const CSRF_FIELD: &str = "csrfToken";
/// Session-bootstrap endpoint issuing the token.
const CSRF_PATH: &str = "/auth/csrf/";

pub struct ApiClient {
    http: Client,
    base_url: String,
    store: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Build a client against `base_url`, using `store` as the cookie jar.
    ///
    /// # Errors
    /// Returns an error if `base_url` cannot be parsed, has no host, or uses
    /// an unsupported scheme.
    pub fn new(base_url: &str, store: Arc<dyn CredentialStore>) -> Result<Self, ApiError> {
        let url = Url::parse(base_url).map_err(|err| ApiError::BaseUrl(err.to_string()))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(ApiError::BaseUrl(format!("unsupported scheme {scheme}")));
            }
        }

        if url.host().is_none() {
            return Err(ApiError::BaseUrl("no host specified".to_string()));
        }

        let http = Client::builder().user_agent(APP_USER_AGENT).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
        })
    }

    /// Fetch the current CSRF token from the session-bootstrap endpoint.
    ///
    /// The token comes from the `csrfToken` field of the response body when
    /// present, otherwise from the `csrftoken` cookie the response sets. An
    /// empty string means "no token available" and is not an error; the
    /// retry path in [`post_json`](Self::post_json) covers it.
    ///
    /// # Errors
    /// Returns an error if the bootstrap request fails, returns a
    /// non-success status, or the body is not JSON.
    pub async fn acquire_token(&self) -> Result<String, ApiError> {
        let url = self.endpoint_url(CSRF_PATH);

        let span = info_span!(
            "client.acquire_token",
            http.method = "GET",
            url = %url
        );
        let response = self
            .credentialed(self.http.get(&url))
            .send()
            .instrument(span)
            .await?;

        self.observe_cookies(&response);

        let response = response.error_for_status()?;
        let json_response: Value = response.json().await?;

        if let Some(token) = json_response.get(CSRF_FIELD).and_then(Value::as_str) {
            return Ok(token.to_string());
        }

        Ok(self.store.get(CSRF_COOKIE).unwrap_or_default())
    }

    /// Issue a credentialed POST with the CSRF token attached, retrying
    /// exactly once with a fresh token if the backend answers 403. A second
    /// rejection is terminal, so a call makes at most two POST attempts.
    ///
    /// The token is re-acquired on every call rather than cached; the jar is
    /// shared state the backend may rotate between calls.
    ///
    /// # Errors
    /// Returns an error if token acquisition fails, the request cannot be
    /// sent, or the (possibly retried) response is a non-success status.
    pub async fn post_json<B, T>(&self, path: &str, payload: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(path);

        let span = info_span!(
            "client.post_json",
            http.method = "POST",
            url = %url
        );
        let response = self
            .send_with_token(|token| {
                self.credentialed(self.http.post(&url))
                    .header(CSRF_HEADER, token)
                    .json(payload)
            })
            .instrument(span)
            .await?;

        Self::parse_success(response).await
    }

    /// Issue a credentialed GET. Empty query values are omitted and the
    /// caller's ordering is preserved. Reads are not state-changing, so
    /// there is no token and no retry: exactly one attempt per call.
    ///
    /// # Errors
    /// Returns an error if the request cannot be sent or the response is a
    /// non-success status.
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, &str)]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint_url(path);

        let pairs: Vec<(&str, &str)> = query
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .copied()
            .collect();

        let mut request = self.credentialed(self.http.get(&url));
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }

        let span = info_span!(
            "client.get_json",
            http.method = "GET",
            url = %url
        );
        let response = request.send().instrument(span).await?;

        self.observe_cookies(&response);

        Self::parse_success(response).await
    }

    /// Acquire a token, send the request it parametrizes, and on a 403
    /// rejection re-acquire and send once more. Shared by every
    /// token-guarded path so the one-retry bound lives in a single place.
    async fn send_with_token<F>(&self, build: F) -> Result<Response, ApiError>
    where
        F: Fn(&str) -> RequestBuilder,
    {
        let token = self.acquire_token().await?;

        let response = build(&token).send().await?;
        self.observe_cookies(&response);

        if response.status() != StatusCode::FORBIDDEN {
            return Ok(response);
        }

        debug!("rejected with 403, refreshing token and retrying once");

        let token = self.acquire_token().await?;

        let response = build(&token).send().await?;
        self.observe_cookies(&response);

        Ok(response)
    }

    async fn parse_success<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(ApiError::Request {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Attach the jar's `Cookie` header, when the jar has anything to send.
    fn credentialed(&self, request: RequestBuilder) -> RequestBuilder {
        match self.store.cookie_header() {
            Some(header) => request.header(COOKIE, header),
            None => request,
        }
    }

    /// Feed every `Set-Cookie` response header to the jar.
    fn observe_cookies(&self, response: &Response) {
        for value in response.headers().get_all(SET_COOKIE) {
            if let Ok(value) = value.to_str() {
                self.store.observe(value);
            }
        }
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
