//! # HTTP client for the Taskly backend
//!
//! [`ApiClient::request`] is the single path every service call goes through:
//!
//! 1. Join the configured base URL and the endpoint with exactly one `/`.
//! 2. Read the bearer token from the injected [`Session`] and attach
//!    `Authorization: Bearer <token>` when one is present.
//! 3. Set `Content-Type: application/json` unless the body is multipart.
//! 4. Merge the caller's headers over those defaults (caller wins).
//! 5. Send, then decode a 2xx body as `T` or classify the failure as an
//!    [`ApiError`].
//!
//! A 401 also drops the stored token and asks the [`Navigator`] to go to
//! [`SIGN_IN_PATH`]. Every failure is logged with its status, message, URL,
//! method and raw body.
//!
//! Steps 1-4 are exposed on their own as [`ApiClient::prepare`].

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName, AUTHORIZATION, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use store::{Session, SessionStore};

use crate::error::ApiError;
use crate::navigation::{LogNavigator, Navigator, SIGN_IN_PATH};
use crate::settings::Settings;

/// Request payload.
#[derive(Debug, Default)]
pub enum Body {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

impl Body {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Body::Json(serde_json::to_value(value)?))
    }

    pub fn is_multipart(&self) -> bool {
        matches!(self, Body::Multipart(_))
    }
}

/// Extra per-request configuration.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub headers: HeaderMap,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header that overrides any default of the same name.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Method, URL and headers of a request, ready to send.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
}

/// Join `base` and `endpoint` with exactly one `/` between them.
pub fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

#[derive(Debug, Clone)]
pub struct ApiClient<S, N = LogNavigator> {
    http: Client,
    base_url: String,
    session: Session<S>,
    navigator: N,
}

impl<S: SessionStore, N: Navigator> ApiClient<S, N> {
    pub fn new(base_url: impl Into<String>, session: Session<S>, navigator: N) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!("taskly/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_http(http, base_url, session, navigator))
    }

    pub fn from_settings(settings: &Settings, session: Session<S>, navigator: N) -> Result<Self, reqwest::Error> {
        Self::new(settings.api.base_url.clone(), session, navigator)
    }

    /// Build on an existing `reqwest::Client` to share its connection pool.
    pub fn with_http(http: Client, base_url: impl Into<String>, session: Session<S>, navigator: N) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            session,
            navigator,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }

    /// Resolve the URL and assemble the headers for a request.
    pub async fn prepare(
        &self,
        method: Method,
        endpoint: &str,
        body: &Body,
        config: &RequestConfig,
    ) -> Result<PreparedRequest, ApiError> {
        let url = self.url(endpoint);
        let mut headers = HeaderMap::new();

        let token = self.session.token().await.map_err(|e| ApiError::Unexpected {
            method: method.clone(),
            url: url.clone(),
            message: e.to_string(),
        })?;
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
                ApiError::Unexpected {
                    method: method.clone(),
                    url: url.clone(),
                    message: format!("stored token is not a valid header value: {e}"),
                }
            })?;
            headers.insert(AUTHORIZATION, value);
        }

        if !body.is_multipart() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        for name in config.headers.keys() {
            headers.remove(name);
        }
        for (name, value) in &config.headers {
            headers.append(name.clone(), value.clone());
        }

        Ok(PreparedRequest { method, url, headers })
    }

    /// Send a request and decode a successful body as `T`.
    ///
    /// An empty success body decodes as JSON `null`, so `()` and `Option<_>`
    /// work for endpoints that return nothing.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Body,
        config: RequestConfig,
    ) -> Result<T, ApiError> {
        let result = self.send(method, endpoint, body, &config).await;
        if let Err(error) = &result {
            if matches!(error, ApiError::Unauthorized { .. }) {
                self.end_session().await;
            }
            error.log();
        }
        result
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Body,
        config: &RequestConfig,
    ) -> Result<T, ApiError> {
        let prepared = self.prepare(method, endpoint, &body, config).await?;
        let PreparedRequest { method, url, headers } = prepared;

        let builder = self.http.request(method.clone(), &url).headers(headers);
        let builder = match body {
            Body::Empty => builder,
            Body::Json(value) => {
                let bytes = serde_json::to_vec(&value).map_err(|e| ApiError::Unexpected {
                    method: method.clone(),
                    url: url.clone(),
                    message: e.to_string(),
                })?;
                builder.body(bytes)
            }
            Body::Multipart(form) => builder.multipart(form),
        };

        tracing::debug!(%method, %url, "sending request");
        let response = builder.send().await.map_err(|e| ApiError::Transport {
            method: method.clone(),
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_response(status, method, url, body));
        }

        let bytes = response.bytes().await.map_err(|e| ApiError::Transport {
            method: method.clone(),
            url: url.clone(),
            message: e.to_string(),
        })?;
        let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };
        serde_json::from_slice(payload).map_err(|e| ApiError::Unexpected {
            method,
            url,
            message: e.to_string(),
        })
    }

    /// Drop the stored token and send the user to sign in again.
    async fn end_session(&self) {
        if let Err(e) = self.session.clear_token().await {
            tracing::warn!(error = %e, "failed to clear session token");
        }
        self.navigator.redirect(SIGN_IN_PATH);
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(Method::GET, endpoint, Body::Empty, RequestConfig::default())
            .await
    }

    pub async fn post<T, B>(&self, endpoint: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = Body::json(body).map_err(|e| {
            let error = ApiError::Unexpected {
                method: Method::POST,
                url: self.url(endpoint),
                message: e.to_string(),
            };
            error.log();
            error
        })?;
        self.request(Method::POST, endpoint, body, RequestConfig::default())
            .await
    }
}
