//! Authenticated HTTP client shared by every backend adapter.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use storefront_core::ApiError;
use storefront_core::ports::{Notice, Notifier, Session};
use storefront_shared::ErrorResponse;

/// Header carrying the per-request correlation id.
pub static REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Backend root, e.g. `https://api.example.com`. Fixed for the client's lifetime.
    pub base_url: String,
    /// Whole-request timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            timeout: Some(Duration::from_secs(30)),
            user_agent: concat!("storefront/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// reqwest client bound to one base URL and one session.
///
/// Every request built here reads the session token first and, when there is one,
/// sends it as `Authorization: Bearer <token>`. Failed calls are logged and a 401
/// raises the unauthorized notice before the error is returned to the caller.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    pub fn new(
        config: &HttpClientConfig,
        session: Session,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ApiError::configuration(format!("invalid base URL {:?}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::configuration(format!(
                "base URL {:?} cannot carry a path",
                config.base_url
            )));
        }

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::configuration(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            session,
            notifier,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve path segments below the base URL. Segments are percent-encoded; an empty
    /// final segment produces a trailing slash.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::configuration("base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request with the session token and a fresh request id attached.
    ///
    /// A session store failure rejects the request instead of sending it anonymously.
    pub async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, ApiError> {
        let request_id = Uuid::new_v4().to_string();
        let builder = self
            .http
            .request(method, url)
            .header(REQUEST_ID_HEADER, request_id.as_str());

        match self.session.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    /// [`ApiClient::endpoint`] followed by [`ApiClient::request`].
    pub async fn prepare(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        self.request(method, url).await
    }

    /// Send and decode a JSON body.
    ///
    /// The `send_*` methods take the request still wrapped in its `Result` so that a
    /// failure while preparing it is logged like any other failure of `operation`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        builder: Result<RequestBuilder, ApiError>,
    ) -> Result<T, ApiError> {
        let result = match self.execute(operation, builder).await {
            Ok(body) => decode(&body),
            Err(err) => Err(err),
        };
        self.report(operation, result)
    }

    /// Send and decode a JSON body; an empty body yields `T::default()`.
    pub async fn send_json_or_default<T: DeserializeOwned + Default>(
        &self,
        operation: &'static str,
        builder: Result<RequestBuilder, ApiError>,
    ) -> Result<T, ApiError> {
        let result = match self.execute(operation, builder).await {
            Ok(body) if body.trim().is_empty() => Ok(T::default()),
            Ok(body) => decode(&body),
            Err(err) => Err(err),
        };
        self.report(operation, result)
    }

    /// Send and ignore whatever body a 2xx response carries.
    pub async fn send_unit(
        &self,
        operation: &'static str,
        builder: Result<RequestBuilder, ApiError>,
    ) -> Result<(), ApiError> {
        let result = self.execute(operation, builder).await.map(|_| ());
        self.report(operation, result)
    }

    async fn execute(
        &self,
        operation: &'static str,
        builder: Result<RequestBuilder, ApiError>,
    ) -> Result<String, ApiError> {
        let request = builder?
            .build()
            .map_err(|e| ApiError::configuration(e.to_string()))?;
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        tracing::debug!(
            operation,
            request_id = %request_id,
            method = %request.method(),
            url = %request.url(),
            "Sending request"
        );

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;

        tracing::debug!(
            operation,
            request_id = %request_id,
            status = status.as_u16(),
            "Response received"
        );

        if !status.is_success() {
            let message = ErrorResponse::parse(&body)
                .and_then(|e| e.summary())
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(ApiError::from_status(status.as_u16(), message));
        }

        Ok(body)
    }

    /// Log a failed call and raise the unauthorized notice for a 401.
    fn report<T>(&self, operation: &'static str, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(err) = &result {
            tracing::error!(
                operation,
                kind = %err.kind,
                status = err.status,
                "Error {operation}: {}",
                err.message
            );
            if err.is_unauthorized() {
                self.notifier.notify(Notice::unauthorized());
            }
        }
        result
    }
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::decode(e.to_string()))
}
