//! Request dispatch seam and the reqwest-backed transport.
//!
//! A [`Transport`] turns an [`HttpRequest`] into an [`HttpResponse`]. Any
//! HTTP response, success or error status, is `Ok`; `Err` is reserved for
//! the `network` and `request-error` classes where no usable response
//! exists. This split is what lets the client above treat a 401 as data
//! rather than an exception.

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Versioned API path prefix appended to the server origin.
pub const API_PREFIX: &str = "/api/v2";

/// Body of an outbound request.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(Value),
    /// Multipart upload with a single file part.
    Multipart {
        field: String,
        file_name: String,
        bytes: Vec<u8>,
    },
}

/// An outbound API request, path relative to the `/api/v2` prefix.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: RequestBody,
}

impl HttpRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).json(body)
    }

    #[must_use]
    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).json(body)
    }

    #[must_use]
    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, path).json(body)
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// A received API response. The body is kept as raw JSON; typed extraction
/// happens in the service layer.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl HttpResponse {
    /// Server-provided `message` field, if the body carries one.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.body.get("message").and_then(Value::as_str)
    }
}

/// Dispatch seam for outbound requests.
///
/// Implementations must not interpret response statuses; the authenticated
/// client owns the 401/refresh pipeline.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch a request and return the server's response.
    ///
    /// # Errors
    ///
    /// `ApiError::Network` when no response was received,
    /// `ApiError::Request` when the request could not be built or sent.
    async fn dispatch(&self, req: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Reqwest-backed transport with the fixed per-request deadline and a
/// cookie store (the refresh endpoint relies on cross-origin credentials).
pub struct ReqwestTransport {
    client: reqwest::Client,
    server_url: Url,
}

impl ReqwestTransport {
    /// Build a transport from configuration.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never happen
    /// under normal circumstances as we use standard TLS configuration.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        #[allow(clippy::expect_used)]
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            server_url: config.server_url.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        let origin = self.server_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{origin}{API_PREFIX}{path}"))
            .map_err(|e| ApiError::Request(format!("invalid endpoint {path}: {e}")))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn dispatch(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        let url = self.endpoint(&req.path)?;

        let mut builder = self
            .client
            .request(req.method, url)
            .headers(req.headers)
            .query(&req.query);

        builder = match req.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart {
                field,
                file_name,
                bytes,
            } => {
                let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
                builder.multipart(reqwest::multipart::Form::new().part(field, part))
            }
        };

        let response = builder.send().await.map_err(ApiError::from)?;
        let status = response.status();
        // Error pages are not always JSON; a non-JSON body reads as null
        let body = response.json::<Value>().await.unwrap_or(Value::Null);

        Ok(HttpResponse { status, body })
    }
}
