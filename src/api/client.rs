//! Backend HTTP client implementation.
//!
//! This module provides `QueryClient` for submitting questions to the backend's
//! `/query` endpoint, along with the error type and builder used to configure it.

use std::error::Error as _;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::QueryResponse;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Message surfaced when the backend gives no usable `detail`.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to submit query";

/// Errors that can occur when submitting a query to the backend.
///
/// The `Display` output of every request variant is the message meant for the
/// user: the backend's `detail` when it sent one, otherwise a generic
/// fallback. The underlying transport or decoding error stays reachable
/// through `source()`.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Network-related errors (connection refused, DNS resolution, timeouts, etc.)
    #[error("{}", FALLBACK_ERROR_MESSAGE)]
    Network(#[source] reqwest::Error),

    /// Non-2xx response, with the backend-supplied `detail` if present
    #[error("{}", .detail.as_deref().unwrap_or(FALLBACK_ERROR_MESSAGE))]
    Http { status: u16, detail: Option<String> },

    /// Success response whose body is not a valid `QueryResponse`
    #[error("{}", FALLBACK_ERROR_MESSAGE)]
    Decode(#[source] serde_json::Error),

    /// The worker running the request stopped without reporting a result
    #[error("{}", FALLBACK_ERROR_MESSAGE)]
    Aborted,

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl RequestError {
    /// Returns the HTTP status code for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Builder for constructing `QueryClient` instances.
///
/// # Examples
///
/// ```
/// use paperqa::api::QueryClientBuilder;
///
/// let client = QueryClientBuilder::new()
///     .base_url("http://localhost:8000")
///     .build()
///     .expect("Failed to create client");
/// assert_eq!(client.endpoint(), "http://localhost:8000/query");
/// ```
#[derive(Debug, Default)]
pub struct QueryClientBuilder {
    base_url: Option<String>,
}

impl QueryClientBuilder {
    /// Creates a new `QueryClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL of the backend (e.g., "http://localhost:8000").
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the `QueryClient` with the configured settings.
    ///
    /// Falls back to [`DEFAULT_BASE_URL`] when `base_url()` was not called.
    /// The environment is never consulted here; see [`crate::Config`].
    ///
    /// # Errors
    ///
    /// Returns `RequestError::InvalidUrl` if the base URL does not parse or is
    /// not an `http`/`https` URL with a host, or
    /// `RequestError::Network` if the HTTP client cannot be initialized.
    pub fn build(self) -> Result<QueryClient, RequestError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let parsed = reqwest::Url::parse(&base_url)
            .map_err(|e| RequestError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        // `localhost:8000` parses with `localhost` as its scheme
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(RequestError::InvalidUrl(format!(
                "{}: expected an http:// or https:// URL",
                base_url
            )));
        }

        // No timeout of our own: the transport default applies
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("paperqa/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(RequestError::Network)?;

        Ok(QueryClient { client, base_url })
    }
}

/// Synchronous HTTP client for the question-answering backend.
///
/// Each call to `submit` sends exactly one request. There is no retry and no
/// caching. Construct it with `QueryClientBuilder`.
#[derive(Debug, Clone)]
pub struct QueryClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

/// Trait for submitting queries to the backend.
///
/// Lets the submission flow run against a fake client in tests.
pub trait QueryClientTrait: Send + Sync {
    /// Submits `query` and returns the decoded answer.
    ///
    /// # Errors
    ///
    /// Returns `RequestError` when the backend is unreachable, answers with a
    /// non-2xx status, or returns a body that is not a `QueryResponse`.
    fn submit(&self, query: &str) -> Result<QueryResponse, RequestError>;
}

/// JSON body of `POST /query`.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
}

impl QueryClient {
    /// Returns the base URL configured for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the full URL of the query endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/query", self.base_url.trim_end_matches('/'))
    }

    fn submit_internal(&self, query: &str) -> Result<QueryResponse, RequestError> {
        let url = self.endpoint();
        debug!(%url, "submitting query");

        let response = self
            .client
            .post(&url)
            .json(&QueryRequest { query })
            .send()
            .map_err(RequestError::Network)?;

        let status = response.status();
        let body = response.text().map_err(RequestError::Network)?;
        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        if !status.is_success() {
            return Err(RequestError::Http {
                status: status.as_u16(),
                detail: error_detail(&body),
            });
        }

        serde_json::from_str(&body).map_err(RequestError::Decode)
    }
}

impl QueryClientTrait for QueryClient {
    fn submit(&self, query: &str) -> Result<QueryResponse, RequestError> {
        self.submit_internal(query).inspect_err(|e| {
            let cause = e.source().map(ToString::to_string);
            warn!(error = %e, status = ?e.status(), cause = ?cause, "query request failed");
        })
    }
}

/// Extracts the `detail` message from an error response body.
///
/// Only a non-empty string `detail` counts. Bodies that are not JSON, lack
/// the field, or carry a structured `detail` yield `None`.
fn error_detail(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("detail")
        .and_then(|d| d.as_str())
        .filter(|d| !d.is_empty())
        .map(|d| d.to_string())
}
