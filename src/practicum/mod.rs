//! Practicum homework API client
//!
//! A single GET against the homework statuses endpoint. Schema checks live in
//! [`response`].

/// Typed validation of API responses
pub mod response;

pub use response::{check_response, HomeworkRecord, ValidatedResponse};

use crate::config::ENDPOINT;
use crate::error::HomeworkError;
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// Source of raw homework status answers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch statuses changed since `from_date` (seconds since the epoch).
    ///
    /// Returns `Ok(None)` when the API could not be reached at all; the caller
    /// treats that as "no update this cycle".
    ///
    /// # Errors
    ///
    /// `HomeworkError::StatusNot200` for any status other than 200,
    /// `HomeworkError::InvalidJson` if the body cannot be decoded.
    async fn get_api_answer(&self, from_date: i64) -> Result<Option<Value>, HomeworkError>;
}

/// Creates an HTTP client with the given request timeout.
#[must_use]
pub fn create_http_client(timeout: Duration) -> HttpClient {
    HttpClient::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| HttpClient::new())
}

/// reqwest-backed [`HomeworkApi`].
#[derive(Clone)]
pub struct PracticumClient {
    http: HttpClient,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// Client for the production endpoint.
    #[must_use]
    pub fn new(token: impl Into<String>, timeout: Duration) -> Self {
        Self::with_endpoint(ENDPOINT, token, timeout)
    }

    /// Client for an arbitrary endpoint, used against local test servers.
    #[must_use]
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            http: create_http_client(timeout),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

/// Logs a connectivity failure; the cycle ends without an answer.
fn no_answer(e: &reqwest::Error) -> Option<Value> {
    let error = HomeworkError::Network(e.to_string());
    error!(timeout = e.is_timeout(), "{error}");
    None
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn get_api_answer(&self, from_date: i64) -> Result<Option<Value>, HomeworkError> {
        debug!(from_date, "Requesting homework statuses");

        let response = match self
            .http
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Ok(no_answer(&e)),
        };

        let status = response.status();
        if status != StatusCode::OK {
            error!("Статус-код ответа API не 200: {status}");
            return Err(HomeworkError::StatusNot200 {
                status: status.as_u16(),
            });
        }

        match response.json::<Value>().await {
            Ok(body) => Ok(Some(body)),
            Err(e) if e.is_decode() => Err(HomeworkError::InvalidJson(e.to_string())),
            Err(e) => Ok(no_answer(&e)),
        }
    }
}
