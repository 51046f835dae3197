// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for AnkiConnect communication.
//!
//! Provides a trait-based transport layer that enables:
//! - Real HTTP requests for production
//! - In-memory fakes for unit testing

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::Value;

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The endpoint could not be reached.
    #[error("failed to connect to {url}: {reason}\n  hint: make sure Anki is running with the AnkiConnect add-on installed")]
    ConnectionFailed { url: String, reason: String },

    /// The endpoint answered with a non-success HTTP status.
    #[error("unexpected HTTP status {status} from {url}")]
    Http { url: String, status: u16 },

    /// The response body was not valid JSON.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Request/response channel to the remote store.
///
/// One call delivers one JSON request body and blocks until the matching
/// response body arrives.
pub trait Transport {
    /// Send a request body and return the response body.
    fn post(&mut self, body: &Value) -> TransportResult<Value>;
}

/// HTTP transport using a blocking reqwest client.
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    /// Create a transport posting to `url`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> TransportResult<Self> {
        let url = url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::ConnectionFailed {
                url: url.clone(),
                reason: format!("HTTP client build failed: {e}"),
            })?;
        Ok(HttpTransport { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn post(&mut self, body: &Value) -> TransportResult<Value> {
        let response = self
            .client
            .post(&self.url)
            .json(body)
            .send()
            .map_err(|e| TransportError::ConnectionFailed {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}
