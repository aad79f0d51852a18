//! # Remote Call
//!
//! Idle -> Sent -> one of Success, RemoteException, ConnectionError, Abort.
//! Exactly one request per call, no retries.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event};
use crate::wire::{CallRequest, Value};

use super::classify::classify;
use super::errors::{ClientResult, HttpMethod, TransportError, UsageError};
use super::outcome::CallOutcome;
use super::transport::{HyperTransport, Transport};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Telefunc URL (default: "/_telefunc")
    #[serde(default = "default_url")]
    pub url: String,

    /// Per-call timeout in milliseconds (default: none)
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

fn default_url() -> String {
    "/_telefunc".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Calls telefunctions over a transport
#[derive(Clone)]
pub struct TelefuncClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl TelefuncClient {
    /// Client over HTTP, honouring `timeout_ms`.
    pub fn new(config: ClientConfig) -> Self {
        let mut transport = HyperTransport::new();
        if let Some(ms) = config.timeout_ms {
            transport = transport.with_timeout(Duration::from_millis(ms));
        }
        Self::with_transport(config, transport)
    }

    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Calls `name` exported from `file` with `args`.
    ///
    /// # Errors
    ///
    /// `UsageError` when the response proves telefunc is not (properly)
    /// installed on the server, or when the configured URL cannot be
    /// requested. Connection failures and timeouts are an outcome, not an
    /// error.
    pub async fn call(&self, file: &str, name: &str, args: Vec<Value>) -> ClientResult<CallOutcome> {
        let url = self.config.url.as_str();
        let telefunction = format!("{}:{}", file, name);
        let body = CallRequest::new(file, name, args).to_body();

        log_event_with_fields(
            Event::RemoteCallSent,
            &[("telefunction", telefunction.as_str()), ("url", url)],
        );

        let response = match self.transport.post(url, body).await {
            Ok(response) => response,
            Err(TransportError::InvalidRequest(reason)) => {
                let err = UsageError::InvalidUrl {
                    url: url.to_string(),
                    reason,
                };
                log_event_with_fields(
                    Event::RemoteCallProtocolViolation,
                    &[("code", err.code()), ("telefunction", telefunction.as_str()), ("url", url)],
                );
                return Err(err);
            }
            Err(err) => {
                let error = err.to_string();
                log_event_with_fields(
                    Event::RemoteCallConnectionFailed,
                    &[("error", error.as_str()), ("telefunction", telefunction.as_str()), ("url", url)],
                );
                return Ok(CallOutcome::ConnectionError);
            }
        };

        classify(response.status, &response.body, url, HttpMethod::Post).map_err(|err| {
            let status = response.status.to_string();
            log_event_with_fields(
                Event::RemoteCallProtocolViolation,
                &[
                    ("code", err.code()),
                    ("status", status.as_str()),
                    ("telefunction", telefunction.as_str()),
                    ("url", url),
                ],
            );
            err
        })
    }
}
