//! Transports
//!
//! A transport performs one POST and hands back status and body. It never
//! retries and never interprets the response.

use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use http::header::CONTENT_TYPE;
use http::{Method, Request, Uri};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tower::ServiceExt;

use super::errors::TransportError;

/// Status and body of a received response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `body` as a `text/plain` POST to `url`.
    async fn post(&self, url: &str, body: String) -> Result<RawResponse, TransportError>;
}

fn build_request<B>(url: &str, body: B) -> Result<Request<B>, TransportError> {
    Request::builder()
        .method(Method::POST)
        .uri(url)
        .header(CONTENT_TYPE, "text/plain")
        .body(body)
        .map_err(|e| TransportError::InvalidRequest(e.to_string()))
}

/// A socket needs a scheme and a host to connect to.
fn require_absolute(url: &str) -> Result<(), TransportError> {
    let uri: Uri = url
        .parse()
        .map_err(|e: http::uri::InvalidUri| TransportError::InvalidRequest(e.to_string()))?;
    if uri.scheme().is_none() || uri.authority().is_none() {
        return Err(TransportError::InvalidRequest(format!(
            "`{}` is not an absolute URL",
            url
        )));
    }
    Ok(())
}

/// HTTP/1 transport over a pooled hyper client
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    timeout: Option<Duration>,
}

impl HyperTransport {
    pub fn new() -> Self {
        Self {
            client: Client::builder(TokioExecutor::new()).build_http(),
            timeout: None,
        }
    }

    /// Gives up on calls that take longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    async fn send(&self, request: Request<Full<Bytes>>) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .request(request)
            .await
            .map_err(|e: hyper_util::client::legacy::Error| TransportError::Connection(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?
            .to_bytes();

        Ok(RawResponse {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HyperTransport {
    async fn post(&self, url: &str, body: String) -> Result<RawResponse, TransportError> {
        require_absolute(url)?;
        let request = build_request(url, Full::new(Bytes::from(body)))?;

        match self.timeout {
            Some(timeout) => tokio::time::timeout(timeout, self.send(request))
                .await
                .map_err(|_| TransportError::Timeout(timeout.as_millis() as u64))?,
            None => self.send(request).await,
        }
    }
}

/// Drives an axum router in-process, without a socket
#[derive(Clone)]
pub struct RouterTransport {
    router: Router,
}

impl RouterTransport {
    pub fn new(router: Router) -> Self {
        Self { router }
    }
}

#[async_trait]
impl Transport for RouterTransport {
    async fn post(&self, url: &str, body: String) -> Result<RawResponse, TransportError> {
        let request = build_request(url, axum::body::Body::from(body))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| TransportError::Connection(e.to_string()))?
            .to_bytes();

        Ok(RawResponse {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        })
    }
}
