//! # Client Errors
//!
//! `UsageError` means the server answered in a way telefunc never does, so
//! the integration is broken. It is fatal and never reported as a call
//! outcome.

use std::fmt;

use thiserror::Error;

/// Result type for client calls
pub type ClientResult<T> = Result<T, UsageError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// 404: nothing is mounted at the telefunc URL
    #[error("Telefunc doesn't seem to be installed on your server: the HTTP {method} request made to `{url}` returned a 404 HTTP response. Make sure to reply all HTTP requests made to `{url}` with the telefunc server handler, for both `GET` and `POST` requests. See https://telefunc.com/install")]
    NotInstalled { url: String, method: HttpMethod },

    /// A body telefunc never generates for the received status
    #[error("Telefunc doesn't seem to be (properly) installed on your server: the HTTP {method} request made to `{url}` returned an HTTP response body that Telefunc never generates. Make sure to reply all HTTP requests made to `{url}` with the telefunc server handler, for both `GET` and `POST` requests. See https://telefunc.com/install")]
    UnexpectedBody { url: String, method: HttpMethod },

    /// A status telefunc never returns to a well-formed call
    #[error("Telefunc doesn't seem to be (properly) installed on your server: the HTTP {method} request made to `{url}` returned a status code `{status}` which Telefunc does not return. Make sure to reply all HTTP requests made to `{url}` with the telefunc server handler, for both `GET` and `POST` requests. See https://telefunc.com/install")]
    UnexpectedStatus {
        status: u16,
        url: String,
        method: HttpMethod,
    },

    /// The configured URL cannot be requested at all
    #[error("The telefunc URL `{url}` cannot be requested: {reason}. Set `ClientConfig.url` to an absolute URL such as `http://localhost:3000/_telefunc`, or use a transport that accepts paths.")]
    InvalidUrl { url: String, reason: String },
}

impl UsageError {
    pub fn code(&self) -> &'static str {
        match self {
            UsageError::NotInstalled { .. } => "TELEFUNC_NOT_INSTALLED",
            UsageError::UnexpectedBody { .. } => "TELEFUNC_UNEXPECTED_BODY",
            UsageError::UnexpectedStatus { .. } => "TELEFUNC_UNEXPECTED_STATUS",
            UsageError::InvalidUrl { .. } => "TELEFUNC_INVALID_URL",
        }
    }
}

/// Failure to get any response at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("No Server Connection: {0}")]
    Connection(String),

    #[error("No Server Connection: no response within {0} ms")]
    Timeout(u64),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Methods a telefunc request can be made with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
