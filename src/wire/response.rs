//! Call response framing
//!
//! | status | body |
//! |---|---|
//! | 200 | `{ "ret": any }` |
//! | 403 | `{ "ret": any, "abort": true }` |
//! | 400 | `Invalid Telefunc Request` |
//! | 500 | `Internal Telefunction Error` |

use super::codec;
use super::value::Value;

/// Body of every 500 response. The exception itself stays in server logs.
pub const INTERNAL_ERROR_BODY: &str = "Internal Telefunction Error";

/// Body of every 400 response.
pub const INVALID_REQUEST_BODY: &str = "Invalid Telefunc Request";

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_ABORT: u16 = 403;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Raw response produced by the server contract and consumed by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status_code: u16,
    pub body: String,
    pub content_type: &'static str,
}

impl HttpResponse {
    /// 200 with the returned value
    pub fn ret(value: &Value) -> Self {
        Self {
            status_code: STATUS_OK,
            body: codec::stringify(&Value::Object(vec![("ret".to_string(), value.clone())])),
            content_type: "text/plain",
        }
    }

    /// 403 carrying the abort value
    pub fn abort(value: &Value) -> Self {
        Self {
            status_code: STATUS_ABORT,
            body: codec::stringify(&Value::Object(vec![
                ("ret".to_string(), value.clone()),
                ("abort".to_string(), Value::Bool(true)),
            ])),
            content_type: "text/plain",
        }
    }

    pub fn internal_error() -> Self {
        Self {
            status_code: STATUS_INTERNAL_ERROR,
            body: INTERNAL_ERROR_BODY.to_string(),
            content_type: "text/plain",
        }
    }

    pub fn invalid_request() -> Self {
        Self {
            status_code: STATUS_BAD_REQUEST,
            body: INVALID_REQUEST_BODY.to_string(),
            content_type: "text/plain",
        }
    }
}
