//! # Raw Request Handling
//!
//! Entry point for hosts that bring their own HTTP server: hand over URL,
//! method and body, get back status, content type and body.

use crate::wire::{CallRequest, HttpResponse};

use super::dispatch::Dispatcher;
use super::errors::{ServerError, ServerResult};

/// An HTTP request as received by the host server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request URL; only the path is compared
    pub url: String,
    pub method: String,
    pub body: String,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: "POST".to_string(),
            body: body.into(),
        }
    }
}

/// Answers one telefunc request.
///
/// # Errors
///
/// A `ServerError` when the host routed a request here that is not a
/// telefunc request. Malformed bodies are not errors: they are answered with
/// 400 `Invalid Telefunc Request`.
pub async fn handle(
    dispatcher: &Dispatcher,
    telefunc_url: &str,
    request: &HttpRequest,
) -> ServerResult<HttpResponse> {
    let path = url_path(&request.url);
    if path != telefunc_url {
        return Err(ServerError::UrlMismatch {
            expected: telefunc_url.to_string(),
            got: request.url.clone(),
        });
    }

    let method = request.method.to_ascii_uppercase();
    if method != "POST" && method != "GET" {
        return Err(ServerError::MethodNotSupported(request.method.clone()));
    }

    match CallRequest::from_body(&request.body) {
        Ok(call) => Ok(dispatcher.dispatch(&call.file, &call.name, call.args).await),
        Err(err) => {
            let reason = err.to_string();
            Ok(dispatcher.reject_malformed(&reason))
        }
    }
}

/// Strips scheme, authority, query and fragment.
fn url_path(url: &str) -> &str {
    let without_origin = match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            rest.find('/').map_or("/", |i| &rest[i..])
        }
        None => url,
    };
    let end = without_origin
        .find(|c| c == '?' || c == '#')
        .unwrap_or(without_origin.len());
    &without_origin[..end]
}

#[cfg(test)]
mod tests {
    use futures_util::future::ready;

    use super::*;
    use crate::shield::ShieldRegistry;
    use crate::telefunction::TelefunctionRegistry;
    use crate::wire::Value;

    fn dispatcher() -> Dispatcher {
        let mut telefunctions = TelefunctionRegistry::new();
        telefunctions
            .register("/math.telefunc.ts", "answer", |_args| ready(Ok(Value::from(42))))
            .unwrap();
        Dispatcher::new(telefunctions, ShieldRegistry::new())
    }

    #[test]
    fn test_url_path() {
        assert_eq!(url_path("/_telefunc"), "/_telefunc");
        assert_eq!(url_path("/_telefunc?x=1"), "/_telefunc");
        assert_eq!(url_path("http://localhost:3000/_telefunc#a"), "/_telefunc");
        assert_eq!(url_path("http://localhost:3000"), "/");
    }

    #[tokio::test]
    async fn test_handle_call() {
        let body = r#"{"file":"/math.telefunc.ts","name":"answer","args":[]}"#;
        let response = handle(&dispatcher(), "/_telefunc", &HttpRequest::post("/_telefunc", body))
            .await
            .unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, r#"{"ret":42}"#);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let dispatcher = dispatcher();
        let response = handle(&dispatcher, "/_telefunc", &HttpRequest::post("/_telefunc", "{not json"))
            .await
            .unwrap();
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, "Invalid Telefunc Request");
        assert_eq!(dispatcher.metrics().snapshot().malformed, 1);
    }

    #[tokio::test]
    async fn test_wrong_url_is_usage_error() {
        let err = handle(&dispatcher(), "/_telefunc", &HttpRequest::post("/api", "{}"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServerError::UrlMismatch { .. }));
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let request = HttpRequest {
            url: "/_telefunc".into(),
            method: "DELETE".into(),
            body: String::new(),
        };
        let err = handle(&dispatcher(), "/_telefunc", &request).await.unwrap_err();
        assert_eq!(err, ServerError::MethodNotSupported("DELETE".into()));
    }
}
