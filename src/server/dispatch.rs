//! # Call Dispatch
//!
//! Resolves a telefunction, gates its arguments with the shield registry, runs
//! it and frames the result as an HTTP response.
//!
//! | result | status | body |
//! |---|---|---|
//! | returned `v` | 200 | `{ "ret": v }` |
//! | aborted with `v` | 403 | `{ "ret": v, "abort": true }` |
//! | failed or panicked | 500 | `Internal Telefunction Error` |
//! | unknown telefunction | 400 | `Invalid Telefunc Request` |
//!
//! Shield rejections follow the configured [`ShieldFailurePolicy`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::observability::{log_event_with_fields, CallMetrics, Event};
use crate::shield::{ShieldRegistry, Verdict};
use crate::telefunction::{Telefunction, TelefunctionError, TelefunctionRegistry};
use crate::wire::{HttpResponse, Value};

/// How a call whose arguments fail the shield is answered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShieldFailurePolicy {
    /// 500 `Internal Telefunction Error`; the client sees a remote exception
    #[default]
    RemoteException,
    /// 403 `{ "ret": null, "abort": true }`; the client sees an abort
    Abort,
}

/// Server side of the call contract
#[derive(Debug)]
pub struct Dispatcher {
    telefunctions: TelefunctionRegistry,
    shields: ShieldRegistry,
    shield_failure: ShieldFailurePolicy,
    metrics: Arc<CallMetrics>,
}

impl Dispatcher {
    pub fn new(telefunctions: TelefunctionRegistry, shields: ShieldRegistry) -> Self {
        Self {
            telefunctions,
            shields,
            shield_failure: ShieldFailurePolicy::default(),
            metrics: Arc::new(CallMetrics::new()),
        }
    }

    pub fn with_shield_failure(mut self, policy: ShieldFailurePolicy) -> Self {
        self.shield_failure = policy;
        self
    }

    pub fn shield_failure(&self) -> ShieldFailurePolicy {
        self.shield_failure
    }

    pub fn metrics(&self) -> Arc<CallMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Every `(file, name)` this dispatcher can run
    pub fn telefunctions(&self) -> Vec<(String, String)> {
        self.telefunctions.identifiers()
    }

    /// Counts a request whose body could not be decoded.
    pub(crate) fn reject_malformed(&self, reason: &str) -> HttpResponse {
        self.metrics.increment_received();
        self.metrics.increment_malformed();
        log_event_with_fields(Event::CallMalformed, &[("reason", reason)]);
        HttpResponse::invalid_request()
    }

    /// Runs one call and returns the response to send back.
    ///
    /// Never fails: every outcome, including a panicking telefunction, is
    /// mapped to a status and body.
    pub async fn dispatch(&self, file: &str, name: &str, args: Vec<Value>) -> HttpResponse {
        let call_id = Uuid::new_v4().to_string();
        self.metrics.increment_received();

        let telefunction = match self.telefunctions.find(file, name) {
            Ok(t) => t,
            Err(err) => {
                self.metrics.increment_not_found();
                let reason = err.to_string();
                log_event_with_fields(
                    Event::TelefunctionNotFound,
                    &[
                        ("call_id", call_id.as_str()),
                        ("code", err.code()),
                        ("file", file),
                        ("name", name),
                        ("reason", reason.as_str()),
                    ],
                );
                return HttpResponse::invalid_request();
            }
        };

        let key = telefunction.key();
        log_event_with_fields(
            Event::CallReceived,
            &[("call_id", call_id.as_str()), ("telefunction", key.as_str())],
        );

        if let Some(response) = self.gate(telefunction, &args, &call_id) {
            return response;
        }

        match run_guarded(telefunction, args).await {
            Ok(value) => {
                self.metrics.increment_succeeded();
                log_event_with_fields(
                    Event::TelefunctionReturned,
                    &[("call_id", call_id.as_str()), ("telefunction", key.as_str())],
                );
                HttpResponse::ret(&value)
            }
            Err(TelefunctionError::Abort(value)) => {
                self.metrics.increment_aborted();
                log_event_with_fields(
                    Event::TelefunctionAborted,
                    &[("call_id", call_id.as_str()), ("telefunction", key.as_str())],
                );
                HttpResponse::abort(&value)
            }
            Err(TelefunctionError::Failed(error)) => {
                self.metrics.increment_failed();
                log_event_with_fields(
                    Event::TelefunctionFailed,
                    &[
                        ("call_id", call_id.as_str()),
                        ("error", error.as_str()),
                        ("telefunction", key.as_str()),
                    ],
                );
                HttpResponse::internal_error()
            }
        }
    }

    /// Returns the response to send instead of running the telefunction, if
    /// any.
    fn gate(&self, telefunction: &Telefunction, args: &[Value], call_id: &str) -> Option<HttpResponse> {
        let key = telefunction.key();

        if !self.shields.has_shield(telefunction) {
            log_event_with_fields(
                Event::ShieldMissing,
                &[("call_id", call_id), ("telefunction", key.as_str())],
            );
            return None;
        }

        let verdict = match self.shields.apply(telefunction, args) {
            Ok(verdict) => verdict,
            Err(err) => {
                self.metrics.increment_failed();
                let error = err.to_string();
                log_event_with_fields(
                    Event::TelefunctionFailed,
                    &[("call_id", call_id), ("error", error.as_str()), ("telefunction", key.as_str())],
                );
                return Some(HttpResponse::internal_error());
            }
        };

        match verdict {
            Verdict::Valid => None,
            Verdict::Invalid { breadcrumb, message } => {
                self.metrics.increment_shield_rejected();
                log_event_with_fields(
                    Event::ShieldRejected,
                    &[
                        ("breadcrumb", breadcrumb.as_str()),
                        ("call_id", call_id),
                        ("message", message.as_str()),
                        ("telefunction", key.as_str()),
                    ],
                );
                Some(match self.shield_failure {
                    ShieldFailurePolicy::RemoteException => HttpResponse::internal_error(),
                    ShieldFailurePolicy::Abort => HttpResponse::abort(&Value::Null),
                })
            }
        }
    }
}

/// Runs the telefunction, turning a panic into `TelefunctionError::Failed`.
async fn run_guarded(telefunction: &Telefunction, args: Vec<Value>) -> Result<Value, TelefunctionError> {
    let telefunction = telefunction.clone();
    // The handler is invoked inside the future so a panic while building it
    // is caught too
    let call = async move { telefunction.call(args).await };

    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(TelefunctionError::Failed(format!(
            "telefunction panicked: {}",
            panic_message(payload.as_ref())
        ))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures_util::future::{ready, Ready};

    use super::*;
    use crate::shield::ty;
    use crate::telefunction::{abort, TelefunctionResult};

    fn hello(args: Vec<Value>) -> Ready<TelefunctionResult> {
        let name = args.first().and_then(|v| v.as_str()).unwrap_or("stranger").to_string();
        ready(Ok(Value::from(format!("Hello, {}", name))))
    }

    fn dispatcher_with_hello(shielded: bool) -> Dispatcher {
        let mut telefunctions = TelefunctionRegistry::new();
        let id = telefunctions.register("/hello.telefunc.ts", "hello", hello).unwrap();
        let mut shields = ShieldRegistry::new();
        if shielded {
            let telefunction = telefunctions.get(id).unwrap().clone();
            shields.attach(&telefunction, vec![ty::string()]).unwrap();
        }
        Dispatcher::new(telefunctions, shields)
    }

    #[tokio::test]
    async fn test_returned_value() {
        let dispatcher = dispatcher_with_hello(true);
        let response = dispatcher
            .dispatch("/hello.telefunc.ts", "hello", vec![Value::from("Alice")])
            .await;
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, r#"{"ret":"Hello, Alice"}"#);
        assert_eq!(dispatcher.metrics().snapshot().succeeded, 1);
    }

    #[tokio::test]
    async fn test_unknown_telefunction() {
        let dispatcher = dispatcher_with_hello(true);
        let response = dispatcher.dispatch("/hello.telefunc.ts", "bye", vec![]).await;
        assert_eq!(response.status_code, 400);
        assert_eq!(response.body, "Invalid Telefunc Request");
        assert_eq!(dispatcher.metrics().snapshot().not_found, 1);
    }

    #[tokio::test]
    async fn test_shield_rejection_never_runs_telefunction() {
        let runs = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&runs);

        let mut telefunctions = TelefunctionRegistry::new();
        let id = telefunctions
            .register("/count.telefunc.ts", "count", move |_args| {
                counter.fetch_add(1, Ordering::SeqCst);
                ready(Ok(Value::Null))
            })
            .unwrap();
        let mut shields = ShieldRegistry::new();
        let telefunction = telefunctions.get(id).unwrap().clone();
        shields.attach(&telefunction, vec![ty::number()]).unwrap();
        let dispatcher = Dispatcher::new(telefunctions, shields);

        let response = dispatcher
            .dispatch("/count.telefunc.ts", "count", vec![Value::from("nope")])
            .await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "Internal Telefunction Error");
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert_eq!(dispatcher.metrics().snapshot().shield_rejected, 1);

        dispatcher
            .dispatch("/count.telefunc.ts", "count", vec![Value::from(1)])
            .await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_shield_rejection_as_abort() {
        let dispatcher = dispatcher_with_hello(true).with_shield_failure(ShieldFailurePolicy::Abort);
        let response = dispatcher
            .dispatch("/hello.telefunc.ts", "hello", vec![Value::from(7)])
            .await;
        assert_eq!(response.status_code, 403);
        assert_eq!(response.body, r#"{"ret":null,"abort":true}"#);
    }

    #[tokio::test]
    async fn test_unshielded_call_proceeds() {
        let dispatcher = dispatcher_with_hello(false);
        let response = dispatcher
            .dispatch("/hello.telefunc.ts", "hello", vec![Value::from(7)])
            .await;
        assert_eq!(response.status_code, 200);
    }

    #[tokio::test]
    async fn test_abort_and_failure() {
        let mut telefunctions = TelefunctionRegistry::new();
        telefunctions
            .register("/a.telefunc.ts", "guarded", |_args| ready(Err(abort("not logged in"))))
            .unwrap();
        telefunctions
            .register("/a.telefunc.ts", "broken", |_args| {
                ready(Err(TelefunctionError::failed("database unreachable")))
            })
            .unwrap();
        let dispatcher = Dispatcher::new(telefunctions, ShieldRegistry::new());

        let aborted = dispatcher.dispatch("/a.telefunc.ts", "guarded", vec![]).await;
        assert_eq!(aborted.status_code, 403);
        assert_eq!(aborted.body, r#"{"ret":"not logged in","abort":true}"#);

        let failed = dispatcher.dispatch("/a.telefunc.ts", "broken", vec![]).await;
        assert_eq!(failed.status_code, 500);
        assert_eq!(failed.body, "Internal Telefunction Error");
        assert!(!failed.body.contains("database"));
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error() {
        let mut telefunctions = TelefunctionRegistry::new();
        telefunctions
            .register("/a.telefunc.ts", "explode", |args: Vec<Value>| async move {
                if args.is_empty() {
                    panic!("boom");
                }
                Ok::<_, TelefunctionError>(Value::Null)
            })
            .unwrap();
        let dispatcher = Dispatcher::new(telefunctions, ShieldRegistry::new());

        let response = dispatcher.dispatch("/a.telefunc.ts", "explode", vec![]).await;
        assert_eq!(response.status_code, 500);
        assert_eq!(response.body, "Internal Telefunction Error");
        assert_eq!(dispatcher.metrics().snapshot().failed, 1);
    }

    #[test]
    fn test_policy_serde() {
        let policy: ShieldFailurePolicy = serde_json::from_str(r#""abort""#).unwrap();
        assert_eq!(policy, ShieldFailurePolicy::Abort);
        assert_eq!(
            serde_json::to_string(&ShieldFailurePolicy::RemoteException).unwrap(),
            r#""remote_exception""#
        );
    }

    #[test]
    fn test_telefunctions_listing() {
        let dispatcher = dispatcher_with_hello(false);
        assert_eq!(
            dispatcher.telefunctions(),
            vec![("/hello.telefunc.ts".to_string(), "hello".to_string())]
        );
    }
}
