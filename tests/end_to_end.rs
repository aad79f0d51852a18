//! End-to-End Tests
//!
//! Client -> axum router -> dispatcher -> telefunction, in-process.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::future::ready;
use telefunc::client::{CallOutcome, ClientConfig, RouterTransport, TelefuncClient, UsageError};
use telefunc::http_server::{HttpServer, TelefuncConfig};
use telefunc::server::{Dispatcher, ShieldFailurePolicy};
use telefunc::shield::{ty, ShieldRegistry};
use telefunc::telefunction::{abort, TelefunctionError, TelefunctionRegistry};
use telefunc::wire::Value;

// =============================================================================
// Helper Functions
// =============================================================================

const FILE: &str = "/user.telefunc.ts";

struct App {
    client: TelefuncClient,
    runs: Arc<AtomicUsize>,
}

fn app(config: TelefuncConfig) -> App {
    let runs = Arc::new(AtomicUsize::new(0));
    let mut telefunctions = TelefunctionRegistry::new();

    let counter = Arc::clone(&runs);
    let greet = telefunctions
        .register(FILE, "greet", move |args: Vec<Value>| {
            counter.fetch_add(1, Ordering::SeqCst);
            let name = args.first().and_then(|v| v.as_str()).unwrap_or_default().to_string();
            ready(Ok(Value::from(format!("Hello, {}", name))))
        })
        .unwrap();

    let rename = telefunctions
        .register(FILE, "rename", |args: Vec<Value>| {
            let name = args.first().and_then(|v| v.as_str()).unwrap_or_default().to_string();
            ready(if name.is_empty() {
                Err(abort("bad-name"))
            } else {
                Ok(Value::Undefined)
            })
        })
        .unwrap();

    telefunctions
        .register(FILE, "broken", |_args| {
            ready(Err(TelefunctionError::failed("connection pool exhausted")))
        })
        .unwrap();

    telefunctions
        .register(FILE, "explode", |args: Vec<Value>| async move {
            if args.is_empty() {
                panic!("index out of bounds");
            }
            Ok::<_, TelefunctionError>(Value::Null)
        })
        .unwrap();

    let mut shields = ShieldRegistry::new();
    let greet = telefunctions.get(greet).unwrap().clone();
    let rename = telefunctions.get(rename).unwrap().clone();
    shields.attach(&greet, vec![ty::string()]).unwrap();
    shields
        .attach_first(vec![ty::or([ty::string(), ty::undefined()])], &rename)
        .unwrap();

    let url = config.telefunc_url.clone();
    let router = HttpServer::with_config(config, Dispatcher::new(telefunctions, shields)).router();
    let client = TelefuncClient::with_transport(ClientConfig::with_url(url), RouterTransport::new(router));

    App { client, runs }
}

// =============================================================================
// Outcomes
// =============================================================================

#[tokio::test]
async fn test_success() {
    let app = app(TelefuncConfig::default());
    let outcome = app.client.call(FILE, "greet", vec![Value::from("Alice")]).await.unwrap();
    assert_eq!(outcome, CallOutcome::Success { value: Value::from("Hello, Alice") });
}

#[tokio::test]
async fn test_undefined_return_survives() {
    let app = app(TelefuncConfig::default());
    let outcome = app.client.call(FILE, "rename", vec![Value::from("Bob")]).await.unwrap();
    assert_eq!(outcome, CallOutcome::Success { value: Value::Undefined });
}

#[tokio::test]
async fn test_abort() {
    let app = app(TelefuncConfig::default());
    let outcome = app.client.call(FILE, "rename", vec![Value::from("")]).await.unwrap();
    assert_eq!(outcome, CallOutcome::Abort { value: Value::from("bad-name") });
}

#[tokio::test]
async fn test_failure_is_remote_exception() {
    let app = app(TelefuncConfig::default());
    let outcome = app.client.call(FILE, "broken", vec![]).await.unwrap();
    assert_eq!(outcome, CallOutcome::RemoteException);
}

#[tokio::test]
async fn test_panic_is_remote_exception() {
    let app = app(TelefuncConfig::default());
    let outcome = app.client.call(FILE, "explode", vec![]).await.unwrap();
    assert_eq!(outcome, CallOutcome::RemoteException);

    // The server keeps serving after a panic
    let outcome = app.client.call(FILE, "greet", vec![Value::from("Eve")]).await.unwrap();
    assert!(outcome.is_success());
}

// =============================================================================
// Shields
// =============================================================================

#[tokio::test]
async fn test_shield_rejection_is_remote_exception_by_default() {
    let app = app(TelefuncConfig::default());
    let outcome = app.client.call(FILE, "greet", vec![Value::from(42)]).await.unwrap();
    assert_eq!(outcome, CallOutcome::RemoteException);
    assert_eq!(app.runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_shield_rejection_as_abort() {
    let config = TelefuncConfig {
        shield_failure: ShieldFailurePolicy::Abort,
        ..Default::default()
    };
    let app = app(config);
    let outcome = app.client.call(FILE, "greet", vec![]).await.unwrap();
    assert_eq!(outcome, CallOutcome::Abort { value: Value::Null });
    assert_eq!(app.runs.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_optional_argument_rejects_null() {
    let app = app(TelefuncConfig::default());

    let outcome = app.client.call(FILE, "rename", vec![Value::Null]).await.unwrap();
    assert_eq!(outcome, CallOutcome::RemoteException);

    let outcome = app.client.call(FILE, "rename", vec![Value::Undefined]).await.unwrap();
    assert_eq!(outcome, CallOutcome::Abort { value: Value::from("bad-name") });
}

// =============================================================================
// Integration Errors
// =============================================================================

#[tokio::test]
async fn test_wrong_url_is_not_installed() {
    let client = TelefuncClient::with_transport(
        ClientConfig::with_url("/api/_telefunc"),
        RouterTransport::new(
            HttpServer::with_config(
                TelefuncConfig::default(),
                Dispatcher::new(TelefunctionRegistry::new(), ShieldRegistry::new()),
            )
            .router(),
        ),
    );

    let err = client.call(FILE, "greet", vec![]).await.unwrap_err();
    assert!(matches!(err, UsageError::NotInstalled { .. }));
}

#[tokio::test]
async fn test_unknown_telefunction_is_usage_error() {
    let app = app(TelefuncConfig::default());
    let err = app.client.call(FILE, "missing", vec![]).await.unwrap_err();
    assert!(matches!(err, UsageError::UnexpectedStatus { status: 400, .. }));
}

#[tokio::test]
async fn test_custom_telefunc_url() {
    let config = TelefuncConfig {
        telefunc_url: "/rpc".to_string(),
        ..Default::default()
    };
    let app = app(config);
    let outcome = app.client.call(FILE, "greet", vec![Value::from("Zoe")]).await.unwrap();
    assert_eq!(outcome, CallOutcome::Success { value: Value::from("Hello, Zoe") });
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let app = Arc::new(app(TelefuncConfig::default()));

    let calls = (0..16).map(|i| {
        let app = Arc::clone(&app);
        tokio::spawn(async move {
            app.client
                .call(FILE, "greet", vec![Value::from(format!("user{}", i))])
                .await
                .unwrap()
        })
    });

    for (i, call) in calls.collect::<Vec<_>>().into_iter().enumerate() {
        let outcome = call.await.unwrap();
        assert_eq!(outcome, CallOutcome::Success { value: Value::from(format!("Hello, user{}", i)) });
    }
    assert_eq!(app.runs.load(Ordering::SeqCst), 16);
}
