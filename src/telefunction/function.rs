//! # Telefunction Definition

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::wire::Value;

use super::errors::TelefunctionError;

/// Result of running a telefunction
pub type TelefunctionResult = Result<Value, TelefunctionError>;

type Handler = Arc<dyn Fn(Vec<Value>) -> BoxFuture<'static, TelefunctionResult> + Send + Sync>;

/// Handle assigned at registration; identity for the shield side table.
///
/// Handles are unique across every registry in the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TelefunctionId(pub(crate) u32);

static NEXT_ID: AtomicU32 = AtomicU32::new(0);

impl TelefunctionId {
    pub(crate) fn next() -> Self {
        TelefunctionId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TelefunctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A server-side function callable from the client
#[derive(Clone)]
pub struct Telefunction {
    id: TelefunctionId,
    file: String,
    name: String,
    handler: Handler,
}

impl Telefunction {
    pub(crate) fn new<F, Fut>(id: TelefunctionId, file: String, name: String, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = TelefunctionResult> + Send + 'static,
    {
        let handler: Handler = Arc::new(move |args| f(args).boxed());
        Self {
            id,
            file,
            name,
            handler,
        }
    }

    pub fn id(&self) -> TelefunctionId {
        self.id
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `file:name`, used in logs and error messages
    pub fn key(&self) -> String {
        format!("{}:{}", self.file, self.name)
    }

    /// Runs the telefunction. Arguments are passed as received: gate them
    /// with the shield registry first.
    pub fn call(&self, args: Vec<Value>) -> BoxFuture<'static, TelefunctionResult> {
        (self.handler)(args)
    }
}

impl fmt::Debug for Telefunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telefunction")
            .field("id", &self.id)
            .field("file", &self.file)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_call() {
        let func = Telefunction::new(
            TelefunctionId::next(),
            "/hello.telefunc.ts".to_string(),
            "hello".to_string(),
            |args: Vec<Value>| async move {
                let name = args.first().and_then(Value::as_str).unwrap_or("stranger").to_string();
                Ok(Value::from(format!("Hello, {}", name)))
            },
        );

        assert_eq!(func.key(), "/hello.telefunc.ts:hello");
        let ret = func.call(vec![Value::from("Alice")]).await.unwrap();
        assert_eq!(ret, Value::from("Hello, Alice"));
    }

    #[test]
    fn test_debug_omits_handler() {
        let func = Telefunction::new(
            TelefunctionId::next(),
            "/a.ts".to_string(),
            "f".to_string(),
            |_args: Vec<Value>| async { Ok(Value::Undefined) },
        );
        let debug = format!("{:?}", func);
        assert!(debug.contains("\"f\""));
        assert!(debug.contains(".."));
    }

    #[test]
    fn test_ids_never_repeat() {
        let a = TelefunctionId::next();
        let b = TelefunctionId::next();
        assert_ne!(a, b);
    }
}
