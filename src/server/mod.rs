//! Server side of the call contract
//!
//! [`Dispatcher`] owns the telefunction and shield registries once they are
//! built. [`handle`] is the framework-agnostic entry point; the axum routes in
//! `http_server` are one host of it.

mod dispatch;
mod errors;
mod handler;

pub use dispatch::{Dispatcher, ShieldFailurePolicy};
pub use errors::{ServerError, ServerResult};
pub use handler::{handle, HttpRequest};
