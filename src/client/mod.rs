//! Call client
//!
//! Sends one request per call and classifies the response. Transport
//! failures become [`CallOutcome::ConnectionError`]; responses that telefunc's
//! server never produces become a [`UsageError`].

mod classify;
mod errors;
mod outcome;
mod remote_call;
mod transport;

pub use classify::classify;
pub use errors::{ClientResult, HttpMethod, TransportError, UsageError};
pub use outcome::CallOutcome;
pub use remote_call::{ClientConfig, TelefuncClient};
pub use transport::{HyperTransport, RawResponse, RouterTransport, Transport};
