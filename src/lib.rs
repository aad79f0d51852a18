//! telefunc - Shielded remote function calls
//!
//! Server functions ("telefunctions") are called from a client with one
//! request each. Shields validate the arguments before a telefunction runs.

pub mod client;
pub mod http_server;
pub mod observability;
pub mod server;
pub mod shield;
pub mod telefunction;
pub mod wire;
