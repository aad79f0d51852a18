//! # Telefunc HTTP Server Module
//!
//! axum host for the server contract.
//!
//! # Endpoints
//!
//! - `/_telefunc` (configurable) - Telefunction calls, GET and POST
//! - `/health` - Health check with call counters

pub mod config;
pub mod server;
pub mod telefunc_routes;

pub use config::TelefuncConfig;
pub use server::HttpServer;
pub use telefunc_routes::TelefuncState;
