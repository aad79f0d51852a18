//! # Telefunctions
//!
//! Server-side functions made callable from the client, registered by the
//! file that exports them and their exported name.

pub mod errors;
pub mod function;
pub mod registry;

pub use errors::{abort, RegistryError, RegistryResult, TelefunctionError};
pub use function::{Telefunction, TelefunctionId, TelefunctionResult};
pub use registry::TelefunctionRegistry;
