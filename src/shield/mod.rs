//! Shield subsystem
//!
//! A shield declares the positional arguments a telefunction accepts. The
//! server refuses to run a shielded telefunction with arguments that fail it.
//!
//! # Design Principles
//!
//! - Schemas are plain data: one enum variant per node kind
//! - Validation is pure and stops at the first failure
//! - Every failure carries a breadcrumb rooted at `[root]`
//! - Shields live in a side table keyed by telefunction handle

mod errors;
mod registry;
pub mod ty;
mod types;
mod verify;

pub use errors::{ShieldError, ShieldResult};
pub use registry::ShieldRegistry;
pub use types::{Literal, Primitive, Schema, Shield};
pub use verify::{verify, Verdict, ROOT};
