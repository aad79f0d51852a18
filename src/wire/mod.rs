//! Wire format shared by the call client and the server contract
//!
//! One request type, one route, two success-ish bodies, two fixed error
//! bodies. See `response` for the status table.

pub mod codec;
mod errors;
mod request;
mod response;
mod value;

pub use errors::{WireError, WireResult};
pub use request::CallRequest;
pub use response::{
    HttpResponse, INTERNAL_ERROR_BODY, INVALID_REQUEST_BODY, STATUS_ABORT, STATUS_BAD_REQUEST,
    STATUS_INTERNAL_ERROR, STATUS_NOT_FOUND, STATUS_OK,
};
pub use value::Value;
