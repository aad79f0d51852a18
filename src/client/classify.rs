//! Response classification
//!
//! The status code decides; the body is only checked for consistency with it.

use crate::wire::{
    codec, Value, INTERNAL_ERROR_BODY, STATUS_ABORT, STATUS_INTERNAL_ERROR, STATUS_NOT_FOUND,
    STATUS_OK,
};

use super::errors::{ClientResult, HttpMethod, UsageError};
use super::outcome::CallOutcome;

/// Maps a received response to a call outcome.
///
/// # Errors
///
/// `UsageError` for any response telefunc's server never produces.
pub fn classify(status: u16, body: &str, url: &str, method: HttpMethod) -> ClientResult<CallOutcome> {
    let unexpected_body = || UsageError::UnexpectedBody {
        url: url.to_string(),
        method,
    };

    match status {
        STATUS_NOT_FOUND => Err(UsageError::NotInstalled {
            url: url.to_string(),
            method,
        }),
        STATUS_INTERNAL_ERROR => {
            if body == INTERNAL_ERROR_BODY {
                Ok(CallOutcome::RemoteException)
            } else {
                Err(unexpected_body())
            }
        }
        STATUS_OK | STATUS_ABORT => {
            let response = match codec::parse(body) {
                Ok(value @ Value::Object(_)) => value,
                _ => return Err(unexpected_body()),
            };
            let value = response.get("ret").cloned().ok_or_else(unexpected_body)?;

            // the presence of `abort` is the marker, its value is not read
            match (status, response.has_key("abort")) {
                (STATUS_OK, false) => Ok(CallOutcome::Success { value }),
                (STATUS_ABORT, true) => Ok(CallOutcome::Abort { value }),
                _ => Err(unexpected_body()),
            }
        }
        _ => Err(UsageError::UnexpectedStatus {
            status,
            url: url.to_string(),
            method,
        }),
    }
}
