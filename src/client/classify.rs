//! Map raw failures onto classified, user-facing errors.
//!
//! Every retry decision funnels through [`retriable_for`] so the policy
//! lives in exactly one table instead of being scattered across catch sites.

use crate::error::{ClassifiedError, ErrorKind, TransportError};
use std::time::Duration;

/// Single source of truth for retry decisions.
///
/// Note: 429 gets a dedicated message below but classifies non-retriable
/// here, matching the behavior of the layer this replaces.
pub fn retriable_for(kind: ErrorKind, status_code: Option<u16>) -> bool {
    match kind {
        ErrorKind::Network | ErrorKind::Timeout => true,
        ErrorKind::Http => status_code.is_some_and(|code| code >= 500),
        ErrorKind::Unknown => false,
    }
}

/// User-facing message for a non-success HTTP status.
fn status_message(code: u16) -> &'static str {
    match code {
        code if code >= 500 => "server trouble, try again shortly",
        404 => "not found",
        401 | 403 => "not authorized",
        429 => "rate limited, slow down",
        _ => "request failed",
    }
}

/// Classified error for a response with a non-success status.
pub fn status_error(code: u16, body: String) -> ClassifiedError {
    ClassifiedError {
        kind: ErrorKind::Http,
        message: status_message(code).to_string(),
        status_code: Some(code),
        retriable: retriable_for(ErrorKind::Http, Some(code)),
        raw_details: if body.is_empty() { None } else { Some(body) },
    }
}

/// Classified error for an attempt that exceeded its deadline.
pub fn timeout_error(deadline: Duration) -> ClassifiedError {
    ClassifiedError {
        kind: ErrorKind::Timeout,
        message: "request timed out".to_string(),
        status_code: None,
        retriable: retriable_for(ErrorKind::Timeout, None),
        raw_details: Some(format!("no response within {}ms", deadline.as_millis())),
    }
}

/// Classified error for the offline preflight check.
pub fn offline_error() -> ClassifiedError {
    ClassifiedError {
        kind: ErrorKind::Network,
        message: "no internet connection".to_string(),
        status_code: None,
        retriable: retriable_for(ErrorKind::Network, None),
        raw_details: None,
    }
}

/// Classified error for a wire-level dispatch failure.
pub fn transport_error(err: &TransportError) -> ClassifiedError {
    match err {
        TransportError::Timeout(msg) => ClassifiedError {
            kind: ErrorKind::Timeout,
            message: "request timed out".to_string(),
            status_code: None,
            retriable: retriable_for(ErrorKind::Timeout, None),
            raw_details: Some(msg.clone()),
        },
        TransportError::Other(msg) => ClassifiedError {
            kind: ErrorKind::Unknown,
            message: "request failed".to_string(),
            status_code: None,
            retriable: retriable_for(ErrorKind::Unknown, None),
            raw_details: Some(msg.clone()),
        },
    }
}

/// Classified error for a payload that could not be parsed as requested.
pub fn parse_error(err: &serde_json::Error) -> ClassifiedError {
    ClassifiedError {
        kind: ErrorKind::Unknown,
        message: "request failed".to_string(),
        status_code: None,
        retriable: retriable_for(ErrorKind::Unknown, None),
        raw_details: Some(format!("unparseable payload: {err}")),
    }
}
