//! Classified errors surfaced by the request layer.

use std::fmt;

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Failure category for a classified error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No connectivity at the time of the attempt.
    Network,
    /// The per-attempt deadline elapsed before a response arrived.
    Timeout,
    /// A response arrived with a non-success status.
    Http,
    /// Anything uncategorized (transport faults, unparseable payloads).
    Unknown,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Timeout => write!(f, "timeout"),
            Self::Http => write!(f, "http"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// ClassifiedError
// ---------------------------------------------------------------------------

/// Normalized failure from the request layer.
///
/// `retriable` is derived from `(kind, status_code)` by the classification
/// table in `client::classify`; nothing else may set it.
#[derive(Debug, Clone)]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    /// User-facing message derived from the kind and status.
    pub message: String,
    /// Present only for `Http` errors.
    pub status_code: Option<u16>,
    /// Whether the retry loop should attempt again rather than propagate.
    pub retriable: bool,
    /// Opaque diagnostic payload (transport error text, body snippet).
    pub raw_details: Option<String>,
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(code) = self.status_code {
            write!(f, " (HTTP {code})")?;
        }
        if let Some(details) = &self.raw_details {
            write!(f, ": {details}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ClassifiedError {}

// ---------------------------------------------------------------------------
// TransportError
// ---------------------------------------------------------------------------

/// Wire-level failure from a single dispatch, before any HTTP status exists.
///
/// Kept separate from [`ClassifiedError`] so transports stay mockable and
/// classification stays in one place.
#[derive(Debug)]
pub enum TransportError {
    /// The transport's own timeout machinery fired.
    Timeout(String),
    /// Any other wire failure (connect, TLS, protocol, body read).
    Other(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout(msg) => write!(f, "transport timeout: {msg}"),
            Self::Other(msg) => write!(f, "transport: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else {
            Self::Other(e.to_string())
        }
    }
}
