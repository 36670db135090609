//! Error classification shared by every service.
//!
//! Each service keeps its own `thiserror` enum. What they share is the
//! coarse [`ErrorKind`] used to decide how a failure is handled:
//! network failures are retried, everything else is reported as-is.

use std::fmt;

/// The failure taxonomy every service error maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transient connectivity failure. The only kind that is retried.
    Network,
    /// A student, booth or PIN lookup came back empty.
    NotFound,
    /// Input was rejected before or by the remote side (missing fields,
    /// mismatched passwords, malformed CSV, uniqueness clashes).
    Validation,
    /// The remote side reported a failure. No compensation is attempted
    /// by the caller.
    Remote,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Network => "network",
            ErrorKind::NotFound => "not found",
            ErrorKind::Validation => "validation",
            ErrorKind::Remote => "remote",
        };
        f.write_str(name)
    }
}

/// Implemented by error types that can say which [`ErrorKind`] they are.
pub trait Classify {
    fn kind(&self) -> ErrorKind;

    fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }
}
