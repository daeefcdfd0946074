//! Error types for the calling-safety layer.
//!
//! Two kinds, kept apart so callers can branch on them:
//!
//! - [`Error::Constraint`]: the caller handed over a buffer of the wrong size,
//!   an out-of-range offset/length pair, or used a streaming authenticator
//!   before initializing it. Detected locally before the backend is touched.
//!   This is a bug in the calling code.
//! - [`Error::Backend`]: the backend rejected the operation (failed
//!   verification, failed decryption, unavailable RNG). For verify-style
//!   operations this is an expected outcome: the message is not authentic.

use thiserror::Error;

/// Result alias for facade operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Pre-flight parameter violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// Buffer length differs from the required length
    #[error("{label}: expected {expected} bytes, got {actual}")]
    Size {
        /// Name of the constraint (e.g. `BOX_NONCEBYTES`)
        label: &'static str,
        /// Required length
        expected: usize,
        /// Length supplied by the caller
        actual: usize,
    },

    /// `offset + length` does not fit inside the buffer
    #[error("range {offset}+{length} exceeds buffer of {buffer_len} bytes")]
    OffsetRange {
        /// Length of the buffer being indexed
        buffer_len: usize,
        /// Requested start
        offset: usize,
        /// Requested length
        length: usize,
    },

    /// Required length is not representable
    #[error("{label}: length overflows usize")]
    LengthOverflow {
        /// Name of the constraint whose arithmetic overflowed
        label: &'static str,
    },

    /// Streaming authenticator used before `init`
    #[error("{operation} called before init")]
    Uninitialized {
        /// Operation that was attempted
        operation: &'static str,
    },
}

/// Facade error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Caller supplied invalid parameters; the backend was not called
    #[error("constraint violation in {operation}: {violation}")]
    Constraint {
        /// Operation that rejected its arguments
        operation: &'static str,
        /// What was wrong
        violation: ConstraintViolation,
    },

    /// Backend returned a non-zero status
    #[error("{operation} failed with backend status {status}")]
    Backend {
        /// Operation that failed
        operation: &'static str,
        /// Raw backend status
        status: i32,
    },
}

impl Error {
    /// Returns true if the caller passed invalid parameters.
    ///
    /// These indicate a programming error and should be fixed, not handled.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::Constraint { .. })
    }

    /// Returns true if the backend rejected the operation.
    ///
    /// For decrypt and verify operations this means the input is not
    /// authentic, which callers are expected to handle.
    pub fn is_backend_failure(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }

    /// Name of the operation that produced this error.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Constraint { operation, .. } | Self::Backend { operation, .. } => operation,
        }
    }

    /// The violation, if this is a constraint error.
    pub fn violation(&self) -> Option<&ConstraintViolation> {
        match self {
            Self::Constraint { violation, .. } => Some(violation),
            Self::Backend { .. } => None,
        }
    }
}
