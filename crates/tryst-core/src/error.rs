//! Failure taxonomy for registry operations.
//!
//! Four kinds cover every way an operation can fail. The transport boundary
//! collapses all of them into one generic client-error response; the kinds
//! exist so operators and tests can tell failures apart.

use thiserror::Error;

/// Result type for registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors produced by [`SessionRegistry`](crate::SessionRegistry) operations.
///
/// A failed operation never leaves partial state behind: every variant is
/// returned before the registry's indices are touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A required field is missing or empty
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the missing or empty field
        message: String,
    },

    /// The referenced identifier has no live session
    #[error("Not found: {message}")]
    NotFound {
        /// Description of what was not found
        message: String,
    },

    /// A host polled a session whose guest slot is already occupied
    #[error("Conflict: {message}")]
    Conflict {
        /// Description of the occupied slot
        message: String,
    },

    /// The request does not match any known operation shape
    #[error("Unrecognized request: {message}")]
    Unrecognized {
        /// Description of the unmatched request
        message: String,
    },
}

impl RegistryError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an unrecognized request error
    pub fn unrecognized(message: impl Into<String>) -> Self {
        Self::Unrecognized {
            message: message.into(),
        }
    }
}
