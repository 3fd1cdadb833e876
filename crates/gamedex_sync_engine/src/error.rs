//! Error types for the sync engine.

use gamedex_core::{CoreError, ExternalId};
use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during sync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Network or transport error.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
        /// Whether the operation can be retried.
        retryable: bool,
    },

    /// The remote service answered with a non-success status.
    #[error("{endpoint} returned status {status}")]
    Status {
        /// Endpoint that was called.
        endpoint: String,
        /// HTTP status code.
        status: u16,
    },

    /// Response body could not be understood.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// No entry with this external ID is in the catalog.
    #[error("entry not found: {0}")]
    NotFound(ExternalId),

    /// An entry with this external ID is already in the catalog.
    #[error("duplicate entry: {0}")]
    DuplicateEntry(ExternalId),

    /// Catalog model error.
    #[error("catalog error: {0}")]
    Core(CoreError),
}

impl SyncError {
    /// Creates a retryable transport error.
    pub fn transport_retryable(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: true,
        }
    }

    /// Creates a non-retryable transport error.
    pub fn transport_fatal(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            retryable: false,
        }
    }

    /// Returns true if this error can be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            SyncError::Transport { retryable, .. } => *retryable,
            SyncError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Returns true if the remote call did not complete successfully.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            SyncError::Transport { .. } | SyncError::Status { .. } | SyncError::Protocol(_)
        )
    }

    /// Returns true if the error is a silent no-op for the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, SyncError::NotFound(_) | SyncError::DuplicateEntry(_))
    }
}

impl From<CoreError> for SyncError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotFound(id) => SyncError::NotFound(id),
            CoreError::DuplicateEntry(id) => SyncError::DuplicateEntry(id),
            other => SyncError::Core(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(SyncError::transport_retryable("connection refused").is_retryable());
        assert!(!SyncError::transport_fatal("invalid url").is_retryable());
        let server_side = SyncError::Status {
            endpoint: "POST /Game/criar".into(),
            status: 503,
        };
        assert!(server_side.is_retryable());
        let client_side = SyncError::Status {
            endpoint: "PUT /Game/atualizar/1".into(),
            status: 404,
        };
        assert!(!client_side.is_retryable());
        assert!(!SyncError::NotFound(ExternalId::new(1)).is_retryable());
    }

    #[test]
    fn taxonomy() {
        assert!(SyncError::transport_retryable("x").is_network_failure());
        assert!(SyncError::Protocol("bad json".into()).is_network_failure());
        assert!(!SyncError::NotFound(ExternalId::new(1)).is_network_failure());
        assert!(SyncError::NotFound(ExternalId::new(1)).is_silent());
        assert!(SyncError::DuplicateEntry(ExternalId::new(1)).is_silent());
    }

    #[test]
    fn core_errors_map_onto_taxonomy() {
        let err: SyncError = CoreError::NotFound(ExternalId::new(5)).into();
        assert!(matches!(err, SyncError::NotFound(id) if id == ExternalId::new(5)));

        let err: SyncError = CoreError::InvalidRating { value: 3 }.into();
        assert!(matches!(err, SyncError::Core(_)));
    }

    #[test]
    fn error_display() {
        let err = SyncError::Status {
            endpoint: "DELETE /Game/deletar/900".into(),
            status: 500,
        };
        assert_eq!(err.to_string(), "DELETE /Game/deletar/900 returned status 500");
    }
}
