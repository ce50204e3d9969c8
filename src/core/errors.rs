//! Error types
//!
//! Geometry-layer errors never reach the operator: the gesture controller
//! swallows them and the triggering gesture becomes a no-op. Persistence
//! errors cross the boundary only as log lines.

use thiserror::Error;

/// A mutation the point set refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The mutation would violate the point set's cardinality policy
    #[error("invalid operation `{op}`: {reason}")]
    InvalidOperation {
        op: &'static str,
        reason: &'static str,
    },

    /// The referenced point does not exist
    #[error("no point at index {index} (point set holds {len})")]
    NoSuchPoint { index: usize, len: usize },
}

impl EditError {
    pub(crate) fn invalid(op: &'static str, reason: &'static str) -> Self {
        Self::InvalidOperation { op, reason }
    }

    /// Whether this is a cardinality violation rather than a bad reference
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, Self::InvalidOperation { .. })
    }
}

/// Failure of the attribute store or the submission collaborator
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode or decode stored data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend rejected {url} with status {status}")]
    Status { url: String, status: u16 },
}

pub type EditResult<T> = Result<T, EditError>;
