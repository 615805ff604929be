//! Error types shared by every client operation

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::transport::TransportError;

/// Errors that can occur while talking to a Dradis server or navigating
/// the local entity graph
#[derive(Debug, Error)]
pub enum DradisError {
    /// Network/IO failure reported by the transport, propagated as-is
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// A response arrived but not with the single status the operation expects
    #[error("could not {operation}: server answered {status} (expected {expected})")]
    UnexpectedStatus {
        operation: &'static str,
        expected: u16,
        status: u16,
    },

    /// The response body did not have the expected entity shape
    #[error("could not decode {entity} from response: {source}")]
    Decode {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A request payload could not be encoded
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A key is absent from an ordered field map
    #[error("field not found: {0}")]
    FieldNotFound(String),

    /// A lookup by id, name, label or title found no match
    #[error("no {kind} found for '{key}'")]
    NotFound { kind: &'static str, key: String },

    /// The entity carries no back-reference to the parent its request path needs
    #[error("{entity} is not attached to a {parent}")]
    Detached {
        entity: &'static str,
        parent: &'static str,
    },

    /// A required argument was empty
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DradisError {
    pub(crate) fn not_found(kind: &'static str, key: impl ToString) -> Self {
        DradisError::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    /// True for lookup misses, as opposed to remote or transport failures
    pub fn is_not_found(&self) -> bool {
        matches!(self, DradisError::NotFound { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, DradisError>;
