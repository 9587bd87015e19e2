use thiserror::Error;

use crate::store::Operation;

/// Errors raised by the vector store and its codec
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store initialization failed: {message}")]
    StoreInitialization { message: String },

    #[error("Embedding for node '{node_id}' has {actual} components, expected {expected}")]
    Encoding {
        node_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("Failed to write node '{node_id}': {source}")]
    StoreWrite {
        node_id: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Malformed vector blob: expected {expected_bytes} bytes, got {actual_bytes}")]
    MalformedVector {
        expected_bytes: usize,
        actual_bytes: usize,
    },

    #[error("Operation not supported: {operation}")]
    NotSupported { operation: Operation },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Create a store initialization error
    pub fn initialization<S: Into<String>>(message: S) -> Self {
        Self::StoreInitialization {
            message: message.into(),
        }
    }

    /// Create an embedding length mismatch error
    pub fn encoding<S: Into<String>>(node_id: S, expected: usize, actual: usize) -> Self {
        Self::Encoding {
            node_id: node_id.into(),
            expected,
            actual,
        }
    }

    /// Create a write failure error
    pub fn store_write<S: Into<String>>(node_id: S, source: rusqlite::Error) -> Self {
        Self::StoreWrite {
            node_id: node_id.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn not_supported(operation: Operation) -> Self {
        Self::NotSupported { operation }
    }

    /// True when the error reports an unimplemented operation rather than a failure
    pub fn is_not_supported(&self) -> bool {
        matches!(self, StoreError::NotSupported { .. })
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            StoreError::StoreInitialization { .. } => "initialization",
            StoreError::Encoding { .. } => "encoding",
            StoreError::StoreWrite { .. } => "write",
            StoreError::MalformedVector { .. } => "malformed_vector",
            StoreError::NotSupported { .. } => "not_supported",
            StoreError::InvalidConfig { .. } => "config",
            StoreError::Database(_) => "database",
            StoreError::Json(_) => "json",
            StoreError::Io(_) => "io",
            StoreError::LockPoisoned => "lock",
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StoreError::LockPoisoned
    }
}

/// Result type alias for the vector store
pub type Result<T> = std::result::Result<T, StoreError>;
