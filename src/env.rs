//! Environment variable constants used throughout the crate
//!
//! This module centralizes all environment variable names so configuration
//! lookups stay consistent.

/// Logging configuration
pub mod logging {
    /// Log level configuration (e.g., "debug", "info", "warn", "error")
    pub const LOG_LEVEL: &str = "VECSTORE_LOG_LEVEL";

    /// Log file path for file-based logging
    pub const LOG_FILE: &str = "VECSTORE_LOG_FILE";

    /// Disable colored output (follows the NO_COLOR standard)
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// Store configuration
pub mod store {
    /// Connection target: ":memory:" or a database file path
    pub const DB: &str = "VECSTORE_DB";

    /// Embedding dimension of the store
    pub const EMBED_DIM: &str = "VECSTORE_EMBED_DIM";

    /// Insert mode ("per_row" or "batch")
    pub const INSERT_MODE: &str = "VECSTORE_INSERT_MODE";
}
