pub mod codec;
pub mod database;
pub mod models;
pub mod store;

pub mod config;
pub mod env;
pub mod error;
pub mod logging;

// Re-exports for convenience
pub use codec::VectorCodec;
pub use config::{ConnectionTarget, InsertMode, StoreConfig};
pub use database::DatabaseManager;
pub use error::{Result, StoreError};
pub use logging::{init_logging, LoggingConfig};
pub use models::{Node, StoredItem, VectorStoreQuery, VectorStoreQueryResult};
pub use store::{AsyncVectorStore, Operation, Outcome, OutcomeExt, SqliteVectorStore, VectorStore};
