//! Vector store contract and its SQLite (`sqlite-vec`) implementation.

mod lifecycle;
mod outcome;
mod sqlite;
mod traits;

pub use outcome::{Operation, Outcome, OutcomeExt};
pub use sqlite::SqliteVectorStore;
pub use traits::{AsyncVectorStore, VectorStore};
