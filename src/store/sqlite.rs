use std::path::Path;
use tracing::{debug, info, warn};

use super::lifecycle::LifecycleCell;
use super::outcome::Operation;
use super::traits::VectorStore;
use crate::codec::VectorCodec;
use crate::config::{InsertMode, StoreConfig};
use crate::database::schema::{create_schema, declared_dimension, VEC_TABLE_NAME};
use crate::database::{DatabaseManager, EncodedRow, VecItemRepository};
use crate::error::{Result, StoreError};
use crate::logging::log_error;
use crate::models::{MetadataFilters, Node, StoredItem, VectorStoreQuery, VectorStoreQueryResult};

/// Vector store backed by a `sqlite-vec` `vec0` table.
///
/// The connection and schema are created lazily on the first call that needs
/// them, or eagerly through [`SqliteVectorStore::open`].
#[derive(Debug)]
pub struct SqliteVectorStore {
    config: StoreConfig,
    codec: VectorCodec,
    lifecycle: LifecycleCell,
}

impl SqliteVectorStore {
    /// Build an uninitialized store; nothing is opened until first use
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            codec: VectorCodec::new(config.embed_dim),
            config,
            lifecycle: LifecycleCell::new(),
        })
    }

    /// Build a store and initialize it before returning
    pub fn open(config: StoreConfig) -> Result<Self> {
        let store = Self::new(config)?;
        store.initialize()?;
        Ok(store)
    }

    /// In-memory store of the given dimension, initialized
    pub fn open_in_memory(embed_dim: usize) -> Result<Self> {
        Self::open(StoreConfig::in_memory(embed_dim))
    }

    /// Open the connection, load `sqlite-vec` and create the vector table.
    ///
    /// Calling this again on a ready store does nothing.
    pub fn initialize(&self) -> Result<()> {
        self.connection().map(|_| ())
    }

    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.lifecycle.ready()?.is_some())
    }

    /// The underlying connection, `None` until the store is initialized
    pub fn client(&self) -> Result<Option<DatabaseManager>> {
        self.lifecycle.ready()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn embed_dim(&self) -> usize {
        self.config.embed_dim
    }

    pub fn codec(&self) -> VectorCodec {
        self.codec
    }

    /// Read one stored row back by id
    pub fn get_item(&self, id: i64) -> Result<Option<StoredItem>> {
        self.repository()?.get_by_id(id)
    }

    /// The embedding blob of one row exactly as stored
    pub fn raw_embedding(&self, id: i64) -> Result<Option<Vec<u8>>> {
        self.repository()?.raw_embedding(id)
    }

    /// Number of stored rows
    pub fn count(&self) -> Result<u64> {
        self.repository()?.count()
    }

    fn connection(&self) -> Result<DatabaseManager> {
        self.lifecycle.get_or_init(|| {
            self.setup().map_err(|e| {
                log_error(&e, "vector store initialization");
                e
            })
        })
    }

    fn repository(&self) -> Result<VecItemRepository> {
        Ok(VecItemRepository::new(self.connection()?, self.codec))
    }

    fn setup(&self) -> Result<DatabaseManager> {
        let manager = DatabaseManager::open(&self.config.connection)?;
        let embed_dim = self.config.embed_dim;

        manager.with_connection_store(|conn| {
            let existing = declared_dimension(conn).map_err(|e| {
                StoreError::initialization(format!("Failed to inspect existing schema: {e}"))
            })?;

            if let Some(existing) = existing {
                if existing != embed_dim {
                    return Err(StoreError::initialization(format!(
                        "{VEC_TABLE_NAME} was created with {existing} dimensions, store is configured for {embed_dim}"
                    )));
                }
            }

            create_schema(conn, embed_dim).map_err(|e| {
                StoreError::initialization(format!("Failed to create {VEC_TABLE_NAME}: {e}"))
            })
        })?;

        info!(
            connection = %self.config.connection,
            embed_dim,
            "Vector store initialized"
        );
        Ok(manager)
    }

    fn unsupported<T>(&self, operation: Operation) -> Result<T> {
        warn!(%operation, "Vector store operation is not supported");
        Err(StoreError::not_supported(operation))
    }
}

impl VectorStore for SqliteVectorStore {
    fn stores_text(&self) -> bool {
        true
    }

    fn supports(&self, operation: Operation) -> bool {
        matches!(operation, Operation::Add | Operation::Persist)
    }

    fn add(&self, nodes: &[Node]) -> Result<Vec<i64>> {
        let repository = self.repository()?;

        // Encode everything first so a bad embedding writes nothing
        let rows = nodes
            .iter()
            .map(|node| EncodedRow::from_node(&self.codec, node))
            .collect::<Result<Vec<_>>>()?;

        let ids = match self.config.insert_mode {
            InsertMode::PerRow => repository.insert_each(&rows)?,
            InsertMode::Batch => repository.insert_batch(&rows)?,
        };

        debug!(
            count = ids.len(),
            mode = ?self.config.insert_mode,
            "Added nodes to vector store"
        );
        Ok(ids)
    }

    fn query(&self, _query: &VectorStoreQuery) -> Result<VectorStoreQueryResult> {
        self.unsupported(Operation::Query)
    }

    fn get_nodes(
        &self,
        _node_ids: Option<&[String]>,
        _filters: Option<&MetadataFilters>,
    ) -> Result<Vec<Node>> {
        self.unsupported(Operation::GetNodes)
    }

    fn delete_by_ref_doc(&self, _ref_doc_id: &str) -> Result<()> {
        self.unsupported(Operation::DeleteByRefDoc)
    }

    fn delete_nodes(
        &self,
        _node_ids: Option<&[String]>,
        _filters: Option<&MetadataFilters>,
    ) -> Result<()> {
        self.unsupported(Operation::DeleteNodes)
    }

    fn clear(&self) -> Result<()> {
        self.unsupported(Operation::Clear)
    }

    /// No-op: the store's state lives in its own database
    fn persist(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "persist is a no-op for the SQLite vector store");
        Ok(())
    }
}
