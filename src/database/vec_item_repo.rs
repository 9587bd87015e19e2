use rusqlite::{params, Connection, OptionalExtension};

use crate::codec::VectorCodec;
use crate::database::connection::DatabaseManager;
use crate::database::schema::VEC_TABLE_NAME;
use crate::error::{Result, StoreError};
use crate::models::{Metadata, Node, StoredItem};

/// A node already encoded into the column values of one `vec_items` row
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedRow {
    pub node_id: String,
    pub embedding: Vec<u8>,
    pub metadata: String,
    pub text: String,
}

impl EncodedRow {
    pub fn from_node(codec: &VectorCodec, node: &Node) -> Result<Self> {
        Ok(Self {
            node_id: node.node_id.clone(),
            embedding: codec.encode(&node.node_id, &node.embedding)?,
            metadata: node.metadata_json()?,
            text: node.content.clone(),
        })
    }
}

pub struct VecItemRepository {
    db_manager: DatabaseManager,
    codec: VectorCodec,
}

impl VecItemRepository {
    pub fn new(db_manager: DatabaseManager, codec: VectorCodec) -> Self {
        Self { db_manager, codec }
    }

    /// Insert rows one statement at a time, each committed on its own.
    ///
    /// On failure the rows inserted before the failing one stay committed.
    pub fn insert_each(&self, rows: &[EncodedRow]) -> Result<Vec<i64>> {
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let id = self
                .db_manager
                .with_connection_store(|conn| insert_row(conn, row))?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Insert all rows in one transaction; nothing is kept if any insert fails
    pub fn insert_batch(&self, rows: &[EncodedRow]) -> Result<Vec<i64>> {
        self.db_manager.with_transaction(|conn| {
            rows.iter()
                .map(|row| insert_row(conn, row))
                .collect::<Result<Vec<_>>>()
        })
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<StoredItem>> {
        let raw = self.db_manager.with_connection(|conn| {
            conn.query_row(
                &format!(
                    "SELECT id, node_id, metadata_, text, embedding FROM {VEC_TABLE_NAME} WHERE id = ?1"
                ),
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, Option<String>>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, Option<String>>(3)?,
                        row.get::<_, Vec<u8>>(4)?,
                    ))
                },
            )
            .optional()
        })?;

        let Some((id, node_id, metadata, text, embedding)) = raw else {
            return Ok(None);
        };

        let metadata: Metadata = match metadata.as_deref() {
            Some(json) if !json.is_empty() => serde_json::from_str(json)?,
            _ => Metadata::new(),
        };

        Ok(Some(StoredItem {
            id,
            node_id: node_id.unwrap_or_default(),
            embedding: self.codec.decode(&embedding)?,
            metadata,
            text: text.unwrap_or_default(),
        }))
    }

    /// The embedding blob exactly as stored
    pub fn raw_embedding(&self, id: i64) -> Result<Option<Vec<u8>>> {
        self.db_manager.with_connection(|conn| {
            conn.query_row(
                &format!("SELECT embedding FROM {VEC_TABLE_NAME} WHERE id = ?1"),
                params![id],
                |row| row.get(0),
            )
            .optional()
        })
    }

    pub fn count(&self) -> Result<u64> {
        let count: i64 = self.db_manager.with_connection(|conn| {
            conn.query_row(&format!("SELECT COUNT(*) FROM {VEC_TABLE_NAME}"), [], |row| {
                row.get(0)
            })
        })?;
        Ok(count.max(0) as u64)
    }
}

fn insert_row(conn: &Connection, row: &EncodedRow) -> Result<i64> {
    conn.execute(
        &format!(
            "INSERT INTO {VEC_TABLE_NAME} (node_id, embedding, metadata_, text) VALUES (?1, ?2, ?3, ?4)"
        ),
        params![row.node_id, row.embedding, row.metadata, row.text],
    )
    .map_err(|e| StoreError::store_write(&row.node_id, e))?;

    Ok(conn.last_insert_rowid())
}
