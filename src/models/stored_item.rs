use serde::{Deserialize, Serialize};

use super::node::{Metadata, Node};

/// A row of `vec_items` read back from the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredItem {
    pub id: i64,
    pub node_id: String,
    pub embedding: Vec<f32>,
    pub metadata: Metadata,
    pub text: String,
}

impl From<StoredItem> for Node {
    fn from(item: StoredItem) -> Self {
        Node {
            node_id: item.node_id,
            embedding: item.embedding,
            metadata: item.metadata,
            content: item.text,
        }
    }
}
