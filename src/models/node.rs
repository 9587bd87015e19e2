use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// String-keyed metadata attached to a node
pub type Metadata = Map<String, Value>;

/// A unit of indexed content produced by the indexing pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub node_id: String,
    pub embedding: Vec<f32>,
    #[serde(default)]
    pub metadata: Metadata,
    pub content: String,
}

impl Node {
    pub fn new(node_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            embedding: Vec::new(),
            metadata: Metadata::new(),
            content: content.into(),
        }
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Metadata as compact JSON text, the form stored in `metadata_`
    pub fn metadata_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.metadata)
    }
}
