use async_trait::async_trait;
use std::path::Path;

use super::outcome::Operation;
use crate::error::Result;
use crate::models::{MetadataFilters, Node, VectorStoreQuery, VectorStoreQueryResult};

/// The vector store contract consumed by the indexing pipeline.
///
/// Operations a store does not implement return
/// `StoreError::NotSupported`, never an empty result.
pub trait VectorStore {
    /// Whether node text is kept next to the embedding
    fn stores_text(&self) -> bool;

    fn supports(&self, operation: Operation) -> bool;

    /// Store one row per node and return the assigned ids in input order
    fn add(&self, nodes: &[Node]) -> Result<Vec<i64>>;

    /// Nearest-neighbour search with optional metadata filtering
    fn query(&self, query: &VectorStoreQuery) -> Result<VectorStoreQueryResult>;

    fn get_nodes(
        &self,
        node_ids: Option<&[String]>,
        filters: Option<&MetadataFilters>,
    ) -> Result<Vec<Node>>;

    /// Delete every node that came from the given source document
    fn delete_by_ref_doc(&self, ref_doc_id: &str) -> Result<()>;

    fn delete_nodes(
        &self,
        node_ids: Option<&[String]>,
        filters: Option<&MetadataFilters>,
    ) -> Result<()>;

    /// Remove all stored nodes
    fn clear(&self) -> Result<()>;

    fn persist(&self, path: &Path) -> Result<()>;
}

/// Async-flavoured entry points.
///
/// Every method calls straight through to its blocking counterpart: nothing
/// is spawned and the returned future completes on its first poll.
#[async_trait]
pub trait AsyncVectorStore {
    async fn aadd(&self, nodes: &[Node]) -> Result<Vec<i64>>;

    async fn aquery(&self, query: &VectorStoreQuery) -> Result<VectorStoreQueryResult>;

    async fn aget_nodes(
        &self,
        node_ids: Option<&[String]>,
        filters: Option<&MetadataFilters>,
    ) -> Result<Vec<Node>>;

    async fn adelete_by_ref_doc(&self, ref_doc_id: &str) -> Result<()>;

    async fn adelete_nodes(
        &self,
        node_ids: Option<&[String]>,
        filters: Option<&MetadataFilters>,
    ) -> Result<()>;

    async fn aclear(&self) -> Result<()>;
}

#[async_trait]
impl<T> AsyncVectorStore for T
where
    T: VectorStore + Sync,
{
    async fn aadd(&self, nodes: &[Node]) -> Result<Vec<i64>> {
        self.add(nodes)
    }

    async fn aquery(&self, query: &VectorStoreQuery) -> Result<VectorStoreQueryResult> {
        self.query(query)
    }

    async fn aget_nodes(
        &self,
        node_ids: Option<&[String]>,
        filters: Option<&MetadataFilters>,
    ) -> Result<Vec<Node>> {
        self.get_nodes(node_ids, filters)
    }

    async fn adelete_by_ref_doc(&self, ref_doc_id: &str) -> Result<()> {
        self.delete_by_ref_doc(ref_doc_id)
    }

    async fn adelete_nodes(
        &self,
        node_ids: Option<&[String]>,
        filters: Option<&MetadataFilters>,
    ) -> Result<()> {
        self.delete_nodes(node_ids, filters)
    }

    async fn aclear(&self) -> Result<()> {
        self.clear()
    }
}
