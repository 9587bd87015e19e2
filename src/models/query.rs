//! Query contract types.
//!
//! The SQLite store does not execute queries yet; these types define what a
//! caller hands to `query` and what a supporting store gives back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::node::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOperator {
    #[default]
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
    Contains,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterCondition {
    #[default]
    And,
    Or,
}

/// A single `key <op> value` predicate on node metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataFilter {
    pub key: String,
    pub value: Value,
    #[serde(default)]
    pub operator: FilterOperator,
}

impl MetadataFilter {
    pub fn equals(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            operator: FilterOperator::Eq,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetadataFilters {
    pub filters: Vec<MetadataFilter>,
    #[serde(default)]
    pub condition: FilterCondition,
}

impl MetadataFilters {
    pub fn new(filters: Vec<MetadataFilter>) -> Self {
        Self {
            filters,
            condition: FilterCondition::And,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorStoreQuery {
    pub query_embedding: Option<Vec<f32>>,
    pub similarity_top_k: usize,
    pub node_ids: Option<Vec<String>>,
    pub filters: Option<MetadataFilters>,
}

impl Default for VectorStoreQuery {
    fn default() -> Self {
        Self {
            query_embedding: None,
            similarity_top_k: 1,
            node_ids: None,
            filters: None,
        }
    }
}

impl VectorStoreQuery {
    pub fn nearest(embedding: Vec<f32>, top_k: usize) -> Self {
        Self {
            query_embedding: Some(embedding),
            similarity_top_k: top_k,
            ..Self::default()
        }
    }

    pub fn with_filters(mut self, filters: MetadataFilters) -> Self {
        self.filters = Some(filters);
        self
    }
}

/// Ranked results; the three vectors are parallel
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VectorStoreQueryResult {
    pub nodes: Vec<Node>,
    pub similarities: Vec<f32>,
    pub ids: Vec<String>,
}
