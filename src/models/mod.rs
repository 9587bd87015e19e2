pub mod node;
pub mod query;
pub mod stored_item;

pub use node::{Metadata, Node};
pub use query::{
    FilterCondition, FilterOperator, MetadataFilter, MetadataFilters, VectorStoreQuery,
    VectorStoreQueryResult,
};
pub use stored_item::StoredItem;
