pub mod connection;
pub mod schema;
pub mod vec_item_repo;

pub use connection::{register_vec_extension, DatabaseManager};
pub use schema::{create_schema, VEC_TABLE_NAME};
pub use vec_item_repo::{EncodedRow, VecItemRepository};
