use tempfile::TempDir;
use vecstore::{ConnectionTarget, Node, SqliteVectorStore, StoreConfig, StoreError, VectorStore};

fn file_config(temp_dir: &TempDir, embed_dim: usize) -> StoreConfig {
    StoreConfig::new(
        ConnectionTarget::File(temp_dir.path().join("store").join("vectors.db")),
        embed_dim,
    )
}

#[test]
fn test_rows_survive_reopen() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = SqliteVectorStore::open(file_config(&temp_dir, 3)).unwrap();
        store
            .add(&[Node::new("a", "first").with_embedding(vec![1.0, 2.0, 3.0])])
            .unwrap();
    }

    let store = SqliteVectorStore::open(file_config(&temp_dir, 3)).unwrap();
    assert_eq!(store.count().unwrap(), 1);

    let item = store.get_item(1).unwrap().unwrap();
    assert_eq!(item.node_id, "a");
    assert_eq!(item.embedding, vec![1.0, 2.0, 3.0]);

    let ids = store
        .add(&[Node::new("b", "second").with_embedding(vec![4.0, 5.0, 6.0])])
        .unwrap();
    assert_eq!(ids, vec![2]);
}

#[test]
fn test_reopen_with_other_dimension_fails() {
    let temp_dir = TempDir::new().unwrap();
    SqliteVectorStore::open(file_config(&temp_dir, 3)).unwrap();

    let err = SqliteVectorStore::open(file_config(&temp_dir, 4)).unwrap_err();
    assert!(matches!(err, StoreError::StoreInitialization { .. }));
}

#[test]
fn test_connection_target_from_string() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("by-string.db");
    let config = StoreConfig::new(&*path.to_string_lossy(), 2);

    let store = SqliteVectorStore::open(config).unwrap();
    assert!(path.exists());
    assert!(store.client().unwrap().unwrap().check_integrity().unwrap());
}
