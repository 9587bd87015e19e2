use serde_json::json;
use std::sync::Arc;
use std::thread;
use vecstore::codec;
use vecstore::{InsertMode, Node, SqliteVectorStore, StoreConfig, StoreError, VectorStore};

fn node(id: &str, embedding: Vec<f32>) -> Node {
    Node::new(id, format!("content of {id}")).with_embedding(embedding)
}

fn raw_embedding(store: &SqliteVectorStore, id: i64) -> Vec<u8> {
    store.raw_embedding(id).unwrap().unwrap()
}

#[test]
fn test_add_returns_first_id_and_raw_bytes_decode() {
    let store = SqliteVectorStore::new(StoreConfig::in_memory(3)).unwrap();

    let ids = store
        .add(&[Node::new("a", "hi").with_embedding(vec![1.0, 2.0, 3.0])])
        .unwrap();
    assert_eq!(ids, vec![1]);

    let blob = raw_embedding(&store, 1);
    assert_eq!(blob.len(), 12);
    assert_eq!(codec::decode(&blob, 3).unwrap(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_wrong_dimension_leaves_store_empty() {
    let store = SqliteVectorStore::new(StoreConfig::in_memory(3)).unwrap();

    let err = store.add(&[node("a", vec![1.0, 2.0])]).unwrap_err();
    assert!(matches!(err, StoreError::Encoding { .. }));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_ids_follow_input_order() {
    let store = SqliteVectorStore::open_in_memory(2).unwrap();

    let ids = store
        .add(&[
            node("n1", vec![0.1, 0.2]),
            node("n2", vec![0.3, 0.4]),
            node("n3", vec![0.5, 0.6]),
        ])
        .unwrap();

    assert_eq!(ids.len(), 3);
    assert!(ids.windows(2).all(|w| w[0] < w[1]));

    for (id, expected) in ids.iter().zip(["n1", "n2", "n3"]) {
        let item = store.get_item(*id).unwrap().unwrap();
        assert_eq!(item.node_id, expected);
        assert_eq!(item.text, format!("content of {expected}"));
    }
}

#[test]
fn test_ids_keep_increasing_across_calls() {
    let store = SqliteVectorStore::open_in_memory(1).unwrap();
    let first = store.add(&[node("a", vec![1.0])]).unwrap();
    let second = store.add(&[node("b", vec![2.0]), node("c", vec![3.0])]).unwrap();

    assert_eq!(first, vec![1]);
    assert_eq!(second, vec![2, 3]);
}

#[test]
fn test_duplicate_node_ids_create_separate_rows() {
    let store = SqliteVectorStore::open_in_memory(2).unwrap();
    let ids = store
        .add(&[node("same", vec![1.0, 1.0]), node("same", vec![2.0, 2.0])])
        .unwrap();

    assert_ne!(ids[0], ids[1]);
    assert_eq!(store.count().unwrap(), 2);
    assert_eq!(store.get_item(ids[1]).unwrap().unwrap().embedding, vec![2.0, 2.0]);
}

#[test]
fn test_metadata_is_stored_as_json() {
    let store = SqliteVectorStore::open_in_memory(2).unwrap();
    let input = node("doc-1-chunk-0", vec![0.25, 0.75])
        .with_metadata("file_name", "guide.md")
        .with_metadata("page", 4)
        .with_metadata("tags", json!(["setup", "install"]));

    let ids = store.add(std::slice::from_ref(&input)).unwrap();

    let raw: String = store
        .client()
        .unwrap()
        .unwrap()
        .with_connection(|conn| {
            conn.query_row(
                "SELECT metadata_ FROM vec_items WHERE id = ?1",
                [ids[0]],
                |row| row.get(0),
            )
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed["file_name"], "guide.md");
    assert_eq!(parsed["page"], 4);

    let item = store.get_item(ids[0]).unwrap().unwrap();
    assert_eq!(Node::from(item), input);
}

#[test]
fn test_empty_add() {
    let store = SqliteVectorStore::new(StoreConfig::in_memory(4)).unwrap();
    assert!(store.add(&[]).unwrap().is_empty());
    assert!(store.is_initialized().unwrap());
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_batch_mode_inserts_all_rows() {
    let config = StoreConfig::in_memory(2).with_insert_mode(InsertMode::Batch);
    let store = SqliteVectorStore::open(config).unwrap();

    let ids = store
        .add(&[node("a", vec![1.0, 0.0]), node("b", vec![0.0, 1.0])])
        .unwrap();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(store.count().unwrap(), 2);
}

#[test]
fn test_batch_mode_dimension_error_writes_nothing() {
    let config = StoreConfig::in_memory(2).with_insert_mode(InsertMode::Batch);
    let store = SqliteVectorStore::open(config).unwrap();

    let err = store
        .add(&[node("a", vec![1.0, 0.0]), node("b", vec![0.0])])
        .unwrap_err();
    assert!(matches!(err, StoreError::Encoding { .. }));
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_initialize_is_idempotent() {
    let store = SqliteVectorStore::new(StoreConfig::in_memory(3)).unwrap();
    store.initialize().unwrap();
    store.add(&[node("a", vec![1.0, 2.0, 3.0])]).unwrap();
    store.initialize().unwrap();

    let tables: i64 = store
        .client()
        .unwrap()
        .unwrap()
        .with_connection(|conn| {
            conn.query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE name = 'vec_items'",
                [],
                |row| row.get(0),
            )
        })
        .unwrap();
    assert_eq!(tables, 1);
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_concurrent_adds_are_serialized() {
    let store = Arc::new(SqliteVectorStore::new(StoreConfig::in_memory(2)).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let nodes: Vec<Node> = (0..5)
                    .map(|i| node(&format!("t{t}-n{i}"), vec![t as f32, i as f32]))
                    .collect();
                store.add(&nodes).unwrap()
            })
        })
        .collect();

    let mut all_ids: Vec<i64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    all_ids.sort_unstable();
    all_ids.dedup();

    assert_eq!(all_ids.len(), 20);
    assert_eq!(store.count().unwrap(), 20);
}
