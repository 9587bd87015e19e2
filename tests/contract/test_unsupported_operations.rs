use std::path::Path;
use vecstore::models::{MetadataFilter, MetadataFilters, VectorStoreQuery};
use vecstore::{
    Node, Operation, Outcome, OutcomeExt, SqliteVectorStore, StoreConfig, StoreError, VectorStore,
};

fn populated_store() -> SqliteVectorStore {
    let store = SqliteVectorStore::open_in_memory(2).unwrap();
    store
        .add(&[Node::new("a", "alpha").with_embedding(vec![1.0, 0.0])])
        .unwrap();
    store
}

fn assert_not_supported<T: std::fmt::Debug>(result: vecstore::Result<T>, expected: Operation) {
    match result {
        Err(StoreError::NotSupported { operation }) => assert_eq!(operation, expected),
        other => panic!("expected NotSupported({expected}), got {other:?}"),
    }
}

#[test]
fn test_query_is_not_supported() {
    let store = populated_store();
    let query = VectorStoreQuery::nearest(vec![1.0, 0.0], 5)
        .with_filters(MetadataFilters::new(vec![MetadataFilter::equals("lang", "en")]));
    assert_not_supported(store.query(&query), Operation::Query);
}

#[test]
fn test_get_nodes_is_not_supported() {
    let store = populated_store();
    let ids = vec!["a".to_string()];
    assert_not_supported(store.get_nodes(Some(&ids), None), Operation::GetNodes);
    assert_not_supported(store.get_nodes(None, None), Operation::GetNodes);
}

#[test]
fn test_deletes_are_not_supported() {
    let store = populated_store();
    let ids = vec!["a".to_string()];
    assert_not_supported(store.delete_by_ref_doc("doc-1"), Operation::DeleteByRefDoc);
    assert_not_supported(store.delete_nodes(Some(&ids), None), Operation::DeleteNodes);

    // Nothing was removed
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_clear_is_not_supported() {
    let store = populated_store();
    assert_not_supported(store.clear(), Operation::Clear);
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_unsupported_on_uninitialized_store() {
    let store = SqliteVectorStore::new(StoreConfig::in_memory(2)).unwrap();
    assert_not_supported(store.query(&VectorStoreQuery::default()), Operation::Query);
    assert_not_supported(store.clear(), Operation::Clear);
}

#[test]
fn test_outcome_distinguishes_unsupported_from_empty() {
    let store = populated_store();

    let outcome = store.get_nodes(None, None).into_outcome().unwrap();
    assert_eq!(outcome, Outcome::Unsupported(Operation::GetNodes));

    let added = store.add(&[]).into_outcome().unwrap();
    assert_eq!(added, Outcome::Supported(vec![]));
}

#[test]
fn test_supports_matches_behaviour() {
    let store = SqliteVectorStore::open_in_memory(2).unwrap();
    for operation in Operation::ALL {
        let supported = store.supports(operation);
        let result = match operation {
            Operation::Add => store.add(&[]).map(|_| ()),
            Operation::Query => store.query(&VectorStoreQuery::default()).map(|_| ()),
            Operation::GetNodes => store.get_nodes(None, None).map(|_| ()),
            Operation::DeleteByRefDoc => store.delete_by_ref_doc("doc"),
            Operation::DeleteNodes => store.delete_nodes(None, None),
            Operation::Clear => store.clear(),
            Operation::Persist => store.persist(Path::new("unused")),
        };
        assert_eq!(result.is_ok(), supported, "{operation}");
    }
}
