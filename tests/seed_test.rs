//! Seeding controller tests: exactly-once semantics and retry safety.

use rollcall_rs::catalog::seed_catalog;
use rollcall_rs::engine::ensure_seeded;
use rollcall_rs::error::Error;
use rollcall_rs::model::{Task, TaskDocument, TaskId};
use rollcall_rs::store::memory::MemStore;
use rollcall_rs::store::{FieldWrite, Store};

fn doc(id: &str, category: &str) -> TaskDocument {
    TaskDocument {
        id: TaskId::from(id),
        category: category.to_string(),
        title: format!("task {id}"),
        is_completed: false,
        is_urgent: false,
        note: String::new(),
        sub_items: Vec::new(),
    }
}

async fn read_docs(store: &MemStore) -> Vec<TaskDocument> {
    let mut sub = store.subscribe().await.unwrap();
    sub.next().await.unwrap().unwrap()
}

#[tokio::test]
async fn empty_store_gets_catalog_verbatim() {
    let store = MemStore::new();
    let catalog = vec![
        doc("t1", "admin"),
        doc("t2", "client"),
        doc("t3", "regulatory"),
    ];

    let seeded = ensure_seeded(&store, &catalog).await.unwrap();
    assert!(seeded);

    let docs = read_docs(&store).await;
    assert_eq!(docs, catalog);
}

#[tokio::test]
async fn non_empty_store_is_never_touched() {
    let store = MemStore::new();
    let mut existing = doc("t1", "admin");
    existing.note = "hand-written".to_string();
    existing.is_completed = true;
    store.batch_write(std::slice::from_ref(&existing)).await.unwrap();

    // A different, larger catalog must not be written over it.
    let catalog = vec![doc("t1", "admin"), doc("t2", "client")];
    let seeded = ensure_seeded(&store, &catalog).await.unwrap();
    assert!(!seeded);

    let docs = read_docs(&store).await;
    assert_eq!(docs, vec![existing]);
}

#[tokio::test]
async fn reseeding_after_mutations_preserves_them() {
    let store = MemStore::new();
    let catalog = vec![doc("t1", "admin"), doc("t2", "client")];

    assert!(ensure_seeded(&store, &catalog).await.unwrap());

    store
        .update_field(&TaskId::from("t1"), FieldWrite::Completed(true))
        .await
        .unwrap();
    store
        .update_field(&TaskId::from("t2"), FieldWrite::Note("in review".to_string()))
        .await
        .unwrap();

    // Second call observes non-empty and skips; the mutations survive.
    assert!(!ensure_seeded(&store, &catalog).await.unwrap());

    let docs = read_docs(&store).await;
    assert!(docs.iter().find(|d| d.id.as_str() == "t1").unwrap().is_completed);
    assert_eq!(
        docs.iter().find(|d| d.id.as_str() == "t2").unwrap().note,
        "in review"
    );
}

#[tokio::test]
async fn failed_seed_attempt_is_safely_retried() {
    let store = MemStore::new();
    let catalog = vec![doc("t1", "admin")];

    store.deny_writes(true);
    let err = ensure_seeded(&store, &catalog).await.unwrap_err();
    assert!(matches!(err, Error::PermissionDenied(_)));
    assert!(store.is_empty());

    // Seeding re-checks emptiness, so the retry lands cleanly.
    store.deny_writes(false);
    assert!(ensure_seeded(&store, &catalog).await.unwrap());
    assert_eq!(store.len(), 1);
}

// ---------------------------------------------------------------------------
// Shipped catalog
// ---------------------------------------------------------------------------

#[test]
fn shipped_catalog_is_schema_valid_with_unique_ids() {
    let catalog = seed_catalog();
    assert_eq!(catalog.len(), 13);

    let mut ids = std::collections::HashSet::new();
    for doc in &catalog {
        assert!(ids.insert(doc.id.clone()), "duplicate id {}", doc.id);
        Task::try_from(doc.clone()).expect("catalog document must satisfy the task schema");
    }

    // One regulatory item ships already completed.
    assert!(catalog.iter().any(|d| d.is_completed));
}
