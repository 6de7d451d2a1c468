//! Mutation gateway tests: identity precondition and write-through
//! behavior.

use rollcall_rs::error::Error;
use rollcall_rs::gateway::Gateway;
use rollcall_rs::identity::LocalIdentity;
use rollcall_rs::model::{TaskDocument, TaskId};
use rollcall_rs::store::Store;
use rollcall_rs::store::memory::MemStore;

fn doc(id: &str) -> TaskDocument {
    TaskDocument {
        id: TaskId::from(id),
        category: "admin".to_string(),
        title: format!("task {id}"),
        is_completed: false,
        is_urgent: false,
        note: String::new(),
        sub_items: Vec::new(),
    }
}

async fn seeded_store() -> MemStore {
    let store = MemStore::new();
    store.batch_write(&[doc("a")]).await.unwrap();
    store
}

async fn current_doc(store: &MemStore, id: &str) -> TaskDocument {
    let mut sub = store.subscribe().await.unwrap();
    let docs = sub.next().await.unwrap().unwrap();
    docs.into_iter().find(|d| d.id.as_str() == id).unwrap()
}

#[tokio::test]
async fn rejects_toggle_without_identity() {
    let store = seeded_store().await;
    let identity = LocalIdentity::new(); // stays absent
    let gateway = Gateway::new(store.clone(), identity.watch());

    let err = gateway
        .toggle_completion(&TaskId::from("a"), true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));

    // The precondition fails before the store is touched.
    assert!(!current_doc(&store, "a").await.is_completed);
}

#[tokio::test]
async fn rejects_note_edit_without_identity() {
    let store = seeded_store().await;
    let identity = LocalIdentity::new();
    let gateway = Gateway::new(store, identity.watch());

    let err = gateway
        .update_note(&TaskId::from("a"), "hello".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
}

#[tokio::test]
async fn toggle_writes_through_after_sign_in() {
    let store = seeded_store().await;
    let identity = LocalIdentity::new();
    identity.sign_in_anonymously();
    let gateway = Gateway::new(store.clone(), identity.watch());

    gateway
        .toggle_completion(&TaskId::from("a"), true)
        .await
        .unwrap();
    assert!(current_doc(&store, "a").await.is_completed);

    gateway
        .toggle_completion(&TaskId::from("a"), false)
        .await
        .unwrap();
    assert!(!current_doc(&store, "a").await.is_completed);
}

#[tokio::test]
async fn note_accepts_arbitrary_text() {
    let store = seeded_store().await;
    let identity = LocalIdentity::new();
    identity.sign_in_anonymously();
    let gateway = Gateway::new(store.clone(), identity.watch());

    let note = "multi\nline, punctuation; 100%".to_string();
    gateway
        .update_note(&TaskId::from("a"), note.clone())
        .await
        .unwrap();
    assert_eq!(current_doc(&store, "a").await.note, note);

    gateway
        .update_note(&TaskId::from("a"), String::new())
        .await
        .unwrap();
    assert_eq!(current_doc(&store, "a").await.note, "");
}

#[tokio::test]
async fn unknown_id_surfaces_the_adapter_error() {
    let store = seeded_store().await;
    let identity = LocalIdentity::new();
    identity.sign_in_anonymously();
    let gateway = Gateway::new(store, identity.watch());

    // Existence is not validated client-side; the store's error comes back.
    let err = gateway
        .toggle_completion(&TaskId::from("nope"), true)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test]
async fn sign_out_revokes_access() {
    let store = seeded_store().await;
    let identity = LocalIdentity::new();
    identity.sign_in_anonymously();
    let gateway = Gateway::new(store, identity.watch());

    gateway
        .toggle_completion(&TaskId::from("a"), true)
        .await
        .unwrap();

    identity.sign_out();
    let err = gateway
        .toggle_completion(&TaskId::from("a"), false)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Unauthenticated));
}
