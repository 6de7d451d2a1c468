//! Store adapter: the narrow contract the engine holds against the
//! synchronized task store.
//!
//! A store pushes full-snapshot change notifications to subscribers,
//! supports an atomic batch write (seeding only) and atomic single-field
//! updates. Retry policy lives with the callers, never in the adapter.

pub mod memory;
pub mod postgres;

use tokio::sync::mpsc;

use crate::error::Result;
use crate::model::{TaskDocument, TaskId};

/// A single mutable field write. The store updates exactly this field of
/// exactly one document, without a read-modify-write round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWrite {
    Completed(bool),
    Note(String),
}

impl FieldWrite {
    /// Stored field name, for logging and wire use.
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldWrite::Completed(_) => "is_completed",
            FieldWrite::Note(_) => "note",
        }
    }
}

/// One emission of a standing subscription: the complete current document
/// set in id order, or a stream error after which the consumer resubscribes.
pub type SnapshotEvent = Result<Vec<TaskDocument>>;

/// A standing subscription to the task collection.
///
/// Emits on open and after every remote change. Delivery is at-least-once
/// per logical change; consumers must treat duplicate emissions of an
/// unchanged set as no-ops. Dropping the subscription ends the feed.
pub struct Subscription {
    rx: mpsc::Receiver<SnapshotEvent>,
}

impl Subscription {
    pub fn new(rx: mpsc::Receiver<SnapshotEvent>) -> Self {
        Self { rx }
    }

    /// Next emission, or `None` once the stream is closed.
    pub async fn next(&mut self) -> Option<SnapshotEvent> {
        self.rx.recv().await
    }
}

/// The synchronized store contract.
///
/// Implementations surface failures as `Unavailable` or `PermissionDenied`
/// and embed no retry policy of their own.
pub trait Store {
    /// Open a standing subscription ordered by task id. An empty collection
    /// emits an empty set, not an error.
    fn subscribe(&self) -> impl Future<Output = Result<Subscription>> + Send;

    /// Atomically create or overwrite a batch of documents, all or nothing.
    /// Used only by seeding.
    fn batch_write(&self, docs: &[TaskDocument]) -> impl Future<Output = Result<()>> + Send;

    /// Atomically update one field of one document. A write to a
    /// nonexistent id surfaces as `NotFound`.
    fn update_field(
        &self,
        id: &TaskId,
        write: FieldWrite,
    ) -> impl Future<Output = Result<()>> + Send;
}
