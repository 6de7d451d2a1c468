//! Reconciliation engine.
//!
//! Owns the authoritative local task snapshot for this client. Every
//! emission from the store replaces the whole snapshot; there is no
//! field-level diffing and no client-side merge. The remote store is the
//! sole source of truth and the local view is a pure projection of the
//! latest observed remote state. A mutation counts as committed only once
//! a snapshot notification reflects it.

use std::sync::Arc;
use std::time::Duration;

use opentelemetry::KeyValue;
use tokio::sync::{Notify, watch};
use tracing::{info, warn};

use crate::model::{Task, TaskDocument};
use crate::store::Store;
use crate::telemetry::metrics;

/// What a client currently knows about the task collection.
///
/// `Loading` is reported before the first snapshot and after a stream
/// error, never a default-empty task set.
#[derive(Debug, Clone, Default)]
pub enum SyncState {
    #[default]
    Loading,
    Ready(Snapshot),
}

impl SyncState {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        match self {
            SyncState::Ready(s) => Some(s),
            SyncState::Loading => None,
        }
    }
}

/// The validated task set plus the count of documents excluded for
/// failing the schema.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    pub rejected: usize,
}

impl Snapshot {
    /// Validate raw documents into a snapshot. A document with an unknown
    /// category is logged and excluded rather than failing the emission.
    pub fn from_documents(docs: Vec<TaskDocument>) -> Self {
        let mut tasks = Vec::with_capacity(docs.len());
        let mut rejected = 0;
        for doc in docs {
            let id = doc.id.clone();
            match Task::try_from(doc) {
                Ok(task) => tasks.push(task),
                Err(e) => {
                    warn!(id = %id, error = %e, "excluding document that fails the task schema");
                    metrics::documents_rejected().add(1, &[]);
                    rejected += 1;
                }
            }
        }
        Self { tasks, rejected }
    }
}

/// Configuration for the reconciliation loop.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Wait before reopening the subscription after a stream error.
    pub resubscribe_backoff: Duration,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            resubscribe_backoff: Duration::from_secs(1),
        }
    }
}

/// The reconciliation loop: subscribe, replace the snapshot on every
/// emission, revert to loading and resubscribe on stream errors.
pub struct Reconciler<S> {
    store: S,
    config: ReconcilerConfig,
    state: Arc<watch::Sender<SyncState>>,
    shutdown: Arc<Notify>,
}

impl<S: Clone> Clone for Reconciler<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
            state: Arc::clone(&self.state),
            shutdown: Arc::clone(&self.shutdown),
        }
    }
}

impl<S: Store> Reconciler<S> {
    pub fn new(store: S, config: ReconcilerConfig) -> Self {
        let (state, _) = watch::channel(SyncState::Loading);
        Self {
            store,
            config,
            state: Arc::new(state),
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Watch the sync state. All views handed out here are read-only
    /// clones; the snapshot itself is owned by the reconciler.
    pub fn state(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Signal the loop to stop.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    /// Run until shutdown. Emissions are processed strictly in the order
    /// received; there is no concurrent snapshot application.
    pub async fn run(&self) -> crate::error::Result<()> {
        loop {
            let mut sub = match self.store.subscribe().await {
                Ok(sub) => sub,
                Err(e) => {
                    warn!(error = %e, "subscribe failed, retrying");
                    if self.pause_for_backoff().await {
                        return Ok(());
                    }
                    continue;
                }
            };

            loop {
                tokio::select! {
                    _ = self.shutdown.notified() => {
                        info!("reconciler shutting down");
                        return Ok(());
                    }
                    event = sub.next() => match event {
                        Some(Ok(docs)) => self.apply(docs),
                        Some(Err(e)) => {
                            warn!(error = %e, "subscription stream error, reverting to loading");
                            self.state.send_replace(SyncState::Loading);
                            break;
                        }
                        None => {
                            warn!("subscription closed, reverting to loading");
                            self.state.send_replace(SyncState::Loading);
                            break;
                        }
                    }
                }
            }

            if self.pause_for_backoff().await {
                return Ok(());
            }
        }
    }

    /// Replace the whole snapshot with a validated emission.
    fn apply(&self, docs: Vec<TaskDocument>) {
        let snapshot = Snapshot::from_documents(docs);
        metrics::snapshots_applied().add(1, &[KeyValue::new("tasks", snapshot.tasks.len() as i64)]);
        self.state.send_replace(SyncState::Ready(snapshot));
    }

    /// Sleep the resubscribe backoff. Returns `true` if shutdown fired.
    async fn pause_for_backoff(&self) -> bool {
        tokio::select! {
            _ = self.shutdown.notified() => true,
            _ = tokio::time::sleep(self.config.resubscribe_backoff) => false,
        }
    }
}
