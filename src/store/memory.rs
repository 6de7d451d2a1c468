//! In-memory store.
//!
//! Backs integration tests and the demo mode. Mirrors the remote store's
//! contract: full-snapshot push on every change, atomic batch write, atomic
//! per-field update. Fault injection lets tests drive the stream-error and
//! permission-denied paths without a real backend.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{broadcast, mpsc};

use crate::error::{Error, Result};
use crate::model::{TaskDocument, TaskId};

use super::{FieldWrite, Store, Subscription};

#[derive(Debug, Clone, Copy)]
enum Tick {
    Changed,
    Fail,
}

#[derive(Default)]
struct Inner {
    docs: BTreeMap<TaskId, TaskDocument>,
    deny_writes: bool,
}

/// Shared-handle in-memory store. Cloning shares the same collection.
#[derive(Clone)]
pub struct MemStore {
    inner: Arc<Mutex<Inner>>,
    ticks: broadcast::Sender<Tick>,
}

impl MemStore {
    pub fn new() -> Self {
        let (ticks, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            ticks,
        }
    }

    fn snapshot(&self) -> Vec<TaskDocument> {
        // BTreeMap iteration gives the id-ordered set the contract requires.
        self.inner.lock().unwrap().docs.values().cloned().collect()
    }

    /// Current document count, bypassing the subscription path.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push a stream error to every open subscription. Each subscription
    /// ends after forwarding it, so consumers exercise resubscription.
    pub fn inject_stream_error(&self) {
        let _ = self.ticks.send(Tick::Fail);
    }

    /// Make all subsequent writes fail with `PermissionDenied`.
    pub fn deny_writes(&self, deny: bool) {
        self.inner.lock().unwrap().deny_writes = deny;
    }

    fn check_writable(&self) -> Result<()> {
        if self.inner.lock().unwrap().deny_writes {
            return Err(Error::PermissionDenied(
                "writes disabled for this caller".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemStore {
    async fn subscribe(&self) -> Result<Subscription> {
        let (tx, rx) = mpsc::channel(16);
        let store = self.clone();
        let mut ticks = self.ticks.subscribe();

        tokio::spawn(async move {
            // Initial emission: the current set, empty included.
            if tx.send(Ok(store.snapshot())).await.is_err() {
                return;
            }
            loop {
                match ticks.recv().await {
                    Ok(Tick::Changed) => {
                        if tx.send(Ok(store.snapshot())).await.is_err() {
                            return;
                        }
                    }
                    Ok(Tick::Fail) => {
                        let _ = tx
                            .send(Err(Error::Unavailable("injected stream error".to_string())))
                            .await;
                        return;
                    }
                    // Lagged behind a burst: the latest full snapshot covers
                    // every missed change.
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        if tx.send(Ok(store.snapshot())).await.is_err() {
                            return;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => return,
                }
            }
        });

        Ok(Subscription::new(rx))
    }

    async fn batch_write(&self, docs: &[TaskDocument]) -> Result<()> {
        self.check_writable()?;
        {
            let mut inner = self.inner.lock().unwrap();
            for doc in docs {
                inner.docs.insert(doc.id.clone(), doc.clone());
            }
        }
        let _ = self.ticks.send(Tick::Changed);
        Ok(())
    }

    async fn update_field(&self, id: &TaskId, write: FieldWrite) -> Result<()> {
        self.check_writable()?;
        {
            let mut inner = self.inner.lock().unwrap();
            let doc = inner
                .docs
                .get_mut(id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            match write {
                FieldWrite::Completed(value) => doc.is_completed = value,
                FieldWrite::Note(note) => doc.note = note,
            }
        }
        let _ = self.ticks.send(Tick::Changed);
        Ok(())
    }
}
