//! Mutation gateway.
//!
//! Validates and forwards user intents to the store. Both operations are
//! fire-and-forget with respect to visibility: they return on store
//! acknowledgement, never with a snapshot. Callers observe the effect only
//! through the reconciler's next notification and must not assume
//! synchronous consistency.

use opentelemetry::KeyValue;
use tokio::sync::watch;
use tracing::{Instrument, info};

use crate::error::{Error, Result};
use crate::identity::{CallerId, IdentityState};
use crate::model::TaskId;
use crate::store::{FieldWrite, Store};
use crate::telemetry::metrics;
use crate::telemetry::sync::start_mutation_span;

/// Gateway for user-issued field mutations, preconditioned on a live
/// identity. Carries no retry policy; failures surface to the caller.
pub struct Gateway<S> {
    store: S,
    identity: watch::Receiver<IdentityState>,
}

impl<S: Store> Gateway<S> {
    pub fn new(store: S, identity: watch::Receiver<IdentityState>) -> Self {
        Self { store, identity }
    }

    fn caller(&self) -> Result<CallerId> {
        self.identity
            .borrow()
            .caller()
            .ok_or(Error::Unauthenticated)
    }

    /// Set a task's completion flag. Idempotent: repeating the same value
    /// is a no-op from the store's perspective. Task existence is not
    /// validated here; a write to an unknown id surfaces the adapter error.
    pub async fn toggle_completion(&self, id: &TaskId, new_value: bool) -> Result<()> {
        let caller = self.caller()?;
        let span = start_mutation_span("is_completed", id);

        async {
            self.store
                .update_field(id, FieldWrite::Completed(new_value))
                .await?;

            info!(caller = %caller, task = %id, value = new_value, "completion toggled");
            metrics::mutations().add(1, &[KeyValue::new("field", "is_completed")]);
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Replace a task's note. Notes are free text; an empty string clears
    /// the note without touching the task.
    pub async fn update_note(&self, id: &TaskId, new_note: String) -> Result<()> {
        let caller = self.caller()?;
        let span = start_mutation_span("note", id);

        async {
            self.store.update_field(id, FieldWrite::Note(new_note)).await?;

            info!(caller = %caller, task = %id, "note updated");
            metrics::mutations().add(1, &[KeyValue::new("field", "note")]);
            Ok(())
        }
        .instrument(span)
        .await
    }
}
