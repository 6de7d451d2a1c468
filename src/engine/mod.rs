//! Sync engine: one-shot seeding and the reconciliation loop.

pub mod reconcile;
pub mod seed;

pub use reconcile::{Reconciler, ReconcilerConfig, Snapshot, SyncState};
pub use seed::ensure_seeded;
