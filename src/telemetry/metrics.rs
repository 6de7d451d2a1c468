//! Metric instrument factories for rollcall-rs.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! All instruments are created lazily from the `"rollcall-rs"` meter.

use opentelemetry::metrics::{Counter, Histogram, Meter};

/// Returns the shared meter for rollcall-rs instruments.
fn meter() -> Meter {
    opentelemetry::global::meter("rollcall-rs")
}

/// Counter: store adapter operations.
/// Labels: `operation` ("subscribe" | "batch_write" | "update_field"), `field`.
pub fn store_operations() -> Counter<u64> {
    meter()
        .u64_counter("rollcall.store.operations")
        .with_description("Number of store adapter operations")
        .build()
}

/// Counter: user-issued field mutations accepted by the gateway.
/// Labels: `field` ("is_completed" | "note").
pub fn mutations() -> Counter<u64> {
    meter()
        .u64_counter("rollcall.mutations")
        .with_description("Number of accepted field mutations")
        .build()
}

/// Counter: full snapshots applied by the reconciler.
/// Labels: `tasks` (snapshot size).
pub fn snapshots_applied() -> Counter<u64> {
    meter()
        .u64_counter("rollcall.snapshots.applied")
        .with_description("Number of full snapshots applied")
        .build()
}

/// Counter: documents excluded for failing the task schema.
pub fn documents_rejected() -> Counter<u64> {
    meter()
        .u64_counter("rollcall.documents.rejected")
        .with_description("Documents excluded from the snapshot for schema violations")
        .build()
}

/// Histogram: operation duration in milliseconds.
/// Labels: `operation`.
pub fn operation_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("rollcall.operation.duration_ms")
        .with_description("Operation duration in milliseconds")
        .with_unit("ms")
        .build()
}
