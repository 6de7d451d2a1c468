//! Mutation span helpers.
//!
//! Provides span creation for user-issued mutations flowing through the
//! gateway, so a write and its store acknowledgement share one trace.

use tracing::Span;

use crate::model::TaskId;

/// Start a span for a field mutation.
pub fn start_mutation_span(field: &str, task_id: &TaskId) -> Span {
    tracing::info_span!(
        "task.mutate",
        "task.field" = field,
        "task.id" = %task_id,
    )
}
