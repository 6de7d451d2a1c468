//! Derived metrics over a task snapshot.
//!
//! Pure and deterministic; recomputed whenever the snapshot changes. This
//! is the primary unit-testable surface of the core.

use crate::model::{Category, CategoryMetric, Task};

/// Overall completion percentage, rounded to the nearest integer.
/// An empty snapshot reports 0, not a division error.
pub fn overall_progress(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.is_completed).count();
    ((completed as f64 / tasks.len() as f64) * 100.0).round() as u8
}

/// Completed/total counts per category, in `Category::ALL` declaration
/// order. Categories with no tasks are included with zero counts so
/// consumers can render them as empty rather than missing.
pub fn category_rollup(tasks: &[Task]) -> Vec<CategoryMetric> {
    Category::ALL
        .into_iter()
        .map(|category| {
            let mut completed = 0;
            let mut total = 0;
            for task in tasks.iter().filter(|t| t.category == category) {
                total += 1;
                if task.is_completed {
                    completed += 1;
                }
            }
            CategoryMetric {
                category,
                completed,
                total,
                label: category.label(),
            }
        })
        .collect()
}

/// Urgent tasks still pending, in snapshot order. A completed task is
/// never urgent-pending, regardless of its urgency flag.
pub fn urgent_pending(tasks: &[Task]) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.is_urgent && !t.is_completed)
        .collect()
}
