//! Unit tests for the derived-metrics functions.

use rollcall_rs::model::{Category, Task, TaskId};
use rollcall_rs::rollup::{category_rollup, overall_progress, urgent_pending};

fn task(id: &str, category: Category, completed: bool, urgent: bool) -> Task {
    Task {
        id: TaskId::from(id),
        category,
        title: format!("task {id}"),
        is_completed: completed,
        is_urgent: urgent,
        note: String::new(),
        sub_items: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Overall progress
// ---------------------------------------------------------------------------

#[test]
fn progress_matches_rounded_formula_for_all_small_snapshots() {
    for total in 0usize..=20 {
        for completed in 0..=total {
            let tasks: Vec<Task> = (0..total)
                .map(|i| {
                    task(
                        &format!("t{i}"),
                        Category::Admin,
                        i < completed,
                        false,
                    )
                })
                .collect();

            let expected = if total == 0 {
                0
            } else {
                (100.0 * completed as f64 / total as f64).round() as u8
            };
            assert_eq!(
                overall_progress(&tasks),
                expected,
                "progress mismatch at {completed}/{total}"
            );
        }
    }
}

#[test]
fn empty_snapshot_reports_zero_progress() {
    assert_eq!(overall_progress(&[]), 0);
}

// ---------------------------------------------------------------------------
// One completed, one urgent pending, same category
// ---------------------------------------------------------------------------

#[test]
fn two_regulatory_tasks_scenario() {
    let tasks = vec![
        task("a", Category::Regulatory, true, false),
        task("b", Category::Regulatory, false, true),
    ];

    assert_eq!(overall_progress(&tasks), 50);

    let urgent = urgent_pending(&tasks);
    assert_eq!(urgent.len(), 1);
    assert_eq!(urgent[0].id, TaskId::from("b"));

    let rollup = category_rollup(&tasks);
    let regulatory = rollup
        .iter()
        .find(|m| m.category == Category::Regulatory)
        .unwrap();
    assert_eq!(regulatory.completed, 1);
    assert_eq!(regulatory.total, 2);
}

// ---------------------------------------------------------------------------
// Category rollup
// ---------------------------------------------------------------------------

#[test]
fn rollup_covers_every_category_in_declaration_order() {
    // Snapshot only touches two categories; the rollup still reports all
    // six, zero-count ones included, in declaration order.
    let tasks = vec![
        task("m1", Category::Marketing, false, false),
        task("a1", Category::Accreditation, true, false),
    ];

    let rollup = category_rollup(&tasks);
    let order: Vec<Category> = rollup.iter().map(|m| m.category).collect();
    assert_eq!(order, Category::ALL.to_vec());

    for metric in &rollup {
        match metric.category {
            Category::Accreditation => {
                assert_eq!((metric.completed, metric.total), (1, 1));
            }
            Category::Marketing => {
                assert_eq!((metric.completed, metric.total), (0, 1));
            }
            _ => {
                assert_eq!((metric.completed, metric.total), (0, 0));
            }
        }
        assert!(!metric.label.is_empty());
    }
}

#[test]
fn rollup_order_ignores_snapshot_insertion_order() {
    // Marketing appears first in the snapshot but last in the rollup.
    let tasks = vec![
        task("m1", Category::Marketing, false, false),
        task("r1", Category::Regulatory, false, false),
    ];

    let rollup = category_rollup(&tasks);
    assert_eq!(rollup.first().unwrap().category, Category::Accreditation);
    assert_eq!(rollup.last().unwrap().category, Category::Marketing);
}

// ---------------------------------------------------------------------------
// Urgent pending
// ---------------------------------------------------------------------------

#[test]
fn urgent_pending_excludes_completed_even_if_urgent() {
    let tasks = vec![
        task("done", Category::Client, true, true),
        task("open", Category::Client, false, true),
        task("calm", Category::Client, false, false),
    ];

    let urgent = urgent_pending(&tasks);
    assert_eq!(urgent.len(), 1);
    assert_eq!(urgent[0].id, TaskId::from("open"));
}

#[test]
fn urgent_pending_preserves_snapshot_order() {
    let tasks = vec![
        task("z", Category::Admin, false, true),
        task("a", Category::Admin, false, true),
        task("m", Category::Admin, false, true),
    ];

    let ids: Vec<&str> = urgent_pending(&tasks)
        .iter()
        .map(|t| t.id.as_str())
        .collect();
    assert_eq!(ids, vec!["z", "a", "m"]);
}
