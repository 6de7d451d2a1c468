//! Report text tests. The report is pure templating over the rollup
//! outputs plus a date.

use chrono::NaiveDate;
use rollcall_rs::model::{Category, Task, TaskId};
use rollcall_rs::report::render_report;

fn task(id: &str, completed: bool, urgent: bool) -> Task {
    Task {
        id: TaskId::from(id),
        category: Category::Accreditation,
        title: format!("title of {id}"),
        is_completed: completed,
        is_urgent: urgent,
        note: String::new(),
        sub_items: Vec::new(),
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 6).unwrap()
}

#[test]
fn report_lists_urgent_backlog() {
    let tasks = vec![
        task("a", true, false),
        task("b", false, true),
        task("c", false, true),
    ];

    let text = render_report(&tasks, date());

    assert!(text.contains("Date: 2026-08-06"));
    assert!(text.contains("Overall progress: 33%"));
    assert!(text.contains("Completed items: 1/3"));
    assert!(text.contains("Lagging urgent items"));
    assert!(text.contains("- title of b"));
    assert!(text.contains("- title of c"));
}

#[test]
fn report_omits_urgent_section_when_backlog_is_clear() {
    let tasks = vec![task("a", true, true), task("b", false, false)];

    let text = render_report(&tasks, date());

    assert!(text.contains("Overall progress: 50%"));
    assert!(!text.contains("Lagging urgent items"));
}

#[test]
fn report_on_empty_snapshot_reports_zero() {
    let text = render_report(&[], date());
    assert!(text.contains("Overall progress: 0%"));
    assert!(text.contains("Completed items: 0/0"));
}

#[test]
fn report_is_deterministic() {
    let tasks = vec![task("a", false, true)];
    assert_eq!(render_report(&tasks, date()), render_report(&tasks, date()));
}
