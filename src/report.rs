//! Shareholder progress report text.
//!
//! Pure string templating over the rollup outputs plus a date. No state,
//! no clock access.

use chrono::NaiveDate;

use crate::model::Task;
use crate::rollup::{overall_progress, urgent_pending};

/// Render the progress report block.
///
/// The urgent-backlog section is omitted entirely when nothing urgent is
/// pending.
pub fn render_report(tasks: &[Task], date: NaiveDate) -> String {
    let completed = tasks.iter().filter(|t| t.is_completed).count();
    let total = tasks.len();
    let progress = overall_progress(tasks);
    let urgent = urgent_pending(tasks);

    let mut text = String::new();
    text.push_str("[Agency Setup Progress Report]\n");
    text.push_str(&format!("Date: {}\n\n", date.format("%Y-%m-%d")));
    text.push_str(&format!("Overall progress: {progress}%\n"));
    text.push_str(&format!("Completed items: {completed}/{total}\n\n"));

    if !urgent.is_empty() {
        text.push_str("Lagging urgent items (handle first):\n");
        for task in &urgent {
            text.push_str(&format!("- {}\n", task.title));
        }
        text.push('\n');
    }

    text.push_str("Next phase: collect the accreditation supporting documents.\n");
    text
}
