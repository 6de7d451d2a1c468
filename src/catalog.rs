//! Static seed catalog.
//!
//! The deployment checklist for standing up an occupational-health
//! consultancy. Written into an empty store exactly once by the seeding
//! controller; the engine itself never depends on this exact set.

use crate::model::{TaskDocument, TaskId};

fn doc(
    id: &str,
    category: &str,
    title: &str,
    is_completed: bool,
    is_urgent: bool,
    note: &str,
    sub_items: &[&str],
) -> TaskDocument {
    TaskDocument {
        id: TaskId::from(id),
        category: category.to_string(),
        title: title.to_string(),
        is_completed,
        is_urgent,
        note: note.to_string(),
        sub_items: sub_items.iter().map(|s| s.to_string()).collect(),
    }
}

/// The full seed catalog, in id order.
pub fn seed_catalog() -> Vec<TaskDocument> {
    vec![
        doc(
            "acc_1",
            "accreditation",
            "Consultancy accreditation application (Appendix 2)",
            false,
            true,
            "Affix both agency seals and tick the worker health service class",
            &[
                "Fill in the application form",
                "Affix registered seals",
                "Confirm the service class",
            ],
        ),
        doc(
            "acc_2",
            "accreditation",
            "Premises G2 use-class certificate (critical)",
            false,
            true,
            "The use permit must state class G2 or the filing is returned",
            &["Check the use permit", "File a change of use if not G2"],
        ),
        doc(
            "acc_3",
            "accreditation",
            "Full-time consultant staffing (4 or more)",
            false,
            true,
            "Attach insurance enrollment proof; part-time staff do not count",
            &[
                "Collect diplomas",
                "Collect training certificates",
                "Collect two-year service records",
            ],
        ),
        doc(
            "acc_4",
            "accreditation",
            "Consultancy service management manual",
            false,
            true,
            "Seven required chapters including SOPs and the organization chart",
            &[],
        ),
        doc(
            "reg_1",
            "regulatory",
            "Company registration / amendment",
            true,
            false,
            "Confirm the business scope includes IZ11010",
            &[],
        ),
        doc(
            "reg_2",
            "regulatory",
            "Responsible person qualification filing",
            false,
            true,
            "Requires a signed non-concurrency declaration",
            &[],
        ),
        doc(
            "adm_1",
            "admin",
            "Instrument and equipment procurement",
            false,
            false,
            "Basic measurement and IT equipment",
            &[
                "Purchase computers and server",
                "Purchase blood pressure meters",
            ],
        ),
        doc(
            "adm_2",
            "admin",
            "Worker health management system rollout",
            false,
            false,
            "Must satisfy information security and privacy rules",
            &[],
        ),
        doc(
            "per_1",
            "personnel",
            "Employee labor and health insurance",
            false,
            false,
            "Complete enrollment for all staff",
            &[],
        ),
        doc(
            "per_2",
            "personnel",
            "New staff onboarding training",
            false,
            false,
            "System operation and internal SOP walkthrough",
            &[],
        ),
        doc(
            "cli_1",
            "client",
            "Standard service contract final draft",
            false,
            true,
            "Requires legal counsel review",
            &[],
        ),
        doc(
            "mkt_1",
            "marketing",
            "Official website launch",
            false,
            false,
            "Highlight compliance record and the consulting team",
            &[],
        ),
        doc(
            "mkt_2",
            "marketing",
            "Visit industrial park service centers",
            false,
            false,
            "Schedule visits and explore partnerships",
            &[],
        ),
    ]
}
