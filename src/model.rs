//! Core data model.
//!
//! A task is one entry of the shared compliance checklist. It has a stable
//! identity assigned at seed time, a category from a closed taxonomy, and
//! exactly two mutable fields: completion and note.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Closed category taxonomy. Declaration order is the canonical rollup
/// order; adding a variant is a compile-time-visible change because
/// `wire_name` and `label` match exhaustively and `ALL` must be extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Accreditation,
    Regulatory,
    Admin,
    Personnel,
    Client,
    Marketing,
}

impl Category {
    /// Every category, in rollup order.
    pub const ALL: [Category; 6] = [
        Category::Accreditation,
        Category::Regulatory,
        Category::Admin,
        Category::Personnel,
        Category::Client,
        Category::Marketing,
    ];

    /// Stable name used in stored documents.
    pub fn wire_name(self) -> &'static str {
        match self {
            Category::Accreditation => "accreditation",
            Category::Regulatory => "regulatory",
            Category::Admin => "admin",
            Category::Personnel => "personnel",
            Category::Client => "client",
            Category::Marketing => "marketing",
        }
    }

    /// Human-readable label for rollups and reports.
    pub fn label(self) -> &'static str {
        match self {
            Category::Accreditation => "Accreditation filing",
            Category::Regulatory => "Regulatory compliance",
            Category::Admin => "Administration",
            Category::Personnel => "Personnel",
            Category::Client => "Client management",
            Category::Marketing => "Marketing",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.wire_name() == s)
            .ok_or_else(|| Error::DataIntegrity(format!("unknown category: {s}")))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// Newtype for task IDs. Assigned at seed time, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A validated checklist task.
///
/// Only `is_completed` and `note` are ever mutated after seeding, and only
/// through the store. Everything else is fixed at creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Task {
    pub id: TaskId,
    pub category: Category,
    pub title: String,
    pub is_completed: bool,
    /// Drives alerting. Set at seed time, never user-mutated.
    pub is_urgent: bool,
    pub note: String,
    /// Descriptive checklist labels with no completion state of their own.
    pub sub_items: Vec<String>,
}

// ---------------------------------------------------------------------------
// TaskDocument
// ---------------------------------------------------------------------------

/// A raw task document as stored. The category is an unvalidated string;
/// conversion to [`Task`] is where schema violations surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDocument {
    pub id: TaskId,
    pub category: String,
    pub title: String,
    pub is_completed: bool,
    pub is_urgent: bool,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub sub_items: Vec<String>,
}

impl TryFrom<TaskDocument> for Task {
    type Error = Error;

    fn try_from(doc: TaskDocument) -> Result<Self> {
        let category = doc.category.parse()?;
        Ok(Task {
            id: doc.id,
            category,
            title: doc.title,
            is_completed: doc.is_completed,
            is_urgent: doc.is_urgent,
            note: doc.note,
            sub_items: doc.sub_items,
        })
    }
}

impl From<&Task> for TaskDocument {
    fn from(task: &Task) -> Self {
        TaskDocument {
            id: task.id.clone(),
            category: task.category.wire_name().to_string(),
            title: task.title.clone(),
            is_completed: task.is_completed,
            is_urgent: task.is_urgent,
            note: task.note.clone(),
            sub_items: task.sub_items.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// CategoryMetric
// ---------------------------------------------------------------------------

/// Per-category rollup. Derived on every snapshot change, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryMetric {
    pub category: Category,
    pub completed: usize,
    pub total: usize,
    pub label: &'static str,
}
