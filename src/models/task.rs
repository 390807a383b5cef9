use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The assignment behind a `task` lesson.
///
/// Keyed by the parent lesson's id, like [`Lecture`](super::Lecture).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub lesson_id: u64,
    /// Full assignment text.
    pub description: String,
    pub max_score: u32,
    pub deadline: Option<NaiveDate>,
}

/// Input for attaching a task to a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTaskInput {
    pub title: String,
    /// Short description stored on the lesson envelope.
    pub summary: String,
    /// Full assignment text stored on the task itself.
    pub description: String,
    pub max_score: u32,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}
