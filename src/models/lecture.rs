use serde::{Deserialize, Serialize};

/// The teaching material behind a `lecture` lesson.
///
/// Keyed by the parent lesson's id; lectures carry no id of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lecture {
    pub lesson_id: u64,
    pub content: String,
    /// Running time in minutes.
    pub duration: u32,
    pub video_url: Option<String>,
}

/// Input for attaching a lecture to a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLectureInput {
    pub title: String,
    /// Short description stored on the lesson envelope.
    pub summary: String,
    pub content: String,
    /// Running time in minutes.
    pub duration: u32,
    #[serde(default)]
    pub video_url: Option<String>,
}
