use serde::{Deserialize, Serialize};

use super::lecture::Lecture;
use super::task::Task;

/// One entry in a course's curriculum.
///
/// A lesson is an envelope: title, short description, and kind live here,
/// while the actual teaching material lives in a [`Lecture`] or [`Task`]
/// record keyed by the same `lesson_id`. Courses reference lessons by id
/// string, in teaching order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub lesson_id: u64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: LessonKind,
}

/// The kind of material behind a lesson.
///
/// - `Lecture`: content to read or watch
/// - `Task`: an assignment a student submits a solution for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LessonKind {
    Lecture,
    Task,
}

impl LessonKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lecture => "lecture",
            Self::Task => "task",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "lecture" => Some(Self::Lecture),
            "task" => Some(Self::Task),
            _ => None,
        }
    }
}

/// A lesson resolved together with its payload, used in course detail views.
///
/// `payload` is `None` when the payload record is missing from its store;
/// the lesson is still listed, just without detail.
#[derive(Debug, Clone, Serialize)]
pub struct LessonOverview {
    pub lesson: Lesson,
    pub payload: Option<LessonPayload>,
}

/// The concrete material behind a lesson envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum LessonPayload {
    Lecture(Lecture),
    Task(Task),
}
