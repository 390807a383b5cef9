use serde::{Deserialize, Serialize};

use super::lesson::LessonOverview;

/// A course: metadata plus ordered references to its lessons and enrolled
/// students.
///
/// Reference lists hold id strings rather than integers; that is the stored
/// form. Order is meaningful: `lessons` defines teaching order,
/// `enrolled_students` enrollment order. Neither list holds duplicates,
/// which the push methods preserve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub course_id: u64,
    pub title: String,
    pub description: String,
    pub author: String,
    #[serde(default)]
    pub lessons: Vec<String>,
    #[serde(default)]
    pub enrolled_students: Vec<String>,
}

impl Course {
    pub fn contains_lesson(&self, lesson_id: u64) -> bool {
        self.lessons.contains(&lesson_id.to_string())
    }

    /// Appends a lesson reference if absent. Returns whether anything changed.
    pub fn push_lesson(&mut self, lesson_id: u64) -> bool {
        let key = lesson_id.to_string();
        if self.lessons.contains(&key) {
            return false;
        }
        self.lessons.push(key);
        true
    }

    pub fn has_student(&self, student_id: u64) -> bool {
        self.enrolled_students.contains(&student_id.to_string())
    }

    /// Appends a student reference if absent. Returns whether anything changed.
    pub fn push_student(&mut self, student_id: u64) -> bool {
        let key = student_id.to_string();
        if self.enrolled_students.contains(&key) {
            return false;
        }
        self.enrolled_students.push(key);
        true
    }
}

/// Input for creating a new course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCourseInput {
    pub title: String,
    pub description: String,
    pub author: String,
}

/// Input for editing a course. All fields are optional for partial updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCourseInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
}

/// A course with its lessons resolved to payloads, used for detail views.
///
/// Lesson references that no longer resolve are filtered out before this is
/// built, so `lessons` can be shorter than `course.lessons`.
#[derive(Debug, Clone, Serialize)]
pub struct CourseDetail {
    pub course: Course,
    pub lessons: Vec<LessonOverview>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course() -> Course {
        Course {
            course_id: 2,
            title: "Intro".to_string(),
            description: "desc".to_string(),
            author: "Bob".to_string(),
            lessons: Vec::new(),
            enrolled_students: Vec::new(),
        }
    }

    #[test]
    fn push_lesson_keeps_order_and_rejects_duplicates() {
        let mut c = course();
        assert!(c.push_lesson(5));
        assert!(c.push_lesson(3));
        assert!(!c.push_lesson(5));
        assert_eq!(c.lessons, vec!["5".to_string(), "3".to_string()]);
    }

    #[test]
    fn push_student_is_idempotent() {
        let mut c = course();
        assert!(c.push_student(2));
        assert!(!c.push_student(2));
        assert_eq!(c.enrolled_students, vec!["2".to_string()]);
        assert!(c.has_student(2));
        assert!(!c.has_student(7));
    }
}
