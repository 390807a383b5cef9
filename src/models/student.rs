use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::course::Course;

/// A registered student, with course enrollments and per-course progress.
///
/// `enrolled_courses` holds course-id strings in enrollment order; `progress`
/// is keyed by the same strings. Enrollment always creates the progress
/// entry, so a course id present in one is present in the other.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub student_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub enrolled_courses: Vec<String>,
    #[serde(default)]
    pub progress: BTreeMap<String, CourseProgress>,
}

/// Completion state for one enrolled course.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CourseProgress {
    #[serde(default)]
    pub completed_lessons: Vec<String>,
    /// Whole percentage 0–100, recomputed on every completion.
    #[serde(default)]
    pub overall_progress: u8,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_enrolled_in(&self, course_id: u64) -> bool {
        self.enrolled_courses.contains(&course_id.to_string())
    }

    /// Records enrollment in a course. Returns whether anything changed.
    ///
    /// The progress entry is created only when missing, so repeat enrollment
    /// never resets earlier completions.
    pub fn enroll_in(&mut self, course_id: u64) -> bool {
        let key = course_id.to_string();
        let newly = if self.enrolled_courses.contains(&key) {
            false
        } else {
            self.enrolled_courses.push(key.clone());
            true
        };
        self.progress.entry(key).or_default();
        newly
    }

    /// Marks a lesson complete for a course and recomputes the stored
    /// percentage against `total_lessons`.
    ///
    /// Returns `None` when the student has no progress entry for the course,
    /// `Some(false)` when the lesson was already complete, `Some(true)` when
    /// newly recorded.
    pub fn complete_lesson(
        &mut self,
        course_id: u64,
        lesson_id: u64,
        total_lessons: usize,
    ) -> Option<bool> {
        let entry = self.progress.get_mut(&course_id.to_string())?;
        let key = lesson_id.to_string();
        if entry.completed_lessons.contains(&key) {
            return Some(false);
        }
        entry.completed_lessons.push(key);
        entry.overall_progress = percent_complete(entry.completed_lessons.len(), total_lessons);
        Some(true)
    }
}

/// Share of `total` covered by `completed`, as a whole percentage rounded
/// half-up. Zero when there is nothing to complete.
fn percent_complete(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

/// Input for registering a new student.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterStudentInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// One course's standing within a student progress report.
#[derive(Debug, Clone, Serialize)]
pub struct CourseStanding {
    pub course: Course,
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
}

/// A student's progress across every enrolled course that still resolves.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressReport {
    pub student: Student,
    pub standings: Vec<CourseStanding>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> Student {
        Student {
            student_id: 2,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            email: "ann@x.com".to_string(),
            phone: None,
            enrolled_courses: Vec::new(),
            progress: BTreeMap::new(),
        }
    }

    #[test]
    fn percent_of_empty_course_is_zero() {
        assert_eq!(percent_complete(0, 0), 0);
        assert_eq!(percent_complete(3, 0), 0);
    }

    #[test]
    fn percent_of_one_in_four_is_twenty_five() {
        assert_eq!(percent_complete(1, 4), 25);
    }

    #[test]
    fn percent_rounds_half_up() {
        assert_eq!(percent_complete(1, 8), 13);
        assert_eq!(percent_complete(1, 3), 33);
        assert_eq!(percent_complete(2, 3), 67);
    }

    #[test]
    fn enroll_in_is_idempotent() {
        let mut s = student();
        assert!(s.enroll_in(4));
        assert!(!s.enroll_in(4));
        assert_eq!(s.enrolled_courses, vec!["4".to_string()]);
        assert!(s.progress.contains_key("4"));
    }

    #[test]
    fn repeat_enrollment_keeps_existing_progress() {
        let mut s = student();
        s.enroll_in(4);
        s.complete_lesson(4, 9, 2);
        s.enroll_in(4);
        let entry = &s.progress["4"];
        assert_eq!(entry.completed_lessons, vec!["9".to_string()]);
        assert_eq!(entry.overall_progress, 50);
    }

    #[test]
    fn complete_lesson_requires_a_progress_entry() {
        let mut s = student();
        assert_eq!(s.complete_lesson(4, 9, 2), None);
    }

    #[test]
    fn complete_lesson_records_each_lesson_once() {
        let mut s = student();
        s.enroll_in(4);
        assert_eq!(s.complete_lesson(4, 9, 4), Some(true));
        assert_eq!(s.complete_lesson(4, 9, 4), Some(false));
        let entry = &s.progress["4"];
        assert_eq!(entry.completed_lessons.len(), 1);
        assert_eq!(entry.overall_progress, 25);
    }
}
