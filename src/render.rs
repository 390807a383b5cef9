//! Plain-text rendering for catalog records.
//!
//! Pure string builders, no I/O. The CLI prints these to stdout.

use crate::models::{Course, CourseDetail, LessonPayload, ProgressReport, Student};

const SEPARATOR_WIDTH: usize = 30;

fn separator() -> String {
    "-".repeat(SEPARATOR_WIDTH)
}

/// Render a numbered course list with per-course counts.
pub fn course_list(courses: &[Course]) -> String {
    if courses.is_empty() {
        return "No courses yet.\n".to_string();
    }
    let mut output = String::new();
    for (i, course) in courses.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} (ID: {})\n   Author: {}\n   Lessons: {}\n   Students: {}\n",
            i + 1,
            course.title,
            course.course_id,
            course.author,
            course.lessons.len(),
            course.enrolled_students.len()
        ));
        output.push_str(&separator());
        output.push('\n');
    }
    output
}

/// Render a numbered student roster.
pub fn student_list(students: &[Student]) -> String {
    if students.is_empty() {
        return "No students registered yet.\n".to_string();
    }
    let mut output = String::new();
    for (i, student) in students.iter().enumerate() {
        output.push_str(&format!(
            "{}. {} (ID: {}, {})\n",
            i + 1,
            student.full_name(),
            student.student_id,
            student.email
        ));
    }
    output
}

/// Render one course with its lessons in teaching order.
///
/// A lesson without a payload record gets no detail line.
pub fn course_detail(detail: &CourseDetail) -> String {
    let course = &detail.course;
    let mut output = format!(
        "Course: {} (ID: {})\nDescription: {}\nAuthor: {}\nLessons: {}\n",
        course.title,
        course.course_id,
        course.description,
        course.author,
        detail.lessons.len()
    );
    if detail.lessons.is_empty() {
        return output;
    }
    output.push('\n');
    for (i, entry) in detail.lessons.iter().enumerate() {
        let lesson = &entry.lesson;
        output.push_str(&format!(
            "{}. {} (ID: {}, {})\n   {}\n",
            i + 1,
            lesson.title,
            lesson.lesson_id,
            lesson.kind.as_str(),
            lesson.description
        ));
        match &entry.payload {
            Some(LessonPayload::Lecture(lecture)) => {
                output.push_str(&format!("   Duration: {} min\n", lecture.duration));
                if let Some(url) = &lecture.video_url {
                    output.push_str(&format!("   Video: {}\n", url));
                }
            }
            Some(LessonPayload::Task(task)) => {
                output.push_str(&format!("   Max score: {}\n", task.max_score));
                if let Some(deadline) = task.deadline {
                    output.push_str(&format!("   Deadline: {}\n", deadline));
                }
            }
            None => {}
        }
    }
    output
}

/// Render a student's standing across their enrolled courses.
pub fn progress_report(report: &ProgressReport) -> String {
    let mut output = format!("Progress for {}:\n", report.student.full_name());
    if report.standings.is_empty() {
        output.push_str("Not enrolled in any courses yet.\n");
        return output;
    }
    for standing in &report.standings {
        output.push_str(&format!(
            "\nCourse: {}\n  Progress: {}%\n  Completed lessons: {} of {}\n",
            standing.course.title, standing.percent, standing.completed, standing.total
        ));
    }
    output
}
