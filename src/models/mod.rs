//! Domain models for the syllabus catalog.
//!
//! # Core Concepts
//!
//! ## Persisted Entities
//!
//! - [`Student`]: A registered learner with enrollments and per-course progress.
//! - [`Course`]: Metadata plus an ordered lesson list and an enrollment list.
//! - [`Lesson`]: Envelope for one curriculum entry. The actual material lives
//!   in a [`Lecture`] or [`Task`] record sharing the lesson's id.
//!
//! Reference lists between entities hold id strings (`"2"`), matching the
//! stored JSON form; each entity carries its own id as an integer.
//!
//! ## Read Views
//!
//! Assembled by the catalog for display, never persisted:
//!
//! - [`CourseDetail`]: A course with its lessons resolved to payloads.
//! - [`ProgressReport`]: A student's standing across enrolled courses.

mod course;
mod lecture;
mod lesson;
mod student;
mod task;

pub use course::*;
pub use lecture::*;
pub use lesson::*;
pub use student::*;
pub use task::*;
