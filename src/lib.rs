//! File-backed course catalog: students, courses, lessons, enrollment, and
//! progress tracking over plain JSON array stores.

pub mod models;
pub mod render;
pub mod store;
pub mod validate;
