/// The entity kinds that receive sequential identifiers.
///
/// Lecture and Task records reuse their parent lesson's id, so only these
/// three allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Student,
    Course,
    Lesson,
}

/// Hands out per-kind ids, strictly increasing for the life of the process.
///
/// Counters start at 1 and advance before each allocation, so a fresh store
/// hands out 2 first. Seeding from the highest persisted id keeps a reopened
/// store allocating above everything already on disk.
#[derive(Debug)]
pub struct IdAllocator {
    students: u64,
    courses: u64,
    lessons: u64,
}

impl IdAllocator {
    pub fn seeded(students: u64, courses: u64, lessons: u64) -> Self {
        Self {
            students: students.max(1),
            courses: courses.max(1),
            lessons: lessons.max(1),
        }
    }

    pub fn next_id(&mut self, kind: EntityKind) -> u64 {
        let counter = match kind {
            EntityKind::Student => &mut self.students,
            EntityKind::Course => &mut self.courses,
            EntityKind::Lesson => &mut self.lessons,
        };
        *counter += 1;
        *counter
    }
}
