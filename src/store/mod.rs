mod ids;
mod json;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use tracing::{debug, info};

use crate::models::*;
use crate::validate;

use ids::{EntityKind, IdAllocator};
use json::{JsonCollection, Record};

impl Record for Student {
    fn id(&self) -> u64 {
        self.student_id
    }
}

impl Record for Course {
    fn id(&self) -> u64 {
        self.course_id
    }
}

impl Record for Lesson {
    fn id(&self) -> u64 {
        self.lesson_id
    }
}

impl Record for Lecture {
    fn id(&self) -> u64 {
        self.lesson_id
    }
}

impl Record for Task {
    fn id(&self) -> u64 {
        self.lesson_id
    }
}

/// Overrides the default data directory when set.
const DATA_DIR_ENV: &str = "SYLLABUS_DATA_DIR";

/// The course catalog: five JSON-array stores plus the id allocator.
///
/// All cross-entity consistency lives here. Entity structs never touch
/// storage themselves; every operation below is a full load-mutate-save
/// cycle against the files under `root`.
pub struct Catalog {
    root: PathBuf,
    students: JsonCollection<Student>,
    courses: JsonCollection<Course>,
    lessons: JsonCollection<Lesson>,
    lectures: JsonCollection<Lecture>,
    tasks: JsonCollection<Task>,
    ids: Mutex<IdAllocator>,
}

impl Catalog {
    /// Opens the stores under `dir`, creating the directory if needed and
    /// seeding the id counters from whatever is already persisted.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let root = dir.into();
        std::fs::create_dir_all(&root)?;
        let students = JsonCollection::new(&root, "students.json");
        let courses = JsonCollection::new(&root, "courses.json");
        let lessons = JsonCollection::new(&root, "lessons.json");
        let lectures = JsonCollection::new(&root, "lectures.json");
        let tasks = JsonCollection::new(&root, "tasks.json");
        let ids = IdAllocator::seeded(students.max_id()?, courses.max_id()?, lessons.max_id()?);
        Ok(Self {
            root,
            students,
            courses,
            lessons,
            lectures,
            tasks,
            ids: Mutex::new(ids),
        })
    }

    /// Opens the stores in the platform data directory, or wherever
    /// `SYLLABUS_DATA_DIR` points.
    pub fn open_default() -> Result<Self> {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            return Self::open(dir);
        }
        let dirs = directories::ProjectDirs::from("", "", "syllabus")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Self::open(dirs.data_dir().to_path_buf())
    }

    /// Seeds any missing store file with an empty array.
    pub fn init(&self) -> Result<()> {
        self.students.init()?;
        self.courses.init()?;
        self.lessons.init()?;
        self.lectures.init()?;
        self.tasks.init()?;
        info!(root = %self.root.display(), "stores ready");
        Ok(())
    }

    /// Where the store files live.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn next_id(&self, kind: EntityKind) -> u64 {
        self.ids
            .lock()
            .expect("id allocator lock poisoned")
            .next_id(kind)
    }

    // ============================================================
    // Student operations
    // ============================================================

    pub fn get_all_students(&self) -> Result<Vec<Student>> {
        self.students.load_all()
    }

    pub fn get_student(&self, id: u64) -> Result<Option<Student>> {
        self.students.find_by_id(id)
    }

    pub fn register_student(&self, input: RegisterStudentInput) -> Result<Student> {
        validate::require(
            validate::name(&input.first_name),
            "first_name",
            "letters and spaces only",
        )?;
        validate::require(
            validate::name(&input.last_name),
            "last_name",
            "letters and spaces only",
        )?;
        validate::require(
            validate::email(&input.email),
            "email",
            "not a valid address",
        )?;

        let mut all = self.students.load_all()?;
        if all.iter().any(|s| s.email == input.email) {
            anyhow::bail!("A student with this email is already registered");
        }

        let id = self.next_id(EntityKind::Student);
        let student = Student {
            student_id: id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            enrolled_courses: Vec::new(),
            progress: BTreeMap::new(),
        };
        all.push(student.clone());
        self.students.save_all(&all)?;
        debug!(student_id = id, "registered student");
        Ok(student)
    }

    /// Progress across every enrolled course that still resolves to a stored
    /// course. Dangling enrollments are skipped.
    pub fn student_progress(&self, id: u64) -> Result<Option<ProgressReport>> {
        let Some(student) = self.get_student(id)? else {
            return Ok(None);
        };

        let courses = self.courses.load_all()?;
        let mut standings = Vec::new();
        for key in &student.enrolled_courses {
            let Some(course) = courses.iter().find(|c| c.course_id.to_string() == *key) else {
                continue;
            };
            let entry = student.progress.get(key).cloned().unwrap_or_default();
            standings.push(CourseStanding {
                course: course.clone(),
                completed: entry.completed_lessons.len(),
                total: course.lessons.len(),
                percent: entry.overall_progress,
            });
        }
        Ok(Some(ProgressReport { student, standings }))
    }

    // ============================================================
    // Course operations
    // ============================================================

    pub fn get_all_courses(&self) -> Result<Vec<Course>> {
        self.courses.load_all()
    }

    pub fn get_course(&self, id: u64) -> Result<Option<Course>> {
        self.courses.find_by_id(id)
    }

    pub fn create_course(&self, input: CreateCourseInput) -> Result<Course> {
        validate::require(validate::title(&input.title), "title", "must not be empty")?;
        validate::require(
            validate::content(&input.description),
            "description",
            "must not be empty",
        )?;
        validate::require(
            validate::name(&input.author),
            "author",
            "letters and spaces only",
        )?;

        let id = self.next_id(EntityKind::Course);
        let course = Course {
            course_id: id,
            title: input.title,
            description: input.description,
            author: input.author,
            lessons: Vec::new(),
            enrolled_students: Vec::new(),
        };
        self.courses.append(course.clone())?;
        debug!(course_id = id, "created course");
        Ok(course)
    }

    pub fn update_course(&self, id: u64, input: UpdateCourseInput) -> Result<Option<Course>> {
        let Some(existing) = self.get_course(id)? else {
            return Ok(None);
        };

        if let Some(title) = &input.title {
            validate::require(validate::title(title), "title", "must not be empty")?;
        }
        if let Some(description) = &input.description {
            validate::require(
                validate::content(description),
                "description",
                "must not be empty",
            )?;
        }
        if let Some(author) = &input.author {
            validate::require(validate::name(author), "author", "letters and spaces only")?;
        }

        let updated = Course {
            course_id: existing.course_id,
            title: input.title.unwrap_or(existing.title),
            description: input.description.unwrap_or(existing.description),
            author: input.author.unwrap_or(existing.author),
            lessons: existing.lessons,
            enrolled_students: existing.enrolled_students,
        };
        self.courses.replace(updated.clone())?;
        debug!(course_id = id, "updated course");
        Ok(Some(updated))
    }

    /// A course with its lesson references resolved to envelopes and
    /// payloads, in course order. References that no longer resolve are
    /// skipped; a lesson whose payload record is missing is kept with no
    /// payload.
    pub fn course_detail(&self, id: u64) -> Result<Option<CourseDetail>> {
        let Some(course) = self.get_course(id)? else {
            return Ok(None);
        };

        let lessons = self.lessons.load_all()?;
        let lectures = self.lectures.load_all()?;
        let tasks = self.tasks.load_all()?;

        let mut resolved = Vec::new();
        for key in &course.lessons {
            let Some(lesson) = lessons.iter().find(|l| l.lesson_id.to_string() == *key) else {
                continue;
            };
            let payload = match lesson.kind {
                LessonKind::Lecture => lectures
                    .iter()
                    .find(|l| l.lesson_id == lesson.lesson_id)
                    .cloned()
                    .map(LessonPayload::Lecture),
                LessonKind::Task => tasks
                    .iter()
                    .find(|t| t.lesson_id == lesson.lesson_id)
                    .cloned()
                    .map(LessonPayload::Task),
            };
            resolved.push(LessonOverview {
                lesson: lesson.clone(),
                payload,
            });
        }
        Ok(Some(CourseDetail {
            course,
            lessons: resolved,
        }))
    }

    // ============================================================
    // Lesson operations
    // ============================================================

    pub fn get_lesson(&self, id: u64) -> Result<Option<Lesson>> {
        self.lessons.find_by_id(id)
    }

    /// Creates the `lecture` lesson envelope and its payload, then links the
    /// lesson into the course. Returns the new envelope.
    pub fn add_lecture(&self, course_id: u64, input: AddLectureInput) -> Result<Lesson> {
        self.get_course(course_id)?
            .ok_or_else(|| anyhow::anyhow!("Course not found"))?;
        validate::require(validate::title(&input.title), "title", "must not be empty")?;
        validate::require(
            validate::content(&input.summary),
            "summary",
            "must not be empty",
        )?;
        validate::require(
            validate::content(&input.content),
            "content",
            "must not be empty",
        )?;
        validate::require(input.duration > 0, "duration", "must be a positive number")?;

        let lesson = self.create_lesson(input.title, input.summary, LessonKind::Lecture)?;
        self.lectures.append(Lecture {
            lesson_id: lesson.lesson_id,
            content: input.content,
            duration: input.duration,
            video_url: input.video_url,
        })?;
        self.link_lesson(course_id, lesson.lesson_id)?;
        info!(course_id, lesson_id = lesson.lesson_id, "added lecture");
        Ok(lesson)
    }

    /// Creates the `task` lesson envelope and its payload, then links the
    /// lesson into the course. Returns the new envelope.
    pub fn add_task(&self, course_id: u64, input: AddTaskInput) -> Result<Lesson> {
        self.get_course(course_id)?
            .ok_or_else(|| anyhow::anyhow!("Course not found"))?;
        validate::require(validate::title(&input.title), "title", "must not be empty")?;
        validate::require(
            validate::content(&input.summary),
            "summary",
            "must not be empty",
        )?;
        validate::require(
            validate::content(&input.description),
            "description",
            "must not be empty",
        )?;
        validate::require(input.max_score > 0, "max_score", "must be a positive number")?;

        let lesson = self.create_lesson(input.title, input.summary, LessonKind::Task)?;
        self.tasks.append(Task {
            lesson_id: lesson.lesson_id,
            description: input.description,
            max_score: input.max_score,
            deadline: input.deadline,
        })?;
        self.link_lesson(course_id, lesson.lesson_id)?;
        info!(course_id, lesson_id = lesson.lesson_id, "added task");
        Ok(lesson)
    }

    fn create_lesson(&self, title: String, description: String, kind: LessonKind) -> Result<Lesson> {
        let id = self.next_id(EntityKind::Lesson);
        let lesson = Lesson {
            lesson_id: id,
            title,
            description,
            kind,
        };
        self.lessons.append(lesson.clone())?;
        Ok(lesson)
    }

    /// Appends `lesson_id` to the course's lesson list if absent and
    /// persists the course. Returns whether a change was made. The lesson id
    /// is not required to resolve; unresolved references are filtered at
    /// read time.
    pub fn link_lesson(&self, course_id: u64, lesson_id: u64) -> Result<bool> {
        let mut course = self
            .get_course(course_id)?
            .ok_or_else(|| anyhow::anyhow!("Course not found"))?;
        if !course.push_lesson(lesson_id) {
            return Ok(false);
        }
        self.courses.replace(course)?;
        debug!(course_id, lesson_id, "linked lesson into course");
        Ok(true)
    }

    // ============================================================
    // Enrollment & progress operations
    // ============================================================

    /// Two-sided enrollment: the student id goes into the course's roster
    /// and the course id into the student's list, with an empty progress
    /// entry. Both records are staged in memory and persisted only after
    /// both mutations pass, course first, student second. Returns whether
    /// the student was newly enrolled; repeat enrollment changes nothing.
    pub fn enroll(&self, student_id: u64, course_id: u64) -> Result<bool> {
        let mut student = self
            .get_student(student_id)?
            .ok_or_else(|| anyhow::anyhow!("Student not found"))?;
        let mut course = self
            .get_course(course_id)?
            .ok_or_else(|| anyhow::anyhow!("Course not found"))?;

        let newly_enrolled = student.enroll_in(course_id);
        let newly_rostered = course.push_student(student_id);
        if !newly_enrolled && !newly_rostered {
            return Ok(false);
        }

        self.courses.replace(course)?;
        self.students.replace(student)?;
        info!(student_id, course_id, "enrolled student");
        Ok(true)
    }

    /// Marks a lesson complete for an enrolled student and stores the
    /// recomputed percentage. Returns whether the completion was newly
    /// recorded; `false` means it was already complete.
    pub fn record_completion(&self, student_id: u64, course_id: u64, lesson_id: u64) -> Result<bool> {
        let mut student = self
            .get_student(student_id)?
            .ok_or_else(|| anyhow::anyhow!("Student not found"))?;
        let course = self
            .get_course(course_id)?
            .ok_or_else(|| anyhow::anyhow!("Course not found"))?;

        match student.complete_lesson(course_id, lesson_id, course.lessons.len()) {
            None => anyhow::bail!("Student is not enrolled in this course"),
            Some(false) => Ok(false),
            Some(true) => {
                self.students.replace(student)?;
                debug!(student_id, course_id, lesson_id, "recorded completion");
                Ok(true)
            }
        }
    }

    /// Records a task submission. The lesson must be a `task` belonging to
    /// the course, and the solution text must be non-empty. Only the
    /// completion is stored; the text itself is discarded. Returns whether
    /// the task was newly completed.
    pub fn submit_solution(
        &self,
        student_id: u64,
        course_id: u64,
        lesson_id: u64,
        solution: &str,
    ) -> Result<bool> {
        validate::require(validate::content(solution), "solution", "must not be empty")?;

        let lesson = self
            .get_lesson(lesson_id)?
            .ok_or_else(|| anyhow::anyhow!("Lesson not found"))?;
        if lesson.kind != LessonKind::Task {
            anyhow::bail!("Lesson is not a task");
        }
        let course = self
            .get_course(course_id)?
            .ok_or_else(|| anyhow::anyhow!("Course not found"))?;
        if !course.contains_lesson(lesson_id) {
            anyhow::bail!("Task does not belong to this course");
        }

        self.record_completion(student_id, course_id, lesson_id)
    }
}
