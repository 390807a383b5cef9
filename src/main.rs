use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use syllabus::models::{
    AddLectureInput, AddTaskInput, CreateCourseInput, RegisterStudentInput, UpdateCourseInput,
};
use syllabus::render;
use syllabus::store::Catalog;

#[derive(Parser)]
#[command(name = "sylb")]
#[command(about = "File-backed course catalog with enrollment and progress tracking")]
struct Cli {
    /// Directory holding the JSON stores (defaults to the platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create any missing store files
    Init,
    /// Register and inspect students
    Student {
        #[command(subcommand)]
        command: StudentCommands,
    },
    /// Create, list, and edit courses
    Course {
        #[command(subcommand)]
        command: CourseCommands,
    },
    /// Attach lectures to courses
    Lecture {
        #[command(subcommand)]
        command: LectureCommands,
    },
    /// Attach tasks to courses and submit solutions
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Enroll a student in a course
    Enroll { student_id: u64, course_id: u64 },
}

#[derive(Subcommand)]
enum StudentCommands {
    /// Register a new student
    Register {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        phone: Option<String>,
    },
    /// List registered students
    List,
    /// Show a student's progress across their courses
    Progress { student_id: u64 },
}

#[derive(Subcommand)]
enum CourseCommands {
    /// Create a new course
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        author: String,
    },
    /// List all courses
    List,
    /// Show one course with its lessons
    Show { course_id: u64 },
    /// Edit course fields; omitted fields keep their values
    Edit {
        course_id: u64,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        author: Option<String>,
    },
}

#[derive(Subcommand)]
enum LectureCommands {
    /// Add a lecture to a course
    Add {
        course_id: u64,

        #[arg(long)]
        title: String,

        /// Short description shown in course listings
        #[arg(long)]
        summary: String,

        #[arg(long)]
        content: String,

        /// Running time in minutes
        #[arg(long)]
        duration: u32,

        #[arg(long)]
        video_url: Option<String>,
    },
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a task to a course
    Add {
        course_id: u64,

        #[arg(long)]
        title: String,

        /// Short description shown in course listings
        #[arg(long)]
        summary: String,

        /// Full assignment text
        #[arg(long)]
        description: String,

        #[arg(long)]
        max_score: u32,

        /// Due date, YYYY-MM-DD
        #[arg(long)]
        deadline: Option<chrono::NaiveDate>,
    },
    /// Submit a solution for a task, recording the completion
    Submit {
        student_id: u64,
        course_id: u64,
        lesson_id: u64,

        /// Solution text; checked for presence, not stored
        #[arg(long)]
        solution: String,
    },
}

/// Initialize tracing to stderr so stdout stays clean for command output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "syllabus=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_catalog(data_dir: Option<PathBuf>) -> anyhow::Result<Catalog> {
    let catalog = match data_dir {
        Some(dir) => Catalog::open(dir)?,
        None => Catalog::open_default()?,
    };
    catalog.init()?;
    Ok(catalog)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let catalog = open_catalog(cli.data_dir)?;

    match cli.command {
        Commands::Init => {
            println!("Stores ready in {}", catalog.root().display());
        }
        Commands::Student { command } => match command {
            StudentCommands::Register {
                first_name,
                last_name,
                email,
                phone,
            } => {
                let student = catalog.register_student(RegisterStudentInput {
                    first_name,
                    last_name,
                    email,
                    phone,
                })?;
                println!(
                    "Registered {} (ID: {})",
                    student.full_name(),
                    student.student_id
                );
            }
            StudentCommands::List => {
                let students = catalog.get_all_students()?;
                print!("{}", render::student_list(&students));
            }
            StudentCommands::Progress { student_id } => {
                let report = catalog
                    .student_progress(student_id)?
                    .ok_or_else(|| anyhow::anyhow!("Student not found"))?;
                print!("{}", render::progress_report(&report));
            }
        },
        Commands::Course { command } => match command {
            CourseCommands::Create {
                title,
                description,
                author,
            } => {
                let course = catalog.create_course(CreateCourseInput {
                    title,
                    description,
                    author,
                })?;
                println!("Created course '{}' (ID: {})", course.title, course.course_id);
            }
            CourseCommands::List => {
                let courses = catalog.get_all_courses()?;
                print!("{}", render::course_list(&courses));
            }
            CourseCommands::Show { course_id } => {
                let detail = catalog
                    .course_detail(course_id)?
                    .ok_or_else(|| anyhow::anyhow!("Course not found"))?;
                print!("{}", render::course_detail(&detail));
            }
            CourseCommands::Edit {
                course_id,
                title,
                description,
                author,
            } => {
                let course = catalog
                    .update_course(
                        course_id,
                        UpdateCourseInput {
                            title,
                            description,
                            author,
                        },
                    )?
                    .ok_or_else(|| anyhow::anyhow!("Course not found"))?;
                println!("Updated course '{}' (ID: {})", course.title, course.course_id);
            }
        },
        Commands::Lecture { command } => match command {
            LectureCommands::Add {
                course_id,
                title,
                summary,
                content,
                duration,
                video_url,
            } => {
                let lesson = catalog.add_lecture(
                    course_id,
                    AddLectureInput {
                        title,
                        summary,
                        content,
                        duration,
                        video_url,
                    },
                )?;
                println!(
                    "Added lecture '{}' (lesson ID: {})",
                    lesson.title, lesson.lesson_id
                );
            }
        },
        Commands::Task { command } => match command {
            TaskCommands::Add {
                course_id,
                title,
                summary,
                description,
                max_score,
                deadline,
            } => {
                let lesson = catalog.add_task(
                    course_id,
                    AddTaskInput {
                        title,
                        summary,
                        description,
                        max_score,
                        deadline,
                    },
                )?;
                println!(
                    "Added task '{}' (lesson ID: {})",
                    lesson.title, lesson.lesson_id
                );
            }
            TaskCommands::Submit {
                student_id,
                course_id,
                lesson_id,
                solution,
            } => {
                if catalog.submit_solution(student_id, course_id, lesson_id, &solution)? {
                    println!("Solution submitted, task marked complete");
                } else {
                    println!("Task was already completed");
                }
            }
        },
        Commands::Enroll {
            student_id,
            course_id,
        } => {
            if catalog.enroll(student_id, course_id)? {
                println!("Enrolled student {} in course {}", student_id, course_id);
            } else {
                println!(
                    "Student {} is already enrolled in course {}",
                    student_id, course_id
                );
            }
        }
    }

    Ok(())
}
