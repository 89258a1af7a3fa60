use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::error::AppError;
use crate::models::Course;
use crate::services::catalog::{self, LEVEL_FILTERS};
use crate::services::{ContentView, MaterialCursor, TextRenderer, render};
use crate::session::Session;
use crate::state::AppState;

#[derive(Parser)]
#[command(
    name = "lms-client",
    about = "Browse courses and study materials from the LMS",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and cache the session
    Login(LoginArgs),

    /// Forget the cached session
    Logout,

    /// Show who is signed in
    #[command(aliases = &["status"])]
    Whoami,

    /// List published courses
    #[command(aliases = &["ls"])]
    Courses(CoursesArgs),

    /// Show a course overview and its lessons
    Course(CourseArgs),

    /// Open a material of a course
    Study(StudyArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    pub username: String,

    #[arg(short, long)]
    pub password: String,
}

#[derive(Args)]
pub struct CoursesArgs {
    /// Only courses whose name contains this text
    #[arg(short, long, default_value = "")]
    pub search: String,

    #[arg(short, long, default_value = "All", value_parser = LEVEL_FILTERS)]
    pub level: String,
}

#[derive(Args)]
pub struct CourseArgs {
    pub course_id: String,
}

#[derive(Args)]
pub struct StudyArgs {
    pub course_id: String,

    /// Material to open; defaults to the first one of the course
    #[arg(short, long)]
    pub material: Option<String>,

    /// Move from the opened material before showing it
    #[arg(long, value_enum)]
    pub step: Option<Step>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Step {
    Next,
    Previous,
}

pub struct CliHandler {
    state: AppState,
    session: Session,
}

impl CliHandler {
    pub fn new(state: AppState, session: Session) -> Self {
        Self { state, session }
    }

    pub async fn execute(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Login(args) => self.handle_login(args).await,
            Commands::Logout => self.handle_logout().await,
            Commands::Whoami => self.handle_whoami(),
            Commands::Courses(args) => self.handle_courses(args).await,
            Commands::Course(args) => self.handle_course(args).await,
            Commands::Study(args) => self.handle_study(args).await,
        }
    }

    async fn handle_login(&mut self, args: LoginArgs) -> Result<(), AppError> {
        let user = self
            .state
            .auth()
            .sign_in(&mut self.session, &args.username, &args.password)
            .await?;
        println!("Sign in successful! Welcome, {}.", user.display_name());
        Ok(())
    }

    async fn handle_logout(&mut self) -> Result<(), AppError> {
        self.state.auth().sign_out(&mut self.session).await?;
        println!("Signed out.");
        Ok(())
    }

    fn handle_whoami(&self) -> Result<(), AppError> {
        let user = self.session.user().ok_or(AppError::Unauthorized)?;
        println!("{},", catalog::greeting_now());
        println!("{}", user.display_name());
        if !user.email.is_empty() {
            println!("  email:   {}", user.email);
        }
        if !user.student_code.is_empty() {
            println!("  student: {}", user.student_code);
        }
        if let Some(created) = user.created_at() {
            println!("  member since {}", created.format("%Y-%m-%d"));
        }
        Ok(())
    }

    async fn handle_courses(&self, args: CoursesArgs) -> Result<(), AppError> {
        let courses = self.state.courses().published_courses(&self.session).await?;
        if courses.is_empty() {
            println!("No courses available.");
            return Ok(());
        }

        let matching = catalog::filter_courses(&courses, &args.search, &args.level);
        if matching.is_empty() {
            println!("No matching courses found.");
            return Ok(());
        }

        for course in matching {
            print_course_card(course);
        }
        Ok(())
    }

    async fn handle_course(&self, args: CourseArgs) -> Result<(), AppError> {
        let course = self
            .state
            .courses()
            .load_course(&self.session, &args.course_id)
            .await?;

        print_course_card(&course);
        if !course.description.is_empty() {
            println!("\n{}", course.description);
        }
        if let Some(instructor) = &course.instructor {
            println!("Instructor: {}", instructor.display_name());
        }

        let sections = course.sections.as_deref().unwrap_or_default();
        if sections.is_empty() {
            println!("\nCan not find lectures");
            return Ok(());
        }
        println!("\nLessons ({} min):", course.total_duration().unwrap_or(0));
        for chapter in catalog::lesson_outline(sections) {
            println!("  {} ({} min)", chapter.title, chapter.duration);
            for item in chapter.items {
                println!("    [{}] {} ({})", item.icon, item.name, item.material_id);
            }
        }
        Ok(())
    }

    async fn handle_study(&self, args: StudyArgs) -> Result<(), AppError> {
        let mut cursor = self
            .state
            .courses()
            .open_material(&self.session, &args.course_id, args.material.as_deref())
            .await?;

        let moved = match args.step {
            Some(Step::Next) => cursor.advance(),
            Some(Step::Previous) => cursor.retreat(),
            None => true,
        };
        if !moved {
            println!("No material in that direction; staying here.");
        }

        print_material(&cursor, &self.session);
        Ok(())
    }
}

fn print_course_card(course: &Course) {
    let creator = course
        .creator
        .as_ref()
        .map(|c| c.display_name())
        .unwrap_or_default();
    println!(
        "{} ({}) [{}] {} weeks, {} by {} - id {}",
        course.name,
        course.code,
        course.level,
        course.duration_weeks,
        catalog::price_label(course),
        creator,
        course.id
    );
}

fn print_material(cursor: &MaterialCursor, session: &Session) {
    let material = cursor.current();
    println!("== {} ==", material.name);
    let view = ContentView::resolve(material, session);
    println!("{}", render(&view, &TextRenderer));

    let sequence = cursor.sequence();
    if let Some(previous) = sequence.previous(&material.id) {
        println!("\nPrevious: {} (--material {})", previous.name, previous.id);
    }
    if let Some(next) = sequence.next(&material.id) {
        println!("Next: {} (--material {})", next.name, next.id);
    }
}
