use std::sync::Arc;

use tokio::task::{AbortHandle, JoinHandle};
use tracing::{error, info, warn};

use crate::error::AppError;
use crate::lms::LmsApi;
use crate::models::Course;
use crate::services::assembler::assemble_course;
use crate::services::sequencer::{MaterialCursor, MaterialSequence};
use crate::session::Session;

/// Who may open a course's materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessPolicy {
    /// Anyone who can load the course.
    #[default]
    Open,
    /// Only learners the LMS reports as enrolled.
    RequireEnrollment,
}

pub struct CourseService {
    api: Arc<dyn LmsApi>,
    policy: AccessPolicy,
}

impl CourseService {
    pub fn new(api: Arc<dyn LmsApi>, policy: AccessPolicy) -> Self {
        Self { api, policy }
    }

    pub async fn published_courses(&self, session: &Session) -> Result<Vec<Course>, AppError> {
        let courses = self.api.fetch_published_courses(session).await.map_err(|e| {
            error!("Error fetching courses: {}", e);
            e
        })?;
        info!("Fetched {} published courses", courses.len());
        Ok(courses)
    }

    /// Fetches the course, then its sections, then assembles them. Nothing is
    /// returned unless both fetches succeed.
    pub async fn load_course(&self, session: &Session, course_id: &str) -> Result<Course, AppError> {
        info!("Step 1: Fetching course {}", course_id);
        let course = self.api.fetch_course(session, course_id).await.map_err(|e| {
            error!("Error fetching course {}: {}", course_id, e);
            e
        })?;

        info!("Step 2: Fetching materials for course {}", course_id);
        let raw_sections = self
            .api
            .fetch_course_sections(session, course_id)
            .await
            .map_err(|e| {
                error!("Error fetching materials for course {}: {}", course_id, e);
                e
            })?;

        let course = assemble_course(course, raw_sections);
        info!(
            "Assembled course {} with {} sections",
            course.id,
            course.sections.as_ref().map_or(0, Vec::len)
        );
        Ok(course)
    }

    pub async fn check_access(&self, session: &Session, course_id: &str) -> Result<(), AppError> {
        match self.policy {
            AccessPolicy::Open => Ok(()),
            AccessPolicy::RequireEnrollment => {
                if self.api.is_enrolled(session, course_id).await? {
                    Ok(())
                } else {
                    warn!("Blocked materials of course {} (not enrolled)", course_id);
                    Err(AppError::Forbidden(
                        "Enroll in this course to study its materials.".to_string(),
                    ))
                }
            }
        }
    }

    /// Loads the course and positions a cursor on `material_id`, or on the
    /// first material when none is given.
    pub async fn open_material(
        &self,
        session: &Session,
        course_id: &str,
        material_id: Option<&str>,
    ) -> Result<MaterialCursor, AppError> {
        self.check_access(session, course_id).await?;
        let course = self.load_course(session, course_id).await?;
        let sequence = MaterialSequence::from_sections(course.sections.as_deref().unwrap_or_default());

        match material_id {
            Some(id) => {
                let current = sequence.get(id).cloned().ok_or(AppError::NotFound)?;
                Ok(MaterialCursor::new(sequence, current))
            }
            None => MaterialCursor::start(sequence).ok_or_else(|| {
                AppError::BadRequest("No materials found for this course.".to_string())
            }),
        }
    }
}

/// Runs course loads in the background. Starting a load aborts the one still
/// in flight, and dropping the loader aborts whatever is running.
pub struct CourseLoader {
    service: Arc<CourseService>,
    inflight: Option<AbortHandle>,
}

impl CourseLoader {
    pub fn new(service: Arc<CourseService>) -> Self {
        Self {
            service,
            inflight: None,
        }
    }

    pub fn load(&mut self, session: Session, course_id: impl Into<String>) -> JoinHandle<Result<Course, AppError>> {
        self.cancel();

        let service = self.service.clone();
        let course_id = course_id.into();
        let handle = tokio::spawn(async move { service.load_course(&session, &course_id).await });
        self.inflight = Some(handle.abort_handle());
        handle
    }

    pub fn cancel(&mut self) {
        if let Some(previous) = self.inflight.take() {
            if !previous.is_finished() {
                info!("Cancelling in-flight course load");
            }
            previous.abort();
        }
    }
}

impl Drop for CourseLoader {
    fn drop(&mut self) {
        self.cancel();
    }
}
