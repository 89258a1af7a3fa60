use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::lms::LmsApi;
use crate::services::CourseService;
use crate::session::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub api: Arc<dyn LmsApi>,
    pub config: AppConfig,
}

impl AppState {
    pub fn auth(&self) -> AuthService {
        AuthService::new(self.db.clone(), self.api.clone())
    }

    pub fn courses(&self) -> CourseService {
        CourseService::new(self.api.clone(), self.config.access_policy)
    }
}
