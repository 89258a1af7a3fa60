pub mod dto;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::AppError;
use crate::models::{Course, User};
use crate::session::Session;

/// Header the LMS reads the bearer token from on course endpoints.
const TOKEN_HEADER: &str = "token";
/// Header `/users/current` reads the bearer token from.
const JWT_HEADER: &str = "JWT_TOKEN";

#[async_trait]
pub trait LmsApi: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, session: &Session, request: &dto::LoginRequest) -> Result<String, AppError>;
    async fn current_user(&self, session: &Session, token: &str) -> Result<User, AppError>;
    async fn fetch_published_courses(&self, session: &Session) -> Result<Vec<Course>, AppError>;
    async fn fetch_course(&self, session: &Session, course_id: &str) -> Result<Course, AppError>;
    async fn fetch_course_sections(
        &self,
        session: &Session,
        course_id: &str,
    ) -> Result<Vec<dto::RawSection>, AppError>;
    async fn is_enrolled(&self, session: &Session, course_id: &str) -> Result<bool, AppError>;
}

pub struct LmsHttpClient {
    client: Client,
}

impl LmsHttpClient {
    pub fn new(timeout_secs: u64) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    fn get(&self, session: &Session, path: &str) -> RequestBuilder {
        let request = self.client.get(session.api_url(path));
        match session.token() {
            Some(token) => request.header(TOKEN_HEADER, token),
            None => request,
        }
    }

    /// Unwraps the `{ data }` envelope, mapping non-success statuses to errors.
    async fn read_data<T: DeserializeOwned>(
        &self,
        response: Response,
        what: &str,
    ) -> Result<Option<T>, AppError> {
        let status = response.status();
        let body = response.text().await?;
        debug!("LMS {} response: {}", what, status);

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let envelope = serde_json::from_str::<dto::ApiEnvelope<T>>(&body).map_err(|e| {
            error!("Failed to parse {} response: {}", what, e);
            AppError::from(e)
        })?;
        Ok(envelope.data)
    }
}

fn api_error(status: StatusCode, body: &str) -> AppError {
    match status {
        StatusCode::NOT_FOUND => AppError::NotFound,
        StatusCode::UNAUTHORIZED => AppError::Unauthorized,
        StatusCode::FORBIDDEN => AppError::Forbidden(
            envelope_message(body)
                .unwrap_or_else(|| "You do not have access to this content.".to_string()),
        ),
        _ => {
            let message = envelope_message(body).unwrap_or_else(|| body.to_string());
            AppError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }
}

fn envelope_message(body: &str) -> Option<String> {
    serde_json::from_str::<dto::ApiEnvelope<serde_json::Value>>(body)
        .ok()
        .and_then(|envelope| envelope.error.or(envelope.message))
}

fn missing(what: &str) -> AppError {
    AppError::Api {
        status: StatusCode::OK.as_u16(),
        message: format!("{} response has no data", what),
    }
}

#[async_trait]
impl LmsApi for LmsHttpClient {
    async fn login(&self, session: &Session, request: &dto::LoginRequest) -> Result<String, AppError> {
        let response = self
            .client
            .post(session.api_url("auth/login"))
            .json(request)
            .send()
            .await?;

        // Rejected logins come back as `{ "error": "..." }`.
        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = envelope_message(&body).unwrap_or_else(|| "Login failed".to_string());
            return Err(AppError::BadRequest(message));
        }

        let data: Option<dto::LoginData> = self.read_data(response, "login").await?;
        data.map(|d| d.token).ok_or_else(|| missing("login"))
    }

    async fn current_user(&self, session: &Session, token: &str) -> Result<User, AppError> {
        let response = self
            .client
            .get(session.api_url("users/current"))
            .header(JWT_HEADER, token)
            .send()
            .await?;

        let data: Option<User> = self.read_data(response, "current user").await?;
        data.ok_or_else(|| missing("current user"))
    }

    async fn fetch_published_courses(&self, session: &Session) -> Result<Vec<Course>, AppError> {
        let response = self.get(session, "courses/published").send().await?;
        let page: Option<dto::PageContent<Course>> =
            self.read_data(response, "published courses").await?;
        Ok(page.map(|p| p.content).unwrap_or_default())
    }

    async fn fetch_course(&self, session: &Session, course_id: &str) -> Result<Course, AppError> {
        let path = format!("courses/{}", course_id);
        let response = self.get(session, &path).send().await?;
        let data: Option<Course> = self.read_data(response, "course").await?;
        data.ok_or(AppError::NotFound)
    }

    async fn fetch_course_sections(
        &self,
        session: &Session,
        course_id: &str,
    ) -> Result<Vec<dto::RawSection>, AppError> {
        let path = format!("materials/course/{}", course_id);
        let response = self.get(session, &path).send().await?;
        let data: Option<Vec<dto::RawSection>> = self.read_data(response, "materials").await?;
        Ok(data.unwrap_or_default())
    }

    async fn is_enrolled(&self, session: &Session, course_id: &str) -> Result<bool, AppError> {
        if session.token().is_none() {
            return Err(AppError::Unauthorized);
        }
        let path = format!("enrollments/isEnrolled/{}", course_id);
        let response = self.get(session, &path).send().await?;
        let data: Option<bool> = self.read_data(response, "enrollment").await?;
        Ok(data.unwrap_or(false))
    }
}

/// Stand-in for an unreachable server: no user, no courses.
pub struct NoopLmsClient;

#[async_trait]
impl LmsApi for NoopLmsClient {
    async fn login(&self, _session: &Session, _request: &dto::LoginRequest) -> Result<String, AppError> {
        Err(AppError::Unauthorized)
    }

    async fn current_user(&self, _session: &Session, _token: &str) -> Result<User, AppError> {
        Err(AppError::Unauthorized)
    }

    async fn fetch_published_courses(&self, _session: &Session) -> Result<Vec<Course>, AppError> {
        Ok(Vec::new())
    }

    async fn fetch_course(&self, _session: &Session, _course_id: &str) -> Result<Course, AppError> {
        Err(AppError::NotFound)
    }

    async fn fetch_course_sections(
        &self,
        _session: &Session,
        _course_id: &str,
    ) -> Result<Vec<dto::RawSection>, AppError> {
        Ok(Vec::new())
    }

    async fn is_enrolled(&self, _session: &Session, _course_id: &str) -> Result<bool, AppError> {
        Ok(false)
    }
}
