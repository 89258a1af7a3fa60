#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lms_client::error::AppError;
use lms_client::lms::LmsApi;
use lms_client::lms::dto::{LoginRequest, RawMaterial, RawSection};
use lms_client::models::{ContentType, Course, Material, Section, User};
use lms_client::session::Session;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

pub const BASE_URL: &str = "https://lms.example.test";
pub const SLOW_COURSE_ID: &str = "slow";

/// In-memory session cache. One connection, so every query sees the same
/// in-memory database.
pub async fn memory_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create database");
    lms_client::db::migrate(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub fn material(id: &str, order_num: i64) -> Material {
    Material {
        id: id.to_string(),
        name: format!("Material {}", id),
        order_num,
        content_type: ContentType::Text,
        content: format!("<p>{}</p>", id),
        ..Default::default()
    }
}

pub fn section(id: &str, order_number: i64, materials: Vec<Material>) -> Section {
    Section {
        section_id: id.to_string(),
        section_name: format!("Section {}", id),
        order_number,
        duration: 0,
        course_materials: materials,
    }
}

pub fn raw_material(id: &str, order_num: i64, expected_duration: Option<u32>) -> RawMaterial {
    RawMaterial {
        id: id.to_string(),
        name: format!("Material {}", id),
        order_num,
        expected_duration,
        content_type: ContentType::Video,
        url: Some(format!("https://youtu.be/{}", id)),
        ..Default::default()
    }
}

pub fn raw_section(id: &str, order_number: Option<i64>, materials: Vec<RawMaterial>) -> RawSection {
    RawSection {
        section_id: id.to_string(),
        section_name: format!("Section {}", id),
        order_number,
        course_materials: materials,
    }
}

pub fn learner() -> User {
    User {
        id: "u-1".to_string(),
        username: "learner".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: "ada@example.test".to_string(),
        ..Default::default()
    }
}

/// Scripted LMS: one course with two sections, credentials
/// `learner` / `secret1`.
pub struct StubLms {
    pub sections: Option<Vec<RawSection>>,
    pub enrolled: bool,
    pub login_calls: AtomicUsize,
    pub course_calls: AtomicUsize,
}

impl StubLms {
    pub fn new() -> Self {
        Self {
            sections: Some(vec![
                raw_section("s2", Some(2), vec![raw_material("c", 1, Some(5))]),
                raw_section(
                    "s1",
                    Some(1),
                    vec![raw_material("b", 2, Some(10)), raw_material("a", 1, None)],
                ),
            ]),
            enrolled: true,
            login_calls: AtomicUsize::new(0),
            course_calls: AtomicUsize::new(0),
        }
    }

    pub fn without_materials() -> Self {
        Self {
            sections: None,
            ..Self::new()
        }
    }

    pub fn not_enrolled() -> Self {
        Self {
            enrolled: false,
            ..Self::new()
        }
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn course_calls(&self) -> usize {
        self.course_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LmsApi for StubLms {
    async fn login(&self, _session: &Session, request: &LoginRequest) -> Result<String, AppError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if request.username == "learner" && request.password == "secret1" {
            Ok("tok-1".to_string())
        } else {
            Err(AppError::BadRequest("Bad credentials".to_string()))
        }
    }

    async fn current_user(&self, _session: &Session, token: &str) -> Result<User, AppError> {
        if token == "tok-1" {
            Ok(learner())
        } else {
            Err(AppError::Unauthorized)
        }
    }

    async fn fetch_published_courses(&self, _session: &Session) -> Result<Vec<Course>, AppError> {
        Ok(vec![course("42")])
    }

    async fn fetch_course(&self, _session: &Session, course_id: &str) -> Result<Course, AppError> {
        self.course_calls.fetch_add(1, Ordering::SeqCst);
        match course_id {
            "42" => Ok(course("42")),
            SLOW_COURSE_ID => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(course(SLOW_COURSE_ID))
            }
            _ => Err(AppError::NotFound),
        }
    }

    async fn fetch_course_sections(
        &self,
        _session: &Session,
        _course_id: &str,
    ) -> Result<Vec<RawSection>, AppError> {
        self.sections.clone().ok_or(AppError::Api {
            status: 500,
            message: "materials unavailable".to_string(),
        })
    }

    async fn is_enrolled(&self, _session: &Session, _course_id: &str) -> Result<bool, AppError> {
        Ok(self.enrolled)
    }
}

pub fn course(id: &str) -> Course {
    Course {
        id: id.to_string(),
        name: format!("Course {}", id),
        code: "CS101".to_string(),
        level: "Beginner".to_string(),
        price: 100.0,
        ..Default::default()
    }
}

pub fn session() -> Session {
    Session::new(BASE_URL)
}
