use std::env;

use crate::error::AppError;
use crate::services::AccessPolicy;

pub const DEFAULT_BASE_URL: &str = "https://lms.fsa.io.vn";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://lms_session.db?mode=rwc";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base_url: String,
    pub database_url: String,
    pub timeout_secs: u64,
    pub access_policy: AccessPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            access_policy: AccessPolicy::Open,
        }
    }
}

impl AppConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let base_url = lookup("LMS_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "LMS_BASE_URL must be an http(s) URL, got {}",
                base_url
            )));
        }

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let timeout_secs = match lookup("LMS_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!("LMS_TIMEOUT_SECS is not a number: {}", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let access_policy = match lookup("LMS_REQUIRE_ENROLLMENT").as_deref() {
            Some("1") | Some("true") | Some("yes") => AccessPolicy::RequireEnrollment,
            _ => AccessPolicy::Open,
        };

        Ok(Self {
            base_url,
            database_url,
            timeout_secs,
            access_policy,
        })
    }
}
