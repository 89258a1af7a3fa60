pub mod auth;

pub use auth::{AuthService, validate_credentials};

use crate::models::User;

/// Who is talking to which LMS. Created at startup and passed explicitly to
/// every API call; only [`AuthService`] changes the signed-in state.
#[derive(Debug, Clone)]
pub struct Session {
    base_url: String,
    token: Option<String>,
    user: Option<User>,
}

impl Session {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            user: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// `path` is relative to `/api`, e.g. `courses/42`.
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Resolves a server-relative asset path (images, audio, documents).
    /// Absolute URLs are returned unchanged.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub(crate) fn set_signed_in(&mut self, token: String, user: User) {
        self.token = Some(token);
        self.user = Some(user);
    }

    pub(crate) fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}
