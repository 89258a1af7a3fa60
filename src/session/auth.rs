use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::repository;
use crate::error::AppError;
use crate::lms::LmsApi;
use crate::lms::dto::LoginRequest;
use crate::models::User;
use crate::session::Session;

pub const TOKEN_KEY: &str = "authToken";
pub const USER_KEY: &str = "userData";

/// Cached user blob, stored in the same `{ data: User }` shape the
/// `/users/current` endpoint returns.
#[derive(Debug, Serialize, Deserialize)]
struct StoredUser {
    data: User,
}

pub struct AuthService {
    db: SqlitePool,
    api: Arc<dyn LmsApi>,
}

impl AuthService {
    pub fn new(db: SqlitePool, api: Arc<dyn LmsApi>) -> Self {
        Self { db, api }
    }

    /// Builds the startup session, signed in only when both the token and
    /// the user were cached.
    pub async fn restore(&self, base_url: &str) -> Result<Session, AppError> {
        let mut session = Session::new(base_url);

        let token = repository::fetch_value(&self.db, TOKEN_KEY).await?;
        let user = repository::fetch_value(&self.db, USER_KEY).await?;

        if let (Some(token), Some(user)) = (token, user) {
            match serde_json::from_str::<StoredUser>(&user.value) {
                Ok(stored) => {
                    info!("restored session for {}", stored.data.username);
                    session.set_signed_in(token.value, stored.data);
                }
                Err(e) => warn!("ignoring unreadable cached user: {}", e),
            }
        }

        Ok(session)
    }

    pub async fn sign_in(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> Result<User, AppError> {
        validate_credentials(username, password)?;

        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            remember_me: true,
        };
        let token = self.api.login(session, &request).await?;
        let user = self.api.current_user(session, &token).await?;

        let stored = serde_json::to_string(&StoredUser { data: user.clone() })?;
        repository::put_value(&self.db, TOKEN_KEY, &token).await?;
        repository::put_value(&self.db, USER_KEY, &stored).await?;

        session.set_signed_in(token, user.clone());
        info!("signed in as {}", user.username);
        Ok(user)
    }

    pub async fn sign_out(&self, session: &mut Session) -> Result<(), AppError> {
        repository::delete_value(&self.db, TOKEN_KEY).await?;
        repository::delete_value(&self.db, USER_KEY).await?;
        session.clear();
        info!("signed out");
        Ok(())
    }
}

/// Checks the form rules before any request is made: usernames need at least
/// 4 characters, passwords at least 6 with one digit.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), AppError> {
    if username.chars().count() < 4 {
        return Err(AppError::BadRequest(
            "Username must have at least 4 characters.".to_string(),
        ));
    }
    if password.chars().count() < 6 || !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "Password must be at least 6 characters and contain at least one number.".to_string(),
        ));
    }
    Ok(())
}
