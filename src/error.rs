use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("LMS API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Not found")]
    NotFound,

    #[error("Not signed in")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Text shown inline in place of content that failed to load.
    ///
    /// Transport and server details are logged, never shown.
    pub fn status_text(&self) -> String {
        match self {
            AppError::NotFound => "Not found.".to_string(),
            AppError::Unauthorized => "Please sign in first.".to_string(),
            AppError::Forbidden(msg) | AppError::BadRequest(msg) => msg.clone(),
            AppError::Api { status, message } if *status < 500 && !message.is_empty() => {
                message.clone()
            }
            AppError::Http(e) => {
                error!("http error: {}", e);
                "Could not load. Check your connection.".to_string()
            }
            AppError::Database(e) => {
                error!("database error: {}", e);
                "Local storage error occurred.".to_string()
            }
            other => {
                error!("request failed: {}", other);
                "Could not load.".to_string()
            }
        }
    }
}
