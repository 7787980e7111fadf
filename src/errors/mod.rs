// Application error type and result alias, built on thiserror.
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use thiserror::Error;

pub mod auth;
pub mod response;

pub use auth::AuthError;

#[derive(Error, Debug)]
pub enum AppError {
    // Every authentication and token failure, rendered as 401.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Conflict: {0}")]
    Conflict(String),

    // Malformed or rejected request input, with the status to answer with.
    #[error("Validation error: {1}")]
    Validation(StatusCode, String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token expiry out of range")]
    ExpiryOutOfRange,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Token encoding error: {0}")]
    TokenEncoding(#[from] jsonwebtoken::errors::Error),

    #[error("Blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.status(), rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection.status(), rejection.body_text())
    }
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
