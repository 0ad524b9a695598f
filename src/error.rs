use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Please upload your resume first")]
    MissingResume,

    #[error("You cannot apply to this job. Date is over")]
    DeadlinePassed,

    #[error("You have already applied to this job.")]
    AlreadyApplied,

    #[error("No stats found for {0}")]
    NoStats(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Multipart error: {0}")]
    Multipart(#[from] axum::extract::multipart::MultipartError),
}

impl Error {
    /// Stable machine-readable discriminator sent next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            Error::BadRequest(_) | Error::Multipart(_) => "bad_request",
            Error::Validation(_) => "validation_error",
            Error::Unauthorized(_) | Error::Token(_) => "unauthorized",
            Error::Forbidden(_) => "forbidden",
            Error::NotFound(_) => "not_found",
            Error::MissingResume => "missing_resume",
            Error::DeadlinePassed => "expired",
            Error::AlreadyApplied => "already_applied",
            Error::NoStats(_) => "no_stats",
            Error::Config(_)
            | Error::Database(_)
            | Error::Internal(_)
            | Error::Io(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_)
            | Error::Multipart(_)
            | Error::Validation(_)
            | Error::MissingResume
            | Error::DeadlinePassed => StatusCode::BAD_REQUEST,
            Error::Unauthorized(_) | Error::Token(_) => StatusCode::UNAUTHORIZED,
            Error::Forbidden(_) => StatusCode::FORBIDDEN,
            Error::NotFound(_) | Error::NoStats(_) => StatusCode::NOT_FOUND,
            Error::AlreadyApplied => StatusCode::CONFLICT,
            Error::Config(_)
            | Error::Database(_)
            | Error::Internal(_)
            | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_message = match &self {
            Error::BadRequest(msg)
            | Error::Unauthorized(msg)
            | Error::Forbidden(msg)
            | Error::NotFound(msg) => msg.clone(),
            Error::Validation(err) => err.to_string(),
            Error::Multipart(err) => err.to_string(),
            Error::Token(_) => "invalid_token".to_string(),
            Error::MissingResume
            | Error::DeadlinePassed
            | Error::AlreadyApplied
            | Error::NoStats(_) => self.to_string(),
            Error::Config(_) | Error::Database(_) | Error::Internal(_) | Error::Io(_) => {
                tracing::error!(error = %self, "request failed");
                "An unexpected error occurred".to_string()
            }
        };

        let body = Json(json!({ "error": error_message, "code": self.code() }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}
