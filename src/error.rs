use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::models::ApiResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Participant already exists: {0}")]
    DuplicateName(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("No participants in the wheel")]
    EmptyPool,

    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    #[error("Rendering failure: {0}")]
    RenderingFailure(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::DuplicateName(_) => (StatusCode::BAD_REQUEST, "DUPLICATE_NAME"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::EmptyPool => (StatusCode::BAD_REQUEST, "EMPTY_POOL"),
            AppError::InvalidUpload(_) => (StatusCode::BAD_REQUEST, "INVALID_UPLOAD"),
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::RenderingFailure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "RENDERING_FAILURE")
            }
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            AppError::IoError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();
        let message = match self {
            AppError::DuplicateName(_)
            | AppError::NotFound(_)
            | AppError::EmptyPool
            | AppError::InvalidUpload(_)
            | AppError::ValidationError(_) => {
                log::warn!("{self}");
                self.to_string()
            }
            // 导出失败需要带上诊断信息
            AppError::RenderingFailure(detail) => {
                log::error!("Rendering failure: {detail}");
                self.to_string()
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                "Database error".to_string()
            }
            AppError::IoError(err) => {
                log::error!("IO error: {err}");
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(status_code).json(ApiResponse::<()>::error(
            error_code.to_string(),
            message,
        ))
    }
}
