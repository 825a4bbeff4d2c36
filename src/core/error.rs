use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::ErrorBody;

/// Failure taxonomy shared by every endpoint.
///
/// `ReferenceNotFound` and `NotFound` both map to 404 but stay distinct:
/// the first means the referenced State is missing on a City write, the
/// second that the requested row itself is absent.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("API_TOKEN not configured on the server")]
    AuthNotConfigured,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("Database error occurred"),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::message(msg)),
            AppError::ReferenceNotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::message(msg)),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::message(msg)),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("Internal error"),
                )
            }
            // Auth failures use the `error` field, as the original middleware did
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorBody::error(msg)),
            AppError::AuthNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::error("API_TOKEN not configured on the server"),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_of(AppError::Validation("invalid id".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::ReferenceNotFound("UF does not exist".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::NotFound("City not found".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Conflict("City already exists in this state".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Unauthorized("Invalid token".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::AuthNotConfigured),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(AppError::Internal("boom".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
