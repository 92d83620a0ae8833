use crate::domain::error::DomainError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationErrors),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Domain(err) => match err {
                DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
                DomainError::AlreadyExists(_) => (StatusCode::CONFLICT, err.to_string()),
                // unknown user and wrong password share one answer
                DomainError::InvalidCredentials => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::NotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
                DomainError::Unexpected(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                ),
            },
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Domain(DomainError::Unexpected(detail)) = &self {
            error!(%detail, "request failed");
        }
        let (status, msg) = self.status_and_message();

        (status, Json(ErrorBody { error: msg })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::AppError;
    use crate::domain::error::DomainError;

    #[test]
    fn invalid_credentials_and_missing_rows_share_status() {
        let (login, _) = AppError::from(DomainError::InvalidCredentials).status_and_message();
        let (missing, _) =
            AppError::from(DomainError::NotFound("user id: 1".to_string())).status_and_message();
        assert_eq!(login, StatusCode::NOT_FOUND);
        assert_eq!(missing, StatusCode::NOT_FOUND);
    }

    #[test]
    fn unexpected_errors_hide_details() {
        let (status, msg) =
            AppError::from(DomainError::Unexpected("disk I/O error".to_string()))
                .status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, "internal error");
    }

    #[test]
    fn conflicts_map_to_409() {
        let (status, msg) =
            AppError::from(DomainError::AlreadyExists("username".to_string()))
                .status_and_message();
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(msg.contains("username"));
    }
}
