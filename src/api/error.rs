use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;

use crate::store::error::StoreError;

/// User-facing error taxonomy; every variant renders a JSON
/// `{"message": ...}` body with its status code.
#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Invalid credentials")]
    InvalidCredentials,
    #[display(fmt = "{}", _0)]
    Unauthorized(String),
    #[display(fmt = "{}", _0)]
    Forbidden(String),
    #[display(fmt = "{}", _0)]
    NotFound(String),
    #[display(fmt = "{}", _0)]
    Conflict(String),
    #[display(fmt = "{}", _0)]
    BadRequest(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "message": self.to_string() }))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::NotFound(_) => ApiError::NotFound(message),
            StoreError::PermissionDenied => ApiError::Forbidden(message),
            StoreError::InvalidTransition { .. } => ApiError::Conflict(message),
            StoreError::EmptyComment | StoreError::UnknownAssignee(_) => {
                ApiError::BadRequest(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_status_codes() {
        let cases = [
            (StoreError::NotFound("Task"), StatusCode::NOT_FOUND),
            (StoreError::PermissionDenied, StatusCode::FORBIDDEN),
            (
                StoreError::InvalidTransition {
                    from: "approved".into(),
                    to: "rejected".into(),
                },
                StatusCode::CONFLICT,
            ),
            (StoreError::EmptyComment, StatusCode::BAD_REQUEST),
            (StoreError::UnknownAssignee(9), StatusCode::BAD_REQUEST),
        ];
        for (err, code) in cases {
            assert_eq!(ApiError::from(err).status_code(), code);
        }
    }

    #[test]
    fn credential_failure_reveals_nothing() {
        assert_eq!(ApiError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }
}
