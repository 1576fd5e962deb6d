use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
///
/// Every variant is reported as a 500 with an `{"error": ...}` body; the
/// questionnaire client only distinguishes success from failure.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Invalid filter: {0}")]
    Filter(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Filter(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Filter(msg) | AppError::Internal(msg) => msg.clone(),
        };

        tracing::error!(error = %self, "Request failed");

        let body = Json(json!({
            "error": message
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_message() {
        let err = AppError::Filter("genre must be a list".to_string());
        assert_eq!(err.to_string(), "Invalid filter: genre must be a list");
    }

    #[test]
    fn test_every_error_is_internal_server_error() {
        let errors = vec![
            AppError::Filter("bad".to_string()),
            AppError::Internal("boom".to_string()),
        ];
        for err in errors {
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
