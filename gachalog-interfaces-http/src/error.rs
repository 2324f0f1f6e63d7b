use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug)]
pub enum HttpError {
    Unauthorized,
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<gachalog_application::AppError> for HttpError {
    fn from(value: gachalog_application::AppError) -> Self {
        match value {
            gachalog_application::AppError::Unauthorized => HttpError::Unauthorized,
            gachalog_application::AppError::BadRequest(msg) => HttpError::BadRequest(msg),
            gachalog_application::AppError::NotFound(msg) => HttpError::NotFound(msg),
            gachalog_application::AppError::Internal(err) => HttpError::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            HttpError::Unauthorized => (StatusCode::FORBIDDEN, "invalid token".to_string()),
            HttpError::BadRequest(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("invalid parameters: {}", msg),
            ),
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
