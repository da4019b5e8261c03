use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;

/// Catch-all 500 for handlers whose failures carry no special status.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": self.0.to_string()
            })),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// GenerateError

/// Errors for POST /api/generate. An invalid file selection is rejected at
/// the boundary, before any generation work starts.
#[derive(Debug, Serialize)]
pub enum GenerateError {
    InvalidFiles(String),
    Failure(String),
}

impl IntoResponse for GenerateError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            GenerateError::InvalidFiles(_) => StatusCode::BAD_REQUEST,
            GenerateError::Failure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

// DeleteError

/// Errors for POST /api/delete/{file}.
#[derive(Debug, Serialize)]
pub enum DeleteError {
    InvalidFile(String),
    Failure(String),
}

impl IntoResponse for DeleteError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            DeleteError::InvalidFile(_) => StatusCode::BAD_REQUEST,
            DeleteError::Failure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}
