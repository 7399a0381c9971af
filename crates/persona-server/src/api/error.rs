use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use persona_core::{AnalysisError, RuntimeError, ValidationError};
use serde::Serialize;

/// API-layer error type. Every variant renders as `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    /// 400 - missing or invalid query parameters
    BadRequest(String),

    /// 404 - nothing to analyse
    NotFound(String),

    /// 500 - upstream or assembly failure
    Internal(String),

    /// 502 - agent runtime unreachable
    BadGateway(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %message, "request failed");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::NoTrendingSymbols => ApiError::NotFound(err.to_string()),
            AnalysisError::Internal(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<RuntimeError> for ApiError {
    fn from(err: RuntimeError) -> Self {
        ApiError::BadGateway(err.to_string())
    }
}
