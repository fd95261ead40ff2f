use atlas_core::errors::Error as CoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, String, Option<String>) {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Upstream(source) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "External data source unavailable".to_string(),
                    Some(match source.dataset() {
                        Some(dataset) => format!("Could not fetch data from {}", dataset),
                        None => source.to_string(),
                    }),
                ),
                CoreError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string(), None),
                CoreError::RefreshInProgress => (StatusCode::CONFLICT, e.to_string(), None),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None),
            },
            ApiError::Internal(reason) => {
                (StatusCode::INTERNAL_SERVER_ERROR, reason.clone(), None)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = self.parts();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            error,
            details,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
