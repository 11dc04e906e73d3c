use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors returned by the appointments backend handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

/// Outcome of a dashboard operation that did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Please fill all fields (missing: {})", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("invalid date {0:?}, expected yyyy-mm-dd")]
    InvalidDate(String),

    #[error("day {day} does not exist in {month}")]
    InvalidDay { day: u32, month: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },
}
