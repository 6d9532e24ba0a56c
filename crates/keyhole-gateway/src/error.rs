use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use keyhole_core::{ShortenError, StoreError};
use serde::Serialize;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Request-boundary error wrapper mapping the service taxonomy to HTTP
/// status codes. "Unknown short code" never reaches here: the handlers
/// treat it as a normal absent result (404) rather than an error.
#[derive(Debug)]
pub struct AppError(ShortenError);

impl From<ShortenError> for AppError {
    fn from(err: ShortenError) -> Self {
        Self(err)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ShortenError::InvalidUrl(_) | ShortenError::InvalidShortCode(_) => {
                StatusCode::BAD_REQUEST
            }
            ShortenError::Store(StoreError::Unavailable(_) | StoreError::Timeout(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ShortenError::Allocation(_)
            | ShortenError::AttemptsExhausted { .. }
            | ShortenError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        let body = Json(ErrorBody {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}
