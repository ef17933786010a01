use crate::utils::error::RsvpError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Bridges domain errors to HTTP responses.
#[derive(Debug)]
pub struct WebError(pub RsvpError);

impl From<RsvpError> for WebError {
    fn from(error: RsvpError) -> Self {
        Self(error)
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RsvpError::QuotaExceeded { .. } => StatusCode::BAD_REQUEST,
            RsvpError::InvalidConfigValueError { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        (status, self.0.to_string()).into_response()
    }
}
