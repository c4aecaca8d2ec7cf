//! Error types for the API layer.
//!
//! [`ApiError`] can be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. Engine
//! errors map by [`ErrorKind`]:
//!
//! | Kind | Status |
//! |------|--------|
//! | `Validation` | 400 |
//! | `NotFound` | 404 |
//! | `Persistence`, `Configuration` | 500 |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use galaxies_core::{ErrorKind, TradeError};

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An engine operation failed.
    #[error(transparent)]
    Trade(#[from] TradeError),

    /// A UUID could not be parsed from the request.
    #[error("invalid UUID: {0}")]
    InvalidUuid(String),

    /// The request was well-formed JSON but semantically invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Trade(e) => match e.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Persistence | ErrorKind::Configuration => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::InvalidUuid(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use galaxies_core::StoreError;

    use super::*;

    #[test]
    fn kinds_map_to_statuses() {
        assert_eq!(
            ApiError::from(TradeError::FuelTanksFull).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(TradeError::PlayerNotOnline).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(TradeError::Persistence(StoreError::Backend(String::from("down"))))
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::InvalidUuid(String::from("x")).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
