// Application error type and conversions, so route handlers can use `?`
// and still produce consistent HTTP responses.

use crate::marketplace_api::MarketplaceError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

#[derive(Debug)]
pub enum AppError {
    InternalServerError(anyhow::Error),
    NotFound(String),
}

// Implement conversion from anyhow::Error for easier error propagation
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error)
    }
}

// Data-access failures map onto the two response shapes we care about:
// a missing vehicle renders 404, anything else is an opaque 500.
impl From<MarketplaceError> for AppError {
    fn from(error: MarketplaceError) -> Self {
        match error {
            MarketplaceError::NotFound(id) => {
                AppError::NotFound(format!("Vehicle '{}' was not found", id))
            }
            other => AppError::InternalServerError(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::InternalServerError(e) => {
                // Log the detailed error here; don't expose internals to the client.
                tracing::error!("Internal server error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong".to_string())
            }
            AppError::NotFound(message) => {
                tracing::info!("Not found: {}", message);
                (StatusCode::NOT_FOUND, message)
            }
        };

        (status, error_message).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
