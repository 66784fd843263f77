use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::collaborators::registration::RegistrationError;
use crate::matching::resolver::ResolveError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORE_UNAVAILABLE",
                    "District data is temporarily unavailable".to_string(),
                )
            }
            AppError::Registration(RegistrationError::MissingApiKey) => {
                tracing::error!("Registration proxy called without REGISTRATION_API_KEY");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "REGISTRATION_UNCONFIGURED",
                    "Registration is not configured".to_string(),
                )
            }
            AppError::Registration(e) => {
                tracing::error!("Registration proxy error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "REGISTRATION_ERROR",
                    format!("An error occurred while proxying request: {e}"),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<ResolveError> for AppError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::EmptyQuery => {
                AppError::Validation("districtQuery cannot be empty".to_string())
            }
            ResolveError::Store(e) => AppError::Store(e),
        }
    }
}
