//! Unified API error handling.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("insufficient stock for {product}{}: {available} available", .variant.as_deref().map(|v| format!(" ({v})")).unwrap_or_default())]
    InsufficientStock {
        product: String,
        variant: Option<String>,
        available: i32,
    },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::InsufficientStock { .. } | ApiError::Validation(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database error".to_string())
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        ApiError::Validation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_mapping() {
        assert_eq!(
            ApiError::NotFound("product".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        let err = ApiError::InsufficientStock {
            product: "Oud Royal".into(),
            variant: Some("10ml".into()),
            available: 2,
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Internal("no row".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn insufficient_stock_message_names_product_and_variant() {
        let err = ApiError::InsufficientStock {
            product: "Oud Royal".into(),
            variant: Some("10ml".into()),
            available: 2,
        };
        assert_eq!(err.to_string(), "insufficient stock for Oud Royal (10ml): 2 available");

        let err = ApiError::InsufficientStock {
            product: "Oud Royal".into(),
            variant: None,
            available: 0,
        };
        assert_eq!(err.to_string(), "insufficient stock for Oud Royal: 0 available");
    }
}
