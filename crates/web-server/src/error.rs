use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] analytics::AnalyticsError),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Analytics(analytics_err) => {
                tracing::error!(error = ?analytics_err, "Analytics error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An error occurred while computing statistics".to_string(),
                )
            }
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };

        let body = Json(json!({ "success": false, "message": message }));
        (status, body).into_response()
    }
}
