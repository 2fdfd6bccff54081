//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>` and use `AppError` for
//! failures, so every client error renders the same `{"success":false,"error":..}`
//! envelope and is logged at the level the variant declares.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use codescan_core::{AppError, DecodeResponse, ErrorMetadata, LogLevel};

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from codescan-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, code, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, code, "Request rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type, code, "Request rejected");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status =
            StatusCode::from_u16(app_error.http_status_code()).unwrap_or(StatusCode::BAD_REQUEST);

        log_error(app_error);

        (
            status,
            Json(DecodeResponse::error(app_error.client_message())),
        )
            .into_response()
    }
}
