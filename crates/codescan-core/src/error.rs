//! Error types module
//!
//! All request-level failures are unified under the `AppError` enum. Each variant
//! self-describes how it is presented over HTTP through the `ErrorMetadata` trait.
//!
//! Decoder backend failures are deliberately absent: they never reach the client and
//! are collapsed into an empty result list by the decoder crate.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "INVALID_IMAGE")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No image provided")]
    NoImageProvided,

    #[error("Invalid base64 image data: {0}")]
    InvalidBase64(String),

    #[error("Invalid image data: {0}")]
    InvalidImage(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),
}

/// Static metadata for each variant: (http_status, error_code, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::NoImageProvided => (400, "NO_IMAGE_PROVIDED", LogLevel::Debug),
        AppError::InvalidBase64(_) => (400, "INVALID_BASE64", LogLevel::Debug),
        AppError::InvalidImage(_) => (400, "INVALID_IMAGE", LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", LogLevel::Warn),
    }
}

impl AppError {
    /// Get the error type name for logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::NoImageProvided => "NoImageProvided",
            AppError::InvalidBase64(_) => "InvalidBase64",
            AppError::InvalidImage(_) => "InvalidImage",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::NoImageProvided => "No image provided".to_string(),
            AppError::InvalidBase64(_) => "Invalid base64 image data".to_string(),
            AppError::InvalidImage(_) => "Invalid image data".to_string(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
        }
    }
}
