//! Request extraction for the decode endpoint.
//!
//! An image arrives either as a multipart upload (field `image`) or as a JSON body
//! carrying `image_base64`. The body's content type decides which one is read, so a
//! multipart request never has its body inspected as JSON.

use crate::constants::{IMAGE_BASE64_FIELD, IMAGE_FIELD};
use crate::error::HttpAppError;
use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use codescan_core::AppError;
use serde_json::Value;

const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Image exceeds the maximum allowed upload size";

/// Where the request's image came from, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// Raw bytes from the multipart `image` field
    Upload(Bytes),
    /// Text from the JSON `image_base64` field
    Base64(String),
}

impl ImageSource {
    /// Resolve the source to raw image bytes.
    pub fn into_bytes(self) -> Result<Bytes, AppError> {
        match self {
            ImageSource::Upload(bytes) if bytes.is_empty() => {
                Err(AppError::InvalidImage("uploaded image is empty".to_string()))
            }
            ImageSource::Upload(bytes) => Ok(bytes),
            ImageSource::Base64(text) => decode_base64(&text).map(Bytes::from),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ImageSource::Upload(_) => "multipart",
            ImageSource::Base64(_) => "base64",
        }
    }
}

impl<S> FromRequest<S> for ImageSource
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mime = mime_essence(req.headers());

        if mime == "multipart/form-data" {
            let multipart = Multipart::from_request(req, state).await.map_err(|e| {
                tracing::debug!(error = %e, "Rejected multipart request");
                AppError::NoImageProvided
            })?;
            return read_image_field(multipart)
                .await
                .map(ImageSource::Upload)
                .map_err(HttpAppError::from);
        }

        if is_json(&mime) {
            let body = Bytes::from_request(req, state).await.map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge(PAYLOAD_TOO_LARGE_MESSAGE.to_string())
                } else {
                    tracing::debug!(error = %e, "Failed to read request body");
                    AppError::NoImageProvided
                }
            })?;
            return source_from_json(&body).map_err(HttpAppError::from);
        }

        Err(AppError::NoImageProvided.into())
    }
}

/// Lowercased media type without parameters, or empty when absent.
fn mime_essence(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|v| v.trim().to_ascii_lowercase())
        .unwrap_or_default()
}

/// `application/json` or any `application/*+json` type.
fn is_json(mime: &str) -> bool {
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Read the first `image` field, ignoring any others.
async fn read_image_field(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(IMAGE_FIELD) {
            return field.bytes().await.map_err(multipart_error);
        }
    }
    Err(AppError::NoImageProvided)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(PAYLOAD_TOO_LARGE_MESSAGE.to_string())
    } else {
        tracing::debug!(error = %err, "Failed to read multipart body");
        AppError::NoImageProvided
    }
}

fn source_from_json(body: &[u8]) -> Result<ImageSource, AppError> {
    let Ok(value) = serde_json::from_slice::<Value>(body) else {
        return Err(AppError::NoImageProvided);
    };

    match value.get(IMAGE_BASE64_FIELD) {
        None => Err(AppError::NoImageProvided),
        Some(Value::String(text)) => Ok(ImageSource::Base64(text.clone())),
        Some(other) => Err(AppError::InvalidBase64(format!(
            "expected a string, got {}",
            json_type(other)
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decode standard-alphabet base64, accepting an optional `data:<mime>;base64,` prefix
/// and ASCII whitespace anywhere in the payload.
pub fn decode_base64(input: &str) -> Result<Vec<u8>, AppError> {
    let payload = strip_data_url(input.trim());
    let compact: String = payload
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| AppError::InvalidBase64(e.to_string()))?;

    if bytes.is_empty() {
        return Err(AppError::InvalidBase64("payload is empty".to_string()));
    }
    Ok(bytes)
}

fn strip_data_url(input: &str) -> &str {
    let is_data_url = input
        .get(..5)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("data:"));
    if is_data_url {
        if let Some(idx) = input.find(";base64,") {
            return &input[idx + ";base64,".len()..];
        }
    }
    input
}
