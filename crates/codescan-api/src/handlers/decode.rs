use crate::error::HttpAppError;
use crate::extract::ImageSource;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use codescan_core::{AppError, DecodeResponse};
use codescan_decoder::{decode_or_empty, load_image};
use std::sync::Arc;

/// Decode every barcode found in the submitted image.
///
/// Backend failures are not client errors: they are logged and reported as an
/// empty result.
#[tracing::instrument(skip_all, fields(source = source.kind(), decoder = state.decoder.name()))]
pub async fn decode_barcode(
    State(state): State<Arc<AppState>>,
    source: ImageSource,
) -> Result<impl IntoResponse, HttpAppError> {
    let bytes = source.into_bytes()?;

    // Raster decoding is CPU bound, keep it off the async workers.
    let image = tokio::task::spawn_blocking(move || load_image(&bytes))
        .await
        .map_err(|e| AppError::InvalidImage(e.to_string()))?
        .map_err(|e| AppError::InvalidImage(e.to_string()))?;

    let barcodes = decode_or_empty(state.decoder.as_ref(), &image).await;

    tracing::info!(
        count = barcodes.len(),
        width = image.width(),
        height = image.height(),
        "Barcodes detected"
    );

    Ok(Json(DecodeResponse::ok(barcodes)))
}
