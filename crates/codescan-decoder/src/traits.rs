//! Decoder abstraction trait
//!
//! This module defines the `BarcodeDecoder` trait that both backends implement, so the
//! HTTP layer never needs to know which one is active.

use async_trait::async_trait;
use codescan_core::Barcode;
use image::DynamicImage;
use std::time::Duration;
use thiserror::Error;

/// Reasons a decoder backend could not produce a result.
///
/// These never reach the client; see [`crate::decode_or_empty`].
#[derive(Debug, Error)]
pub enum DecodeFailure {
    #[error("Failed to stage temporary image file: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("Failed to encode image for the decoder command: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Failed to run decoder command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Decoder command timed out after {0:?}")]
    Timeout(Duration),

    #[error("Decoder command exited with {status}: {stderr}")]
    ExitStatus { status: String, stderr: String },

    #[error("Barcode recognition failed: {0}")]
    Recognition(String),

    #[error("Decoder task failed: {0}")]
    Join(String),
}

/// Result type for decoder operations
pub type DecodeResult<T> = Result<T, DecodeFailure>;

/// Barcode decoder abstraction
///
/// Implementations return one [`Barcode`] per symbol found, in the order the
/// underlying recognizer reports them. An image without barcodes is `Ok(vec![])`,
/// never an error.
#[async_trait]
pub trait BarcodeDecoder: Send + Sync {
    /// Short backend name used in logs and the health endpoint
    fn name(&self) -> &'static str;

    /// Decode every barcode visible in `image`
    async fn decode(&self, image: &DynamicImage) -> DecodeResult<Vec<Barcode>>;
}
