//! In-process decoder backed by the `rxing` multi-format reader
//!
//! 1D (EAN, UPC, Code 128, ...) and 2D (QR, Data Matrix, PDF417, ...) symbols are
//! recognized in one pass. Symbology names follow zbar, which is what clients of the
//! external-command backend already receive.

use crate::traits::{BarcodeDecoder, DecodeFailure, DecodeResult};
use async_trait::async_trait;
use codescan_core::Barcode;
use image::{DynamicImage, GrayImage};
use rxing::{BarcodeFormat, Exceptions};

#[derive(Debug, Default, Clone, Copy)]
pub struct LibraryDecoder;

impl LibraryDecoder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BarcodeDecoder for LibraryDecoder {
    fn name(&self) -> &'static str {
        "library"
    }

    #[tracing::instrument(skip_all, fields(decoder = "library"))]
    async fn decode(&self, image: &DynamicImage) -> DecodeResult<Vec<Barcode>> {
        let gray = image.to_luma8();

        // Detection is CPU bound, keep it off the async workers.
        tokio::task::spawn_blocking(move || scan_luma(gray))
            .await
            .map_err(|e| DecodeFailure::Join(e.to_string()))?
    }
}

/// Find and decode every symbol in a grayscale image, in detection order.
///
/// An image without any symbol is `Ok(vec![])`.
pub fn scan_luma(gray: GrayImage) -> DecodeResult<Vec<Barcode>> {
    let (width, height) = gray.dimensions();

    match rxing::helpers::detect_multiple_in_luma(gray.into_raw(), width, height) {
        Ok(results) => Ok(results
            .iter()
            .map(|r| Barcode::new(symbology_name(r.getBarcodeFormat()), r.getText()))
            .collect()),
        Err(Exceptions::NotFoundException(_)) => Ok(Vec::new()),
        Err(e) => Err(DecodeFailure::Recognition(e.to_string())),
    }
}

/// zbar-style name for an rxing format.
pub fn symbology_name(format: &BarcodeFormat) -> String {
    let name = match format {
        BarcodeFormat::QR_CODE => "QRCODE",
        BarcodeFormat::EAN_13 => "EAN13",
        BarcodeFormat::EAN_8 => "EAN8",
        BarcodeFormat::UPC_A => "UPCA",
        BarcodeFormat::UPC_E => "UPCE",
        BarcodeFormat::CODE_128 => "CODE128",
        BarcodeFormat::CODE_93 => "CODE93",
        BarcodeFormat::CODE_39 => "CODE39",
        BarcodeFormat::CODABAR => "CODABAR",
        BarcodeFormat::ITF => "I25",
        BarcodeFormat::PDF_417 => "PDF417",
        BarcodeFormat::RSS_14 => "DATABAR",
        BarcodeFormat::RSS_EXPANDED => "DATABAR-EXP",
        BarcodeFormat::DATA_MATRIX => "DATAMATRIX",
        BarcodeFormat::AZTEC => "AZTEC",
        BarcodeFormat::MAXICODE => "MAXICODE",
        BarcodeFormat::MICRO_QR_CODE => "MICROQR",
        other => return other.to_string().to_uppercase().replace(' ', ""),
    };
    name.to_string()
}
