//! Codescan Decoder Library
//!
//! Turns uploaded image bytes into barcode records. Two interchangeable backends
//! implement [`BarcodeDecoder`]:
//!
//! - [`LibraryDecoder`] recognizes QR codes in-process.
//! - [`CommandDecoder`] stages the image to a temporary file and runs an external
//!   command-line reader against it, bounded by a timeout.
//!
//! Backend failures are reported as [`DecodeFailure`] and collapsed into an empty
//! result by [`decode_or_empty`] at the HTTP boundary.

pub mod command;
pub mod factory;
pub mod library;
pub mod loader;
pub mod parse;
pub mod traits;

pub use command::CommandDecoder;
pub use factory::create_decoder;
pub use library::LibraryDecoder;
pub use loader::load_image;
pub use parse::{parse_line, parse_output};
pub use traits::{BarcodeDecoder, DecodeFailure, DecodeResult};

use codescan_core::Barcode;
use image::DynamicImage;

/// Run `decoder`, logging and swallowing any backend failure as "no barcodes".
pub async fn decode_or_empty(decoder: &dyn BarcodeDecoder, image: &DynamicImage) -> Vec<Barcode> {
    match decoder.decode(image).await {
        Ok(barcodes) => barcodes,
        Err(e) => {
            tracing::warn!(
                decoder = decoder.name(),
                error = %e,
                "Barcode decoder failed, reporting no barcodes"
            );
            Vec::new()
        }
    }
}
