use crate::{BarcodeDecoder, CommandDecoder, LibraryDecoder};
use codescan_core::{Config, DecoderBackend};
use std::sync::Arc;

/// Create the decoder backend selected by configuration
pub async fn create_decoder(config: &Config) -> Arc<dyn BarcodeDecoder> {
    match config.decoder_backend() {
        DecoderBackend::Library => {
            tracing::info!(decoder = "library", "Using in-process QR decoder");
            Arc::new(LibraryDecoder::new())
        }
        DecoderBackend::Command => {
            let decoder = CommandDecoder::from_config(config);

            // A missing binary is not fatal: requests will simply report no barcodes.
            match decoder.probe().await {
                Ok(()) => tracing::info!(
                    decoder = "command",
                    command = %decoder.command(),
                    timeout_secs = decoder.timeout().as_secs(),
                    "Using external decoder command"
                ),
                Err(e) => tracing::warn!(
                    decoder = "command",
                    command = %decoder.command(),
                    error = %e,
                    "Decoder command is not available; decode requests will return no barcodes"
                ),
            }

            Arc::new(decoder)
        }
    }
}
