//! Application state shared by all handlers.

use codescan_core::Config;
use codescan_decoder::BarcodeDecoder;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Active decoder backend, chosen once at startup and never mutated.
    pub decoder: Arc<dyn BarcodeDecoder>,
}

impl AppState {
    pub fn new(config: Config, decoder: Arc<dyn BarcodeDecoder>) -> Self {
        Self { config, decoder }
    }
}
