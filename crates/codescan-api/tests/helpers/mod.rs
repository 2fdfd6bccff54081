//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p codescan-api`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use codescan_api::constants::DECODE_BARCODE_PATH;
use codescan_api::setup::routes;
use codescan_api::state::AppState;
use codescan_core::Config;
use codescan_decoder::{BarcodeDecoder, LibraryDecoder};
use std::sync::Arc;

pub const DECODE_PATH: &str = DECODE_BARCODE_PATH;

/// Configuration built only from `vars`, ignoring the process environment.
pub fn config_with(vars: &[(&str, &str)]) -> Config {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(move |key| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test configuration should parse")
}

pub fn test_server_with(config: Config, decoder: Arc<dyn BarcodeDecoder>) -> TestServer {
    let state = Arc::new(AppState::new(config.clone(), decoder));
    let app = routes::setup_routes(&config, state).expect("Failed to set up routes");
    TestServer::new(app.into_make_service()).expect("Failed to create test server")
}

/// Server backed by the in-process decoder and default configuration.
pub fn setup_test_server() -> TestServer {
    test_server_with(config_with(&[]), Arc::new(LibraryDecoder::new()))
}
