//! Codescan API Library
//!
//! This crate provides the HTTP handlers, request extraction, middleware and
//! application setup for the barcode decoding service.

pub mod constants;
pub mod error;
pub mod extract;
mod handlers;
mod middleware;
pub mod setup;
pub mod state;
pub mod telemetry;

pub use error::HttpAppError;
pub use state::AppState;
