//! Codescan Core Library
//!
//! This crate provides the domain models, error types and configuration shared by the
//! decoder backends and the HTTP API.

pub mod config;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, DecoderBackend, LogFormat};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{Barcode, DecodeResponse};
