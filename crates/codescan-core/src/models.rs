//! Request and response models for the decode endpoint.

use serde::{Deserialize, Serialize};

/// Symbology name used when a decoder cannot tell which one it saw.
pub const UNKNOWN_SYMBOLOGY: &str = "Unknown";

/// A single decoded barcode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Barcode {
    /// Symbology name, e.g. `QRCODE` or `EAN13`
    #[serde(rename = "type")]
    pub kind: String,
    /// Decoded payload
    pub data: String,
}

impl Barcode {
    pub fn new(kind: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: data.into(),
        }
    }

    pub fn unknown(data: impl Into<String>) -> Self {
        Self::new(UNKNOWN_SYMBOLOGY, data)
    }
}

/// JSON envelope returned by `POST /decode-barcode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DecodeResponse {
    Success { success: bool, barcodes: Vec<Barcode> },
    Failure { success: bool, error: String },
}

impl DecodeResponse {
    pub fn ok(barcodes: Vec<Barcode>) -> Self {
        DecodeResponse::Success {
            success: true,
            barcodes,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        DecodeResponse::Failure {
            success: false,
            error: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DecodeResponse::Success { success: true, .. })
    }
}
