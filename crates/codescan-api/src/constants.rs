//! Route paths and HTTP-level constants

pub const DECODE_BARCODE_PATH: &str = "/decode-barcode";
pub const HEALTH_PATH: &str = "/health";

/// Multipart form field carrying the uploaded image
pub const IMAGE_FIELD: &str = "image";

/// JSON body field carrying the base64-encoded image
pub const IMAGE_BASE64_FIELD: &str = "image_base64";

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";
