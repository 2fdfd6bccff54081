//! Test fixtures: encoded images with and without barcodes.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgb, RgbImage};
use rxing::{BarcodeFormat, MultiFormatWriter, Writer};
use std::io::Cursor;

fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, format).expect("encode fixture");
    out.into_inner()
}

/// Plain white PNG with nothing to decode.
pub fn blank_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([255, 255, 255]));
    encode(&DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

/// Render `contents` as `format`, surrounded by a white border.
pub fn symbol_image(contents: &str, format: BarcodeFormat, width: i32, height: i32) -> DynamicImage {
    const BORDER: u32 = 40;

    let matrix = MultiFormatWriter
        .encode(contents, &format, width, height)
        .expect("contents can be encoded");
    let (w, h) = (matrix.getWidth(), matrix.getHeight());

    let gray = GrayImage::from_fn(w + 2 * BORDER, h + 2 * BORDER, |x, y| {
        let inside = x >= BORDER && y >= BORDER && x < w + BORDER && y < h + BORDER;
        if inside && matrix.get(x - BORDER, y - BORDER) {
            Luma([0])
        } else {
            Luma([255])
        }
    });
    DynamicImage::ImageLuma8(gray)
}

pub fn qr_image(payload: &str) -> DynamicImage {
    symbol_image(payload, BarcodeFormat::QR_CODE, 264, 264)
}

pub fn qr_png(payload: &str) -> Vec<u8> {
    encode(&qr_image(payload), ImageFormat::Png)
}

pub fn qr_jpeg(payload: &str) -> Vec<u8> {
    encode(
        &DynamicImage::ImageRgb8(qr_image(payload).to_rgb8()),
        ImageFormat::Jpeg,
    )
}

pub fn ean13_png(digits: &str) -> Vec<u8> {
    encode(
        &symbol_image(digits, BarcodeFormat::EAN_13, 380, 120),
        ImageFormat::Png,
    )
}

pub fn code128_png(text: &str) -> Vec<u8> {
    encode(
        &symbol_image(text, BarcodeFormat::CODE_128, 400, 120),
        ImageFormat::Png,
    )
}

pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
