//! Decode endpoint integration tests.
//!
//! Run with: `cargo test -p codescan-api --test decode_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;
use codescan_decoder::LibraryDecoder;
use helpers::fixtures::{blank_png, code128_png, ean13_png, qr_jpeg, qr_png, to_base64};
use helpers::{config_with, setup_test_server, test_server_with, DECODE_PATH};
use serde_json::{json, Value};
use std::sync::Arc;

fn image_form(field: &str, data: Vec<u8>) -> MultipartForm {
    let part = Part::bytes(Bytes::from(data))
        .file_name("upload.png")
        .mime_type("image/png");
    MultipartForm::new().add_part(field.to_string(), part)
}

#[tokio::test]
async fn test_blank_image_returns_empty_list() {
    let server = setup_test_server();

    let response = server
        .post(DECODE_PATH)
        .json(&json!({ "image_base64": to_base64(&blank_png(64, 64)) }))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": true, "barcodes": [] })
    );
}

#[tokio::test]
async fn test_qr_round_trip_via_base64() {
    let server = setup_test_server();

    let response = server
        .post(DECODE_PATH)
        .json(&json!({ "image_base64": to_base64(&qr_png("HELLO-123")) }))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": true,
            "barcodes": [{ "type": "QRCODE", "data": "HELLO-123" }]
        })
    );
}

#[tokio::test]
async fn test_qr_round_trip_via_multipart() {
    let server = setup_test_server();

    let response = server
        .post(DECODE_PATH)
        .multipart(image_form("image", qr_png("https://example.com/item/42")))
        .await;

    assert_eq!(response.status_code(), 200);
    let body = response.json::<Value>();
    assert_eq!(body["success"], json!(true));
    assert_eq!(
        body["barcodes"],
        json!([{ "type": "QRCODE", "data": "https://example.com/item/42" }])
    );
}

#[tokio::test]
async fn test_jpeg_upload_is_decoded() {
    let server = setup_test_server();

    let response = server
        .post(DECODE_PATH)
        .multipart(image_form("image", qr_jpeg("JPEG-7")))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>()["barcodes"][0],
        json!({ "type": "QRCODE", "data": "JPEG-7" })
    );
}

#[tokio::test]
async fn test_ean13_round_trip() {
    let server = setup_test_server();

    let response = server
        .post(DECODE_PATH)
        .json(&json!({ "image_base64": to_base64(&ean13_png("4006381333931")) }))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "success": true,
            "barcodes": [{ "type": "EAN13", "data": "4006381333931" }]
        })
    );
}

#[tokio::test]
async fn test_code128_round_trip_via_multipart() {
    let server = setup_test_server();

    let response = server
        .post(DECODE_PATH)
        .multipart(image_form("image", code128_png("CODESCAN-42")))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>()["barcodes"],
        json!([{ "type": "CODE128", "data": "CODESCAN-42" }])
    );
}

#[tokio::test]
async fn test_data_url_prefix_is_accepted() {
    let server = setup_test_server();
    let encoded = format!("data:image/png;base64,{}", to_base64(&qr_png("DATA-URL")));

    let response = server
        .post(DECODE_PATH)
        .json(&json!({ "image_base64": encoded }))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(
        response.json::<Value>()["barcodes"],
        json!([{ "type": "QRCODE", "data": "DATA-URL" }])
    );
}

#[tokio::test]
async fn test_missing_image_is_rejected() {
    let server = setup_test_server();

    // No body at all
    let response = server.post(DECODE_PATH).await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "No image provided" })
    );

    // JSON without the field
    let response = server
        .post(DECODE_PATH)
        .json(&json!({ "image": "aGVsbG8=" }))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], json!("No image provided"));

    // Multipart without an `image` field
    let response = server
        .post(DECODE_PATH)
        .multipart(image_form("file", blank_png(8, 8)))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], json!("No image provided"));

    // Unsupported content type
    let response = server
        .post(DECODE_PATH)
        .text(to_base64(&blank_png(8, 8)))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], json!("No image provided"));
}

#[tokio::test]
async fn test_malformed_json_is_no_image() {
    let server = setup_test_server();

    let response = server
        .post(DECODE_PATH)
        .bytes(Bytes::from_static(b"{\"image_base64\": "))
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], json!("No image provided"));
}

#[tokio::test]
async fn test_invalid_base64_is_rejected() {
    let server = setup_test_server();

    for payload in [json!("not-base64!!"), json!(""), json!(12345), json!(null)] {
        let response = server
            .post(DECODE_PATH)
            .json(&json!({ "image_base64": payload }))
            .await;

        assert_eq!(response.status_code(), 400, "payload {}", payload);
        assert_eq!(
            response.json::<Value>(),
            json!({ "success": false, "error": "Invalid base64 image data" })
        );
    }
}

#[tokio::test]
async fn test_undecodable_bytes_are_rejected() {
    let server = setup_test_server();

    let response = server
        .post(DECODE_PATH)
        .json(&json!({ "image_base64": to_base64(b"definitely not an image") }))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(
        response.json::<Value>(),
        json!({ "success": false, "error": "Invalid image data" })
    );

    let response = server
        .post(DECODE_PATH)
        .multipart(image_form("image", b"GIF89a-truncated".to_vec()))
        .await;
    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], json!("Invalid image data"));
}

#[tokio::test]
async fn test_empty_upload_is_invalid_image() {
    let server = setup_test_server();

    let response = server
        .post(DECODE_PATH)
        .multipart(image_form("image", Vec::new()))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], json!("Invalid image data"));
}

#[tokio::test]
async fn test_oversized_body_is_rejected_with_envelope() {
    let server = test_server_with(
        config_with(&[("MAX_FILE_SIZE_MB", "1")]),
        Arc::new(LibraryDecoder::new()),
    );

    let response = server
        .post(DECODE_PATH)
        .json(&json!({ "image_base64": "A".repeat(2 * 1024 * 1024) }))
        .await;
    assert_eq!(response.status_code(), 413);
    assert_eq!(response.json::<Value>()["success"], json!(false));

    let response = server
        .post(DECODE_PATH)
        .multipart(image_form("image", vec![0u8; 2 * 1024 * 1024]))
        .await;
    assert_eq!(response.status_code(), 413);
    assert_eq!(response.json::<Value>()["success"], json!(false));
}

#[tokio::test]
async fn test_responses_are_json() {
    let server = setup_test_server();

    let ok = server
        .post(DECODE_PATH)
        .json(&json!({ "image_base64": to_base64(&blank_png(8, 8)) }))
        .await;
    let err = server.post(DECODE_PATH).await;

    for response in [ok, err] {
        let content_type = response.header("content-type");
        assert_eq!(content_type.to_str().unwrap(), "application/json");
    }
}
