//! HTTP-level tests for `ConverterClient` against a wiremock server.
//!
//! Each test mounts exactly the endpoint it expects with `.expect(1)`, so a
//! request routed anywhere else fails the test when the server is dropped.

use doc_converter::{
    ClientConfig, ConversionRequest, ConvertError, ConverterClient, InputFormat, InputTab,
    Orchestrator, OutputFormat, UploadFile,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn client_for(server: &MockServer) -> ConverterClient {
    let config = match ClientConfig::builder().base_url(server.uri()).build() {
        Ok(c) => c,
        Err(e) => panic!("config: {e}"),
    };
    match ConverterClient::new(config) {
        Ok(c) => c,
        Err(e) => panic!("client: {e}"),
    }
}

async fn mount_ok(server: &MockServer, endpoint: &str, body: &[u8], content_type: &str) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_vec(), content_type))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_error(server: &MockServer, endpoint: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn md_file() -> UploadFile {
    UploadFile::new("report.md", b"# Report\n".to_vec())
}

// ── Routing ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn markdown_to_pdf_sends_json_and_returns_body_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/convert/markdown/pdf"))
        .and(body_json(json!({ "markdown": "# Hi" })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"%PDF-1.7".to_vec(), "application/pdf"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .convert(&ConversionRequest::text("# Hi", InputFormat::Markdown))
        .await
        .unwrap();

    assert_eq!(result.bytes, b"%PDF-1.7");
    assert_eq!(result.content_type.as_deref(), Some("application/pdf"));
    assert!(!result.is_archive());
}

#[tokio::test]
async fn html_to_pdf_routes_to_html_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/convert/html/pdf"))
        .and(body_json(json!({ "html": "<h1>Hi</h1>" })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"pdf".to_vec(), "application/pdf"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .convert(&ConversionRequest::text("<h1>Hi</h1>", InputFormat::Html))
        .await
        .unwrap();
    assert_eq!(result.bytes, b"pdf");
}

#[tokio::test]
async fn markdown_to_image_sends_format_and_dimensions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/convert/markdown/image"))
        .and(body_json(json!({
            "markdown": "# Hi",
            "image_format": "png",
            "width": 800,
            "height": 600,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"\x89PNG".to_vec(), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let request = ConversionRequest::text("# Hi", InputFormat::Markdown)
        .output_format(OutputFormat::Png)
        .dimensions(800, 600);
    let result = client_for(&server).convert(&request).await.unwrap();
    assert_eq!(result.bytes, b"\x89PNG");
    assert_eq!(result.content_type.as_deref(), Some("image/png"));
}

#[tokio::test]
async fn html_to_image_uses_default_dimensions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/convert/html/image"))
        .and(body_json(json!({
            "html": "<p>x</p>",
            "image_format": "jpg",
            "width": 1275,
            "height": 1650,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"jpg".to_vec(), "image/jpeg"))
        .expect(1)
        .mount(&server)
        .await;

    let request =
        ConversionRequest::text("<p>x</p>", InputFormat::Html).output_format(OutputFormat::Jpg);
    let result = client_for(&server).convert(&request).await.unwrap();
    assert_eq!(result.bytes, b"jpg");
}

#[tokio::test]
async fn file_to_pdf_sends_multipart_file() {
    let server = MockServer::start().await;
    mount_ok(&server, "/convert/file", b"pdf", "application/pdf").await;

    let result = client_for(&server)
        .convert(&ConversionRequest::file(md_file()))
        .await
        .unwrap();
    assert_eq!(result.bytes, b"pdf");

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 1);
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("multipart/form-data"), "got {content_type}");
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""), "body: {body}");
    assert!(body.contains("filename=\"report.md\""), "body: {body}");
    assert!(body.contains("# Report"), "body: {body}");
    assert!(!body.contains("image_format"), "pdf upload must not send image fields");
}

#[tokio::test]
async fn file_to_image_sends_fields_and_detects_archive() {
    let server = MockServer::start().await;
    mount_ok(&server, "/convert/file/image", b"PK\x03\x04", "application/zip").await;

    let request = ConversionRequest::file(md_file())
        .output_format(OutputFormat::Png)
        .dimensions(1024, 768);
    let result = client_for(&server).convert(&request).await.unwrap();
    assert!(result.is_archive());

    let requests = server.received_requests().await.unwrap_or_default();
    let body = String::from_utf8_lossy(&requests[0].body).to_string();
    for needle in [
        "name=\"file\"",
        "name=\"image_format\"",
        "png",
        "name=\"width\"",
        "1024",
        "name=\"height\"",
        "768",
    ] {
        assert!(body.contains(needle), "missing {needle:?} in {body}");
    }
}

#[tokio::test]
async fn empty_text_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .convert(&ConversionRequest::text("", InputFormat::Markdown))
        .await
        .unwrap_err();
    assert!(matches!(err, ConvertError::InvalidRequest(_)));
    assert_eq!(err.to_string(), "Either content or file must be provided");
}

// ── Error normalisation ──────────────────────────────────────────────────────

#[tokio::test]
async fn server_detail_is_surfaced_verbatim() {
    let cases = [
        ("/convert/markdown/pdf", ConversionRequest::text("# x", InputFormat::Markdown)),
        (
            "/convert/html/image",
            ConversionRequest::text("<p/>", InputFormat::Html).output_format(OutputFormat::Png),
        ),
        ("/convert/file", ConversionRequest::file(md_file())),
        (
            "/convert/file/image",
            ConversionRequest::file(md_file()).output_format(OutputFormat::Jpg),
        ),
    ];

    for (endpoint, request) in cases {
        let server = MockServer::start().await;
        mount_error(&server, endpoint, 500, json!({ "detail": "Failed to generate PDF" })).await;

        let err = client_for(&server).convert(&request).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate PDF", "endpoint {endpoint}");
        assert_eq!(err.status(), Some(500));
    }
}

#[tokio::test]
async fn missing_detail_falls_back_to_variant_default() {
    let cases = [
        (
            "/convert/markdown/pdf",
            ConversionRequest::text("# x", InputFormat::Markdown),
            "Failed to convert Markdown to PDF",
        ),
        (
            "/convert/html/pdf",
            ConversionRequest::text("<p/>", InputFormat::Html),
            "Failed to convert HTML to PDF",
        ),
        (
            "/convert/markdown/image",
            ConversionRequest::text("# x", InputFormat::Markdown).output_format(OutputFormat::Jpg),
            "Failed to convert Markdown to JPG",
        ),
        (
            "/convert/html/image",
            ConversionRequest::text("<p/>", InputFormat::Html).output_format(OutputFormat::Png),
            "Failed to convert HTML to PNG",
        ),
        (
            "/convert/file",
            ConversionRequest::file(md_file()),
            "Failed to convert file to PDF",
        ),
        (
            "/convert/file/image",
            ConversionRequest::file(md_file()).output_format(OutputFormat::Png),
            "Failed to convert file to PNG",
        ),
    ];

    for (endpoint, request, expected) in cases {
        let server = MockServer::start().await;
        mount_error(&server, endpoint, 400, json!({})).await;

        let err = client_for(&server).convert(&request).await.unwrap_err();
        assert_eq!(err.to_string(), expected, "endpoint {endpoint}");
        assert_eq!(err.status(), Some(400));
    }
}

#[tokio::test]
async fn non_json_error_body_uses_default() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/convert/html/pdf"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .convert(&ConversionRequest::text("<p/>", InputFormat::Html))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to convert HTML to PDF");
}

#[tokio::test]
async fn non_string_detail_uses_default() {
    let server = MockServer::start().await;
    mount_error(
        &server,
        "/convert/markdown/pdf",
        422,
        json!({ "detail": [{ "loc": ["body", "markdown"], "msg": "field required" }] }),
    )
    .await;

    let err = client_for(&server)
        .convert(&ConversionRequest::text("# x", InputFormat::Markdown))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to convert Markdown to PDF");
}

// ── Configured defaults ──────────────────────────────────────────────────────

#[tokio::test]
async fn configured_default_dimensions_reach_the_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/convert/markdown/image"))
        .and(body_json(json!({
            "markdown": "# Hi",
            "image_format": "png",
            "width": 640,
            "height": 480,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"png".to_vec(), "image/png"))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::builder()
        .base_url(server.uri())
        .default_width(640)
        .default_height(480)
        .build()
        .unwrap();
    let mut ui = Orchestrator::new(ConverterClient::new(config).unwrap());
    assert_eq!((ui.state().image_width, ui.state().image_height), (640, 480));

    ui.switch_tab(InputTab::Text);
    ui.set_text("# Hi");
    ui.select_format(OutputFormat::Png);
    ui.set_width("");
    ui.set_height("abc");
    ui.convert().await;
    assert!(ui.view().is_success(), "view: {:?}", ui.view());
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_returns_parsed_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client_for(&server).check_health().await.unwrap();
    assert_eq!(status.status.as_deref(), Some("healthy"));
}

#[tokio::test]
async fn health_accepts_any_json_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client_for(&server).check_health().await.unwrap();
    assert_eq!(status.status, None);
    assert_eq!(status.extra.get("ok"), Some(&json!(true)));
}

#[tokio::test]
async fn healthy_server_without_status_field_shows_no_banner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut ui = Orchestrator::new(client_for(&server));
    assert!(ui.init().await);
    assert!(ui.view().is_idle());
}

#[tokio::test]
async fn non_json_health_body_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).check_health().await.unwrap_err();
    assert_eq!(err.to_string(), "API health check failed");
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn health_failure_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).check_health().await.unwrap_err();
    assert_eq!(err.to_string(), "API health check failed");
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    drop(server);

    let err = client.check_health().await.unwrap_err();
    assert!(matches!(err, ConvertError::Transport(_)), "got {err:?}");
}
